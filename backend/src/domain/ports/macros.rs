//! Macro generating the error enums returned by driven ports.
//!
//! Every variant gets a snake_case constructor; struct-like variants accept
//! `impl Into<T>` for each field so call sites can pass `&str` messages.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* }) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                Self::$variant { $($field: $field.into()),* }
            }
        }
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum LedgerProbeError {
            Unreachable => "ledger unreachable",
            Rejected { reason: String } => "ledger rejected write: {reason}",
            Short { requested: u32, remaining: u32 } =>
                "requested {requested} with {remaining} left",
        }
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(LedgerProbeError::unreachable(), LedgerProbeError::Unreachable);
    }

    #[test]
    fn string_fields_accept_str() {
        let err = LedgerProbeError::rejected("locked");
        assert_eq!(err.to_string(), "ledger rejected write: locked");
    }

    #[test]
    fn numeric_fields_keep_their_types() {
        let err = LedgerProbeError::short(3_u32, 1_u32);
        assert_eq!(err.to_string(), "requested 3 with 1 left");
    }
}
