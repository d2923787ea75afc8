//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses or any other protocol-specific envelope. The business rejections
//! of the board (unknown entity, insufficient budget, outbid amount, invalid
//! request) each have their own [`ErrorCode`] so callers can branch on them.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::domain::TraceId;

/// Response header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// A referenced user or event does not exist.
    UnknownEntity,
    /// The vote amount exceeds the voter's remaining budget.
    InsufficientBudget,
    /// The offered bid does not strictly exceed the incumbent bid.
    AmountTooLow,
    /// The request is malformed, or an index or range is out of bounds.
    RequestNotValid,
    /// Concurrent writers kept invalidating the operation.
    Conflict,
    /// A backing store is temporarily unreachable.
    ServiceUnavailable,
    /// An unexpected error occurred inside the domain.
    InternalError,
}

/// Kind of entity referenced by an [`ErrorCode::UnknownEntity`] rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// A registered user.
    User,
    /// A nominated ranked event.
    Event,
}

impl EntityKind {
    /// Lower-case label used in messages and error details.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Event => "event",
        }
    }
}

/// Domain error payload.
///
/// # Examples
/// ```
/// use rsboard::domain::{Error, ErrorCode};
///
/// let err = Error::request_not_valid("invalid index");
/// assert_eq!(err.code(), ErrorCode::RequestNotValid);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Error {
    code: ErrorCode,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(alias = "trace_id")]
    trace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl Error {
    /// Create a new error.
    ///
    /// Captures the current trace identifier if one is in scope so the error
    /// payload is correlated automatically.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Correlation identifier captured when the error was raised.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Supplementary structured details.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach a trace identifier to the error.
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Attach structured details to the error.
    ///
    /// # Examples
    /// ```
    /// use rsboard::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::request_not_valid("bad").with_details(json!({ "field": "start" }));
    /// assert!(err.details().is_some());
    /// ```
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// A referenced user or event is missing.
    pub fn unknown_entity(kind: EntityKind, id: impl std::fmt::Display) -> Self {
        let id = id.to_string();
        Self::new(
            ErrorCode::UnknownEntity,
            format!("{} {id} does not exist", kind.as_str()),
        )
        .with_details(json!({ "entity": kind.as_str(), "id": id }))
    }

    /// A vote asked for more than the voter has left.
    pub fn insufficient_budget(requested: u32, remaining: u32) -> Self {
        Self::new(
            ErrorCode::InsufficientBudget,
            format!("vote of {requested} exceeds remaining budget of {remaining}"),
        )
        .with_details(json!({ "requested": requested, "remaining": remaining }))
    }

    /// A bid failed to beat the incumbent at its rank.
    pub fn amount_too_low(rank: u32, offered: u32, incumbent: u32) -> Self {
        Self::new(
            ErrorCode::AmountTooLow,
            format!("bid of {offered} does not exceed {incumbent} held at rank {rank}"),
        )
        .with_details(json!({ "rank": rank, "offered": offered, "incumbent": incumbent }))
    }

    /// Convenience constructor for [`ErrorCode::RequestNotValid`].
    pub fn request_not_valid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::RequestNotValid, message)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}
