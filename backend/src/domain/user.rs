//! Board users and their vote budgets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of characters in a user name.
pub const USER_NAME_MAX: usize = 8;
/// Youngest age accepted at registration.
pub const USER_AGE_MIN: u32 = 18;
/// Oldest age accepted at registration.
pub const USER_AGE_MAX: u32 = 100;
const PHONE_DIGITS: usize = 11;

/// Validation errors raised while building a [`UserProfile`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("user name must not be empty")]
    EmptyName,
    #[error("user name must be at most {max} characters")]
    NameTooLong { max: usize },
    #[error("gender must not be empty")]
    EmptyGender,
    #[error("age must be between {min} and {max}")]
    AgeOutOfRange { min: u32, max: u32 },
    #[error("email must look like local@domain")]
    InvalidEmail,
    #[error("phone must be 11 digits starting with 1")]
    InvalidPhone,
}

impl UserValidationError {
    /// Request field the failure refers to.
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyName | Self::NameTooLong { .. } => "userName",
            Self::EmptyGender => "gender",
            Self::AgeOutOfRange { .. } => "age",
            Self::InvalidEmail => "email",
            Self::InvalidPhone => "phone",
        }
    }
}

/// Stable user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Unvalidated registration fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfileDraft {
    pub name: String,
    pub gender: String,
    pub age: u32,
    pub email: String,
    pub phone: String,
}

/// Validated registration details.
///
/// ## Invariants
/// - `name` is non-empty and at most [`USER_NAME_MAX`] characters.
/// - `age` lies within [`USER_AGE_MIN`]..=[`USER_AGE_MAX`].
/// - `phone` is eleven ASCII digits starting with `1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    name: String,
    gender: String,
    age: u32,
    email: String,
    phone: String,
}

impl UserProfile {
    /// Validate a draft into a profile.
    ///
    /// # Examples
    /// ```
    /// use rsboard::domain::{UserProfile, UserProfileDraft};
    ///
    /// let profile = UserProfile::new(UserProfileDraft {
    ///     name: "ada".to_owned(),
    ///     gender: "female".to_owned(),
    ///     age: 36,
    ///     email: "ada@example.com".to_owned(),
    ///     phone: "18888888888".to_owned(),
    /// })
    /// .expect("valid profile");
    /// assert_eq!(profile.name(), "ada");
    /// ```
    pub fn new(draft: UserProfileDraft) -> Result<Self, UserValidationError> {
        let UserProfileDraft {
            name,
            gender,
            age,
            email,
            phone,
        } = draft;

        let name = name.trim().to_owned();
        if name.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        if name.chars().count() > USER_NAME_MAX {
            return Err(UserValidationError::NameTooLong {
                max: USER_NAME_MAX,
            });
        }
        let gender = gender.trim().to_owned();
        if gender.is_empty() {
            return Err(UserValidationError::EmptyGender);
        }
        if !(USER_AGE_MIN..=USER_AGE_MAX).contains(&age) {
            return Err(UserValidationError::AgeOutOfRange {
                min: USER_AGE_MIN,
                max: USER_AGE_MAX,
            });
        }
        if !is_plausible_email(&email) {
            return Err(UserValidationError::InvalidEmail);
        }
        if !is_valid_phone(&phone) {
            return Err(UserValidationError::InvalidPhone);
        }

        Ok(Self {
            name,
            gender,
            age,
            email,
            phone,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn gender(&self) -> &str {
        &self.gender
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        }
        None => false,
    }
}

fn is_valid_phone(phone: &str) -> bool {
    phone.len() == PHONE_DIGITS
        && phone.starts_with('1')
        && phone.bytes().all(|byte| byte.is_ascii_digit())
}

/// The remaining budget could not cover a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetShortfall {
    pub requested: u32,
    pub remaining: u32,
}

/// Registered board user.
///
/// The vote budget only ever shrinks, through [`User::debit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    profile: UserProfile,
    vote_budget: u32,
}

impl User {
    pub fn new(id: UserId, profile: UserProfile, vote_budget: u32) -> Self {
        Self {
            id,
            profile,
            vote_budget,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Remaining spendable vote weight.
    pub fn vote_budget(&self) -> u32 {
        self.vote_budget
    }

    /// Spend `amount` from the budget, returning what is left.
    ///
    /// # Examples
    /// ```
    /// # use rsboard::domain::{User, UserId, UserProfile, UserProfileDraft};
    /// # let profile = UserProfile::new(UserProfileDraft {
    /// #     name: "ada".to_owned(),
    /// #     gender: "female".to_owned(),
    /// #     age: 36,
    /// #     email: "ada@example.com".to_owned(),
    /// #     phone: "18888888888".to_owned(),
    /// # })
    /// # .expect("valid profile");
    /// let mut user = User::new(UserId::random(), profile, 10);
    /// assert_eq!(user.debit(1), Ok(9));
    /// assert!(user.debit(10).is_err());
    /// ```
    pub fn debit(&mut self, amount: u32) -> Result<u32, BudgetShortfall> {
        let remaining = self
            .vote_budget
            .checked_sub(amount)
            .ok_or(BudgetShortfall {
                requested: amount,
                remaining: self.vote_budget,
            })?;
        self.vote_budget = remaining;
        Ok(remaining)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for registration validation.

    use super::*;
    use rstest::{fixture, rstest};

    fn base_draft() -> UserProfileDraft {
        UserProfileDraft {
            name: "ada".to_owned(),
            gender: "female".to_owned(),
            age: 36,
            email: "ada@example.com".to_owned(),
            phone: "18888888888".to_owned(),
        }
    }

    #[fixture]
    fn draft() -> UserProfileDraft {
        base_draft()
    }

    #[rstest]
    fn accepts_valid_profile(draft: UserProfileDraft) {
        let profile = UserProfile::new(draft).expect("valid profile");
        assert_eq!(profile.email(), "ada@example.com");
    }

    #[rstest]
    #[case::blank_name(UserProfileDraft { name: "  ".to_owned(), ..base_draft() }, "userName")]
    #[case::long_name(UserProfileDraft { name: "abcdefghi".to_owned(), ..base_draft() }, "userName")]
    #[case::gender(UserProfileDraft { gender: String::new(), ..base_draft() }, "gender")]
    #[case::too_young(UserProfileDraft { age: 17, ..base_draft() }, "age")]
    #[case::too_old(UserProfileDraft { age: 101, ..base_draft() }, "age")]
    #[case::email(UserProfileDraft { email: "ada.example.com".to_owned(), ..base_draft() }, "email")]
    #[case::email_two_ats(UserProfileDraft { email: "a@b@c".to_owned(), ..base_draft() }, "email")]
    #[case::phone_prefix(UserProfileDraft { phone: "28888888888".to_owned(), ..base_draft() }, "phone")]
    #[case::phone_length(UserProfileDraft { phone: "1888".to_owned(), ..base_draft() }, "phone")]
    fn rejects_invalid_fields(#[case] input: UserProfileDraft, #[case] field: &str) {
        let error = UserProfile::new(input).expect_err("invalid profile");
        assert_eq!(error.field(), field);
    }

    #[rstest]
    fn debit_refuses_overdraft_and_keeps_budget(draft: UserProfileDraft) {
        let profile = UserProfile::new(draft).expect("valid profile");
        let mut user = User::new(UserId::random(), profile, 3);

        let shortfall = user.debit(4).expect_err("overdraft");

        assert_eq!(
            shortfall,
            BudgetShortfall {
                requested: 4,
                remaining: 3
            }
        );
        assert_eq!(user.vote_budget(), 3);
    }

    #[rstest]
    fn debit_can_spend_entire_budget(draft: UserProfileDraft) {
        let profile = UserProfile::new(draft).expect("valid profile");
        let mut user = User::new(UserId::random(), profile, 3);

        assert_eq!(user.debit(3), Ok(0));
    }
}
