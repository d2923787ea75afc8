//! Nominated events ("rs events") and their vote tallies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::UserId;

/// Validation errors raised while nominating an event.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventValidationError {
    #[error("event name must not be empty")]
    EmptyName,
    #[error("event keyword must not be empty")]
    EmptyKeyword,
}

impl EventValidationError {
    /// Request field the failure refers to.
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyName => "eventName",
            Self::EmptyKeyword => "keyword",
        }
    }
}

/// Stable event identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EventId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Unvalidated event fields, either from a nomination or from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEventDraft {
    pub id: EventId,
    pub name: String,
    pub keyword: String,
    pub owner: UserId,
    pub vote_tally: u32,
}

/// An event competing for a place in the ranking.
///
/// ## Invariants
/// - `name` is non-empty; it is the key the composed ranking deduplicates on.
/// - `vote_tally` only grows, through [`RankedEvent::credit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEvent {
    id: EventId,
    name: String,
    keyword: String,
    owner: UserId,
    vote_tally: u32,
}

impl RankedEvent {
    /// Validate a draft into an event.
    pub fn new(draft: RankedEventDraft) -> Result<Self, EventValidationError> {
        let RankedEventDraft {
            id,
            name,
            keyword,
            owner,
            vote_tally,
        } = draft;

        let name = name.trim().to_owned();
        if name.is_empty() {
            return Err(EventValidationError::EmptyName);
        }
        let keyword = keyword.trim().to_owned();
        if keyword.is_empty() {
            return Err(EventValidationError::EmptyKeyword);
        }

        Ok(Self {
            id,
            name,
            keyword,
            owner,
            vote_tally,
        })
    }

    /// Nominate a fresh event with an empty tally.
    ///
    /// # Examples
    /// ```
    /// use rsboard::domain::{EventId, RankedEvent, UserId};
    ///
    /// let event = RankedEvent::nominate(EventId::random(), "launch", "tech", UserId::random())
    ///     .expect("valid nomination");
    /// assert_eq!(event.vote_tally(), 0);
    /// ```
    pub fn nominate(
        id: EventId,
        name: impl Into<String>,
        keyword: impl Into<String>,
        owner: UserId,
    ) -> Result<Self, EventValidationError> {
        Self::new(RankedEventDraft {
            id,
            name: name.into(),
            keyword: keyword.into(),
            owner,
            vote_tally: 0,
        })
    }

    pub fn id(&self) -> EventId {
        self.id
    }

    /// Display name, unique key of the composed ranking.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn owner(&self) -> UserId {
        self.owner
    }

    pub fn vote_tally(&self) -> u32 {
        self.vote_tally
    }

    /// Add `amount` votes to the tally, returning the new total.
    ///
    /// Returns `None` and leaves the tally untouched on overflow.
    pub fn credit(&mut self, amount: u32) -> Option<u32> {
        let tally = self.vote_tally.checked_add(amount)?;
        self.vote_tally = tally;
        Some(tally)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::name("  ", "tech", EventValidationError::EmptyName)]
    #[case::keyword("launch", "", EventValidationError::EmptyKeyword)]
    fn nominate_rejects_blank_fields(
        #[case] name: &str,
        #[case] keyword: &str,
        #[case] expected: EventValidationError,
    ) {
        let error = RankedEvent::nominate(EventId::random(), name, keyword, UserId::random())
            .expect_err("blank field");
        assert_eq!(error, expected);
    }

    #[rstest]
    fn credit_accumulates() {
        let mut event = RankedEvent::nominate(EventId::random(), "launch", "tech", UserId::random())
            .expect("valid nomination");

        assert_eq!(event.credit(3), Some(3));
        assert_eq!(event.credit(2), Some(5));
        assert_eq!(event.vote_tally(), 5);
    }

    #[rstest]
    fn credit_overflow_leaves_tally_untouched() {
        let mut event = RankedEvent::new(RankedEventDraft {
            id: EventId::random(),
            name: "launch".to_owned(),
            keyword: "tech".to_owned(),
            owner: UserId::random(),
            vote_tally: u32::MAX,
        })
        .expect("valid event");

        assert_eq!(event.credit(1), None);
        assert_eq!(event.vote_tally(), u32::MAX);
    }
}
