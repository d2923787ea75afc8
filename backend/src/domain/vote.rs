//! Vote ledger entries.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{EventId, UserId};

/// Validation errors for vote amounts and ledger paging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum VoteValidationError {
    #[error("vote amount must be positive")]
    ZeroAmount,
    #[error("page index is 1-based and must be positive")]
    ZeroPage,
    #[error("page size must be positive")]
    ZeroPageSize,
}

/// Positive number of votes cast in one transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct VoteAmount(u32);

impl VoteAmount {
    pub fn new(amount: u32) -> Result<Self, VoteValidationError> {
        if amount == 0 {
            return Err(VoteValidationError::ZeroAmount);
        }
        Ok(Self(amount))
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Immutable record of one vote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteRecord {
    pub id: Uuid,
    pub voter: UserId,
    pub event: EventId,
    pub amount: VoteAmount,
    pub cast_at: DateTime<Utc>,
}

/// One page of a voter's ledger entries for one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VotePage {
    index: u32,
    size: u32,
}

impl VotePage {
    /// Build a 1-based page request.
    ///
    /// # Examples
    /// ```
    /// use rsboard::domain::VotePage;
    ///
    /// let page = VotePage::new(2, 5).expect("valid page");
    /// assert_eq!(page.offset(), 5);
    /// ```
    pub fn new(index: u32, size: u32) -> Result<Self, VoteValidationError> {
        if index == 0 {
            return Err(VoteValidationError::ZeroPage);
        }
        if size == 0 {
            return Err(VoteValidationError::ZeroPageSize);
        }
        Ok(Self { index, size })
    }

    pub const fn index(&self) -> u32 {
        self.index
    }

    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Number of records preceding this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.index - 1) * u64::from(self.size)
    }
}

/// Query for a voter's records on one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteRecordFilter {
    pub voter: UserId,
    pub event: EventId,
    pub page: VotePage,
}
