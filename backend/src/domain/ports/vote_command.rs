//! Driving port for casting votes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Error, EventId, UserId, VoteRecord};

/// Vote submitted on behalf of a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastVoteRequest {
    pub voter: UserId,
    pub event: EventId,
    pub amount: u32,
    /// Caller-supplied cast time; the service clock is used when absent.
    pub cast_at: Option<DateTime<Utc>>,
}

/// Effects of an accepted vote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteReceipt {
    pub record: VoteRecord,
    pub remaining_budget: u32,
    pub event_tally: u32,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoteCommand: Send + Sync {
    /// Record a vote, debit the voter and credit the event atomically.
    ///
    /// Fails with `unknown_entity` for a missing voter or event and with
    /// `insufficient_budget` when the amount exceeds the remaining budget.
    async fn cast_vote(&self, request: CastVoteRequest) -> Result<VoteReceipt, Error>;
}
