//! Port for the append-only vote ledger.
//!
//! Appending a vote is the only way budgets and tallies change, so adapters
//! apply the ledger write, the budget debit and the tally credit as one
//! atomic unit and re-check the budget inside that unit.

use async_trait::async_trait;

use crate::domain::{VoteRecord, VoteRecordFilter};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by vote ledger adapters.
    pub enum VoteLedgerRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "vote ledger connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "vote ledger query failed: {message}",
    }
}

/// Result of an atomic vote append.
///
/// Every variant other than [`VoteAppendOutcome::Recorded`] guarantees the
/// store was left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteAppendOutcome {
    /// Record stored, budget debited and tally credited.
    Recorded {
        remaining_budget: u32,
        event_tally: u32,
    },
    UnknownUser,
    UnknownEvent,
    /// The voter's budget at commit time could not cover the amount.
    BudgetExhausted { remaining: u32 },
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoteLedgerRepository: Send + Sync {
    /// Append `record`, debiting its voter and crediting its event.
    async fn append_vote(
        &self,
        record: &VoteRecord,
    ) -> Result<VoteAppendOutcome, VoteLedgerRepositoryError>;

    /// One page of a voter's records for one event, oldest first.
    async fn list_votes(
        &self,
        filter: &VoteRecordFilter,
    ) -> Result<Vec<VoteRecord>, VoteLedgerRepositoryError>;
}
