//! Vote ledger services.
//!
//! [`VoteService`] implements both the vote command and the vote record
//! query. Budget and existence checks are left to the ledger adapter, which
//! applies them inside the same atomic unit as the write.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::domain::ports::{
    CastVoteRequest, ListVoteRecordsRequest, VoteAppendOutcome, VoteCommand,
    VoteLedgerRepository, VoteLedgerRepositoryError, VoteReceipt, VoteRecordQuery,
};
use crate::domain::{
    EntityKind, Error, VoteAmount, VotePage, VoteRecord, VoteRecordFilter, VoteValidationError,
};

fn map_ledger_error(error: VoteLedgerRepositoryError) -> Error {
    error!(%error, "vote ledger operation failed");
    match error {
        VoteLedgerRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("vote ledger unavailable: {message}"))
        }
        VoteLedgerRepositoryError::Query { message } => {
            Error::internal(format!("vote ledger error: {message}"))
        }
    }
}

fn map_validation_error(error: VoteValidationError, value: u32) -> Error {
    let (field, code) = match error {
        VoteValidationError::ZeroAmount => ("amount", "non_positive_amount"),
        VoteValidationError::ZeroPage => ("page", "non_positive_page"),
        VoteValidationError::ZeroPageSize => {
            return Error::internal("vote record page size must be configured above zero");
        }
    };
    debug!(%error, field, "rejected vote request");
    Error::request_not_valid(error.to_string()).with_details(json!({
        "field": field,
        "value": value,
        "code": code,
    }))
}

/// Vote service implementing [`VoteCommand`] and [`VoteRecordQuery`].
#[derive(Clone)]
pub struct VoteService<L> {
    ledger: Arc<L>,
    clock: Arc<dyn Clock>,
    page_size: u32,
}

impl<L> VoteService<L> {
    /// Create a vote service paging ledger reads by `page_size` records.
    ///
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use mockable::DefaultClock;
    /// # use rsboard::outbound::memory::InMemoryBoardStore;
    /// let service = rsboard::domain::VoteService::new(
    ///     Arc::new(InMemoryBoardStore::default()),
    ///     Arc::new(DefaultClock),
    ///     5,
    /// );
    /// # let _ = service;
    /// ```
    pub fn new(ledger: Arc<L>, clock: Arc<dyn Clock>, page_size: u32) -> Self {
        Self {
            ledger,
            clock,
            page_size,
        }
    }
}

#[async_trait]
impl<L> VoteCommand for VoteService<L>
where
    L: VoteLedgerRepository,
{
    async fn cast_vote(&self, request: CastVoteRequest) -> Result<VoteReceipt, Error> {
        let amount = VoteAmount::new(request.amount)
            .map_err(|err| map_validation_error(err, request.amount))?;
        let record = VoteRecord {
            id: Uuid::new_v4(),
            voter: request.voter,
            event: request.event,
            amount,
            cast_at: request.cast_at.unwrap_or_else(|| self.clock.utc()),
        };

        let outcome = self
            .ledger
            .append_vote(&record)
            .await
            .map_err(map_ledger_error)?;

        match outcome {
            VoteAppendOutcome::Recorded {
                remaining_budget,
                event_tally,
            } => {
                info!(
                    voter = %record.voter,
                    event = %record.event,
                    amount = amount.get(),
                    remaining_budget,
                    event_tally,
                    "vote recorded"
                );
                Ok(VoteReceipt {
                    record,
                    remaining_budget,
                    event_tally,
                })
            }
            VoteAppendOutcome::UnknownUser => {
                debug!(voter = %record.voter, "vote rejected: unknown voter");
                Err(Error::unknown_entity(EntityKind::User, record.voter))
            }
            VoteAppendOutcome::UnknownEvent => {
                debug!(event = %record.event, "vote rejected: unknown event");
                Err(Error::unknown_entity(EntityKind::Event, record.event))
            }
            VoteAppendOutcome::BudgetExhausted { remaining } => {
                debug!(
                    voter = %record.voter,
                    requested = amount.get(),
                    remaining,
                    "vote rejected: insufficient budget"
                );
                Err(Error::insufficient_budget(amount.get(), remaining))
            }
        }
    }
}

#[async_trait]
impl<L> VoteRecordQuery for VoteService<L>
where
    L: VoteLedgerRepository,
{
    async fn list_vote_records(
        &self,
        request: ListVoteRecordsRequest,
    ) -> Result<Vec<VoteRecord>, Error> {
        let page = VotePage::new(request.page, self.page_size)
            .map_err(|err| map_validation_error(err, request.page))?;
        let filter = VoteRecordFilter {
            voter: request.voter,
            event: request.event,
            page,
        };

        self.ledger
            .list_votes(&filter)
            .await
            .map_err(map_ledger_error)
    }
}

#[cfg(test)]
#[path = "vote_service_tests.rs"]
mod tests;
