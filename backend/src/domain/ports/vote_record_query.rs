//! Driving port for paging through a voter's ledger entries.

use async_trait::async_trait;

use crate::domain::{Error, EventId, UserId, VoteRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListVoteRecordsRequest {
    pub voter: UserId,
    pub event: EventId,
    /// 1-based page index.
    pub page: u32,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoteRecordQuery: Send + Sync {
    async fn list_vote_records(
        &self,
        request: ListVoteRecordsRequest,
    ) -> Result<Vec<VoteRecord>, Error>;
}
