//! Port for consistent reads of the whole board.
use async_trait::async_trait;

use crate::domain::RankingSnapshot;

use super::define_port_error;

define_port_error! {
    /// Errors raised while reading a board snapshot.
    pub enum BoardSnapshotRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "board snapshot connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "board snapshot query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BoardSnapshotRepository: Send + Sync {
    /// All events (nomination order) and all live slots, read from a single
    /// state of the store so no concurrent vote or purchase is half visible.
    async fn load_snapshot(&self) -> Result<RankingSnapshot, BoardSnapshotRepositoryError>;
}
