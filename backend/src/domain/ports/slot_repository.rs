//! Port for live slot bids and the trade history behind them.

use async_trait::async_trait;

use crate::domain::{EventId, RankPosition, SlotBid, SlotPurchase};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by slot repository adapters.
    pub enum SlotRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "slot repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "slot repository query failed: {message}",
    }
}

/// Result of a compare-and-set purchase commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseCommit {
    /// Bid installed, released slot removed and trade appended.
    Committed,
    /// The rank incumbent or the event's own slot changed since it was read.
    /// Nothing was written.
    StaleSnapshot,
    /// The buying event no longer exists. Nothing was written.
    UnknownEvent,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SlotRepository: Send + Sync {
    /// Live bid holding `rank`, if any.
    async fn find_by_rank(
        &self,
        rank: RankPosition,
    ) -> Result<Option<SlotBid>, SlotRepositoryError>;

    /// Live bid backed by `event_id`, if any.
    async fn find_by_event_id(
        &self,
        event_id: &EventId,
    ) -> Result<Option<SlotBid>, SlotRepositoryError>;

    /// Apply `purchase` in one transaction, provided
    /// [`SlotPurchase::incumbent`] and [`SlotPurchase::released`] still match
    /// the stored state.
    async fn commit_purchase(
        &self,
        purchase: &SlotPurchase,
    ) -> Result<PurchaseCommit, SlotRepositoryError>;
}
