//! Slot market service.
//!
//! Resolves a buy against a fresh read of the rank incumbent and of the
//! buying event's own slot, then commits with compare-and-set semantics.
//! A stale commit re-runs the whole resolution, so a bid that was overtaken
//! while in flight is rejected against the new incumbent instead of being
//! lost. An offer that still outbids the fresh incumbent keeps retrying for as
//! long as the re-read shows a different holder, since every such stale
//! commit means a rival commit landed. Only stale commits that the re-read
//! cannot explain count against the attempt budget.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::domain::ports::{
    BuySlotRequest, EventRepository, EventRepositoryError, PurchaseCommit, SlotPurchaseCommand,
    SlotReceipt, SlotRepository, SlotRepositoryError,
};
use crate::domain::{
    BidAmount, EntityKind, Error, EventId, RankPosition, SlotBid, SlotPurchase,
    SlotValidationError, TradeRecord,
};

/// Commit attempts used when a caller configures zero.
const MIN_ATTEMPTS: u32 = 1;

fn map_slot_error(error: SlotRepositoryError) -> Error {
    error!(%error, "slot store operation failed");
    match error {
        SlotRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("slot store unavailable: {message}"))
        }
        SlotRepositoryError::Query { message } => {
            Error::internal(format!("slot store error: {message}"))
        }
    }
}

fn map_event_error(error: EventRepositoryError) -> Error {
    error!(%error, "event lookup failed");
    match error {
        EventRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("event store unavailable: {message}"))
        }
        EventRepositoryError::Query { message } => {
            Error::internal(format!("event store error: {message}"))
        }
    }
}

fn map_validation_error(error: SlotValidationError) -> Error {
    debug!(%error, "rejected slot purchase request");
    Error::request_not_valid(error.to_string()).with_details(json!({
        "field": error.field(),
        "value": 0,
        "code": "non_positive_value",
    }))
}

fn unknown_event(event_id: EventId) -> Error {
    debug!(event = %event_id, "slot purchase rejected: unknown event");
    Error::unknown_entity(EntityKind::Event, event_id)
}

/// Slot market implementing [`SlotPurchaseCommand`].
#[derive(Clone)]
pub struct SlotMarketService<S, E> {
    slot_repo: Arc<S>,
    event_repo: Arc<E>,
    clock: Arc<dyn Clock>,
    attempts: u32,
}

impl<S, E> SlotMarketService<S, E> {
    /// Create a market that gives up after `attempts` unexplained stale
    /// commits.
    pub fn new(slot_repo: Arc<S>, event_repo: Arc<E>, clock: Arc<dyn Clock>, attempts: u32) -> Self {
        Self {
            slot_repo,
            event_repo,
            clock,
            attempts: attempts.max(MIN_ATTEMPTS),
        }
    }
}

impl<S, E> SlotMarketService<S, E>
where
    S: SlotRepository,
    E: EventRepository,
{
    /// Read current state and decide the purchase, or reject the offer.
    async fn resolve(
        &self,
        event_id: EventId,
        rank: RankPosition,
        amount: BidAmount,
    ) -> Result<SlotPurchase, Error> {
        let incumbent = self
            .slot_repo
            .find_by_rank(rank)
            .await
            .map_err(map_slot_error)?;

        if let Some(current) = incumbent {
            if !current.is_outbid_by(amount) {
                debug!(
                    rank = rank.get(),
                    offered = amount.get(),
                    incumbent = current.amount.get(),
                    "slot purchase rejected: amount too low"
                );
                return Err(Error::amount_too_low(
                    rank.get(),
                    amount.get(),
                    current.amount.get(),
                ));
            }
        }

        let released = self
            .slot_repo
            .find_by_event_id(&event_id)
            .await
            .map_err(map_slot_error)?
            .filter(|held| held.rank != rank);

        let bid = SlotBid {
            rank,
            amount,
            event_id,
        };
        Ok(SlotPurchase {
            bid,
            incumbent,
            released,
            trade: TradeRecord {
                id: Uuid::new_v4(),
                rank,
                amount,
                event_id,
                traded_at: self.clock.utc(),
            },
        })
    }
}

#[async_trait]
impl<S, E> SlotPurchaseCommand for SlotMarketService<S, E>
where
    S: SlotRepository,
    E: EventRepository,
{
    async fn buy_slot(&self, request: BuySlotRequest) -> Result<SlotReceipt, Error> {
        let rank = RankPosition::new(request.rank).map_err(map_validation_error)?;
        let amount = BidAmount::new(request.amount).map_err(map_validation_error)?;

        self.event_repo
            .find_by_id(&request.event)
            .await
            .map_err(map_event_error)?
            .ok_or_else(|| unknown_event(request.event))?;

        let mut stalls = 0;
        let mut stale: Option<SlotPurchase> = None;
        loop {
            let purchase = self.resolve(request.event, rank, amount).await?;
            if let Some(previous) = stale.take() {
                if previous.observes_same_slots(&purchase) {
                    stalls += 1;
                    if stalls >= self.attempts {
                        warn!(
                            event = %request.event,
                            rank = rank.get(),
                            stalls,
                            "slot purchase abandoned after repeated stale commits"
                        );
                        return Err(Error::conflict(format!(
                            "rank {} kept changing during purchase; gave up after {} attempts",
                            rank.get(),
                            self.attempts
                        )));
                    }
                }
            }

            match self
                .slot_repo
                .commit_purchase(&purchase)
                .await
                .map_err(map_slot_error)?
            {
                PurchaseCommit::Committed => {
                    info!(
                        event = %request.event,
                        rank = rank.get(),
                        amount = amount.get(),
                        displaced = ?purchase.incumbent.map(|bid| bid.event_id.to_string()),
                        released_rank = ?purchase.released.map(|bid| bid.rank.get()),
                        "slot purchased"
                    );
                    return Ok(SlotReceipt {
                        bid: purchase.bid,
                        displaced: purchase.incumbent,
                        released: purchase.released,
                    });
                }
                PurchaseCommit::UnknownEvent => return Err(unknown_event(request.event)),
                PurchaseCommit::StaleSnapshot => {
                    warn!(
                        event = %request.event,
                        rank = rank.get(),
                        stalls,
                        max_attempts = self.attempts,
                        "slot state changed during purchase; retrying"
                    );
                    stale = Some(purchase);
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "slot_market_service_tests.rs"]
mod tests;
