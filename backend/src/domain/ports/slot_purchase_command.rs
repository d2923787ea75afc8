//! Driving port for buying rank slots.

use async_trait::async_trait;

use crate::domain::{Error, EventId, SlotBid};

/// Offer to pin `event` at `rank` for `amount`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuySlotRequest {
    pub event: EventId,
    pub rank: u32,
    pub amount: u32,
}

/// Result of a successful purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotReceipt {
    /// Bid now live at the requested rank.
    pub bid: SlotBid,
    /// Bid that held the rank before, if any.
    pub displaced: Option<SlotBid>,
    /// Slot the event held at another rank and gave up.
    pub released: Option<SlotBid>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SlotPurchaseCommand: Send + Sync {
    /// Buy `request.rank` for `request.event`.
    ///
    /// The offer must strictly exceed the incumbent bid; ties keep the
    /// incumbent and fail with `amount_too_low`.
    async fn buy_slot(&self, request: BuySlotRequest) -> Result<SlotReceipt, Error>;
}
