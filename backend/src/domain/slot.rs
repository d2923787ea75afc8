//! Purchased rank slots and their trade history.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::EventId;

/// Validation errors for slot purchases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SlotValidationError {
    #[error("rank must be a positive position")]
    ZeroRank,
    #[error("bid amount must be positive")]
    ZeroAmount,
}

impl SlotValidationError {
    /// Request field the failure refers to.
    pub const fn field(&self) -> &'static str {
        match self {
            Self::ZeroRank => "rank",
            Self::ZeroAmount => "amount",
        }
    }
}

/// 1-based shelf position a slot pins an event to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RankPosition(u32);

impl RankPosition {
    pub fn new(rank: u32) -> Result<Self, SlotValidationError> {
        if rank == 0 {
            return Err(SlotValidationError::ZeroRank);
        }
        Ok(Self(rank))
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Positive purchase amount in currency-agnostic units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BidAmount(u32);

impl BidAmount {
    pub fn new(amount: u32) -> Result<Self, SlotValidationError> {
        if amount == 0 {
            return Err(SlotValidationError::ZeroAmount);
        }
        Ok(Self(amount))
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Live purchase holding a rank for an event.
///
/// At most one bid exists per rank and per event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotBid {
    pub rank: RankPosition,
    pub amount: BidAmount,
    pub event_id: EventId,
}

impl SlotBid {
    /// Whether `challenger` wins this bid's rank. Ties stay with the incumbent.
    ///
    /// # Examples
    /// ```
    /// use rsboard::domain::{BidAmount, EventId, RankPosition, SlotBid};
    ///
    /// let incumbent = SlotBid {
    ///     rank: RankPosition::new(1).expect("rank"),
    ///     amount: BidAmount::new(24).expect("amount"),
    ///     event_id: EventId::random(),
    /// };
    /// assert!(!incumbent.is_outbid_by(BidAmount::new(24).expect("amount")));
    /// assert!(incumbent.is_outbid_by(BidAmount::new(25).expect("amount")));
    /// ```
    pub fn is_outbid_by(&self, challenger: BidAmount) -> bool {
        challenger > self.amount
    }
}

/// Append-only audit entry written for every successful purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeRecord {
    pub id: Uuid,
    pub rank: RankPosition,
    pub amount: BidAmount,
    pub event_id: EventId,
    pub traded_at: DateTime<Utc>,
}

/// Everything a slot store must apply atomically for one purchase.
///
/// `incumbent` and `released` are what the market read before deciding; a
/// store must refuse the commit when either no longer matches its state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotPurchase {
    /// Bid to install at its rank.
    pub bid: SlotBid,
    /// Bid expected at `bid.rank` right now, replaced by the commit.
    pub incumbent: Option<SlotBid>,
    /// Slot the buying event holds at another rank, removed by the commit.
    pub released: Option<SlotBid>,
    pub trade: TradeRecord,
}

impl SlotPurchase {
    /// Slot the buying event is expected to hold when the commit runs.
    ///
    /// That is the released slot, or the incumbent itself when the event is
    /// raising its own bid at the same rank.
    pub fn expected_event_slot(&self) -> Option<SlotBid> {
        self.released.or_else(|| {
            self.incumbent
                .filter(|incumbent| incumbent.event_id == self.bid.event_id)
        })
    }

    /// Whether `other` was resolved against the same rank holder and the same
    /// released slot.
    pub fn observes_same_slots(&self, other: &Self) -> bool {
        self.incumbent == other.incumbent && self.released == other.released
    }
}
