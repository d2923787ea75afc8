//! Domain primitives, services and ports of the ranking board.
//!
//! Purpose: define the board's entities (users, ranked events, votes and
//! slot bids), the pure ranking composer, and the services that implement
//! the driving ports on top of the driven ports in [`ports`].
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`]: transport agnostic failure payload.
//! - [`compose_ranking`]: organic order, slot overlay, dedup.
//! - [`RankingService`], [`VoteService`], [`SlotMarketService`],
//!   [`RegistrationService`]: driving port implementations.

pub mod error;
pub mod ports;
pub mod ranked_event;
pub mod ranking;
mod ranking_service;
mod registration_service;
pub mod slot;
mod slot_market_service;
pub mod trace_id;
pub mod user;
pub mod vote;
mod vote_service;

pub use self::error::{EntityKind, Error, ErrorCode, TRACE_ID_HEADER};
pub use self::ranked_event::{EventId, EventValidationError, RankedEvent, RankedEventDraft};
pub use self::ranking::{
    RankWindow, RankingSnapshot, SlotOverlay, UnknownSlotOverlay, WindowError, compose_ranking,
    dedup_by_name, insert_at, organic_ranking,
};
pub use self::ranking_service::RankingService;
pub use self::registration_service::RegistrationService;
pub use self::slot::{
    BidAmount, RankPosition, SlotBid, SlotPurchase, SlotValidationError, TradeRecord,
};
pub use self::slot_market_service::SlotMarketService;
pub use self::trace_id::TraceId;
pub use self::user::{
    BudgetShortfall, USER_AGE_MAX, USER_AGE_MIN, USER_NAME_MAX, User, UserId, UserProfile,
    UserProfileDraft, UserValidationError,
};
pub use self::vote::{VoteAmount, VotePage, VoteRecord, VoteRecordFilter, VoteValidationError};
pub use self::vote_service::VoteService;

