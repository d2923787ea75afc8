//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound adapters and
//! return port-specific errors built with `define_port_error!`. Driving
//! ports are implemented by domain services and consumed by inbound
//! adapters; they speak [`crate::domain::Error`].

mod macros;
pub(crate) use macros::define_port_error;

mod board_snapshot_repository;
mod event_repository;
mod ranking_query;
mod registration_command;
mod slot_purchase_command;
mod slot_repository;
mod user_query;
mod user_repository;
mod vote_command;
mod vote_ledger_repository;
mod vote_record_query;

#[cfg(test)]
pub use board_snapshot_repository::MockBoardSnapshotRepository;
pub use board_snapshot_repository::{BoardSnapshotRepository, BoardSnapshotRepositoryError};
#[cfg(test)]
pub use event_repository::MockEventRepository;
pub use event_repository::{EventRepository, EventRepositoryError};
#[cfg(test)]
pub use ranking_query::MockRankingQuery;
pub use ranking_query::{ListEventsRequest, RankingQuery};
#[cfg(test)]
pub use registration_command::MockRegistrationCommand;
pub use registration_command::{NominateEventRequest, RegisterUserRequest, RegistrationCommand};
#[cfg(test)]
pub use slot_purchase_command::MockSlotPurchaseCommand;
pub use slot_purchase_command::{BuySlotRequest, SlotPurchaseCommand, SlotReceipt};
#[cfg(test)]
pub use slot_repository::MockSlotRepository;
pub use slot_repository::{PurchaseCommit, SlotRepository, SlotRepositoryError};
#[cfg(test)]
pub use user_query::MockUserQuery;
pub use user_query::UserQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
#[cfg(test)]
pub use vote_command::MockVoteCommand;
pub use vote_command::{CastVoteRequest, VoteCommand, VoteReceipt};
#[cfg(test)]
pub use vote_ledger_repository::MockVoteLedgerRepository;
pub use vote_ledger_repository::{
    VoteAppendOutcome, VoteLedgerRepository, VoteLedgerRepositoryError,
};
#[cfg(test)]
pub use vote_record_query::MockVoteRecordQuery;
pub use vote_record_query::{ListVoteRecordsRequest, VoteRecordQuery};
