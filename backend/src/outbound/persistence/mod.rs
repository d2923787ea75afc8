//! PostgreSQL adapters for the board's driven ports.
//!
//! Row structs and table definitions stay private to this module; adapters
//! translate them to domain types and fold every Diesel or pool failure into
//! the owning port's error enum. Multi-row writes (votes, slot purchases)
//! each run in a single transaction with row locks taken in a fixed order:
//! user, then event, then slot rows.
//!
//! ```ignore
//! use rsboard::outbound::persistence::{DbPool, DieselVoteLedgerRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/board")).await?;
//! let ledger = DieselVoteLedgerRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_board_snapshot_repository;
mod diesel_event_repository;
mod diesel_slot_repository;
mod diesel_user_repository;
mod diesel_vote_ledger_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_board_snapshot_repository::DieselBoardSnapshotRepository;
pub use diesel_event_repository::DieselEventRepository;
pub use diesel_slot_repository::DieselSlotRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use diesel_vote_ledger_repository::DieselVoteLedgerRepository;
pub use migrations::{run_migrations, MigrationError};
pub use pool::{DbPool, PoolConfig, PoolError};
