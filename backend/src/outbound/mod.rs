//! Outbound adapters implementing the board's driven ports.
//!
//! - **memory**: a single-lock in-process store, used when no database is
//!   configured and by tests
//! - **persistence**: PostgreSQL repositories built on Diesel
//!
//! Adapters translate between domain types and storage representations and
//! hold no ranking or market rules.

pub mod memory;
pub mod persistence;
