//! Builders wiring board services over the configured store.

use std::sync::Arc;

use mockable::DefaultClock;
use tracing::info;

use rsboard::inbound::http::state::{BoardRepositories, HttpState};
use rsboard::outbound::memory::InMemoryBoardStore;
use rsboard::outbound::persistence::{
    DbPool, DieselBoardSnapshotRepository, DieselEventRepository, DieselSlotRepository,
    DieselUserRepository, DieselVoteLedgerRepository,
};

use super::ServerConfig;

fn diesel_repositories(
    pool: &DbPool,
) -> BoardRepositories<
    DieselUserRepository,
    DieselEventRepository,
    DieselVoteLedgerRepository,
    DieselSlotRepository,
    DieselBoardSnapshotRepository,
> {
    BoardRepositories {
        users: Arc::new(DieselUserRepository::new(pool.clone())),
        events: Arc::new(DieselEventRepository::new(pool.clone())),
        ledger: Arc::new(DieselVoteLedgerRepository::new(pool.clone())),
        slots: Arc::new(DieselSlotRepository::new(pool.clone())),
        snapshots: Arc::new(DieselBoardSnapshotRepository::new(pool.clone())),
    }
}

/// Build the HTTP state, using PostgreSQL adapters when a pool is configured
/// and one shared in-memory store otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> HttpState {
    let clock = Arc::new(DefaultClock);
    match &config.db_pool {
        Some(pool) => {
            info!("serving board from PostgreSQL");
            HttpState::from_repositories(diesel_repositories(pool), clock, config.tuning)
        }
        None => {
            info!("serving board from in-memory store");
            HttpState::from_repositories(
                BoardRepositories::shared(Arc::new(InMemoryBoardStore::new())),
                clock,
                config.tuning,
            )
        }
    }
}
