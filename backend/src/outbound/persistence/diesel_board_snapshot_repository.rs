//! PostgreSQL-backed `BoardSnapshotRepository`.
//!
//! Events and slots are read inside one read-only repeatable-read
//! transaction so a concurrent purchase is either fully visible or not at
//! all.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;

use crate::domain::ports::{BoardSnapshotRepository, BoardSnapshotRepositoryError};
use crate::domain::{RankingSnapshot, SlotBid};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::diesel_event_repository::rows_to_events;
use super::models::{EventRow, SlotRow};
use super::pool::{DbPool, PoolError};
use super::schema::{rs_events, slots};

/// Diesel adapter for the ranking snapshot port.
#[derive(Clone)]
pub struct DieselBoardSnapshotRepository {
    pool: DbPool,
}

impl DieselBoardSnapshotRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> BoardSnapshotRepositoryError {
    map_basic_pool_error(error, BoardSnapshotRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> BoardSnapshotRepositoryError {
    map_basic_diesel_error(
        error,
        BoardSnapshotRepositoryError::query,
        BoardSnapshotRepositoryError::connection,
    )
}

#[async_trait]
impl BoardSnapshotRepository for DieselBoardSnapshotRepository {
    async fn load_snapshot(&self) -> Result<RankingSnapshot, BoardSnapshotRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let (event_rows, slot_rows) = conn
            .build_transaction()
            .read_only()
            .repeatable_read()
            .run(|conn| {
                async move {
                    let events: Vec<EventRow> = rs_events::table
                        .select(EventRow::as_select())
                        .order_by(rs_events::seq)
                        .load(conn)
                        .await?;
                    let slots: Vec<SlotRow> = slots::table
                        .select(SlotRow::as_select())
                        .order_by(slots::rank)
                        .load(conn)
                        .await?;
                    Ok::<_, diesel::result::Error>((events, slots))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        let events = rows_to_events(event_rows).map_err(BoardSnapshotRepositoryError::query)?;
        let slots = slot_rows
            .into_iter()
            .map(SlotRow::into_domain)
            .collect::<Result<Vec<SlotBid>, _>>()
            .map_err(BoardSnapshotRepositoryError::query)?;

        Ok(RankingSnapshot { events, slots })
    }
}
