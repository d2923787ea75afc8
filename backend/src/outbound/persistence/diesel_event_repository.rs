//! PostgreSQL-backed `EventRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{EventRepository, EventRepositoryError};
use crate::domain::{EventId, RankedEvent};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::EventRow;
use super::pool::{DbPool, PoolError};
use super::schema::rs_events;

/// Diesel adapter for the event repository port.
#[derive(Clone)]
pub struct DieselEventRepository {
    pool: DbPool,
}

impl DieselEventRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> EventRepositoryError {
    map_basic_pool_error(error, EventRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> EventRepositoryError {
    map_basic_diesel_error(
        error,
        EventRepositoryError::query,
        EventRepositoryError::connection,
    )
}

pub(super) fn rows_to_events(rows: Vec<EventRow>) -> Result<Vec<RankedEvent>, String> {
    rows.into_iter().map(EventRow::into_domain).collect()
}

#[async_trait]
impl EventRepository for DieselEventRepository {
    async fn find_by_id(&self, id: &EventId) -> Result<Option<RankedEvent>, EventRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = rs_events::table
            .find(id.as_uuid())
            .select(EventRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(EventRow::into_domain)
            .transpose()
            .map_err(EventRepositoryError::query)
    }

    async fn find_all(&self) -> Result<Vec<RankedEvent>, EventRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<EventRow> = rs_events::table
            .select(EventRow::as_select())
            .order_by(rs_events::seq)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_events(rows).map_err(EventRepositoryError::query)
    }

    async fn save(&self, event: &RankedEvent) -> Result<(), EventRepositoryError> {
        let row = EventRow::from_domain(event);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(rs_events::table)
            .values(&row)
            .on_conflict(rs_events::id)
            .do_update()
            .set(row.changes())
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }
}
