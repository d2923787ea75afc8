//! PostgreSQL-backed `SlotRepository`.
//!
//! A purchase locks the buying event, the slot row at the bought rank and
//! the slot the event already holds, then compares both with what the
//! market read. A mismatch, or a unique violation from a concurrent first
//! purchase of the same rank, reports [`PurchaseCommit::StaleSnapshot`] and
//! leaves the tables untouched.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, RunQueryDsl};

use crate::domain::ports::{PurchaseCommit, SlotRepository, SlotRepositoryError};
use crate::domain::{EventId, RankPosition, SlotBid, SlotPurchase};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewTradeRow, SlotRow};
use super::pool::{DbPool, PoolError};
use super::schema::{rs_events, slots, trades};

/// Diesel adapter for the slot repository port.
#[derive(Clone)]
pub struct DieselSlotRepository {
    pool: DbPool,
}

impl DieselSlotRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SlotRepositoryError {
    map_basic_pool_error(error, SlotRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> SlotRepositoryError {
    map_basic_diesel_error(
        error,
        SlotRepositoryError::query,
        SlotRepositoryError::connection,
    )
}

fn row_to_bid(row: Option<SlotRow>) -> Result<Option<SlotBid>, SlotRepositoryError> {
    row.map(SlotRow::into_domain)
        .transpose()
        .map_err(SlotRepositoryError::query)
}

#[async_trait]
impl SlotRepository for DieselSlotRepository {
    async fn find_by_rank(
        &self,
        rank: RankPosition,
    ) -> Result<Option<SlotBid>, SlotRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = slots::table
            .find(i64::from(rank.get()))
            .select(SlotRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row_to_bid(row)
    }

    async fn find_by_event_id(
        &self,
        event_id: &EventId,
    ) -> Result<Option<SlotBid>, SlotRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = slots::table
            .filter(slots::event_id.eq(event_id.as_uuid()))
            .select(SlotRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row_to_bid(row)
    }

    async fn commit_purchase(
        &self,
        purchase: &SlotPurchase,
    ) -> Result<PurchaseCommit, SlotRepositoryError> {
        let bid = SlotRow::from_domain(&purchase.bid);
        let expected_at_rank = purchase.incumbent.as_ref().map(SlotRow::from_domain);
        let expected_held = purchase
            .expected_event_slot()
            .as_ref()
            .map(SlotRow::from_domain);
        let released = purchase.released.as_ref().map(SlotRow::from_domain);
        let trade = NewTradeRow::from_domain(&purchase.trade);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let result = conn
            .transaction(|conn| {
                async move {
                    let event = rs_events::table
                        .find(bid.event_id)
                        .select(rs_events::id)
                        .for_update()
                        .first::<uuid::Uuid>(conn)
                        .await
                        .optional()?;
                    if event.is_none() {
                        return Ok(PurchaseCommit::UnknownEvent);
                    }

                    let at_rank = slots::table
                        .find(bid.rank)
                        .select(SlotRow::as_select())
                        .for_update()
                        .first(conn)
                        .await
                        .optional()?;
                    let held = slots::table
                        .filter(slots::event_id.eq(bid.event_id))
                        .select(SlotRow::as_select())
                        .for_update()
                        .first(conn)
                        .await
                        .optional()?;
                    if at_rank != expected_at_rank || held != expected_held {
                        return Ok(PurchaseCommit::StaleSnapshot);
                    }

                    if let Some(released) = released {
                        diesel::delete(slots::table.find(released.rank))
                            .execute(conn)
                            .await?;
                    }

                    if at_rank.is_some() {
                        diesel::update(slots::table.find(bid.rank))
                            .set((
                                slots::event_id.eq(bid.event_id),
                                slots::amount.eq(bid.amount),
                                slots::updated_at.eq(trade.traded_at),
                            ))
                            .execute(conn)
                            .await?;
                    } else {
                        diesel::insert_into(slots::table)
                            .values(&bid)
                            .execute(conn)
                            .await?;
                    }

                    diesel::insert_into(trades::table)
                        .values(&trade)
                        .execute(conn)
                        .await?;

                    Ok::<_, diesel::result::Error>(PurchaseCommit::Committed)
                }
                .scope_boxed()
            })
            .await;

        match result {
            Ok(commit) => Ok(commit),
            Err(error) if is_unique_violation(&error) => Ok(PurchaseCommit::StaleSnapshot),
            Err(error) => Err(map_diesel_error(error)),
        }
    }
}
