//! PostgreSQL-backed `VoteLedgerRepository`.
//!
//! A vote locks the voter row, then the event row (always in that order),
//! and applies the debit, the credit and the ledger insert in one
//! transaction. The debit is a guarded `UPDATE ... WHERE vote_budget >=
//! amount` issued under the voter lock, so concurrent votes can never
//! overdraw a budget.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, RunQueryDsl};

use crate::domain::ports::{VoteAppendOutcome, VoteLedgerRepository, VoteLedgerRepositoryError};
use crate::domain::{VoteRecord, VoteRecordFilter};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{column_to_u32, VoteRow};
use super::pool::{DbPool, PoolError};
use super::schema::{rs_events, users, votes};

/// Diesel adapter for the vote ledger port.
#[derive(Clone)]
pub struct DieselVoteLedgerRepository {
    pool: DbPool,
}

impl DieselVoteLedgerRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> VoteLedgerRepositoryError {
    map_basic_pool_error(error, VoteLedgerRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> VoteLedgerRepositoryError {
    map_basic_diesel_error(
        error,
        VoteLedgerRepositoryError::query,
        VoteLedgerRepositoryError::connection,
    )
}

/// Transaction result in raw column values.
enum AppendRows {
    Recorded { budget: i64, tally: i64 },
    UnknownUser,
    UnknownEvent,
    BudgetExhausted { budget: i64 },
    TallyOverflow { tally: i64 },
}

fn into_outcome(rows: AppendRows) -> Result<VoteAppendOutcome, VoteLedgerRepositoryError> {
    let outcome = match rows {
        AppendRows::Recorded { budget, tally } => VoteAppendOutcome::Recorded {
            remaining_budget: column_to_u32(budget, "vote_budget")
                .map_err(VoteLedgerRepositoryError::query)?,
            event_tally: column_to_u32(tally, "vote_tally")
                .map_err(VoteLedgerRepositoryError::query)?,
        },
        AppendRows::UnknownUser => VoteAppendOutcome::UnknownUser,
        AppendRows::UnknownEvent => VoteAppendOutcome::UnknownEvent,
        AppendRows::BudgetExhausted { budget } => VoteAppendOutcome::BudgetExhausted {
            remaining: column_to_u32(budget, "vote_budget")
                .map_err(VoteLedgerRepositoryError::query)?,
        },
        AppendRows::TallyOverflow { tally } => {
            return Err(VoteLedgerRepositoryError::query(format!(
                "vote tally {tally} cannot absorb more votes"
            )));
        }
    };
    Ok(outcome)
}

#[async_trait]
impl VoteLedgerRepository for DieselVoteLedgerRepository {
    async fn append_vote(
        &self,
        record: &VoteRecord,
    ) -> Result<VoteAppendOutcome, VoteLedgerRepositoryError> {
        let row = VoteRow::from_domain(record);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = conn
            .transaction(|conn| {
                async move {
                    let Some(budget) = users::table
                        .find(row.voter_id)
                        .select(users::vote_budget)
                        .for_update()
                        .first::<i64>(conn)
                        .await
                        .optional()?
                    else {
                        return Ok(AppendRows::UnknownUser);
                    };

                    let Some(tally) = rs_events::table
                        .find(row.event_id)
                        .select(rs_events::vote_tally)
                        .for_update()
                        .first::<i64>(conn)
                        .await
                        .optional()?
                    else {
                        return Ok(AppendRows::UnknownEvent);
                    };

                    if budget < row.amount {
                        return Ok(AppendRows::BudgetExhausted { budget });
                    }
                    if tally + row.amount > i64::from(u32::MAX) {
                        return Ok(AppendRows::TallyOverflow { tally });
                    }

                    let Some(budget_left) = diesel::update(
                        users::table
                            .find(row.voter_id)
                            .filter(users::vote_budget.ge(row.amount)),
                    )
                    .set(users::vote_budget.eq(users::vote_budget - row.amount))
                    .returning(users::vote_budget)
                    .get_result::<i64>(conn)
                    .await
                    .optional()?
                    else {
                        return Ok(AppendRows::BudgetExhausted { budget });
                    };
                    let tally = diesel::update(rs_events::table.find(row.event_id))
                        .set(rs_events::vote_tally.eq(rs_events::vote_tally + row.amount))
                        .returning(rs_events::vote_tally)
                        .get_result::<i64>(conn)
                        .await?;
                    diesel::insert_into(votes::table)
                        .values(&row)
                        .execute(conn)
                        .await?;

                    Ok::<_, diesel::result::Error>(AppendRows::Recorded {
                        budget: budget_left,
                        tally,
                    })
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        into_outcome(rows)
    }

    async fn list_votes(
        &self,
        filter: &VoteRecordFilter,
    ) -> Result<Vec<VoteRecord>, VoteLedgerRepositoryError> {
        let offset = i64::try_from(filter.page.offset()).map_err(|_| {
            VoteLedgerRepositoryError::query(format!(
                "page {} is out of range",
                filter.page.index()
            ))
        })?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<VoteRow> = votes::table
            .filter(votes::voter_id.eq(filter.voter.as_uuid()))
            .filter(votes::event_id.eq(filter.event.as_uuid()))
            .order_by((votes::cast_at.asc(), votes::seq.asc()))
            .offset(offset)
            .limit(i64::from(filter.page.size()))
            .select(VoteRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(VoteRow::into_domain)
            .collect::<Result<Vec<_>, _>>()
            .map_err(VoteLedgerRepositoryError::query)
    }
}
