//! Internal Diesel row structs and their conversion to domain types.
//!
//! Counters and amounts are `u32` in the domain and `BIGINT` in the
//! database; conversions reject values outside the `u32` range instead of
//! truncating them.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    BidAmount, EventId, RankPosition, RankedEvent, RankedEventDraft, SlotBid, TradeRecord, User,
    UserId, UserProfile, UserProfileDraft, VoteAmount, VoteRecord,
};

use super::schema::{rs_events, slots, trades, users, votes};

/// Narrow a stored `BIGINT` to the domain's `u32`.
pub(crate) fn column_to_u32(value: i64, column: &str) -> Result<u32, String> {
    u32::try_from(value).map_err(|_| format!("{column} value {value} is out of range"))
}

/// Narrow a stored `INTEGER` to the domain's `u32`.
pub(crate) fn int_column_to_u32(value: i32, column: &str) -> Result<u32, String> {
    u32::try_from(value).map_err(|_| format!("{column} value {value} is out of range"))
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub gender: String,
    pub age: i32,
    pub email: String,
    pub phone: String,
    pub vote_budget: i64,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserUpdate<'a> {
    pub name: &'a str,
    pub gender: &'a str,
    pub age: i32,
    pub email: &'a str,
    pub phone: &'a str,
    pub vote_budget: i64,
}

impl UserRow {
    pub(crate) fn from_domain(user: &User) -> Result<Self, String> {
        let profile = user.profile();
        Ok(Self {
            id: *user.id().as_uuid(),
            name: profile.name().to_owned(),
            gender: profile.gender().to_owned(),
            age: i32::try_from(profile.age())
                .map_err(|_| format!("age {} is out of range", profile.age()))?,
            email: profile.email().to_owned(),
            phone: profile.phone().to_owned(),
            vote_budget: i64::from(user.vote_budget()),
        })
    }

    pub(crate) fn changes(&self) -> UserUpdate<'_> {
        UserUpdate {
            name: &self.name,
            gender: &self.gender,
            age: self.age,
            email: &self.email,
            phone: &self.phone,
            vote_budget: self.vote_budget,
        }
    }

    pub(crate) fn into_domain(self) -> Result<User, String> {
        let profile = UserProfile::new(UserProfileDraft {
            name: self.name,
            gender: self.gender,
            age: int_column_to_u32(self.age, "age")?,
            email: self.email,
            phone: self.phone,
        })
        .map_err(|err| format!("stored user {} is invalid: {err}", self.id))?;
        Ok(User::new(
            UserId::from_uuid(self.id),
            profile,
            column_to_u32(self.vote_budget, "vote_budget")?,
        ))
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = rs_events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EventRow {
    pub id: Uuid,
    pub name: String,
    pub keyword: String,
    pub owner_id: Uuid,
    pub vote_tally: i64,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = rs_events)]
pub(crate) struct EventUpdate<'a> {
    pub name: &'a str,
    pub keyword: &'a str,
    pub owner_id: Uuid,
    pub vote_tally: i64,
}

impl EventRow {
    pub(crate) fn from_domain(event: &RankedEvent) -> Self {
        Self {
            id: *event.id().as_uuid(),
            name: event.name().to_owned(),
            keyword: event.keyword().to_owned(),
            owner_id: *event.owner().as_uuid(),
            vote_tally: i64::from(event.vote_tally()),
        }
    }

    pub(crate) fn changes(&self) -> EventUpdate<'_> {
        EventUpdate {
            name: &self.name,
            keyword: &self.keyword,
            owner_id: self.owner_id,
            vote_tally: self.vote_tally,
        }
    }

    pub(crate) fn into_domain(self) -> Result<RankedEvent, String> {
        let id = self.id;
        RankedEvent::new(RankedEventDraft {
            id: EventId::from_uuid(id),
            name: self.name,
            keyword: self.keyword,
            owner: UserId::from_uuid(self.owner_id),
            vote_tally: column_to_u32(self.vote_tally, "vote_tally")?,
        })
        .map_err(|err| format!("stored event {id} is invalid: {err}"))
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = votes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct VoteRow {
    pub id: Uuid,
    pub voter_id: Uuid,
    pub event_id: Uuid,
    pub amount: i64,
    pub cast_at: DateTime<Utc>,
}

impl VoteRow {
    pub(crate) fn from_domain(record: &VoteRecord) -> Self {
        Self {
            id: record.id,
            voter_id: *record.voter.as_uuid(),
            event_id: *record.event.as_uuid(),
            amount: i64::from(record.amount.get()),
            cast_at: record.cast_at,
        }
    }

    pub(crate) fn into_domain(self) -> Result<VoteRecord, String> {
        let amount = VoteAmount::new(column_to_u32(self.amount, "amount")?)
            .map_err(|err| format!("stored vote {} is invalid: {err}", self.id))?;
        Ok(VoteRecord {
            id: self.id,
            voter: UserId::from_uuid(self.voter_id),
            event: EventId::from_uuid(self.event_id),
            amount,
            cast_at: self.cast_at,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Queryable, Selectable, Insertable)]
#[diesel(table_name = slots)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SlotRow {
    pub rank: i64,
    pub event_id: Uuid,
    pub amount: i64,
}

impl SlotRow {
    pub(crate) fn from_domain(bid: &SlotBid) -> Self {
        Self {
            rank: i64::from(bid.rank.get()),
            event_id: *bid.event_id.as_uuid(),
            amount: i64::from(bid.amount.get()),
        }
    }

    pub(crate) fn into_domain(self) -> Result<SlotBid, String> {
        let rank = RankPosition::new(column_to_u32(self.rank, "rank")?)
            .map_err(|err| format!("stored slot is invalid: {err}"))?;
        let amount = BidAmount::new(column_to_u32(self.amount, "amount")?)
            .map_err(|err| format!("stored slot at rank {} is invalid: {err}", self.rank))?;
        Ok(SlotBid {
            rank,
            amount,
            event_id: EventId::from_uuid(self.event_id),
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = trades)]
pub(crate) struct NewTradeRow {
    pub id: Uuid,
    pub rank: i64,
    pub amount: i64,
    pub event_id: Uuid,
    pub traded_at: DateTime<Utc>,
}

impl NewTradeRow {
    pub(crate) fn from_domain(trade: &TradeRecord) -> Self {
        Self {
            id: trade.id,
            rank: i64::from(trade.rank.get()),
            amount: i64::from(trade.amount.get()),
            event_id: *trade.event_id.as_uuid(),
            traded_at: trade.traded_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn negative_budget_is_rejected() {
        let row = UserRow {
            id: Uuid::new_v4(),
            name: "kai".to_owned(),
            gender: "male".to_owned(),
            age: 40,
            email: "kai@example.com".to_owned(),
            phone: "15000000000".to_owned(),
            vote_budget: -1,
        };

        let err = row.into_domain().expect_err("negative budget");
        assert!(err.contains("vote_budget"));
    }

    #[rstest]
    fn oversized_tally_is_rejected() {
        let row = EventRow {
            id: Uuid::new_v4(),
            name: "launch".to_owned(),
            keyword: "tech".to_owned(),
            owner_id: Uuid::new_v4(),
            vote_tally: i64::from(u32::MAX) + 1,
        };

        assert!(row.into_domain().is_err());
    }

    #[rstest]
    fn slot_rows_convert_both_ways() {
        let bid = SlotBid {
            rank: RankPosition::new(2).expect("rank"),
            amount: BidAmount::new(40).expect("amount"),
            event_id: EventId::random(),
        };

        let row = SlotRow::from_domain(&bid);

        assert_eq!(row.rank, 2);
        assert_eq!(row.into_domain(), Ok(bid));
    }

    #[rstest]
    fn zero_rank_slot_row_is_rejected() {
        let row = SlotRow {
            rank: 0,
            event_id: Uuid::new_v4(),
            amount: 3,
        };

        assert!(row.into_domain().is_err());
    }
}
