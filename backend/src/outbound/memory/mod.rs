//! In-process board store.
//!
//! [`InMemoryBoardStore`] backs every driven port with a single
//! `tokio::sync::RwLock`. Each port method runs under one lock acquisition:
//! writers take the write guard for the whole check-then-mutate sequence and
//! snapshot reads take the read guard, so votes and purchases are atomic and
//! a composed ranking never mixes pre- and post-write state.
//!
//! Used when no database URL is configured and by the behaviour tests.

use std::collections::{BTreeMap, HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{
    BoardSnapshotRepository, BoardSnapshotRepositoryError, EventRepository, EventRepositoryError,
    PurchaseCommit, SlotRepository, SlotRepositoryError, UserRepository, UserRepositoryError,
    VoteAppendOutcome, VoteLedgerRepository, VoteLedgerRepositoryError,
};
use crate::domain::{
    EventId, RankPosition, RankedEvent, RankingSnapshot, SlotBid, SlotPurchase, TradeRecord,
    User, UserId, VoteRecord, VoteRecordFilter,
};

#[derive(Debug, Default)]
struct BoardState {
    users: HashMap<UserId, User>,
    /// Nomination order.
    events: Vec<RankedEvent>,
    votes: Vec<VoteRecord>,
    slots: BTreeMap<RankPosition, SlotBid>,
    trades: Vec<TradeRecord>,
}

impl BoardState {
    fn event_index(&self, id: &EventId) -> Option<usize> {
        self.events.iter().position(|event| event.id() == *id)
    }

    fn slot_held_by(&self, event_id: &EventId) -> Option<SlotBid> {
        self.slots
            .values()
            .find(|slot| slot.event_id == *event_id)
            .copied()
    }
}

/// Board store kept in process memory.
#[derive(Debug, Default)]
pub struct InMemoryBoardStore {
    state: RwLock<BoardState>,
}

impl InMemoryBoardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trade history in purchase order.
    pub async fn trades(&self) -> Vec<TradeRecord> {
        self.state.read().await.trades.clone()
    }
}

#[async_trait]
impl UserRepository for InMemoryBoardStore {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(self.state.read().await.users.get(id).cloned())
    }

    async fn save(&self, user: &User) -> Result<(), UserRepositoryError> {
        self.state
            .write()
            .await
            .users
            .insert(user.id(), user.clone());
        Ok(())
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserRepositoryError> {
        let mut state = self.state.write().await;
        if state.users.remove(id).is_none() {
            return Ok(false);
        }

        let owned: HashSet<EventId> = state
            .events
            .iter()
            .filter(|event| event.owner() == *id)
            .map(RankedEvent::id)
            .collect();
        state.events.retain(|event| !owned.contains(&event.id()));
        state.slots.retain(|_, slot| !owned.contains(&slot.event_id));
        Ok(true)
    }
}

#[async_trait]
impl EventRepository for InMemoryBoardStore {
    async fn find_by_id(&self, id: &EventId) -> Result<Option<RankedEvent>, EventRepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .event_index(id)
            .and_then(|index| state.events.get(index))
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<RankedEvent>, EventRepositoryError> {
        Ok(self.state.read().await.events.clone())
    }

    async fn save(&self, event: &RankedEvent) -> Result<(), EventRepositoryError> {
        let mut state = self.state.write().await;
        match state.event_index(&event.id()) {
            Some(index) => state.events[index] = event.clone(),
            None => state.events.push(event.clone()),
        }
        Ok(())
    }
}

#[async_trait]
impl VoteLedgerRepository for InMemoryBoardStore {
    async fn append_vote(
        &self,
        record: &VoteRecord,
    ) -> Result<VoteAppendOutcome, VoteLedgerRepositoryError> {
        let mut guard = self.state.write().await;
        let BoardState {
            users,
            events,
            votes,
            ..
        } = &mut *guard;

        let Some(user) = users.get_mut(&record.voter) else {
            return Ok(VoteAppendOutcome::UnknownUser);
        };
        let Some(event) = events.iter_mut().find(|event| event.id() == record.event) else {
            return Ok(VoteAppendOutcome::UnknownEvent);
        };

        let amount = record.amount.get();
        let mut credited = event.clone();
        let Some(event_tally) = credited.credit(amount) else {
            return Err(VoteLedgerRepositoryError::query(format!(
                "tally of event {} would overflow",
                record.event
            )));
        };
        let remaining_budget = match user.debit(amount) {
            Ok(remaining) => remaining,
            Err(shortfall) => {
                return Ok(VoteAppendOutcome::BudgetExhausted {
                    remaining: shortfall.remaining,
                });
            }
        };

        *event = credited;
        votes.push(record.clone());
        Ok(VoteAppendOutcome::Recorded {
            remaining_budget,
            event_tally,
        })
    }

    async fn list_votes(
        &self,
        filter: &VoteRecordFilter,
    ) -> Result<Vec<VoteRecord>, VoteLedgerRepositoryError> {
        let state = self.state.read().await;
        let mut matching: Vec<&VoteRecord> = state
            .votes
            .iter()
            .filter(|vote| vote.voter == filter.voter && vote.event == filter.event)
            .collect();
        matching.sort_by_key(|vote| vote.cast_at);

        let offset = usize::try_from(filter.page.offset()).unwrap_or(usize::MAX);
        let size = usize::try_from(filter.page.size()).unwrap_or(usize::MAX);
        Ok(matching
            .into_iter()
            .skip(offset)
            .take(size)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl SlotRepository for InMemoryBoardStore {
    async fn find_by_rank(
        &self,
        rank: RankPosition,
    ) -> Result<Option<SlotBid>, SlotRepositoryError> {
        Ok(self.state.read().await.slots.get(&rank).copied())
    }

    async fn find_by_event_id(
        &self,
        event_id: &EventId,
    ) -> Result<Option<SlotBid>, SlotRepositoryError> {
        Ok(self.state.read().await.slot_held_by(event_id))
    }

    async fn commit_purchase(
        &self,
        purchase: &SlotPurchase,
    ) -> Result<PurchaseCommit, SlotRepositoryError> {
        let mut state = self.state.write().await;
        let bid = purchase.bid;

        if state.event_index(&bid.event_id).is_none() {
            return Ok(PurchaseCommit::UnknownEvent);
        }
        let incumbent = state.slots.get(&bid.rank).copied();
        let held = state.slot_held_by(&bid.event_id);
        if incumbent != purchase.incumbent || held != purchase.expected_event_slot() {
            return Ok(PurchaseCommit::StaleSnapshot);
        }

        if let Some(released) = purchase.released {
            state.slots.remove(&released.rank);
        }
        state.slots.insert(bid.rank, bid);
        state.trades.push(purchase.trade.clone());
        Ok(PurchaseCommit::Committed)
    }
}

#[async_trait]
impl BoardSnapshotRepository for InMemoryBoardStore {
    async fn load_snapshot(&self) -> Result<RankingSnapshot, BoardSnapshotRepositoryError> {
        let state = self.state.read().await;
        Ok(RankingSnapshot {
            events: state.events.clone(),
            slots: state.slots.values().copied().collect(),
        })
    }
}
