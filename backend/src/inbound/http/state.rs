//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see driving ports, so
//! they can be exercised against any store.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    BoardSnapshotRepository, EventRepository, RankingQuery, RegistrationCommand, SlotPurchaseCommand,
    SlotRepository, UserQuery, UserRepository, VoteCommand, VoteLedgerRepository,
    VoteRecordQuery,
};
use crate::domain::{
    RankingService, RegistrationService, SlotMarketService, SlotOverlay, VoteService,
};

/// Driving ports consumed by the board handlers.
#[derive(Clone)]
pub struct HttpState {
    pub ranking: Arc<dyn RankingQuery>,
    pub votes: Arc<dyn VoteCommand>,
    pub vote_records: Arc<dyn VoteRecordQuery>,
    pub slots: Arc<dyn SlotPurchaseCommand>,
    pub registration: Arc<dyn RegistrationCommand>,
    pub users: Arc<dyn UserQuery>,
}

/// Service knobs read from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardTuning {
    pub default_vote_budget: u32,
    pub vote_record_page_size: u32,
    pub purchase_attempts: u32,
    pub slot_overlay: SlotOverlay,
}

impl Default for BoardTuning {
    fn default() -> Self {
        Self {
            default_vote_budget: 10,
            vote_record_page_size: 5,
            purchase_attempts: 3,
            slot_overlay: SlotOverlay::Absolute,
        }
    }
}

/// Parameter object bundling one adapter per driven port.
///
/// The in-memory store fills every field with the same `Arc`.
pub struct BoardRepositories<U, E, V, S, B> {
    pub users: Arc<U>,
    pub events: Arc<E>,
    pub ledger: Arc<V>,
    pub slots: Arc<S>,
    pub snapshots: Arc<B>,
}

impl<T> BoardRepositories<T, T, T, T, T> {
    /// Back every port with one store.
    pub fn shared(store: Arc<T>) -> Self {
        Self {
            users: Arc::clone(&store),
            events: Arc::clone(&store),
            ledger: Arc::clone(&store),
            slots: Arc::clone(&store),
            snapshots: store,
        }
    }
}

impl HttpState {
    /// Build the domain services over `repos` and expose them as ports.
    pub fn from_repositories<U, E, V, S, B>(
        repos: BoardRepositories<U, E, V, S, B>,
        clock: Arc<dyn Clock>,
        tuning: BoardTuning,
    ) -> Self
    where
        U: UserRepository + 'static,
        E: EventRepository + 'static,
        V: VoteLedgerRepository + 'static,
        S: SlotRepository + 'static,
        B: BoardSnapshotRepository + 'static,
    {
        let BoardRepositories {
            users,
            events,
            ledger,
            slots,
            snapshots,
        } = repos;
        let registration = Arc::new(RegistrationService::new(
            users,
            Arc::clone(&events),
            tuning.default_vote_budget,
        ));
        let votes = Arc::new(VoteService::new(
            ledger,
            Arc::clone(&clock),
            tuning.vote_record_page_size,
        ));
        Self {
            ranking: Arc::new(RankingService::new(snapshots, tuning.slot_overlay)),
            votes: votes.clone(),
            vote_records: votes,
            slots: Arc::new(SlotMarketService::new(
                slots,
                events,
                clock,
                tuning.purchase_attempts,
            )),
            registration: registration.clone(),
            users: registration,
        }
    }
}
