//! Integration tests for the event and snapshot adapters against embedded
//! PostgreSQL.
//!
//! Organic ranking ties fall back to nomination order, so both adapters must
//! return events by insertion sequence rather than by identifier.

use rsboard::domain::ports::{
    BoardSnapshotRepository, EventRepository, PurchaseCommit, SlotRepository, UserRepository,
};
use rsboard::domain::{
    BidAmount, EventId, RankPosition, RankedEvent, RankedEventDraft, SlotBid, SlotPurchase,
    TradeRecord, User,
};
use rsboard::outbound::persistence::{
    DieselBoardSnapshotRepository, DieselEventRepository, DieselSlotRepository,
    DieselUserRepository,
};
use rstest::{fixture, rstest};
use uuid::Uuid;

#[allow(
    dead_code,
    reason = "Shared helpers include row counts used only by other adapter suites."
)]
mod support;

use support::{BoardDatabase, at, board_database, handle_cluster_setup_failure};

struct TestContext {
    db: BoardDatabase,
    snapshots: DieselBoardSnapshotRepository,
    events: DieselEventRepository,
    slots: DieselSlotRepository,
    owner: User,
}

fn setup_context() -> Result<TestContext, String> {
    let db = board_database(2)?;
    let owner = support::voter("owner", 0);
    let users = DieselUserRepository::new(db.pool.clone());
    db.runtime
        .block_on(users.save(&owner))
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        snapshots: DieselBoardSnapshotRepository::new(db.pool.clone()),
        events: DieselEventRepository::new(db.pool.clone()),
        slots: DieselSlotRepository::new(db.pool.clone()),
        owner,
        db,
    })
}

#[fixture]
fn repo_context() -> Option<TestContext> {
    match setup_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn event_id(raw: &str) -> EventId {
    raw.parse().expect("fixture event id is valid")
}

/// Events whose identifiers sort opposite to their nomination order.
fn nominated_in_reverse_id_order(owner: &User) -> Vec<RankedEvent> {
    [
        "ffffffff-ffff-4fff-bfff-ffffffffffff",
        "88888888-8888-4888-8888-888888888888",
        "11111111-1111-4111-8111-111111111111",
    ]
    .into_iter()
    .zip(["first", "second", "third"])
    .map(|(id, name)| support::nominated(event_id(id), name, owner))
    .collect()
}

fn names(events: &[RankedEvent]) -> Vec<&str> {
    events.iter().map(RankedEvent::name).collect()
}

fn slot_purchase(rank: u32, event: &RankedEvent) -> SlotPurchase {
    let bid = SlotBid {
        rank: RankPosition::new(rank).expect("positive rank"),
        amount: BidAmount::new(5).expect("positive amount"),
        event_id: event.id(),
    };
    SlotPurchase {
        bid,
        incumbent: None,
        released: None,
        trade: TradeRecord {
            id: Uuid::new_v4(),
            rank: bid.rank,
            amount: bid.amount,
            event_id: bid.event_id,
            traded_at: at(1),
        },
    }
}

#[rstest]
fn events_are_listed_in_nomination_order(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: events_are_listed_in_nomination_order skipped");
        return;
    };
    let nominated = nominated_in_reverse_id_order(&context.owner);

    context.db.runtime.block_on(async {
        for event in &nominated {
            context.events.save(event).await.expect("save");
        }

        let listed = context.events.find_all().await.expect("find all");
        assert_eq!(names(&listed), ["first", "second", "third"]);

        let snapshot = context.snapshots.load_snapshot().await.expect("snapshot");
        assert_eq!(names(&snapshot.events), ["first", "second", "third"]);
        assert!(snapshot.slots.is_empty());
    });
}

#[rstest]
fn saving_an_event_again_keeps_its_position(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: saving_an_event_again_keeps_its_position skipped");
        return;
    };
    let nominated = nominated_in_reverse_id_order(&context.owner);
    let first = &nominated[0];
    let tallied = RankedEvent::new(RankedEventDraft {
        id: first.id(),
        name: first.name().to_owned(),
        keyword: first.keyword().to_owned(),
        owner: first.owner(),
        vote_tally: 7,
    })
    .expect("valid event");

    context.db.runtime.block_on(async {
        for event in &nominated {
            context.events.save(event).await.expect("save");
        }
        context.events.save(&tallied).await.expect("update");

        let listed = context.events.find_all().await.expect("find all");
        assert_eq!(names(&listed), ["first", "second", "third"]);
        let found = context
            .events
            .find_by_id(&first.id())
            .await
            .expect("find")
            .expect("event exists");
        assert_eq!(found, tallied);
    });
}

#[rstest]
fn snapshot_pairs_events_with_slots_by_rank(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: snapshot_pairs_events_with_slots_by_rank skipped");
        return;
    };
    let nominated = nominated_in_reverse_id_order(&context.owner);

    context.db.runtime.block_on(async {
        for event in &nominated {
            context.events.save(event).await.expect("save");
        }
        for (rank, event) in [(5, &nominated[0]), (2, &nominated[2])] {
            let commit = context
                .slots
                .commit_purchase(&slot_purchase(rank, event))
                .await
                .expect("commit");
            assert_eq!(commit, PurchaseCommit::Committed);
        }

        let snapshot = context.snapshots.load_snapshot().await.expect("snapshot");
        let ranks: Vec<(u32, EventId)> = snapshot
            .slots
            .iter()
            .map(|slot| (slot.rank.get(), slot.event_id))
            .collect();
        assert_eq!(ranks, vec![(2, nominated[2].id()), (5, nominated[0].id())]);
        assert_eq!(snapshot.events, nominated);
    });
}
