//! Integration tests for `DieselVoteLedgerRepository` against embedded PostgreSQL.
//!
//! A vote must debit the voter, credit the event and append the record in
//! one transaction, and a vote the budget cannot cover must write nothing.

use std::sync::Arc;

use rsboard::domain::ports::{
    EventRepository, UserRepository, VoteAppendOutcome, VoteLedgerRepository,
};
use rsboard::domain::{
    EventId, RankedEvent, User, UserId, VoteAmount, VotePage, VoteRecord, VoteRecordFilter,
};
use rsboard::outbound::persistence::{
    DieselEventRepository, DieselUserRepository, DieselVoteLedgerRepository,
};
use rstest::{fixture, rstest};
use tokio::task::JoinSet;
use uuid::Uuid;

mod support;

use support::{BoardDatabase, at, board_database, count_rows, handle_cluster_setup_failure};

struct TestContext {
    db: BoardDatabase,
    ledger: DieselVoteLedgerRepository,
    users: DieselUserRepository,
    events: DieselEventRepository,
}

impl TestContext {
    /// Store a voter with `budget` and one event they nominated.
    fn seed(&self, budget: u32) -> (User, RankedEvent) {
        let voter = support::voter("ada", budget);
        let event = support::nominated(EventId::random(), "launch", &voter);
        self.db.runtime.block_on(async {
            self.users.save(&voter).await.expect("seed voter");
            self.events.save(&event).await.expect("seed event");
        });
        (voter, event)
    }
}

fn setup_context() -> Result<TestContext, String> {
    let db = board_database(8)?;
    Ok(TestContext {
        ledger: DieselVoteLedgerRepository::new(db.pool.clone()),
        users: DieselUserRepository::new(db.pool.clone()),
        events: DieselEventRepository::new(db.pool.clone()),
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

fn vote(voter: UserId, event: EventId, amount: u32, second: u32) -> VoteRecord {
    VoteRecord {
        id: Uuid::new_v4(),
        voter,
        event,
        amount: VoteAmount::new(amount).expect("positive amount"),
        cast_at: at(second),
    }
}

fn first_page(voter: UserId, event: EventId, size: u32) -> VoteRecordFilter {
    VoteRecordFilter {
        voter,
        event,
        page: VotePage::new(1, size).expect("valid page"),
    }
}

#[rstest]
fn vote_debits_credits_and_records_together(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: vote_debits_credits_and_records_together skipped");
        return;
    };
    let (voter, event) = context.seed(10);
    let record = vote(voter.id(), event.id(), 4, 1);

    context.db.runtime.block_on(async {
        let outcome = context.ledger.append_vote(&record).await.expect("append");
        assert_eq!(
            outcome,
            VoteAppendOutcome::Recorded {
                remaining_budget: 6,
                event_tally: 4,
            }
        );

        let stored = context
            .users
            .find_by_id(&voter.id())
            .await
            .expect("user read")
            .expect("voter exists");
        assert_eq!(stored.vote_budget(), 6);

        let credited = context
            .events
            .find_by_id(&event.id())
            .await
            .expect("event read")
            .expect("event exists");
        assert_eq!(credited.vote_tally(), 4);

        let records = context
            .ledger
            .list_votes(&first_page(voter.id(), event.id(), 5))
            .await
            .expect("list");
        assert_eq!(records, vec![record.clone()]);
    });
}

#[rstest]
fn overdraft_is_refused_without_writing(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: overdraft_is_refused_without_writing skipped");
        return;
    };
    let (voter, event) = context.seed(3);

    context.db.runtime.block_on(async {
        let outcome = context
            .ledger
            .append_vote(&vote(voter.id(), event.id(), 5, 1))
            .await
            .expect("append");
        assert_eq!(outcome, VoteAppendOutcome::BudgetExhausted { remaining: 3 });

        let stored = context
            .users
            .find_by_id(&voter.id())
            .await
            .expect("user read")
            .expect("voter exists");
        assert_eq!(stored.vote_budget(), 3);
        let untouched = context
            .events
            .find_by_id(&event.id())
            .await
            .expect("event read")
            .expect("event exists");
        assert_eq!(untouched.vote_tally(), 0);
    });

    assert_eq!(count_rows(&context.db.url, "votes"), Ok(0));
}

#[rstest]
fn votes_naming_missing_rows_are_reported(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: votes_naming_missing_rows_are_reported skipped");
        return;
    };
    let (voter, event) = context.seed(5);

    context.db.runtime.block_on(async {
        let no_voter = context
            .ledger
            .append_vote(&vote(UserId::random(), event.id(), 1, 1))
            .await
            .expect("append");
        assert_eq!(no_voter, VoteAppendOutcome::UnknownUser);

        let no_event = context
            .ledger
            .append_vote(&vote(voter.id(), EventId::random(), 1, 2))
            .await
            .expect("append");
        assert_eq!(no_event, VoteAppendOutcome::UnknownEvent);
    });

    assert_eq!(count_rows(&context.db.url, "votes"), Ok(0));
}

#[rstest]
fn parallel_votes_never_overdraw(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: parallel_votes_never_overdraw skipped");
        return;
    };
    let (voter, event) = context.seed(10);
    let ledger = Arc::new(context.ledger.clone());

    let accepted = context.db.runtime.block_on(async {
        let mut tasks = JoinSet::new();
        for second in 0..24 {
            let ledger = Arc::clone(&ledger);
            let record = vote(voter.id(), event.id(), 1, second);
            tasks.spawn(async move { ledger.append_vote(&record).await });
        }

        let mut accepted = 0;
        while let Some(joined) = tasks.join_next().await {
            match joined.expect("vote task").expect("append") {
                VoteAppendOutcome::Recorded { .. } => accepted += 1,
                VoteAppendOutcome::BudgetExhausted { remaining } => assert_eq!(remaining, 0),
                other => panic!("unexpected outcome: {other:?}"),
            }
        }

        let stored = context
            .users
            .find_by_id(&voter.id())
            .await
            .expect("user read")
            .expect("voter exists");
        assert_eq!(stored.vote_budget(), 0);
        let credited = context
            .events
            .find_by_id(&event.id())
            .await
            .expect("event read")
            .expect("event exists");
        assert_eq!(credited.vote_tally(), 10);
        accepted
    });

    assert_eq!(accepted, 10);
    assert_eq!(count_rows(&context.db.url, "votes"), Ok(10));
}

#[rstest]
fn records_are_paged_oldest_first(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: records_are_paged_oldest_first skipped");
        return;
    };
    let (voter, event) = context.seed(10);
    let newest = vote(voter.id(), event.id(), 3, 30);
    let oldest = vote(voter.id(), event.id(), 1, 10);
    let middle = vote(voter.id(), event.id(), 2, 20);

    context.db.runtime.block_on(async {
        for record in [&newest, &oldest, &middle] {
            context.ledger.append_vote(record).await.expect("append");
        }

        let first = context
            .ledger
            .list_votes(&first_page(voter.id(), event.id(), 2))
            .await
            .expect("first page");
        assert_eq!(first, vec![oldest.clone(), middle.clone()]);

        let second = context
            .ledger
            .list_votes(&VoteRecordFilter {
                voter: voter.id(),
                event: event.id(),
                page: VotePage::new(2, 2).expect("valid page"),
            })
            .await
            .expect("second page");
        assert_eq!(second, vec![newest.clone()]);
    });
}
