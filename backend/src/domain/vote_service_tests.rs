//! Tests for the vote service.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockall::predicate::always;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::MockVoteLedgerRepository;
use crate::domain::{ErrorCode, EventId, UserId};

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0)
        .single()
        .expect("valid fixture timestamp")
}

#[fixture]
fn request() -> CastVoteRequest {
    CastVoteRequest {
        voter: UserId::random(),
        event: EventId::random(),
        amount: 1,
        cast_at: None,
    }
}

fn make_service(ledger: MockVoteLedgerRepository) -> VoteService<MockVoteLedgerRepository> {
    VoteService::new(
        Arc::new(ledger),
        Arc::new(FixtureClock {
            utc_now: fixture_timestamp(),
        }),
        5,
    )
}

#[rstest]
#[tokio::test]
async fn accepted_vote_returns_receipt_stamped_by_clock(request: CastVoteRequest) {
    let mut ledger = MockVoteLedgerRepository::new();
    let expected_voter = request.voter;
    ledger
        .expect_append_vote()
        .withf(move |record| record.voter == expected_voter && record.amount.get() == 1)
        .times(1)
        .return_once(|_| {
            Ok(VoteAppendOutcome::Recorded {
                remaining_budget: 9,
                event_tally: 1,
            })
        });

    let receipt = make_service(ledger)
        .cast_vote(request)
        .await
        .expect("vote accepted");

    assert_eq!(receipt.remaining_budget, 9);
    assert_eq!(receipt.event_tally, 1);
    assert_eq!(receipt.record.cast_at, fixture_timestamp());
}

#[rstest]
#[tokio::test]
async fn caller_timestamp_wins_over_clock(request: CastVoteRequest) {
    let supplied = Utc
        .with_ymd_and_hms(2020, 1, 1, 0, 0, 0)
        .single()
        .expect("valid timestamp");
    let mut ledger = MockVoteLedgerRepository::new();
    ledger.expect_append_vote().times(1).return_once(|_| {
        Ok(VoteAppendOutcome::Recorded {
            remaining_budget: 4,
            event_tally: 7,
        })
    });

    let receipt = make_service(ledger)
        .cast_vote(CastVoteRequest {
            cast_at: Some(supplied),
            ..request
        })
        .await
        .expect("vote accepted");

    assert_eq!(receipt.record.cast_at, supplied);
}

#[rstest]
#[tokio::test]
async fn zero_amount_never_reaches_the_ledger(request: CastVoteRequest) {
    let mut ledger = MockVoteLedgerRepository::new();
    ledger.expect_append_vote().times(0);

    let error = make_service(ledger)
        .cast_vote(CastVoteRequest {
            amount: 0,
            ..request
        })
        .await
        .expect_err("zero amount");

    assert_eq!(error.code(), ErrorCode::RequestNotValid);
    assert_eq!(error.details().expect("details")["field"], "amount");
}

#[rstest]
#[case::user(VoteAppendOutcome::UnknownUser, "user")]
#[case::event(VoteAppendOutcome::UnknownEvent, "event")]
#[tokio::test]
async fn unknown_entities_are_distinguished(
    request: CastVoteRequest,
    #[case] outcome: VoteAppendOutcome,
    #[case] entity: &str,
) {
    let mut ledger = MockVoteLedgerRepository::new();
    ledger
        .expect_append_vote()
        .times(1)
        .return_once(move |_| Ok(outcome));

    let error = make_service(ledger)
        .cast_vote(request)
        .await
        .expect_err("unknown entity");

    assert_eq!(error.code(), ErrorCode::UnknownEntity);
    assert_eq!(error.details().expect("details")["entity"], entity);
}

#[rstest]
#[tokio::test]
async fn exhausted_budget_reports_shortfall(request: CastVoteRequest) {
    let mut ledger = MockVoteLedgerRepository::new();
    ledger
        .expect_append_vote()
        .times(1)
        .return_once(|_| Ok(VoteAppendOutcome::BudgetExhausted { remaining: 0 }));

    let error = make_service(ledger)
        .cast_vote(CastVoteRequest {
            amount: 3,
            ..request
        })
        .await
        .expect_err("insufficient budget");

    assert_eq!(error.code(), ErrorCode::InsufficientBudget);
    let details = error.details().expect("details");
    assert_eq!(details["requested"], 3);
    assert_eq!(details["remaining"], 0);
}

#[rstest]
#[case::connection(
    VoteLedgerRepositoryError::connection("refused"),
    ErrorCode::ServiceUnavailable
)]
#[case::query(VoteLedgerRepositoryError::query("deadlock"), ErrorCode::InternalError)]
#[tokio::test]
async fn ledger_failures_map_to_infrastructure_codes(
    request: CastVoteRequest,
    #[case] failure: VoteLedgerRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut ledger = MockVoteLedgerRepository::new();
    ledger
        .expect_append_vote()
        .times(1)
        .return_once(move |_| Err(failure));

    let error = make_service(ledger)
        .cast_vote(request)
        .await
        .expect_err("ledger failure");

    assert_eq!(error.code(), expected);
}

#[rstest]
#[tokio::test]
async fn list_vote_records_pages_with_configured_size() {
    let voter = UserId::random();
    let event = EventId::random();
    let mut ledger = MockVoteLedgerRepository::new();
    ledger
        .expect_list_votes()
        .withf(move |filter| {
            filter.voter == voter && filter.page.index() == 2 && filter.page.size() == 5
        })
        .times(1)
        .return_once(|_| Ok(Vec::new()));

    let records = make_service(ledger)
        .list_vote_records(ListVoteRecordsRequest {
            voter,
            event,
            page: 2,
        })
        .await
        .expect("records");

    assert!(records.is_empty());
}

#[rstest]
#[tokio::test]
async fn list_vote_records_rejects_page_zero() {
    let mut ledger = MockVoteLedgerRepository::new();
    ledger.expect_list_votes().with(always()).times(0);

    let error = make_service(ledger)
        .list_vote_records(ListVoteRecordsRequest {
            voter: UserId::random(),
            event: EventId::random(),
            page: 0,
        })
        .await
        .expect_err("page zero");

    assert_eq!(error.code(), ErrorCode::RequestNotValid);
    assert_eq!(error.details().expect("details")["field"], "page");
}
