//! Test helpers for the board handlers.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App};
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::inbound::http::configure_api;
use crate::inbound::http::state::{BoardRepositories, BoardTuning, HttpState};
use crate::outbound::memory::InMemoryBoardStore;

/// Clock pinned to 2026-03-14T09:30:00Z.
pub struct FixedClock;

impl FixedClock {
    pub fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0)
            .single()
            .expect("valid fixture timestamp")
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        Self::instant().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        Self::instant()
    }
}

/// Board state over a fresh in-memory store with default tuning.
pub fn board_state() -> HttpState {
    HttpState::from_repositories(
        BoardRepositories::shared(Arc::new(InMemoryBoardStore::new())),
        Arc::new(FixedClock),
        BoardTuning::default(),
    )
}

/// App exposing the board API under `/api/v1`.
pub fn board_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .service(web::scope("/api/v1").configure(configure_api))
}

pub fn post_json(uri: &str, body: serde_json::Value) -> actix_web::test::TestRequest {
    actix_web::test::TestRequest::post().uri(uri).set_json(body)
}

pub fn get(uri: &str) -> actix_web::test::TestRequest {
    actix_web::test::TestRequest::get().uri(uri)
}

/// Registration payload with a ten-vote budget.
pub fn profile(name: &str) -> serde_json::Value {
    serde_json::json!({
        "userName": name,
        "gender": "female",
        "age": 30,
        "email": format!("{name}@example.com"),
        "phone": "18888888888",
        "voteBudget": 10
    })
}
