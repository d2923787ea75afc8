//! Ranking and nomination handlers.
//!
//! ```text
//! GET  /api/v1/events?start=1&end=3
//! GET  /api/v1/events/2
//! POST /api/v1/events {"eventName":"launch","keyword":"tech","userId":"..."}
//! ```

use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{ListEventsRequest, NominateEventRequest};
use crate::domain::{RankedEvent, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    parse_non_negative, parse_position, parse_uuid, FieldName,
};

/// One entry of the composed ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub event_name: String,
    pub keyword: String,
    #[schema(format = "uuid")]
    pub owner_id: String,
    pub vote_tally: u32,
}

impl From<RankedEvent> for EventBody {
    fn from(event: RankedEvent) -> Self {
        Self {
            id: event.id().to_string(),
            event_name: event.name().to_owned(),
            keyword: event.keyword().to_owned(),
            owner_id: event.owner().to_string(),
            vote_tally: event.vote_tally(),
        }
    }
}

/// Optional 1-based inclusive window.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct EventsQuery {
    pub start: Option<i64>,
    pub end: Option<i64>,
}

/// Nomination payload.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NominateEventBody {
    pub event_name: String,
    pub keyword: String,
    /// Owner of the event.
    #[schema(format = "uuid")]
    pub user_id: String,
}

/// Composed ranking, optionally cut to `[start, end]`.
#[utoipa::path(
    get,
    path = "/api/v1/events",
    params(EventsQuery),
    responses(
        (status = 200, description = "Composed ranking", body = [EventBody]),
        (status = 400, description = "Invalid window", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["events"],
    operation_id = "listEvents"
)]
#[get("/events")]
pub async fn list_events(
    state: web::Data<HttpState>,
    query: web::Query<EventsQuery>,
) -> ApiResult<web::Json<Vec<EventBody>>> {
    let EventsQuery { start, end } = query.into_inner();
    let request = ListEventsRequest {
        start: start
            .map(|raw| parse_non_negative(raw, FieldName::new("start")))
            .transpose()?,
        end: end
            .map(|raw| parse_non_negative(raw, FieldName::new("end")))
            .transpose()?,
    };
    let events = state.ranking.list_events(request).await?;
    Ok(web::Json(events.into_iter().map(EventBody::from).collect()))
}

/// Event at a 1-based position of the composed ranking.
#[utoipa::path(
    get,
    path = "/api/v1/events/{index}",
    params(("index" = i64, Path, description = "1-based ranking position")),
    responses(
        (status = 200, description = "Ranked event", body = EventBody),
        (status = 400, description = "Index out of range", body = ErrorSchema)
    ),
    tags = ["events"],
    operation_id = "getEventByIndex"
)]
#[get("/events/{index}")]
pub async fn get_event(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<EventBody>> {
    let index = parse_position(&path, FieldName::new("index"))?;
    let event = state.ranking.event_at(index).await?;
    Ok(web::Json(event.into()))
}

/// Nominate an event for an existing user.
#[utoipa::path(
    post,
    path = "/api/v1/events",
    request_body = NominateEventBody,
    responses(
        (status = 201, description = "Event nominated", body = EventBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown owner", body = ErrorSchema)
    ),
    tags = ["events"],
    operation_id = "nominateEvent"
)]
#[post("/events")]
pub async fn nominate_event(
    state: web::Data<HttpState>,
    payload: web::Json<NominateEventBody>,
) -> ApiResult<HttpResponse> {
    let NominateEventBody {
        event_name,
        keyword,
        user_id,
    } = payload.into_inner();
    let owner = UserId::from_uuid(parse_uuid(&user_id, FieldName::new("userId"))?);
    let event = state
        .registration
        .nominate_event(NominateEventRequest {
            name: event_name,
            keyword,
            owner,
        })
        .await?;
    Ok(HttpResponse::Created().json(EventBody::from(event)))
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;
