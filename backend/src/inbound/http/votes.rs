//! Vote handlers.
//!
//! ```text
//! POST /api/v1/events/{eventId}/votes {"userId":"...","amount":2}
//! GET  /api/v1/vote-records?userId=...&eventId=...&page=1
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{CastVoteRequest, ListVoteRecordsRequest, VoteReceipt};
use crate::domain::{EventId, UserId, VoteRecord};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    parse_optional_rfc3339_timestamp, parse_uuid, require, FieldName,
};

/// Vote payload; `castAt` defaults to the server clock.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CastVoteBody {
    #[schema(format = "uuid")]
    pub user_id: String,
    pub amount: u32,
    #[schema(format = "date-time")]
    pub cast_at: Option<String>,
}

/// One ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VoteRecordBody {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "uuid")]
    pub user_id: String,
    #[schema(format = "uuid")]
    pub event_id: String,
    pub amount: u32,
    #[schema(format = "date-time")]
    pub cast_at: String,
}

impl From<VoteRecord> for VoteRecordBody {
    fn from(record: VoteRecord) -> Self {
        Self {
            id: record.id.to_string(),
            user_id: record.voter.to_string(),
            event_id: record.event.to_string(),
            amount: record.amount.get(),
            cast_at: record.cast_at.to_rfc3339(),
        }
    }
}

/// Accepted vote with the balances it produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VoteReceiptBody {
    pub record: VoteRecordBody,
    pub remaining_budget: u32,
    pub event_tally: u32,
}

impl From<VoteReceipt> for VoteReceiptBody {
    fn from(receipt: VoteReceipt) -> Self {
        Self {
            record: receipt.record.into(),
            remaining_budget: receipt.remaining_budget,
            event_tally: receipt.event_tally,
        }
    }
}

/// Vote record page selector; `page` defaults to 1.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct VoteRecordsQuery {
    pub user_id: Option<String>,
    pub event_id: Option<String>,
    pub page: Option<u32>,
}

/// Cast votes for an event.
#[utoipa::path(
    post,
    path = "/api/v1/events/{eventId}/votes",
    params(("eventId" = String, Path, format = "uuid")),
    request_body = CastVoteBody,
    responses(
        (status = 200, description = "Vote recorded", body = VoteReceiptBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown user or event", body = ErrorSchema),
        (status = 422, description = "Budget too small", body = ErrorSchema)
    ),
    tags = ["votes"],
    operation_id = "castVote"
)]
#[post("/events/{event_id}/votes")]
pub async fn cast_vote(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<CastVoteBody>,
) -> ApiResult<web::Json<VoteReceiptBody>> {
    let event = EventId::from_uuid(parse_uuid(&path, FieldName::new("eventId"))?);
    let CastVoteBody {
        user_id,
        amount,
        cast_at,
    } = payload.into_inner();
    let request = CastVoteRequest {
        voter: UserId::from_uuid(parse_uuid(&user_id, FieldName::new("userId"))?),
        event,
        amount,
        cast_at: parse_optional_rfc3339_timestamp(cast_at.as_deref(), FieldName::new("castAt"))?,
    };
    let receipt = state.votes.cast_vote(request).await?;
    Ok(web::Json(receipt.into()))
}

/// Page through a voter's records for one event, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/vote-records",
    params(VoteRecordsQuery),
    responses(
        (status = 200, description = "Vote records", body = [VoteRecordBody]),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["votes"],
    operation_id = "listVoteRecords"
)]
#[get("/vote-records")]
pub async fn list_vote_records(
    state: web::Data<HttpState>,
    query: web::Query<VoteRecordsQuery>,
) -> ApiResult<web::Json<Vec<VoteRecordBody>>> {
    let VoteRecordsQuery {
        user_id,
        event_id,
        page,
    } = query.into_inner();
    let user_field = FieldName::new("userId");
    let event_field = FieldName::new("eventId");
    let request = ListVoteRecordsRequest {
        voter: UserId::from_uuid(parse_uuid(&require(user_id, user_field)?, user_field)?),
        event: EventId::from_uuid(parse_uuid(&require(event_id, event_field)?, event_field)?),
        page: page.unwrap_or(1),
    };
    let records = state.vote_records.list_vote_records(request).await?;
    Ok(web::Json(records.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
#[path = "votes_tests.rs"]
mod tests;
