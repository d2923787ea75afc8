//! Slot purchase handler.
//!
//! ```text
//! POST /api/v1/events/{eventId}/slot {"rank":1,"amount":24}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{BuySlotRequest, SlotReceipt};
use crate::domain::{EventId, SlotBid};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_uuid, FieldName};

/// Offer for a rank.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct BuySlotBody {
    pub rank: u32,
    pub amount: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SlotBody {
    pub rank: u32,
    pub amount: u32,
    #[schema(format = "uuid")]
    pub event_id: String,
}

impl From<SlotBid> for SlotBody {
    fn from(bid: SlotBid) -> Self {
        Self {
            rank: bid.rank.get(),
            amount: bid.amount.get(),
            event_id: bid.event_id.to_string(),
        }
    }
}

/// Purchased bid plus the bids it displaced or released.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SlotReceiptBody {
    pub bid: SlotBody,
    pub displaced: Option<SlotBody>,
    pub released: Option<SlotBody>,
}

impl From<SlotReceipt> for SlotReceiptBody {
    fn from(receipt: SlotReceipt) -> Self {
        Self {
            bid: receipt.bid.into(),
            displaced: receipt.displaced.map(Into::into),
            released: receipt.released.map(Into::into),
        }
    }
}

/// Buy a ranking position for an event.
#[utoipa::path(
    post,
    path = "/api/v1/events/{eventId}/slot",
    params(("eventId" = String, Path, format = "uuid")),
    request_body = BuySlotBody,
    responses(
        (status = 200, description = "Slot purchased", body = SlotReceiptBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown event", body = ErrorSchema),
        (status = 409, description = "Outbid or contended", body = ErrorSchema)
    ),
    tags = ["slots"],
    operation_id = "buySlot"
)]
#[post("/events/{event_id}/slot")]
pub async fn buy_slot(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<BuySlotBody>,
) -> ApiResult<web::Json<SlotReceiptBody>> {
    let event = EventId::from_uuid(parse_uuid(&path, FieldName::new("eventId"))?);
    let BuySlotBody { rank, amount } = payload.into_inner();
    let receipt = state
        .slots
        .buy_slot(BuySlotRequest {
            event,
            rank,
            amount,
        })
        .await?;
    Ok(web::Json(receipt.into()))
}
