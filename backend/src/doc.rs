//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every board endpoint together with the request and
//! response bodies of the HTTP adapter and the error envelope mirrors from
//! [`crate::inbound::http::schemas`]. Swagger UI serves it in debug builds
//! and `cargo run --bin openapi-dump` prints it for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::events::{EventBody, NominateEventBody};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::slots::{BuySlotBody, SlotBody, SlotReceiptBody};
use crate::inbound::http::users::{RegisterUserBody, UserBody};
use crate::inbound::http::votes::{CastVoteBody, VoteReceiptBody, VoteRecordBody};

/// OpenAPI document for the board API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "rsboard API",
        description = "Ranked event board with vote budgets and paid rank slots.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::events::list_events,
        crate::inbound::http::events::get_event,
        crate::inbound::http::events::nominate_event,
        crate::inbound::http::votes::cast_vote,
        crate::inbound::http::votes::list_vote_records,
        crate::inbound::http::slots::buy_slot,
        crate::inbound::http::users::register_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        EventBody,
        NominateEventBody,
        CastVoteBody,
        VoteRecordBody,
        VoteReceiptBody,
        BuySlotBody,
        SlotBody,
        SlotReceiptBody,
        RegisterUserBody,
        UserBody,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "events", description = "Composed ranking and nominations"),
        (name = "votes", description = "Vote casting and vote history"),
        (name = "slots", description = "Paid rank slots"),
        (name = "users", description = "Voter registration"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
