//! OpenAPI schemas for domain types.
//!
//! The domain never derives `ToSchema`; these mirrors register the error
//! envelope with utoipa from the adapter layer.

use utoipa::ToSchema;

/// Stable machine-readable error code.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    #[schema(rename = "unknown_entity")]
    UnknownEntity,
    #[schema(rename = "insufficient_budget")]
    InsufficientBudget,
    #[schema(rename = "amount_too_low")]
    AmountTooLow,
    #[schema(rename = "request_not_valid")]
    RequestNotValid,
    #[schema(rename = "conflict")]
    Conflict,
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    #[schema(rename = "internal_error")]
    InternalError,
}

/// Error envelope returned by every failing board endpoint.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    #[schema(example = "amount_too_low")]
    code: ErrorCodeSchema,
    #[schema(example = "bid of 22 does not exceed 24 held at rank 1")]
    message: String,
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Structured context, e.g. `{ "rank": 1, "offered": 22, "incumbent": 24 }`.
    details: Option<serde_json::Value>,
}
