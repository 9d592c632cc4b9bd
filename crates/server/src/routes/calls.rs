use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use dialer_core::{BulkDispatchOutcome, DispatchMode};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::error::{AppError, ErrorResponse};
use crate::state::AppState;

/// Dashboard form submission.
///
/// `assistantId` and `phoneNumbers` are optional at the type level so that a
/// missing field is reported as a validation error rather than a parse failure.
#[derive(Debug, Deserialize, ToSchema)]
#[cfg_attr(feature = "typescript", derive(ts_rs::TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct MakeCallsRequest {
    pub assistant_id: Option<String>,
    pub phone_numbers: Option<Vec<String>>,
    /// Milliseconds between immediate calls, or between scheduled slots.
    pub delay: Option<u64>,
    /// ISO-8601 start of the first scheduled slot. Defaults to now.
    pub schedule_from: Option<String>,
    #[serde(default)]
    pub use_scheduling: bool,
}

#[derive(Debug, Serialize, ToSchema)]
#[cfg_attr(feature = "typescript", derive(ts_rs::TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct MakeCallsResponse {
    pub success: bool,
    #[serde(flatten)]
    pub outcome: BulkDispatchOutcome,
}

#[utoipa::path(
    post,
    path = "/api/make-calls",
    request_body = MakeCallsRequest,
    responses(
        (status = 200, description = "Every number was attempted; see per-call results", body = MakeCallsResponse),
        (status = 400, description = "Missing assistant or numbers, or bad schedule time", body = ErrorResponse),
        (status = 500, description = "Server misconfigured or malformed request", body = ErrorResponse)
    ),
    tag = "calls"
)]
pub async fn make_calls(
    State(state): State<AppState>,
    payload: Result<Json<MakeCallsRequest>, JsonRejection>,
) -> Result<Json<MakeCallsResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Internal(e.body_text()))?;

    let mode = DispatchMode::from_options(
        Some(request.delay.unwrap_or(state.default_delay_ms)),
        request.use_scheduling,
        request.schedule_from.as_deref(),
    )?;

    let phone_numbers = request.phone_numbers.unwrap_or_default();
    info!(
        "Dispatch requested for {} numbers ({})",
        phone_numbers.len(),
        if mode.is_scheduled() { "scheduled" } else { "immediate" }
    );

    let outcome = state
        .dispatcher
        .dispatch(
            request.assistant_id.as_deref().unwrap_or_default(),
            &phone_numbers,
            mode,
        )
        .await?;

    Ok(Json(MakeCallsResponse {
        success: true,
        outcome,
    }))
}
