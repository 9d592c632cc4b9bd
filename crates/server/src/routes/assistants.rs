use axum::extract::State;
use axum::Json;
use dialer_core::Assistant;
use serde::Serialize;
use tracing::debug;
use utoipa::ToSchema;

use crate::error::{AppError, ErrorResponse};
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
#[cfg_attr(feature = "typescript", derive(ts_rs::TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct AssistantsResponse {
    pub success: bool,
    /// Assistant records exactly as the gateway returned them.
    #[schema(value_type = Vec<Object>)]
    #[cfg_attr(feature = "typescript", ts(type = "Array<Record<string, unknown>>"))]
    pub assistants: Vec<Assistant>,
    pub count: usize,
}

#[utoipa::path(
    get,
    path = "/api/assistants",
    responses(
        (status = 200, description = "Assistants configured on the gateway", body = AssistantsResponse),
        (status = 500, description = "Gateway unreachable or rejected the request", body = ErrorResponse)
    ),
    tag = "assistants"
)]
pub async fn list_assistants(
    State(state): State<AppState>,
) -> Result<Json<AssistantsResponse>, AppError> {
    let assistants = state
        .gateway
        .list_assistants()
        .await
        .map_err(|e| AppError::Internal(format!("Failed to fetch assistants: {}", e)))?;

    debug!("Fetched {} assistants", assistants.len());

    Ok(Json(AssistantsResponse {
        success: true,
        count: assistants.len(),
        assistants,
    }))
}
