pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Dialer API",
        version = "0.1.0",
        description = "Trigger outbound voice-AI calls, one at a time or in bulk"
    ),
    paths(
        routes::health_check,
        routes::list_assistants,
        routes::make_calls,
    ),
    components(schemas(
        routes::HealthResponse,
        routes::AssistantsResponse,
        routes::MakeCallsRequest,
        routes::MakeCallsResponse,
        error::ErrorResponse,
        dialer_core::BulkDispatchOutcome,
        dialer_core::CallResult,
        dialer_core::CallStatus,
    )),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "assistants", description = "Assistants configured on the calling gateway"),
        (name = "calls", description = "Outbound call dispatch"),
    )
)]
pub struct ApiDoc;

pub fn create_router(state: AppState) -> Router {
    let app_dir = state.app_dir.clone();

    let api_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api/openapi.json", ApiDoc::openapi()))
        .route("/health", get(routes::health_check))
        .route("/api/assistants", get(routes::list_assistants))
        .route("/api/make-calls", post(routes::make_calls))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    if let Some(app_dir) = app_dir {
        let index_file = app_dir.join("index.html");
        let serve_dir = ServeDir::new(&app_dir).not_found_service(ServeFile::new(&index_file));
        api_router.fallback_service(serve_dir)
    } else {
        api_router
    }
}
