use axum::{
    routing::{get, post},
    Router,
    extract::{rejection::JsonRejection, Json, State},
    response::{Html, IntoResponse, Response},
};
use tower_http::cors::{CorsLayer, Any};
use tower_http::trace::TraceLayer;
use tracing::{info, warn, error};

use crate::api::models::SummarizeRequest;
use crate::api::{page, response};
use crate::error::{AppError, Severity};
use crate::pipeline::summarize_url;
use crate::AppState;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/api/profiles", get(profiles_handler))
        .route("/api/summarize", post(summarize_handler))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

async fn index_handler() -> Html<&'static str> {
    Html(page::INDEX_HTML)
}

async fn health_handler() -> &'static str {
    "ok"
}

async fn profiles_handler(State(state): State<AppState>) -> impl IntoResponse {
    response::success(state.config.profiles.clone())
}

async fn summarize_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SummarizeRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!("rejected request body: {}", rejection.body_text());
            return AppError::InvalidRequest(rejection.body_text()).into_response();
        }
    };

    info!(url = %req.url, "processing summarize request");
    let start_time = std::time::Instant::now();

    // Set an overall timeout for the entire handler
    let result = tokio::time::timeout(
        state.config.request_timeout,
        summarize_url(&state, &req),
    )
    .await
    .unwrap_or_else(|_| Err(AppError::Timeout("Request processing".to_string())));

    let elapsed = start_time.elapsed();

    match result {
        Ok(report) => {
            info!(url = %req.url, ?elapsed, "request completed");
            response::success(report).into_response()
        }
        Err(err) => {
            match err.severity() {
                Severity::Warning => warn!(url = %req.url, "rejected request: {}", err),
                Severity::Error => error!(url = %req.url, ?elapsed, "request failed: {}", err),
            }
            err.into_response()
        }
    }
}
