//! Steady Web Server
//!
//! Axum-based REST API over the adaptive budget engine. The server owns no
//! state beyond the injected planner; every request is an independent
//! computation, so no locking or per-user coordination exists here.
//!
//! Authentication, persistence, and delivery are external concerns; this
//! surface only validates input and shapes responses.

use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use steady_core::BudgetPlanner;

mod handlers;

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

/// Shared application state
pub struct AppState {
    pub planner: BudgetPlanner,
}

/// Create the application router
pub fn create_router(planner: BudgetPlanner, config: ServerConfig) -> Router {
    let state = Arc::new(AppState { planner });

    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_headers(tower_http::cors::Any);
    for origin in &config.allowed_origins {
        if let Ok(value) = origin.parse::<HeaderValue>() {
            cors = cors.allow_origin(value);
        }
    }

    Router::new()
        .route("/api/health", get(handlers::health))
        .route(
            "/api/users/:user_id/budget/:month",
            get(handlers::compute_budget),
        )
        .route(
            "/api/users/:user_id/budget/:month/series",
            get(handlers::budget_series),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until shutdown
pub async fn serve(planner: BudgetPlanner, host: &str, port: u16, config: ServerConfig) -> anyhow::Result<()> {
    let app = create_router(planner, config);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Steady API listening");
    axum::serve(listener, app).await?;
    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn internal(msg: &str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl From<steady_core::Error> for AppError {
    fn from(err: steady_core::Error) -> Self {
        match err {
            // Caller errors surface verbatim with a 400
            steady_core::Error::Validation(msg) => Self::bad_request(&msg),
            // Anything else the planner did not already degrade
            other => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "An internal error occurred".to_string(),
                internal: Some(other.into()),
            },
        }
    }
}

#[cfg(test)]
mod tests;
