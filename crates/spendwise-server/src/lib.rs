//! Spendwise Web Server
//!
//! Axum server for the Spendwise recommender: a server-rendered dashboard
//! form at `/` and a small JSON API under `/api`.
//!
//! Security features:
//! - CORS limited to same-origin unless origins are configured
//! - nosniff, frame denial and a script-free CSP on every response
//! - 500 replies never carry the underlying error
//!
//! The pipeline is loaded before the listener binds and shared read-only by
//! every request.

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use spendwise_core::Pipeline;

mod handlers;

/// Server options that are not part of the pipeline
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Origins allowed to call the API cross-site; empty keeps it same-origin
    pub allowed_origins: Vec<String>,
}

/// State handed to every handler
pub struct AppState {
    pub pipeline: Pipeline,
    pub config: ServerConfig,
}

/// Response headers set on every page and API reply
const SECURITY_HEADERS: [(header::HeaderName, &str); 4] = [
    (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (header::X_FRAME_OPTIONS, "DENY"),
    (header::X_XSS_PROTECTION, "1; mode=block"),
    // The dashboard needs inline styles and a same-origin form post, nothing else
    (
        header::CONTENT_SECURITY_POLICY,
        "default-src 'self'; script-src 'none'; style-src 'self' 'unsafe-inline'; img-src 'self' data:; form-action 'self'; frame-ancestors 'none'",
    ),
];

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if allowed_origins.is_empty() {
        return cors;
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();
    cors.allow_origin(origins)
}

/// Build the dashboard and API routes around a loaded pipeline
pub fn create_router(pipeline: Pipeline, config: ServerConfig) -> Router {
    let cors = cors_layer(&config.allowed_origins);
    let state = Arc::new(AppState { pipeline, config });

    let api = Router::new()
        .route("/predict", post(handlers::predict))
        .route("/schema", get(handlers::schema))
        .route("/health", get(handlers::health));

    let mut router = Router::new()
        .route("/", get(handlers::dashboard).post(handlers::submit_dashboard))
        .nest("/api", api)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    for (name, value) in SECURITY_HEADERS {
        router = router.layer(SetResponseHeaderLayer::overriding(
            name,
            HeaderValue::from_static(value),
        ));
    }

    router
}

/// Bind and serve until the process exits
///
/// The pipeline is already loaded here, so the listener never accepts a
/// request before the models are ready.
pub async fn serve_with_config(
    pipeline: Pipeline,
    host: &str,
    port: u16,
    config: ServerConfig,
) -> anyhow::Result<()> {
    if !config.allowed_origins.is_empty() {
        info!(origins = ?config.allowed_origins, "CORS origins allowed");
    }

    let app = create_router(pipeline, config);
    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    info!(address = %listener.local_addr()?, "Spendwise dashboard listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Error reply for handlers: `{"error": message}` with a status code
///
/// Server-side failures keep their cause for the log and send the client a
/// generic message.
pub struct AppError {
    status: StatusCode,
    message: String,
    cause: Option<spendwise_core::Error>,
}

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
            cause: None,
        }
    }

    /// Invalid submissions become 400 with the field named; anything else is
    /// a 500 that hides the details
    pub fn from_core(err: spendwise_core::Error) -> Self {
        if err.is_client_error() {
            return Self::bad_request(err.to_string());
        }
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Unable to produce a recommendation".to_string(),
            cause: Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(cause) = &self.cause {
            error!(error = %cause, "Recommendation failed");
        }

        let body = Json(serde_json::json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests;
