use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit, State},
    middleware,
    routing::post,
    Json, Router,
};
use report_verifier_service::common::config::{SecretKey, VerifierConfig};
use report_verifier_service::common::cors::cors_middleware;
use report_verifier_service::common::error::VerifyError;
use report_verifier_service::common::handler;
use report_verifier_service::common::types::VerifyResponse;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

// Shared, read-only state: just the key
struct AppState {
    secret_key: SecretKey,
}

// Create a new router with the verify endpoint
pub fn create_router(config: &VerifierConfig) -> Router {
    let state = Arc::new(AppState {
        secret_key: config.secret_key.clone(),
    });

    Router::new()
        .route("/verify", post(handle_verify_request).fallback(not_found))
        .fallback(not_found)
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(middleware::from_fn(cors_middleware))
        .layer(TraceLayer::new_for_http())
}

// Handle the verify request
async fn handle_verify_request(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<VerifyResponse>, VerifyError> {
    let body = body.map_err(|rejection| {
        let err = VerifyError::BodyRead(rejection.body_text());
        error!(kind = err.kind(), error = %err, "verification error");
        err
    })?;

    handler::handle_verify_body(&body, &state.secret_key).map(Json)
}

async fn not_found() -> VerifyError {
    debug!("no route matched");
    VerifyError::NotFound
}


#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = VerifierConfig::from_env()?;
    if config.uses_dev_secret() {
        warn!("using the built-in development secret; do not deploy this configuration");
    }

    // Create the router
    let app = create_router(&config);

    info!(addr = %config.addr, max_body_bytes = config.max_body_bytes, "Verifier service listening");

    // Run the server
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
