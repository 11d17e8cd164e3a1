use lambda_http::http::Method;
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use report_verifier_service::common::config::{SecretKey, VerifierConfig};
use report_verifier_service::common::cors::CORS_HEADERS;
use report_verifier_service::common::error::VerifyError;
use report_verifier_service::common::handler;
use tracing::{debug, warn};

/// Main function for the Lambda handler
#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .without_time()
        .with_line_number(false)
        .init();

    // Resolved once per cold start; a missing secret fails the init phase
    let config = VerifierConfig::from_env()?;
    if config.uses_dev_secret() {
        warn!("using the built-in development secret; do not deploy this configuration");
    }

    let secret_key = config.secret_key;
    run(service_fn(|event| handle_request(event, secret_key.clone()))).await
}

/// Route the incoming request
async fn handle_request(event: Request, secret_key: SecretKey) -> Result<Response<Body>, Error> {
    let method = event.method().clone();
    let path = event.uri().path().to_string();
    debug!(%method, path = %path, "received request");

    if method == Method::OPTIONS {
        return empty_response(200);
    }

    if method == Method::POST && path == "/verify" {
        handle_verify_request(event, &secret_key)
    } else {
        error_response(VerifyError::NotFound)
    }
}

/// Handle the verify request
fn handle_verify_request(event: Request, secret_key: &SecretKey) -> Result<Response<Body>, Error> {
    let body: &[u8] = event.body();

    match handler::handle_verify_body(body, secret_key) {
        Ok(result) => json_response(200, serde_json::to_string(&result)?),
        Err(err) => error_response(err),
    }
}

fn error_response(err: VerifyError) -> Result<Response<Body>, Error> {
    json_response(err.status_code().as_u16(), serde_json::to_string(&err.body())?)
}

fn json_response(status: u16, body: String) -> Result<Response<Body>, Error> {
    let mut builder = Response::builder()
        .status(status)
        .header("content-type", "application/json");
    for (name, value) in CORS_HEADERS {
        builder = builder.header(name, value);
    }
    Ok(builder.body(Body::from(body))?)
}

fn empty_response(status: u16) -> Result<Response<Body>, Error> {
    let mut builder = Response::builder().status(status);
    for (name, value) in CORS_HEADERS {
        builder = builder.header(name, value);
    }
    Ok(builder.body(Body::Empty)?)
}
