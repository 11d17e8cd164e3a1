//! Transport-independent processing of a `POST /verify` body.
//!
//! Both the axum server and the Lambda function hand the raw request bytes
//! to [`process_verify_body`] and map its result onto their own response type.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::common::config::SecretKey;
use crate::common::error::VerifyError;
use crate::common::types::VerifyResponse;
use crate::common::verify;

/// Standard alphabet that accepts missing padding and stray trailing bits.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Decodes the `file` field, ignoring ASCII whitespace such as line wraps.
pub fn decode_report(file: &str) -> Result<Vec<u8>, VerifyError> {
    let compact: String = file.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    Ok(LENIENT_BASE64.decode(compact)?)
}

// null, false, 0 and "" all count as missing; so does an absent field.
fn present<'a>(request: &'a Value, field: &str) -> Option<&'a Value> {
    match request.get(field)? {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) if s.is_empty() => None,
        value => Some(value),
    }
}

fn as_text<'a>(value: &'a Value, field: &'static str) -> Result<&'a str, VerifyError> {
    value.as_str().ok_or(VerifyError::FieldType(field))
}

/// Parses, validates and verifies a request body.
pub fn process_verify_body(body: &[u8], key: &SecretKey) -> Result<VerifyResponse, VerifyError> {
    let request: Value = serde_json::from_slice(body)?;

    let (file, signature) = match (present(&request, "file"), present(&request, "signature")) {
        (Some(file), Some(signature)) => (file, signature),
        _ => return Err(VerifyError::MalformedRequest),
    };
    let file = as_text(file, "file")?;
    let signature = as_text(signature, "signature")?;

    let payload = decode_report(file)?;
    debug!(payload_len = payload.len(), "decoded report payload");

    verify::verify(&payload, signature, key)
}

/// Runs [`process_verify_body`] and logs the outcome without payload or key.
pub fn handle_verify_body(body: &[u8], key: &SecretKey) -> Result<VerifyResponse, VerifyError> {
    let outcome = process_verify_body(body, key);
    match &outcome {
        Ok(result) => info!(valid = result.valid, "verification complete"),
        Err(VerifyError::MalformedRequest) => warn!("rejected request missing file or signature"),
        Err(err) => error!(kind = err.kind(), error = %err, "verification error"),
    }
    outcome
}
