use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde_json::json;

use crate::common::config::SecretKey;
use crate::common::error::VerifyError;
use crate::common::verify::hmac_sha256_hex;

/// Key used by the fixtures below.
pub const TEST_SECRET: &str = "VIGILCAP_SECURE_HASH_KEY_2025";

/// HMAC-SHA256("VIGILCAP_SECURE_HASH_KEY_2025", "hello"), computed out of band.
pub const HELLO_SIGNATURE: &str =
    "955CAD8219711C3BDDBD1E3804BB7B3DE338105A30CCAF25BB13830305956243";

pub fn test_key() -> SecretKey {
    SecretKey::from(TEST_SECRET)
}

/// Builds a `POST /verify` body for `payload` signed under `secret`.
pub fn signed_request_body(payload: &[u8], secret: &str) -> Result<Vec<u8>, VerifyError> {
    let signature = hmac_sha256_hex(secret.as_bytes(), payload)?;
    Ok(request_body(&BASE64.encode(payload), &signature))
}

pub fn request_body(file: &str, signature: &str) -> Vec<u8> {
    json!({
        "file": file,
        "signature": signature,
    })
    .to_string()
    .into_bytes()
}

/// Replaces the last hex digit of `signature` with a different one.
pub fn alter_last_hex_char(signature: &str) -> String {
    let mut altered = signature.to_string();
    let replacement = match altered.pop() {
        Some('0') => '1',
        _ => '0',
    };
    altered.push(replacement);
    altered
}
