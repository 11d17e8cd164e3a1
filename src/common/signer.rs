use std::fs;
use std::path::Path;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use crate::common::config::SecretKey;
use crate::common::types::SignedReport;
use crate::common::verify::hmac_sha256_hex;

/// Signs report bytes the way the verifier expects them.
pub fn sign_report(report: &[u8], key: &SecretKey) -> Result<SignedReport, Box<dyn std::error::Error>> {
    let signature = hmac_sha256_hex(key.expose(), report)?;

    Ok(SignedReport {
        file: BASE64.encode(report),
        signature,
    })
}

/// Reads a report from disk and signs it.
pub fn sign_report_file(path: &Path, key: &SecretKey) -> Result<SignedReport, Box<dyn std::error::Error>> {
    let report = fs::read(path)
        .map_err(|e| format!("Failed to read report {}: {}", path.display(), e))?;
    sign_report(&report, key)
}
