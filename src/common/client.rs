use tracing::debug;

use crate::common::types::{ErrorResponse, SignedReport, VerifyRequest, VerifyResponse};

pub const DEFAULT_VERIFY_URL: &str = "http://127.0.0.1:3000/verify";

/// Posts a signed report to a verifier and returns its verdict.
///
/// A non-success status is turned into an error carrying the server's
/// `error` field when it sent one.
pub async fn submit_report(
    client: &reqwest::Client,
    verify_url: &str,
    report: SignedReport,
) -> Result<VerifyResponse, Box<dyn std::error::Error>> {
    let request_body = VerifyRequest::from(report);

    debug!(url = verify_url, "submitting report for verification");
    let response = client
        .post(verify_url)
        .header("Content-Type", "application/json")
        .json(&request_body)
        .send()
        .await?;

    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        let detail = serde_json::from_str::<ErrorResponse>(&text)
            .map(|body| body.error)
            .unwrap_or(text);
        return Err(format!("Server returned status {}: {}", status, detail).into());
    }

    serde_json::from_str::<VerifyResponse>(&text)
        .map_err(|e| format!("Failed to parse JSON response: {}", e).into())
}
