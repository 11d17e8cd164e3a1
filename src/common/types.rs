use serde::{Deserialize, Serialize};

/// Wire body of `POST /verify`.
///
/// Both fields are optional at the serde level so that a missing field is
/// reported as a malformed request rather than a parse failure.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct VerifyRequest {
    /// Base64-encoded report bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Hex HMAC-SHA256 of the decoded bytes, any case
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

/// Outcome of a verification that actually ran.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub valid: bool,
    pub message: String,
}

/// Body returned for every non-200 outcome.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid: Option<bool>,
    pub error: String,
}

/// A report and its signature, ready to be posted to the verifier.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SignedReport {
    pub file: String,
    pub signature: String,
}

impl From<SignedReport> for VerifyRequest {
    fn from(report: SignedReport) -> Self {
        VerifyRequest {
            file: Some(report.file),
            signature: Some(report.signature),
        }
    }
}
