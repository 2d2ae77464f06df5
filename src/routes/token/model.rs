use serde::{Deserialize, Serialize};

use crate::token::Verification;

/// 过期原因
pub const REASON_EXPIRED: &str = "expired";

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyRequest {
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl From<Verification> for VerifyResponse {
    fn from(outcome: Verification) -> Self {
        VerifyResponse {
            is_valid: outcome.is_valid(),
            reason: match outcome {
                Verification::Expired => Some(REASON_EXPIRED.to_string()),
                Verification::Valid | Verification::Mismatch => None,
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExpiryRequest {
    pub seconds: u64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiryResponse {
    pub user: String,
    pub expiry_seconds: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_response_shapes() {
        let valid = serde_json::to_value(VerifyResponse::from(Verification::Valid)).unwrap();
        assert_eq!(valid, serde_json::json!({ "isValid": true }));

        let mismatch = serde_json::to_value(VerifyResponse::from(Verification::Mismatch)).unwrap();
        assert_eq!(mismatch, serde_json::json!({ "isValid": false }));

        let expired = serde_json::to_value(VerifyResponse::from(Verification::Expired)).unwrap();
        assert_eq!(
            expired,
            serde_json::json!({ "isValid": false, "reason": "expired" })
        );
    }
}
