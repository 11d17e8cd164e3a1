use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::common::config::SecretKey;
use crate::common::error::VerifyError;
use crate::common::types::VerifyResponse;

type HmacSha256 = Hmac<Sha256>;

pub const VERIFIED_MESSAGE: &str = "Report verified successfully";
pub const MISMATCH_MESSAGE: &str = "Signature does not match";

/// Computes HMAC-SHA256 of `payload` under `key` as uppercase hex.
pub fn hmac_sha256_hex(key: &[u8], payload: &[u8]) -> Result<String, VerifyError> {
    let mut mac =
        HmacSha256::new_from_slice(key).map_err(|e| VerifyError::Crypto(e.to_string()))?;
    mac.update(payload);
    Ok(hex::encode_upper(mac.finalize().into_bytes()))
}

/// Compares two strings without short-circuiting on the first differing byte.
///
/// Only the length check may return early; signature length is public.
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }

    let mut acc = 0u8;
    for (x, y) in a.iter().zip(b) {
        acc |= x ^ y;
    }
    std::hint::black_box(acc) == 0
}

/// Checks `signature_hex` against the HMAC of `payload` under `key`.
///
/// Callers are expected to have rejected empty inputs already; an empty
/// signature here simply fails to match.
pub fn verify(
    payload: &[u8],
    signature_hex: &str,
    key: &SecretKey,
) -> Result<VerifyResponse, VerifyError> {
    let computed = hmac_sha256_hex(key.expose(), payload)?;
    let supplied = signature_hex.to_ascii_uppercase();

    let valid = constant_time_compare(&computed, &supplied);
    let message = if valid { VERIFIED_MESSAGE } else { MISMATCH_MESSAGE };

    Ok(VerifyResponse {
        valid,
        message: message.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{self, HELLO_SIGNATURE, TEST_SECRET};

    fn key() -> SecretKey {
        SecretKey::from(TEST_SECRET)
    }

    #[test]
    fn test_known_digest() {
        let digest = hmac_sha256_hex(TEST_SECRET.as_bytes(), b"hello").unwrap();
        assert_eq!(digest, HELLO_SIGNATURE);
        assert_eq!(digest.len(), 64);
    }

    #[test]
    fn test_verify_valid_signature() {
        let result = verify(b"hello", HELLO_SIGNATURE, &key()).unwrap();
        assert!(result.valid);
        assert_eq!(result.message, VERIFIED_MESSAGE);
    }

    #[test]
    fn test_verify_is_case_insensitive() {
        let lower = HELLO_SIGNATURE.to_lowercase();
        assert!(verify(b"hello", &lower, &key()).unwrap().valid);
        assert!(verify(b"hello", HELLO_SIGNATURE, &key()).unwrap().valid);
    }

    #[test]
    fn test_verify_rejects_every_single_bit_flip() {
        let digest = hex::decode(HELLO_SIGNATURE).unwrap();
        for byte in 0..digest.len() {
            for bit in 0..8 {
                let mut flipped = digest.clone();
                flipped[byte] ^= 1 << bit;
                let result = verify(b"hello", &hex::encode(&flipped), &key()).unwrap();
                assert!(!result.valid, "flip at byte {byte} bit {bit} verified");
                assert_eq!(result.message, MISMATCH_MESSAGE);
            }
        }
    }

    #[test]
    fn test_verify_wrong_length_is_mismatch_not_error() {
        let short = &HELLO_SIGNATURE[..63];
        let long = format!("{HELLO_SIGNATURE}0");
        assert!(!verify(b"hello", short, &key()).unwrap().valid);
        assert!(!verify(b"hello", &long, &key()).unwrap().valid);
        assert!(!verify(b"hello", "", &key()).unwrap().valid);
    }

    #[test]
    fn test_verify_wrong_key() {
        let other = SecretKey::from("another-secret");
        assert!(!verify(b"hello", HELLO_SIGNATURE, &other).unwrap().valid);
    }

    #[test]
    fn test_verify_last_char_altered() {
        let altered = test_utils::alter_last_hex_char(HELLO_SIGNATURE);
        let result = verify(b"hello", &altered, &key()).unwrap();
        assert!(!result.valid);
        assert_eq!(result.message, MISMATCH_MESSAGE);
    }

    #[test]
    fn test_empty_payload_is_signable() {
        let signature = hmac_sha256_hex(TEST_SECRET.as_bytes(), b"").unwrap();
        assert!(verify(b"", &signature, &key()).unwrap().valid);
    }

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("ABC123", "ABC123"));
        assert!(!constant_time_compare("ABC123", "ABC124"));
        assert!(!constant_time_compare("ABC123", "XBC123"));
        assert!(!constant_time_compare("ABC123", "ABC12"));
        assert!(!constant_time_compare("ABC123", "ABC1234"));
        assert!(constant_time_compare("", ""));
    }

    #[test]
    fn test_non_ascii_signature_does_not_panic() {
        let odd = "É".repeat(32);
        assert_eq!(odd.len(), 64);
        assert!(!verify(b"hello", &odd, &key()).unwrap().valid);
    }
}
