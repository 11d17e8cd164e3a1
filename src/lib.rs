//! HMAC-SHA256 report verification service.
//!
//! The `common` module holds everything the binaries share: the signature
//! check itself, the request processor both transports call into, config,
//! and the issuer-side signing helpers.

pub mod common;
pub mod test_utils;
