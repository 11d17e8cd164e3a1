pub mod client;
pub mod config;
pub mod cors;
pub mod error;
pub mod handler;
pub mod signer;
pub mod types;
pub mod verify;
