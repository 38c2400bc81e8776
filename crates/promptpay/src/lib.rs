//! PromptPay (Thai QR Payment) payload encoding.
//!
//! Builds EMV merchant-presented QR payloads for a PromptPay ID and an
//! optional amount, validates IDs and amounts before encoding, and
//! verifies finished payloads against their CRC.

pub mod amount;
pub mod crc;
pub mod merchant;
pub mod payload;
pub mod tlv;

// Re-exports for convenience
pub use amount::{AmountPolicy, DEFAULT_MAX_AMOUNT};
pub use merchant::{MerchantId, MerchantIdKind, validate};
pub use payload::{PromptPayPayload, build_payload, verify_payload};
pub use tlv::Field;

/// Errors raised while validating input or checking a payload.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PromptPayError {
    #[error("merchant ID is required")]
    MissingMerchantId,

    #[error("invalid PromptPay ID: {0}")]
    InvalidMerchantId(String),

    #[error("invalid amount {amount}: {reason}")]
    InvalidAmount { amount: f64, reason: String },

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },
}

/// Result type alias for promptpay operations.
pub type Result<T> = std::result::Result<T, PromptPayError>;
