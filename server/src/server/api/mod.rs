//! REST API handlers grouped by domain.

pub mod payment;
pub mod promptpay_qr;


use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::services::qr::RenderError;

pub type ApiError = (StatusCode, Json<Value>);

/// Standard error response.
pub fn err_json(status: u16, message: &str) -> ApiError {
    (
        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(json!({ "status": "error", "error": message })),
    )
}

/// Map an undecodable JSON body. The rejection text names fields, so it is only logged.
fn body_rejection(e: JsonRejection) -> ApiError {
    tracing::debug!("Rejected request body: {e}");
    err_json(400, "invalid request body")
}

/// Map an undecodable query string.
fn query_rejection(e: QueryRejection) -> ApiError {
    tracing::debug!("Rejected query string: {e}");
    err_json(400, "invalid query string")
}

/// Map a validation failure to a client-facing response.
fn promptpay_error(e: &promptpay::PromptPayError) -> ApiError {
    use promptpay::PromptPayError as E;
    match e {
        E::MissingMerchantId => err_json(400, "merchant ID is required"),
        E::InvalidMerchantId(_) => err_json(400, "invalid PromptPay ID"),
        E::InvalidAmount { .. } => err_json(400, &e.to_string()),
        E::MalformedPayload(_) | E::ChecksumMismatch { .. } => {
            tracing::error!("Generated payload failed verification: {e}");
            err_json(500, "failed to build payment payload")
        }
    }
}

/// Map a render failure. Only an empty payload is the caller's fault.
fn render_error(e: &RenderError) -> ApiError {
    match e {
        RenderError::Engine(image_engine::ImageEngineError::EmptyPayload) => {
            err_json(400, "payload must not be empty")
        }
        _ => {
            tracing::error!("QR render failed: {e}");
            err_json(500, "failed to render QR code")
        }
    }
}
