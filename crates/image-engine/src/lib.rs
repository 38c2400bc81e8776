//! QR symbol rendering for payment payloads.
//!
//! Produces SVG data URLs for embedding in pages and PNG rasters for
//! direct download. Error correction is fixed to Medium.

pub mod qr;

pub use qr::{QrStyle, render_luma, render_png, render_svg, svg_data_url};

/// Errors that can occur while rendering a QR symbol.
#[derive(Debug, thiserror::Error)]
pub enum ImageEngineError {
    #[error("payload must not be empty")]
    EmptyPayload,

    #[error("QR encode error: {0}")]
    Encode(#[from] qrcode::types::QrError),

    #[error("PNG encode error: {0}")]
    Png(String),
}

/// Result type alias for image-engine operations.
pub type Result<T> = std::result::Result<T, ImageEngineError>;
