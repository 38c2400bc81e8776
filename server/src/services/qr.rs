//! Off-thread QR rendering.
//!
//! Symbol generation is CPU-bound, so it runs on the blocking pool to keep
//! request tasks responsive.

use image_engine::{ImageEngineError, QrStyle};

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Engine(#[from] ImageEngineError),

    #[error("render task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Render `payload` as an SVG data URL.
pub async fn render_data_url(payload: String, style: QrStyle) -> Result<String, RenderError> {
    let url = tokio::task::spawn_blocking(move || image_engine::svg_data_url(&payload, &style))
        .await??;
    Ok(url)
}

/// Render `payload` as PNG bytes.
pub async fn render_png(payload: String, style: QrStyle) -> Result<Vec<u8>, RenderError> {
    let png = tokio::task::spawn_blocking(move || image_engine::render_png(&payload, &style))
        .await??;
    Ok(png)
}
