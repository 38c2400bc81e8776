use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;

use super::api;
use crate::app::SharedState;

/// Create the axum router with all routes.
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        // --- Core ---
        .route("/status", get(status_handler))
        // --- PromptPay ---
        .route(
            "/api/promptpay/qr",
            get(api::promptpay_qr::get_qr).post(api::promptpay_qr::create_qr),
        )
        .route("/api/promptpay/qr.png", get(api::promptpay_qr::get_qr_png))
        .route("/api/promptpay/config", get(api::promptpay_qr::get_config))
        // --- Payment ---
        .route("/api/payment/report", post(api::payment::report_payment))
        // --- Middleware ---
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn status_handler() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
