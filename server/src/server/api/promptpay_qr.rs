//! PromptPay QR generation API.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use promptpay::{MerchantId, MerchantIdKind, PromptPayPayload};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::app::SharedState;
use crate::services::qr;

use super::{ApiError, body_rejection, promptpay_error, query_rejection, render_error};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrRequest {
    pub amount: Option<f64>,
    pub merchant_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QrResponse {
    pub payload: String,
    pub qr_data_url: String,
    pub amount: Option<f64>,
    pub merchant_kind: MerchantIdKind,
}

/// Validate the request and encode its payload.
///
/// A blank `merchantId` in the request falls back to the configured default.
fn build(state: &SharedState, req: &QrRequest) -> Result<PromptPayPayload, ApiError> {
    let config = state.config();
    let raw = req
        .merchant_id
        .as_deref()
        .filter(|id| !id.trim().is_empty())
        .or(config.promptpay_id.as_deref());

    let merchant = MerchantId::parse(raw).map_err(|e| promptpay_error(&e))?;
    let amount = config
        .amount_policy()
        .check(req.amount)
        .map_err(|e| promptpay_error(&e))?;

    let record = PromptPayPayload::new(&merchant, amount);
    tracing::debug!(
        merchant = %merchant,
        amount = ?record.amount,
        "Built PromptPay payload"
    );
    if cfg!(debug_assertions) {
        promptpay::verify_payload(&record.payload).map_err(|e| promptpay_error(&e))?;
    }
    Ok(record)
}

async fn respond(state: SharedState, req: QrRequest) -> Result<Json<QrResponse>, ApiError> {
    let record = build(&state, &req)?;
    let qr_data_url = qr::render_data_url(record.payload.clone(), state.config().qr_style())
        .await
        .map_err(|e| render_error(&e))?;

    Ok(Json(QrResponse {
        payload: record.payload,
        qr_data_url,
        amount: record.amount,
        merchant_kind: record.merchant_kind,
    }))
}

/// POST /api/promptpay/qr
pub async fn create_qr(
    State(state): State<SharedState>,
    body: Result<Option<Json<QrRequest>>, JsonRejection>,
) -> Result<Json<QrResponse>, ApiError> {
    let req = body
        .map_err(body_rejection)?
        .map(|Json(b)| b)
        .unwrap_or_default();
    respond(state, req).await
}

/// GET /api/promptpay/qr?amount=&merchantId=
pub async fn get_qr(
    State(state): State<SharedState>,
    query: Result<Query<QrRequest>, QueryRejection>,
) -> Result<Json<QrResponse>, ApiError> {
    let Query(req) = query.map_err(query_rejection)?;
    respond(state, req).await
}

/// GET /api/promptpay/qr.png?amount=&merchantId=
pub async fn get_qr_png(
    State(state): State<SharedState>,
    query: Result<Query<QrRequest>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(req) = query.map_err(query_rejection)?;
    let record = build(&state, &req)?;
    let png = qr::render_png(record.payload, state.config().qr_style())
        .await
        .map_err(|e| render_error(&e))?;

    Ok((
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        png,
    )
        .into_response())
}

/// GET /api/promptpay/config
pub async fn get_config(State(state): State<SharedState>) -> Json<Value> {
    let config = state.config();
    Json(json!({
        "configured": config.promptpay_id.is_some(),
        "merchantIdMasked": config.promptpay_id.as_deref().map(promptpay::merchant::mask),
        "maxAmount": config.max_amount,
    }))
}
