//! Payment self-report API.
//!
//! A report is the payer's own claim. It is forwarded to the notifier and
//! always returned as unverified.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::app::SharedState;
use crate::services::notifier::{NotifyError, PaymentReport};

use super::{ApiError, body_rejection, err_json, promptpay_error};

const MAX_REFERENCE_LEN: usize = 64;
const MAX_PAYER_NAME_LEN: usize = 100;
const MAX_NOTE_LEN: usize = 500;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub amount: f64,
    pub reference: Option<String>,
    pub payer_name: Option<String>,
    pub note: Option<String>,
}

/// Trim an optional text field, dropping it when blank.
fn clean(
    value: Option<String>,
    max_chars: usize,
    field: &str,
) -> Result<Option<String>, ApiError> {
    let Some(v) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    if v.chars().count() > max_chars {
        return Err(err_json(400, &format!("{field} must be at most {max_chars} characters")));
    }
    Ok(Some(v))
}

/// POST /api/payment/report
pub async fn report_payment(
    State(state): State<SharedState>,
    body: Result<Json<ReportRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(body) = body.map_err(body_rejection)?;
    let amount = state
        .config()
        .amount_policy()
        .check(Some(body.amount))
        .map_err(|e| promptpay_error(&e))?
        .filter(|a| *a > 0.0)
        .ok_or_else(|| err_json(400, "amount must be greater than zero"))?;

    let report = PaymentReport::new(
        amount,
        clean(body.reference, MAX_REFERENCE_LEN, "reference")?,
        clean(body.payer_name, MAX_PAYER_NAME_LEN, "payerName")?,
        clean(body.note, MAX_NOTE_LEN, "note")?,
    );
    let report_id = report.report_id;

    state.notifier().enqueue(report).map_err(|e| match e {
        NotifyError::QueueFull => err_json(503, "too many pending reports, try again later"),
        _ => {
            tracing::error!("Failed to queue payment report: {e}");
            err_json(500, "failed to record payment report")
        }
    })?;

    Ok((
        StatusCode::ACCEPTED,
        Json(json!({
            "status": "accepted",
            "reportId": report_id,
            "verified": false,
        })),
    ))
}
