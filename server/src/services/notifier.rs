//! Payment self-report notifications.
//!
//! Reports are queued on a bounded channel and forwarded one at a time to
//! an optional webhook. A report only records what the payer claims; no
//! bank-side settlement is checked.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use tokio::sync::mpsc;
use uuid::Uuid;

const QUEUE_CAPACITY: usize = 100;

/// A payer's claim that a transfer was made.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReport {
    pub report_id: Uuid,
    pub amount: f64,
    pub reference: Option<String>,
    pub payer_name: Option<String>,
    pub note: Option<String>,
    pub reported_at: DateTime<Utc>,
    /// Always false: nothing here confirms the money arrived.
    pub verified: bool,
}

impl PaymentReport {
    pub fn new(
        amount: f64,
        reference: Option<String>,
        payer_name: Option<String>,
        note: Option<String>,
    ) -> Self {
        Self {
            report_id: Uuid::new_v4(),
            amount,
            reference,
            payer_name,
            note,
            reported_at: Utc::now(),
            verified: false,
        }
    }

    /// Human-readable summary for chat-style webhooks.
    pub fn summary(&self) -> String {
        let payer = self.payer_name.as_deref().unwrap_or("anonymous");
        let mut text = format!("Payment reported (unverified): {:.2} THB from {payer}", self.amount);
        if let Some(reference) = &self.reference {
            text.push_str(&format!(" ref {reference}"));
        }
        if let Some(note) = &self.note {
            text.push_str(&format!(" - {note}"));
        }
        text
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification queue is full")]
    QueueFull,

    #[error("notification queue is closed")]
    Closed,

    #[error("webhook request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("webhook returned status {0}")]
    Status(u16),
}

/// Handle for queueing payment reports.
#[derive(Clone)]
pub struct PaymentNotifier {
    tx: mpsc::Sender<PaymentReport>,
}

impl PaymentNotifier {
    /// Create a notifier and the receiving end of its queue.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<PaymentReport>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, rx)
    }

    /// Create a notifier and spawn its delivery worker.
    pub fn start(webhook_url: Option<String>) -> Self {
        let (notifier, rx) = Self::channel(QUEUE_CAPACITY);
        tokio::spawn(worker_loop(webhook_url, rx));
        tracing::info!("Payment notifier worker started");
        notifier
    }

    /// Queue a report without waiting.
    pub fn enqueue(&self, report: PaymentReport) -> Result<(), NotifyError> {
        self.tx.try_send(report).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => NotifyError::QueueFull,
            mpsc::error::TrySendError::Closed(_) => NotifyError::Closed,
        })
    }
}

/// Worker loop — delivers reports in arrival order until every sender is gone.
async fn worker_loop(webhook_url: Option<String>, mut rx: mpsc::Receiver<PaymentReport>) {
    let client = reqwest::Client::new();

    while let Some(report) = rx.recv().await {
        tracing::info!(
            report_id = %report.report_id,
            amount = report.amount,
            "Payment self-reported"
        );

        let Some(url) = webhook_url.as_deref() else {
            continue;
        };
        // Failures are logged and dropped; the payer can report again.
        if let Err(e) = deliver(&client, url, &report).await {
            tracing::warn!(report_id = %report.report_id, "Webhook delivery failed: {e}");
        }
    }

    tracing::info!("Payment notifier worker stopped");
}

/// POST a report to the webhook.
pub async fn deliver(
    client: &reqwest::Client,
    url: &str,
    report: &PaymentReport,
) -> Result<(), NotifyError> {
    let body = json!({
        "event": "payment.self_reported",
        "content": report.summary(),
        "report": report,
    });
    let resp = client.post(url).json(&body).send().await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(NotifyError::Status(status.as_u16()));
    }
    Ok(())
}
