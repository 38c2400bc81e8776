use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::config::AppConfig;
use crate::services::notifier::PaymentNotifier;

/// Application shared state accessible from axum handlers and workers.
#[derive(Clone)]
pub struct SharedState {
    inner: Arc<SharedStateInner>,
}

struct SharedStateInner {
    /// Configuration, fixed for the process lifetime
    config: AppConfig,
    /// Queue for payment self-reports
    notifier: PaymentNotifier,
    /// Cancelled on Ctrl+C to stop the server
    shutdown_token: CancellationToken,
}

impl SharedState {
    /// Create shared state and start the notifier worker.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(config: AppConfig) -> Self {
        let notifier = PaymentNotifier::start(config.notify_webhook_url.clone());
        Self::with_notifier(config, notifier)
    }

    /// Create shared state around an existing notifier.
    pub fn with_notifier(config: AppConfig, notifier: PaymentNotifier) -> Self {
        Self {
            inner: Arc::new(SharedStateInner {
                config,
                notifier,
                shutdown_token: CancellationToken::new(),
            }),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn server_port(&self) -> u16 {
        self.inner.config.server_port
    }

    pub fn notifier(&self) -> &PaymentNotifier {
        &self.inner.notifier
    }

    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.inner.shutdown_token
    }
}
