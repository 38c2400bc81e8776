//! Runtime application configuration loaded from the environment.

use promptpay::{AmountPolicy, DEFAULT_MAX_AMOUNT};
use image_engine::QrStyle;

use super::validation::validate_setting;

/// Runtime configuration for the payment server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Default PromptPay ID used when a request does not name one.
    pub promptpay_id: Option<String>,
    pub max_amount: f64,
    pub server_port: u16,
    pub qr_module_size: u32,
    pub qr_quiet_zone: bool,
    pub notify_webhook_url: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            promptpay_id: None,
            max_amount: DEFAULT_MAX_AMOUNT,
            server_port: 8080,
            qr_module_size: 8,
            qr_quiet_zone: true,
            notify_webhook_url: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from process environment variables.
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Values that fail validation are logged and replaced by defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let g = |key: &str| -> Option<String> {
            let value = lookup(key)?.trim().to_string();
            if value.is_empty() {
                return None;
            }
            match validate_setting(key, &value) {
                Ok(()) => Some(value),
                Err(e) => {
                    tracing::warn!(key, "Ignoring invalid setting: {e}");
                    None
                }
            }
        };
        let defaults = Self::default();

        Self {
            promptpay_id: g("PROMPTPAY_ID"),
            max_amount: parse_or(g("PROMPTPAY_MAX_AMOUNT"), defaults.max_amount),
            server_port: parse_or(g("SERVER_PORT"), defaults.server_port),
            qr_module_size: parse_or(g("QR_MODULE_SIZE"), defaults.qr_module_size),
            qr_quiet_zone: g("QR_QUIET_ZONE").map_or(defaults.qr_quiet_zone, |v| v == "true"),
            notify_webhook_url: g("NOTIFY_WEBHOOK_URL"),
        }
    }

    pub fn amount_policy(&self) -> AmountPolicy {
        AmountPolicy::new(self.max_amount)
    }

    pub fn qr_style(&self) -> QrStyle {
        QrStyle::default()
            .with_module_size(self.qr_module_size)
            .with_quiet_zone(self.qr_quiet_zone)
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.parse().ok()).unwrap_or(default)
}
