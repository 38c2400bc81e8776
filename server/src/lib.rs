pub mod app;
pub mod config;
pub mod server;
pub mod services;

use config::AppConfig;

/// Load .env from multiple candidate paths.
fn load_dotenv() {
    let candidates = [".env", "../.env", "../../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::info!("No .env file found, using system environment variables");
}

/// Load environment and build the runtime configuration.
pub fn init_config() -> AppConfig {
    load_dotenv();

    let config = AppConfig::load();
    match config.promptpay_id.as_deref() {
        Some(id) => tracing::info!(
            merchant = %promptpay::merchant::mask(id),
            "Default PromptPay ID configured"
        ),
        None => tracing::warn!("PROMPTPAY_ID not set; requests must supply a merchant ID"),
    }

    tracing::info!(
        port = config.server_port,
        max_amount = config.max_amount,
        webhook = config.notify_webhook_url.is_some(),
        "Settings loaded"
    );
    config
}
