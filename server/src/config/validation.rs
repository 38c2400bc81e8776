//! Setting value validation.

use regex::Regex;
use std::sync::LazyLock;

static RE_HTTP_URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^https?://[^\s/]+\S*$").unwrap());

/// Validate a setting value. Returns `Ok(())` if valid, or an error message.
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    match key {
        "PROMPTPAY_ID" => {
            if !value.is_empty() && !promptpay::validate(Some(value)) {
                return Err("must be a 10-digit mobile number or 13-digit national ID".into());
            }
        }
        "PROMPTPAY_MAX_AMOUNT" => {
            let v: f64 = value.parse().map_err(|_| "must be a number")?;
            if !v.is_finite() || v <= 0.0 {
                return Err("must be greater than 0".into());
            }
        }
        "SERVER_PORT" => validate_int_range(value, 1, 65535)?,
        "QR_MODULE_SIZE" => validate_int_range(value, 1, 64)?,
        "QR_QUIET_ZONE" => {
            if value != "true" && value != "false" {
                return Err("must be 'true' or 'false'".into());
            }
        }
        "NOTIFY_WEBHOOK_URL" => {
            if !value.is_empty() && !RE_HTTP_URL.is_match(value) {
                return Err("must be an http(s) URL".into());
            }
        }
        _ => {}
    }
    Ok(())
}

fn validate_int_range(value: &str, min: i64, max: i64) -> Result<(), String> {
    let v: i64 = value.parse().map_err(|_| "must be an integer")?;
    if v < min || v > max {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(())
}
