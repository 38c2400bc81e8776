//! PromptPay ID validation and normalization.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::{PromptPayError, Result};

static RE_PHONE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^0[0-9]{9}$").unwrap());
static RE_NATIONAL_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{13}$").unwrap());

/// Thailand's calling code, replacing the trunk `0` of mobile numbers.
const COUNTRY_CODE: &str = "66";

/// Width of the account value carried for a mobile number.
const PHONE_ACCOUNT_WIDTH: usize = 13;

/// Which kind of PromptPay ID a value is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MerchantIdKind {
    /// 10-digit Thai mobile number starting with `0`.
    Phone,
    /// 13-digit national or tax ID.
    NationalId,
}

impl MerchantIdKind {
    /// Classify an already-normalized ID.
    fn classify(cleaned: &str) -> Option<Self> {
        match (RE_PHONE.is_match(cleaned), RE_NATIONAL_ID.is_match(cleaned)) {
            (true, false) => Some(Self::Phone),
            (false, true) => Some(Self::NationalId),
            _ => None,
        }
    }
}

/// Strip the visual separators (spaces and dashes) users type into IDs.
pub fn normalize(raw: &str) -> String {
    raw.chars().filter(|c| *c != ' ' && *c != '-').collect()
}

/// Whether `raw` is a usable PromptPay ID. `None` stands for a missing value.
pub fn validate(raw: Option<&str>) -> bool {
    raw.is_some_and(|r| MerchantIdKind::classify(&normalize(r)).is_some())
}

/// Mask an ID for logging, keeping only the last four characters.
pub fn mask(raw: &str) -> String {
    let cleaned = normalize(raw);
    let keep = cleaned.chars().count().saturating_sub(4);
    cleaned
        .chars()
        .enumerate()
        .map(|(i, c)| if i < keep { 'x' } else { c })
        .collect()
}

/// A validated, normalized PromptPay ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerchantId {
    digits: String,
    kind: MerchantIdKind,
}

impl MerchantId {
    /// Validate and normalize a raw ID.
    ///
    /// A missing or blank value yields [`PromptPayError::MissingMerchantId`]
    /// so callers can tell "not supplied" apart from "malformed".
    pub fn parse(raw: Option<&str>) -> Result<Self> {
        let digits = raw.map(normalize).unwrap_or_default();
        if digits.trim().is_empty() {
            return Err(PromptPayError::MissingMerchantId);
        }
        let kind = MerchantIdKind::classify(&digits)
            .ok_or_else(|| PromptPayError::InvalidMerchantId(mask(&digits)))?;
        Ok(Self { digits, kind })
    }

    pub fn kind(&self) -> MerchantIdKind {
        self.kind
    }

    /// Normalized digits as entered.
    pub fn as_str(&self) -> &str {
        &self.digits
    }

    /// Value carried in the merchant account sub-field.
    pub fn account_value(&self) -> String {
        account_value(&self.digits)
    }

    pub fn masked(&self) -> String {
        mask(&self.digits)
    }
}

impl fmt::Display for MerchantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

/// Account value for a normalized ID.
///
/// Mobile numbers swap the trunk `0` for the country code and are
/// left-padded with zeros to 13 digits (`0812345678` -> `0066812345678`).
/// Anything else passes through unchanged.
pub(crate) fn account_value(cleaned: &str) -> String {
    match cleaned.strip_prefix('0') {
        Some(rest) if RE_PHONE.is_match(cleaned) => {
            format!("{:0>width$}", format!("{COUNTRY_CODE}{rest}"), width = PHONE_ACCOUNT_WIDTH)
        }
        _ => cleaned.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_phone() {
        assert!(validate(Some("0812345678")));
    }

    #[test]
    fn validate_rejects_short_phone() {
        assert!(!validate(Some("081234567")));
    }

    #[test]
    fn validate_rejects_phone_without_trunk_zero() {
        assert!(!validate(Some("1812345678")));
    }

    #[test]
    fn validate_accepts_national_id() {
        assert!(validate(Some("1234567890123")));
        assert!(validate(Some("0234567890123")));
    }

    #[test]
    fn validate_rejects_other_lengths() {
        assert!(!validate(Some("12345678901234")));
        assert!(!validate(Some("123456789012")));
    }

    #[test]
    fn validate_rejects_empty_and_missing() {
        assert!(!validate(Some("")));
        assert!(!validate(None));
        assert!(!validate(Some(" - ")));
    }

    #[test]
    fn validate_strips_separators() {
        assert!(validate(Some("081-234-5678")));
        assert!(validate(Some("081 234 5678")));
        assert!(validate(Some("1-2345-67890-12-3")));
    }

    #[test]
    fn validate_rejects_non_ascii_digits() {
        // Thai digits are not accepted
        assert!(!validate(Some("๐๘๑๒๓๔๕๖๗๘")));
        assert!(!validate(Some("08123456a8")));
        assert!(!validate(Some("+66812345678")));
    }

    #[test]
    fn parse_distinguishes_missing_from_malformed() {
        assert_eq!(MerchantId::parse(None), Err(PromptPayError::MissingMerchantId));
        assert_eq!(MerchantId::parse(Some("  ")), Err(PromptPayError::MissingMerchantId));
        assert!(matches!(
            MerchantId::parse(Some("12345")),
            Err(PromptPayError::InvalidMerchantId(_))
        ));
    }

    #[test]
    fn parse_reports_kind() {
        let phone = MerchantId::parse(Some("098-887-0075")).unwrap();
        assert_eq!(phone.kind(), MerchantIdKind::Phone);
        assert_eq!(phone.as_str(), "0988870075");

        let nid = MerchantId::parse(Some("1234567890123")).unwrap();
        assert_eq!(nid.kind(), MerchantIdKind::NationalId);
    }

    #[test]
    fn account_value_converts_phone_to_international() {
        let phone = MerchantId::parse(Some("0812345678")).unwrap();
        assert_eq!(phone.account_value(), "0066812345678");
    }

    #[test]
    fn account_value_keeps_national_id() {
        let nid = MerchantId::parse(Some("1234567890123")).unwrap();
        assert_eq!(nid.account_value(), "1234567890123");
    }

    #[test]
    fn mask_keeps_last_four() {
        assert_eq!(mask("081-234-5678"), "xxxxxx5678");
        assert_eq!(mask("123"), "123");
    }

    #[test]
    fn display_is_masked() {
        let phone = MerchantId::parse(Some("0812345678")).unwrap();
        assert_eq!(phone.to_string(), "xxxxxx5678");
    }
}
