//! EMV merchant-presented QR payload for PromptPay.
//!
//! Field order: 00 format, 01 initiation method, 30 merchant account,
//! 54 amount (optional), 58 country, 53 currency, 63 CRC.

use serde::Serialize;

use crate::amount::encoded_amount;
use crate::crc::checksum_hex;
use crate::merchant::{MerchantIdKind, account_value, normalize};
use crate::tlv::{self, Field, field, write_field};
use crate::{PromptPayError, Result};

// -- Tags --
const TAG_FORMAT_INDICATOR: &str = "00";
const TAG_INITIATION_METHOD: &str = "01";
const TAG_MERCHANT_ACCOUNT: &str = "30";
const TAG_AMOUNT: &str = "54";
const TAG_COUNTRY: &str = "58";
const TAG_CURRENCY: &str = "53";
const TAG_CRC: &str = "63";

// -- Merchant account sub-tags --
const SUB_TAG_GUID: &str = "00";
const SUB_TAG_ACCOUNT: &str = "01";

// -- Fixed values --
const FORMAT_INDICATOR: &str = "01";
const INITIATION_STATIC: &str = "11";
const INITIATION_DYNAMIC: &str = "12";
const PROMPTPAY_GUID: &str = "A000000677010111";
const COUNTRY_TH: &str = "TH";
const CURRENCY_THB: &str = "764";

/// Tag + length header reserved for the checksum.
const CRC_HEADER: &str = "6304";

/// Build the payload string for a PromptPay ID and optional amount.
///
/// The ID is normalized but not validated; run it through
/// [`crate::merchant::validate`] or [`crate::MerchantId::parse`] first.
/// An amount that is missing, zero, negative or not finite produces an
/// open-amount payload.
pub fn build_payload(merchant_id: &str, amount: Option<f64>) -> String {
    let account = account_value(&normalize(merchant_id));
    let amount = encoded_amount(amount);

    let merchant_info = [
        field(SUB_TAG_GUID, PROMPTPAY_GUID),
        field(SUB_TAG_ACCOUNT, &account),
    ]
    .concat();

    let initiation = if amount.is_some() { INITIATION_DYNAMIC } else { INITIATION_STATIC };

    let mut out = String::with_capacity(96);
    write_field(&mut out, TAG_FORMAT_INDICATOR, FORMAT_INDICATOR);
    write_field(&mut out, TAG_INITIATION_METHOD, initiation);
    write_field(&mut out, TAG_MERCHANT_ACCOUNT, &merchant_info);
    if let Some(amount) = &amount {
        write_field(&mut out, TAG_AMOUNT, amount);
    }
    write_field(&mut out, TAG_COUNTRY, COUNTRY_TH);
    write_field(&mut out, TAG_CURRENCY, CURRENCY_THB);

    // The checksum covers its own tag and length header.
    out.push_str(CRC_HEADER);
    let crc = checksum_hex(&out);
    out.push_str(&crc);
    out
}

/// Check a payload's structure and checksum, returning its top-level fields.
pub fn verify_payload(payload: &str) -> Result<Vec<Field>> {
    if !payload.starts_with("000201") {
        return Err(PromptPayError::MalformedPayload(
            "missing payload format indicator".into(),
        ));
    }

    let fields = tlv::parse_fields(payload)?;
    let crc_field = fields
        .last()
        .filter(|f| f.tag == TAG_CRC && f.value.len() == 4)
        .ok_or_else(|| PromptPayError::MalformedPayload("checksum field must come last".into()))?;

    let actual = &crc_field.value;
    if !actual.bytes().all(|b| b.is_ascii_digit() || (b'A'..=b'F').contains(&b)) {
        return Err(PromptPayError::MalformedPayload(format!(
            "checksum {actual:?} is not uppercase hex"
        )));
    }

    let merchant_account = fields
        .iter()
        .find(|f| f.tag == TAG_MERCHANT_ACCOUNT)
        .ok_or_else(|| PromptPayError::MalformedPayload("missing merchant account".into()))?;
    merchant_account.children()?;

    let covered = &payload[..payload.len() - 4];
    let expected = checksum_hex(covered);
    if &expected != actual {
        return Err(PromptPayError::ChecksumMismatch {
            expected,
            actual: actual.clone(),
        });
    }

    Ok(fields)
}

/// A generated payload together with what went into it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptPayPayload {
    pub payload: String,
    pub merchant_kind: MerchantIdKind,
    pub amount: Option<f64>,
}

impl PromptPayPayload {
    /// Encode for a validated ID. The amount is recorded only when encoded.
    pub fn new(merchant: &crate::MerchantId, amount: Option<f64>) -> Self {
        let payload = build_payload(merchant.as_str(), amount);
        Self {
            payload,
            merchant_kind: merchant.kind(),
            amount: encoded_amount(amount).and(amount),
        }
    }
}
