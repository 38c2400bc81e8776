//! Text TLV fields: 2-digit tag + 2-digit length + value.

use crate::{PromptPayError, Result};

/// Largest value a 2-digit length header can describe.
pub const MAX_VALUE_LEN: usize = 99;

/// A decoded TLV field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub tag: String,
    pub value: String,
}

impl Field {
    /// Parse this field's value as a nested TLV sequence.
    pub fn children(&self) -> Result<Vec<Field>> {
        parse_fields(&self.value)
    }
}

/// Append `tag` + zero-padded byte length + `value` to `out`.
///
/// Values longer than [`MAX_VALUE_LEN`] bytes are cut at the nearest char
/// boundary so the header never grows past two digits.
pub fn write_field(out: &mut String, tag: &str, value: &str) {
    debug_assert_eq!(tag.len(), 2, "TLV tags are two digits");

    let mut end = value.len().min(MAX_VALUE_LEN);
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    if end < value.len() {
        tracing::warn!(tag, len = value.len(), "TLV value too long, truncating");
    }
    let value = &value[..end];

    out.push_str(tag);
    out.push_str(&format!("{:02}", value.len()));
    out.push_str(value);
}

/// Serialize a single field into a fresh string.
pub fn field(tag: &str, value: &str) -> String {
    let mut out = String::with_capacity(4 + value.len());
    write_field(&mut out, tag, value);
    out
}

/// Read a flat sequence of TLV fields covering the whole input.
pub fn parse_fields(input: &str) -> Result<Vec<Field>> {
    let bytes = input.as_bytes();
    let mut fields = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let header = input
            .get(pos..pos + 4)
            .ok_or_else(|| malformed(format!("truncated header at offset {pos}")))?;
        if !header.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed(format!("non-numeric header {header:?} at offset {pos}")));
        }
        let (tag, len) = header.split_at(2);
        let len: usize = len
            .parse()
            .map_err(|_| malformed(format!("bad length at offset {pos}")))?;

        let start = pos + 4;
        let value = input
            .get(start..start + len)
            .ok_or_else(|| malformed(format!("field {tag} overruns input")))?;

        fields.push(Field {
            tag: tag.to_string(),
            value: value.to_string(),
        });
        pos = start + len;
    }

    Ok(fields)
}

fn malformed(msg: String) -> PromptPayError {
    PromptPayError::MalformedPayload(msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_pads_length() {
        assert_eq!(field("00", "01"), "000201");
        assert_eq!(field("58", "TH"), "5802TH");
        assert_eq!(field("53", "764"), "5303764");
    }

    #[test]
    fn test_field_length_counts_bytes() {
        // Thai characters are 3 bytes each in UTF-8
        assert_eq!(field("62", "ก"), "6203ก");
    }

    #[test]
    fn test_field_truncates_oversized_value() {
        let long = "9".repeat(150);
        let out = field("01", &long);
        assert_eq!(&out[..4], "0199");
        assert_eq!(out.len(), 4 + MAX_VALUE_LEN);
    }

    #[test]
    fn test_parse_fields_nested() {
        let inner = format!("{}{}", field("00", "A000000677010111"), field("01", "0066812345678"));
        let outer = format!("{}{}", field("30", &inner), field("58", "TH"));

        let fields = parse_fields(&outer).unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].tag, "30");
        assert_eq!(fields[1].value, "TH");

        let children = fields[0].children().unwrap();
        assert_eq!(children[0].value, "A000000677010111");
        assert_eq!(children[1].tag, "01");
        assert_eq!(children[1].value, "0066812345678");
    }

    #[test]
    fn test_parse_fields_empty_input() {
        assert!(parse_fields("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_fields_rejects_overrun() {
        let err = parse_fields("5810TH").unwrap_err();
        assert!(matches!(err, PromptPayError::MalformedPayload(_)));
    }

    #[test]
    fn test_parse_fields_rejects_bad_header() {
        assert!(parse_fields("5X02TH").is_err());
        assert!(parse_fields("58").is_err());
    }
}
