//! # TLV Codec
//!
//! EMV-style tag-length-value fields: a 2-character tag, a 2-digit
//! zero-padded decimal length, then that many value characters.
//!
//! ```text
//!   "00" "02" "01"        → 000201
//!   tag  len  value
//! ```
//!
//! Lengths count characters (Unicode scalar values), not bytes. In practice
//! every value except a pass-through bank account is ASCII.

use crate::error::{CoreError, CoreResult, ValidationError};

/// Longest value a 2-digit length can describe.
pub const MAX_VALUE_LEN: usize = 99;

/// One parsed field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlvField {
    pub tag: String,
    pub value: String,
}

/// Encodes one field.
///
/// Fails with [`CoreError::FieldLengthOutOfRange`] when `value` is empty or
/// longer than 99 characters.
///
/// ## Example
/// ```rust
/// use qrwari_core::promptpay::tlv;
///
/// assert_eq!(tlv::encode("58", "TH").unwrap(), "5802TH");
/// assert!(tlv::encode("58", "").is_err());
/// ```
pub fn encode(tag: &str, value: &str) -> CoreResult<String> {
    debug_assert_eq!(tag.len(), 2, "TLV tags are always 2 characters");

    let length = value.chars().count();
    if !(1..=MAX_VALUE_LEN).contains(&length) {
        return Err(CoreError::FieldLengthOutOfRange {
            tag: tag.to_string(),
            length,
        });
    }

    Ok(format!("{}{:02}{}", tag, length, value))
}

/// Parses consecutive fields from offset 0 until the input is consumed.
///
/// Fails if a header is truncated, a length is not two decimal digits, or a
/// value runs past the end of the input.
pub fn parse(payload: &str) -> CoreResult<Vec<TlvField>> {
    let chars: Vec<char> = payload.chars().collect();
    let mut fields = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        if pos + 4 > chars.len() {
            return Err(malformed(format!("truncated field header at offset {}", pos)));
        }

        let tag: String = chars[pos..pos + 2].iter().collect();
        let len_digits = &chars[pos + 2..pos + 4];
        if !len_digits.iter().all(char::is_ascii_digit) {
            return Err(malformed(format!(
                "length of tag {} at offset {} is not numeric",
                tag, pos
            )));
        }
        let length = len_digits
            .iter()
            .fold(0usize, |acc, c| acc * 10 + (*c as usize - '0' as usize));

        let start = pos + 4;
        let end = start + length;
        if end > chars.len() {
            return Err(malformed(format!(
                "value of tag {} overruns input ({} > {})",
                tag,
                end,
                chars.len()
            )));
        }

        fields.push(TlvField {
            tag,
            value: chars[start..end].iter().collect(),
        });
        pos = end;
    }

    Ok(fields)
}

/// Returns the value of the first field with `tag`.
pub fn find<'a>(fields: &'a [TlvField], tag: &str) -> Option<&'a str> {
    fields
        .iter()
        .find(|f| f.tag == tag)
        .map(|f| f.value.as_str())
}

fn malformed(reason: String) -> CoreError {
    ValidationError::InvalidFormat {
        field: "payload".to_string(),
        reason,
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_pads_length() {
        assert_eq!(encode("00", "01").unwrap(), "000201");
        assert_eq!(
            encode("00", "A000000677010111").unwrap(),
            "0016A000000677010111"
        );
    }

    #[test]
    fn test_encode_length_bounds() {
        assert!(encode("04", &"9".repeat(99)).is_ok());

        let err = encode("04", &"9".repeat(100)).unwrap_err();
        assert_eq!(
            err,
            CoreError::FieldLengthOutOfRange {
                tag: "04".to_string(),
                length: 100
            }
        );

        assert!(matches!(
            encode("02", ""),
            Err(CoreError::FieldLengthOutOfRange { length: 0, .. })
        ));
    }

    #[test]
    fn test_encode_counts_characters() {
        // 3 characters, 9 bytes
        assert_eq!(encode("04", "กขค").unwrap(), "0403กขค");
    }

    #[test]
    fn test_parse_consumes_exactly() {
        let fields = parse("0002015802TH530376463041234").unwrap();
        let tags: Vec<&str> = fields.iter().map(|f| f.tag.as_str()).collect();
        assert_eq!(tags, ["00", "58", "53", "63"]);
        assert_eq!(find(&fields, "58"), Some("TH"));
        assert_eq!(find(&fields, "63"), Some("1234"));
        assert_eq!(find(&fields, "54"), None);
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        // value overrun
        assert!(parse("0005ab").is_err());
        // non-numeric length
        assert!(parse("00x1a").is_err());
        // leftover bytes shorter than a header
        assert!(parse("000201AB").is_err());
    }
}
