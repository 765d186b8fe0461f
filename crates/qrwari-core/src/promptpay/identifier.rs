//! # Identifier Classifier
//!
//! Guesses which PromptPay proxy a user typed and normalizes phone numbers
//! for the payload builder.
//!
//! ## Detection Rules (digits only, first match wins)
//! ```text
//! ┌────────────────────────────────────────────────────┬──────────────┐
//! │ digits                                             │ result       │
//! ├────────────────────────────────────────────────────┼──────────────┤
//! │ starts "0066", length ≥ 13                         │ Phone        │
//! │ starts "66",   length == 11                        │ Phone        │
//! │ starts "0",    length == 10                        │ Phone        │
//! │ length == 13 and national-id check digit matches   │ NationalId   │
//! │ anything else                                      │ None         │
//! └────────────────────────────────────────────────────┴──────────────┘
//! ```
//!
//! Bank accounts are never inferred: a bank code + account number easily
//! looks like a phone number.

use crate::types::IdType;

/// International dialing form used inside the payload.
const INTERNATIONAL_PREFIX: &str = "0066";

/// Thailand's country calling code.
const COUNTRY_CODE: &str = "66";

/// Length of a national id / tax id.
const NATIONAL_ID_LEN: usize = 13;

/// Keeps ASCII digits only: `"+66 81-234"` → `"6681234"`.
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// True when `digits` has the shape of a Thai mobile number.
fn is_phone_shaped(digits: &str) -> bool {
    let len = digits.len();
    (digits.starts_with(INTERNATIONAL_PREFIX) && len >= 13)
        || (digits.starts_with(COUNTRY_CODE) && len == 11)
        || (digits.starts_with('0') && len == 10)
}

/// Normalizes a phone number to the `0066…` form.
///
/// ```text
/// "0812345678"      → "0066812345678"
/// "+66812345678"    → "0066812345678"
/// "66 81 234 5678"  → "0066812345678"
/// "0066812345678"   → "0066812345678"
/// "812345678"       → "0066812345678"   (best effort)
/// ```
pub fn normalize_phone(raw: &str) -> String {
    let digits = digits_only(raw);
    if digits.starts_with(INTERNATIONAL_PREFIX) {
        digits
    } else if digits.starts_with(COUNTRY_CODE) {
        format!("00{}", digits)
    } else if digits.starts_with('0') && digits.len() >= 10 {
        format!("{}{}", INTERNATIONAL_PREFIX, &digits[1..])
    } else {
        format!("{}{}", INTERNATIONAL_PREFIX, digits)
    }
}

/// Detects the PromptPay id type of user input.
///
/// Only [`IdType::Phone`] and [`IdType::NationalId`] are ever returned.
/// `None` means "unsupported identifier" and must be handled before
/// building a payload.
///
/// ## Example
/// ```rust
/// use qrwari_core::{detect_id_type, IdType};
///
/// assert_eq!(detect_id_type("081-234-5678"), Some(IdType::Phone));
/// assert_eq!(detect_id_type("999999"), None);
/// ```
pub fn detect_id_type(raw: &str) -> Option<IdType> {
    let digits = digits_only(raw);
    if is_phone_shaped(&digits) {
        Some(IdType::Phone)
    } else if digits.len() == NATIONAL_ID_LEN && is_valid_national_id(&digits) {
        Some(IdType::NationalId)
    } else {
        None
    }
}

/// Validates the check digit of a 13-digit Thai national id.
///
/// Digit `i` (0-based, `i < 12`) is weighted `13 - i`; the check digit is
/// `(11 - sum % 11) % 10`.
pub fn is_valid_national_id(d13: &str) -> bool {
    if d13.len() != NATIONAL_ID_LEN || !d13.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    let digits: Vec<u32> = d13.bytes().map(|b| u32::from(b - b'0')).collect();
    let sum: u32 = digits[..12]
        .iter()
        .enumerate()
        .map(|(i, d)| d * (13 - i as u32))
        .sum();
    let check = (11 - sum % 11) % 10;

    check == digits[12]
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHONE_FORMS: [&str; 4] = [
        "0812345678",
        "+66812345678",
        "66 81 234 5678",
        "0066812345678",
    ];

    #[test]
    fn test_phone_variants_map_to_phone() {
        for raw in PHONE_FORMS {
            assert_eq!(detect_id_type(raw), Some(IdType::Phone), "input: {}", raw);
        }
    }

    #[test]
    fn test_phone_variants_normalize_identically() {
        for raw in PHONE_FORMS {
            assert_eq!(normalize_phone(raw), "0066812345678", "input: {}", raw);
        }
    }

    #[test]
    fn test_normalize_best_effort() {
        assert_eq!(normalize_phone("812345678"), "0066812345678");
        // short local number keeps its leading zero
        assert_eq!(normalize_phone("012345"), "0066012345");
    }

    #[test]
    fn test_national_id_detected() {
        assert!(is_valid_national_id("8857947646731"));
        assert_eq!(detect_id_type("8857947646731"), Some(IdType::NationalId));
        assert_eq!(
            detect_id_type("8-8579-47646-73-1"),
            Some(IdType::NationalId)
        );
    }

    #[test]
    fn test_national_id_off_by_one_check_digit_rejected() {
        assert!(!is_valid_national_id("8857947646730"));
        assert!(!is_valid_national_id("1234567890123"));
    }

    #[test]
    fn test_national_id_rejects_wrong_shape() {
        assert!(!is_valid_national_id("885794764673"));
        assert!(!is_valid_national_id("88579476467311"));
        assert!(!is_valid_national_id("885794764673A"));
    }

    #[test]
    fn test_unsupported_formats_return_none() {
        for raw in ["0141234567890", "999999", "ABCDEFG", ""] {
            assert_eq!(detect_id_type(raw), None, "input: {}", raw);
        }
    }

    #[test]
    fn test_short_international_prefix_falls_through_to_local_rule() {
        // 10 digits starting 0066: too short for the 0066 rule, but a
        // valid local shape
        assert_eq!(detect_id_type("0066123456"), Some(IdType::Phone));
    }
}
