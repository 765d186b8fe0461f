//! # Payload Checksum
//!
//! 16-bit checksum trailer of a PromptPay payload (tag `63`).
//!
//! ```text
//! register = 0xFFFF
//! for each byte, for each bit MSB → LSB:
//!     top      = bit 15 of register
//!     register = (register << 1) & 0xFFFF
//!     if bit XOR top: register ^= 0x1021
//! result = register            (no final XOR, not reflected)
//! ```
//!
//! This is the non-reflected MSB-first procedure (CCITT-FALSE parameters).
//! A reflected "X25"-style CRC gives different output that scanning apps
//! reject, so do not swap in a library CRC without checking the vectors in
//! the tests below.

/// Generator polynomial.
const POLY: u16 = 0x1021;

/// Initial register value.
const INIT: u16 = 0xFFFF;

/// Computes the raw 16-bit checksum over `bytes`.
pub fn crc16(bytes: &[u8]) -> u16 {
    let mut crc = INIT;
    for &byte in bytes {
        for i in 0..8 {
            let bit = (byte >> (7 - i)) & 1 == 1;
            let top = crc & 0x8000 != 0;
            crc <<= 1;
            if bit ^ top {
                crc ^= POLY;
            }
        }
    }
    crc
}

/// Computes the checksum and renders it as 4 uppercase hex digits.
///
/// ## Example
/// ```rust
/// use qrwari_core::checksum;
///
/// assert_eq!(checksum(b"123456789"), "29B1");
/// ```
pub fn checksum(bytes: &[u8]) -> String {
    format!("{:04X}", crc16(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_value() {
        // Standard check input for CRC-16/CCITT-FALSE.
        assert_eq!(crc16(b"123456789"), 0x29B1);
        assert_eq!(checksum(b"123456789"), "29B1");
    }

    #[test]
    fn test_empty_input_is_init() {
        assert_eq!(checksum(b""), "FFFF");
    }

    #[test]
    fn test_zero_padded_uppercase() {
        let rendered = checksum(b"A");
        assert_eq!(rendered.len(), 4);
        assert!(rendered
            .chars()
            .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
        // 'A' = 0x41 → 0xB915
        assert_eq!(rendered, "B915");
    }

    #[test]
    fn test_not_reflected_variant() {
        // X25 (reflected, xorout 0xFFFF) gives 0x906E for the check input.
        assert_ne!(crc16(b"123456789"), 0x906E);
    }
}
