//! # PromptPay
//!
//! Everything needed to turn a payee identifier and an optional amount into
//! a scannable Thai QR payload string.
//!
//! ```text
//!   raw id ──► identifier::detect_id_type ──► PayloadInput
//!                                                │
//!                                                ▼
//!                           builder::build ──► tlv::encode ×N ──► crc::checksum
//!                                                │
//!                                                ▼
//!                                          PayloadResult.content ──► QR encoder
//! ```

pub mod builder;
pub mod crc;
pub mod identifier;
pub mod tlv;

pub use builder::{build, verify, PROMPTPAY_AID};
pub use crc::checksum;
pub use identifier::{detect_id_type, digits_only, is_valid_national_id, normalize_phone};
