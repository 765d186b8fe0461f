//! # Payload Builder
//!
//! Assembles a Thai QR PromptPay payload (merchant account tag `29`).
//!
//! ## Payload Layout
//! ```text
//! ┌──────┬──────────────────────────────────────────────────────────────┐
//! │ tag  │ value                                                        │
//! ├──────┼──────────────────────────────────────────────────────────────┤
//! │ 00   │ "01"                      payload format indicator           │
//! │ 01   │ "11" static / "12" dynamic (point of initiation)             │
//! │ 29   │ ┌ 00 "A000000677010111"   PromptPay AID                      │
//! │      │ └ 01 phone | 02 national/tax id | 03 e-wallet | 04 bank acct │
//! │ 53   │ currency numeric ("764")                                     │
//! │ 58   │ country code ("TH")                                          │
//! │ 54   │ amount "123.45"           only when an amount is given       │
//! │ 63   │ 4 hex checksum            over everything before, incl "6304"│
//! └──────┴──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The field order is fixed. Tag `54` follows `58` on purpose: the checksum
//! covers these exact bytes and scanning apps accept this order.

use tracing::debug;

use super::crc::checksum;
use super::identifier::{digits_only, normalize_phone};
use super::tlv;
use crate::error::CoreResult;
use crate::types::{IdType, PayloadInput, PayloadResult};

/// Application id for merchant-presented PromptPay.
pub const PROMPTPAY_AID: &str = "A000000677010111";

/// Header and fixed length of the checksum field.
pub const CHECKSUM_HEADER: &str = "6304";

/// Top-level tags.
pub mod tags {
    pub const FORMAT_INDICATOR: &str = "00";
    pub const POINT_OF_INITIATION: &str = "01";
    pub const MERCHANT_ACCOUNT: &str = "29";
    pub const CURRENCY: &str = "53";
    pub const AMOUNT: &str = "54";
    pub const COUNTRY: &str = "58";
    pub const CHECKSUM: &str = "63";
}

/// Sub-tags inside tag `29`.
pub mod sub_tags {
    pub const AID: &str = "00";
    pub const PHONE: &str = "01";
    pub const NATIONAL_ID: &str = "02";
    pub const E_WALLET: &str = "03";
    pub const BANK_ACCOUNT: &str = "04";
}

const FORMAT_VERSION: &str = "01";
const POI_STATIC: &str = "11";
const POI_DYNAMIC: &str = "12";

/// Builds the payload for one QR code.
///
/// Fails with [`crate::CoreError::FieldLengthOutOfRange`] when any field
/// value is empty or longer than 99 characters.
///
/// ## Example
/// ```rust
/// use qrwari_core::{build, IdType, Money, PayloadInput};
///
/// let input = PayloadInput::new(IdType::Phone, "0812345678")
///     .with_amount(Money::from_cents(12345));
/// let qr = build(&input).unwrap();
///
/// assert!(qr.is_dynamic);
/// assert!(qr.content.starts_with("000201010212"));
/// ```
pub fn build(input: &PayloadInput) -> CoreResult<PayloadResult> {
    let is_dynamic = input.amount.is_some();

    let merchant_account = [
        tlv::encode(sub_tags::AID, PROMPTPAY_AID)?,
        identifier_field(input.id_type, &input.id_value_raw)?,
    ]
    .concat();

    let poi = if is_dynamic || !input.prefer_static_when_no_amount {
        POI_DYNAMIC
    } else {
        POI_STATIC
    };

    let mut content = [
        tlv::encode(tags::FORMAT_INDICATOR, FORMAT_VERSION)?,
        tlv::encode(tags::POINT_OF_INITIATION, poi)?,
        tlv::encode(tags::MERCHANT_ACCOUNT, &merchant_account)?,
        tlv::encode(tags::CURRENCY, &input.currency_numeric)?,
        tlv::encode(tags::COUNTRY, &input.country_code.to_uppercase())?,
    ]
    .concat();

    if let Some(amount) = input.amount {
        content.push_str(&tlv::encode(tags::AMOUNT, &amount.to_plain_string())?);
    }

    content.push_str(CHECKSUM_HEADER);
    let crc = checksum(content.as_bytes());
    content.push_str(&crc);

    debug!(
        id_type = %input.id_type,
        is_dynamic,
        length = content.len(),
        "Built PromptPay payload"
    );

    Ok(PayloadResult {
        content,
        is_dynamic,
    })
}

/// Encodes the single identifier sub-field of tag `29`.
fn identifier_field(id_type: IdType, raw: &str) -> CoreResult<String> {
    match id_type {
        IdType::Phone => tlv::encode(sub_tags::PHONE, &normalize_phone(raw)),
        IdType::NationalId | IdType::TaxId => tlv::encode(sub_tags::NATIONAL_ID, &digits_only(raw)),
        IdType::EWallet => tlv::encode(sub_tags::E_WALLET, &digits_only(raw)),
        IdType::BankAccount => tlv::encode(sub_tags::BANK_ACCOUNT, raw.trim()),
    }
}

/// Checks that the trailing 4 hex digits match a checksum recomputed over
/// everything before them (which must end in `"6304"`).
pub fn verify(content: &str) -> bool {
    let Some(split_at) = content.len().checked_sub(4) else {
        return false;
    };
    let (Some(body), Some(trailer)) = (content.get(..split_at), content.get(split_at..)) else {
        return false;
    };

    body.ends_with(CHECKSUM_HEADER) && checksum(body.as_bytes()).eq_ignore_ascii_case(trailer)
}
