//! # Payment Requests
//!
//! Glue between the split engine and the payload builder: one fixed-amount
//! PromptPay code per participant, all paying the same payee.
//!
//! ## User Workflow
//! ```text
//! Event ──► split_event ──► SplitResult
//!                               │
//!   payee PromptPay id ──► resolve_payee ──► IdType
//!                               │
//!                               ▼
//!                   payment_requests (one build() per person)
//!                               │
//!                               ▼
//!   [ Ann ฿33.34 QR ] [ Bee ฿33.33 QR ] [ Cat ฿33.33 QR ] [ Summary ]
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::promptpay::{build, detect_id_type};
use crate::types::{IdType, Participant, PayloadInput, PayloadResult, SplitResult};
use crate::{DEFAULT_COUNTRY_CODE, DEFAULT_CURRENCY_NUMERIC};

// =============================================================================
// Locale Settings
// =============================================================================

/// Locale constants stamped into every payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct LocaleSettings {
    pub country_code: String,
    pub currency_numeric: String,
    pub prefer_static_when_no_amount: bool,
}

impl Default for LocaleSettings {
    fn default() -> Self {
        LocaleSettings {
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
            currency_numeric: DEFAULT_CURRENCY_NUMERIC.to_string(),
            prefer_static_when_no_amount: true,
        }
    }
}

impl LocaleSettings {
    /// Builds the payload input for one code.
    pub fn payload_input(
        &self,
        id_type: IdType,
        id_value_raw: &str,
        amount: Option<Money>,
    ) -> PayloadInput {
        PayloadInput {
            id_type,
            id_value_raw: id_value_raw.to_string(),
            amount,
            country_code: self.country_code.clone(),
            currency_numeric: self.currency_numeric.clone(),
            prefer_static_when_no_amount: self.prefer_static_when_no_amount,
        }
    }
}

// =============================================================================
// Payment Request
// =============================================================================

/// What one participant owes, with the code to pay it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaymentRequest {
    pub participant: Participant,
    pub amount: Money,
    pub payload: PayloadResult,
}

/// Classifies the payee's PromptPay id.
///
/// Fails with [`CoreError::MissingPromptPayId`] when blank and
/// [`CoreError::UnsupportedIdentifier`] when it is neither a phone number
/// nor a valid national id.
pub fn resolve_payee(promptpay_id: &str) -> CoreResult<IdType> {
    let raw = promptpay_id.trim();
    if raw.is_empty() {
        return Err(CoreError::MissingPromptPayId);
    }

    detect_id_type(raw).ok_or_else(|| CoreError::UnsupportedIdentifier {
        raw: raw.to_string(),
    })
}

/// Builds one dynamic payload per participant, in `per_person` order.
pub fn payment_requests(
    split: &SplitResult,
    promptpay_id: &str,
    locale: &LocaleSettings,
) -> CoreResult<Vec<PaymentRequest>> {
    let id_type = resolve_payee(promptpay_id)?;

    split
        .per_person
        .iter()
        .map(|pt| {
            let input = locale.payload_input(id_type, promptpay_id, Some(pt.amount));
            Ok(PaymentRequest {
                participant: pt.participant.clone(),
                amount: pt.amount,
                payload: build(&input)?,
            })
        })
        .collect()
}

/// Renders the summary page: one line per person, then the total.
pub fn summary_lines(split: &SplitResult) -> Vec<String> {
    let width = split
        .per_person
        .iter()
        .map(|pt| pt.participant.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Total".len());

    split
        .per_person
        .iter()
        .map(|pt| format!("{:<width$}  {}", pt.participant.name, pt.amount))
        .chain(std::iter::once(format!(
            "{:<width$}  {}",
            "Total", split.grand_total
        )))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::promptpay::builder::verify;
    use crate::promptpay::tlv::{find, parse};
    use crate::split::split_event;
    use crate::types::{Event, Item};

    fn three_way() -> SplitResult {
        let event = Event::new(
            "dinner",
            vec![
                Participant::with_id("c", "Cat"),
                Participant::with_id("a", "Ann"),
                Participant::with_id("b", "Bee"),
            ],
            vec![Item::for_everyone(Money::from_cents(10000))],
        );
        split_event(&event).unwrap()
    }

    #[test]
    fn test_one_request_per_person() {
        let split = three_way();
        let requests = payment_requests(&split, "081-234-5678", &LocaleSettings::default()).unwrap();

        assert_eq!(requests.len(), 3);
        let names: Vec<&str> = requests.iter().map(|r| r.participant.name.as_str()).collect();
        assert_eq!(names, ["Ann", "Bee", "Cat"]);

        for request in &requests {
            assert!(request.payload.is_dynamic);
            assert!(verify(&request.payload.content));
            let fields = parse(&request.payload.content).unwrap();
            assert_eq!(
                find(&fields, "54"),
                Some(request.amount.to_plain_string().as_str())
            );
        }

        // Cat is listed first in the event, so Cat absorbed the drift
        assert_eq!(requests[2].amount, Money::from_cents(3334));
    }

    #[test]
    fn test_missing_and_unsupported_payee() {
        let split = three_way();
        let locale = LocaleSettings::default();

        assert_eq!(
            payment_requests(&split, "   ", &locale).unwrap_err(),
            CoreError::MissingPromptPayId
        );
        assert_eq!(
            payment_requests(&split, "0141234567890", &locale).unwrap_err(),
            CoreError::UnsupportedIdentifier {
                raw: "0141234567890".to_string()
            }
        );
    }

    #[test]
    fn test_resolve_payee() {
        assert_eq!(resolve_payee(" 0812345678 ").unwrap(), IdType::Phone);
        assert_eq!(resolve_payee("8857947646731").unwrap(), IdType::NationalId);
    }

    #[test]
    fn test_summary_lines() {
        let lines = summary_lines(&three_way());
        assert_eq!(
            lines,
            [
                "Ann    ฿33.33",
                "Bee    ฿33.33",
                "Cat    ฿33.34",
                "Total  ฿100.00",
            ]
        );
    }
}
