//! # Domain Types
//!
//! Value objects exchanged between the core and its collaborators (UI,
//! persistence, QR encoder). All are immutable once built; no entity owns a
//! lifecycle beyond a single computation call.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Event       │   │      Item       │   │  Participant    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  participants ──┼──►│  amount (Money) │   │  id (UUID)      │       │
//! │  │  items ─────────┼──►│  tagged ids ────┼──►│  name           │       │
//! │  └────────┬────────┘   └─────────────────┘   └─────────────────┘       │
//! │           │ split_event                                                 │
//! │           ▼                                                             │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  SplitResult    │   │  PayloadInput   │   │  PayloadResult  │       │
//! │  │  per_person     │──►│  id_type        │──►│  content        │       │
//! │  │  grand_total    │   │  amount         │   │  is_dynamic     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::money::Money;
use crate::{ALL_PARTICIPANTS, DEFAULT_COUNTRY_CODE, DEFAULT_CURRENCY_NUMERIC};

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Participant
// =============================================================================

/// Someone sharing the bill.
///
/// Identity is the `id`. The name is display-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Participant {
    #[serde(default = "new_id")]
    pub id: String,
    pub name: String,
}

impl Participant {
    /// Creates a participant with a fresh UUID v4 id.
    pub fn new(name: impl Into<String>) -> Self {
        Participant {
            id: new_id(),
            name: name.into(),
        }
    }

    /// Creates a participant with a caller-chosen id.
    pub fn with_id(id: impl Into<String>, name: impl Into<String>) -> Self {
        Participant {
            id: id.into(),
            name: name.into(),
        }
    }
}

// =============================================================================
// Item
// =============================================================================

/// One charge on the bill.
///
/// `tagged_participant_ids` names who shares this item. An empty set and the
/// set `{"ALL"}` both mean "everyone". Ids are NOT checked against the
/// event's participants here; see [`crate::validation::validate_event_references`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Item {
    #[serde(default = "new_id")]
    pub id: String,

    /// Optional label shown on the bill ("Tom yum", "Service charge").
    #[serde(default)]
    pub label: Option<String>,

    /// Charge amount. Negative amounts model discounts.
    pub amount: Money,

    #[serde(default)]
    pub tagged_participant_ids: BTreeSet<String>,
}

impl Item {
    /// Creates an item shared among the given participant ids.
    pub fn new<I, S>(amount: impl Into<Money>, tagged: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Item {
            id: new_id(),
            label: None,
            amount: amount.into(),
            tagged_participant_ids: tagged.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates an item shared among everyone (tagged with the `ALL` sentinel).
    pub fn for_everyone(amount: impl Into<Money>) -> Self {
        Item::new(amount, [ALL_PARTICIPANTS])
    }

    /// Sets the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// True when the tag set is empty or exactly `{"ALL"}`.
    pub fn splits_among_everyone(&self) -> bool {
        match self.tagged_participant_ids.len() {
            0 => true,
            1 => self.tagged_participant_ids.contains(ALL_PARTICIPANTS),
            _ => false,
        }
    }
}

// =============================================================================
// Event
// =============================================================================

/// A bill to split: who was there and what was ordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Event {
    #[serde(default = "new_id")]
    pub id: String,

    /// Display name, e.g. "16 Aug evening" (see [`crate::naming`]).
    #[serde(default)]
    pub name: String,

    #[serde(default = "Utc::now")]
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    pub participants: Vec<Participant>,

    #[serde(default)]
    pub items: Vec<Item>,
}

impl Event {
    /// Creates an event stamped with the current time.
    pub fn new(name: impl Into<String>, participants: Vec<Participant>, items: Vec<Item>) -> Self {
        Event {
            id: new_id(),
            name: name.into(),
            created_at: Utc::now(),
            participants,
            items,
        }
    }

    /// Looks up a participant by id.
    pub fn participant(&self, id: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }
}

// =============================================================================
// Split Result
// =============================================================================

/// One participant's settled share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PersonTotal {
    pub participant: Participant,
    /// Always exactly 2 fractional digits.
    pub amount: Money,
}

/// Output of [`crate::split_event`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SplitResult {
    /// Sorted by participant name ascending.
    pub per_person: Vec<PersonTotal>,

    /// Sum of raw item amounts, rounded half-up to 2 digits.
    pub grand_total: Money,

    /// Participant id that absorbed the rounding drift, if any.
    pub drift_applied_to: Option<String>,
}

impl SplitResult {
    /// Returns the settled amount for a participant id.
    pub fn total_for(&self, participant_id: &str) -> Option<Money> {
        self.per_person
            .iter()
            .find(|pt| pt.participant.id == participant_id)
            .map(|pt| pt.amount)
    }

    /// Sum of every per-person amount.
    pub fn sum_per_person(&self) -> Money {
        self.per_person.iter().map(|pt| pt.amount).sum()
    }
}

// =============================================================================
// PromptPay Identifier Type
// =============================================================================

/// Which kind of PromptPay proxy identifies the payee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum IdType {
    /// Thai mobile number.
    Phone,
    /// 13-digit citizen id.
    NationalId,
    /// 13-digit tax id (encoded like a national id).
    TaxId,
    /// e-Wallet id.
    EWallet,
    /// Bank code + account number, passed through verbatim.
    BankAccount,
}

impl fmt::Display for IdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdType::Phone => write!(f, "phone"),
            IdType::NationalId => write!(f, "national_id"),
            IdType::TaxId => write!(f, "tax_id"),
            IdType::EWallet => write!(f, "e_wallet"),
            IdType::BankAccount => write!(f, "bank_account"),
        }
    }
}

impl FromStr for IdType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "phone" | "mobile" => Ok(IdType::Phone),
            "national_id" | "citizen_id" => Ok(IdType::NationalId),
            "tax_id" => Ok(IdType::TaxId),
            "e_wallet" | "ewallet" => Ok(IdType::EWallet),
            "bank_account" | "bank" => Ok(IdType::BankAccount),
            other => Err(ValidationError::InvalidFormat {
                field: "id type".to_string(),
                reason: format!(
                    "unknown id type '{}'. Valid options: phone, national_id, tax_id, e_wallet, bank_account",
                    other
                ),
            }),
        }
    }
}

// =============================================================================
// Payload Input / Result
// =============================================================================

fn default_country_code() -> String {
    DEFAULT_COUNTRY_CODE.to_string()
}

fn default_currency_numeric() -> String {
    DEFAULT_CURRENCY_NUMERIC.to_string()
}

fn default_true() -> bool {
    true
}

/// Everything the payload builder needs for one QR code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PayloadInput {
    pub id_type: IdType,

    /// The identifier as the user typed it ("081-234-5678").
    pub id_value_raw: String,

    /// Fixed amount. `Some` produces a dynamic (single-use) code.
    #[serde(default)]
    pub amount: Option<Money>,

    #[serde(default = "default_country_code")]
    pub country_code: String,

    #[serde(default = "default_currency_numeric")]
    pub currency_numeric: String,

    /// Without an amount: `true` → static code (PoI 11), `false` → 12.
    #[serde(default = "default_true")]
    pub prefer_static_when_no_amount: bool,
}

impl PayloadInput {
    /// Creates an input with Thai defaults and no amount.
    pub fn new(id_type: IdType, id_value_raw: impl Into<String>) -> Self {
        PayloadInput {
            id_type,
            id_value_raw: id_value_raw.into(),
            amount: None,
            country_code: default_country_code(),
            currency_numeric: default_currency_numeric(),
            prefer_static_when_no_amount: true,
        }
    }

    /// Sets a fixed amount.
    pub fn with_amount(mut self, amount: impl Into<Money>) -> Self {
        self.amount = Some(amount.into());
        self
    }
}

/// A built payload, ready for any QR encoder (UTF-8, byte-for-byte).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PayloadResult {
    pub content: String,
    /// True exactly when an amount was supplied.
    pub is_dynamic: bool,
}

// =============================================================================
// Unit Tests
// =============================================================================
