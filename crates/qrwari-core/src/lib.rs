//! # qrwari-core: Pure Business Logic for Qrwari
//!
//! Splits a shared bill among participants and produces PromptPay
//! (Thai QR) payloads so each participant can pay their share by scanning.
//! Everything here is a pure function with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Qrwari Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Front end (apps/cli or a UI)                    │   │
//! │  │    Entry ──► Split review ──► Per-person QR ──► Summary         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ plain value objects                    │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ qrwari-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────────────────────┐ │   │
//! │  │   │   split   │  │   money   │  │        promptpay           │ │   │
//! │  │   │ Event →   │  │  Money    │  │  crc ◄── builder ◄── tlv   │ │   │
//! │  │   │ SplitRes. │  │  rounding │  │          identifier        │ │   │
//! │  │   └───────────┘  └───────────┘  └────────────────────────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO RENDERING • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              QR encoder (external, any standard one)            │   │
//! │  │            renders PayloadResult.content byte-for-byte          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Value objects (Participant, Item, Event, SplitResult, ...)
//! - [`money`] - Decimal money with half-up cent rounding
//! - [`split`] - The split engine
//! - [`promptpay`] - Checksum, TLV codec, identifier classifier, payload builder
//! - [`bill`] - One payment request per participant
//! - [`naming`] - Default event names ("16 Aug evening")
//! - [`validation`] - Opt-in input checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use qrwari_core::{split_event, Event, Item, Participant};
//! use rust_decimal::Decimal;
//!
//! let event = Event::new(
//!     "dinner",
//!     vec![Participant::new("A"), Participant::new("B"), Participant::new("C")],
//!     vec![Item::for_everyone(Decimal::new(10000, 2))],
//! );
//!
//! let result = split_event(&event).unwrap();
//! assert_eq!(result.sum_per_person(), result.grand_total);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod bill;
pub mod error;
pub mod money;
pub mod naming;
pub mod promptpay;
pub mod split;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use promptpay::{build, checksum, detect_id_type, is_valid_national_id};
pub use split::{split_event, split_event_strict};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Tag sentinel meaning "split this item among every participant".
///
/// An item whose tag set is empty or exactly `{"ALL"}` targets everyone.
pub const ALL_PARTICIPANTS: &str = "ALL";

/// Largest drift (in satang, 1/100 baht) the split engine absorbs into one
/// participant.
///
/// Anything larger is left as an accepted residual.
pub const MAX_DRIFT_CENTS: i64 = 2;

/// Fractional digits kept for each per-item share before final rounding.
pub const SHARE_SCALE: u32 = 10;

/// ISO 3166 country code used when the caller does not specify one.
pub const DEFAULT_COUNTRY_CODE: &str = "TH";

/// ISO 4217 numeric code for Thai baht.
pub const DEFAULT_CURRENCY_NUMERIC: &str = "764";
