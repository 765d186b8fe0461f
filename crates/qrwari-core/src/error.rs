//! # Error Types
//!
//! Domain-specific error types for qrwari-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  qrwari-core errors (this file)                                        │
//! │  ├── CoreError        - Split / payload / payment-request failures     │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  apps/cli errors (separate crate)                                      │
//! │  └── CliError         - What the user sees (with an error code)        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → stderr + exit code     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every failure is a deterministic function of the input. Nothing here is
//! retryable.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// An event must have at least one participant to be split.
    #[error("At least one participant required")]
    EmptyParticipants,

    /// A TLV value was empty or longer than 99 characters.
    ///
    /// ## When This Occurs
    /// - Bank account string longer than 99 characters
    /// - Identifier that contains no digits at all (e.g. "ABC" as a
    ///   national ID)
    /// - Empty currency / country code
    #[error("Value length {length} out of range 1..=99 for tag {tag}")]
    FieldLengthOutOfRange { tag: String, length: usize },

    /// An item is tagged with a participant id that is not in the event.
    ///
    /// Only raised by the opt-in strict path; see
    /// [`crate::validation::validate_event_references`].
    #[error("Item {item_id} references unknown participant {participant_id}")]
    UnknownParticipant {
        item_id: String,
        participant_id: String,
    },

    /// A running total left the range of the decimal type.
    ///
    /// Item amounts are not bounded, so sums of huge amounts can overflow.
    #[error("Amount overflow while computing {context}")]
    AmountOverflow { context: String },

    /// No PromptPay id has been configured for the payee.
    #[error("PromptPay id is not set")]
    MissingPromptPayId,

    /// The PromptPay id is neither a phone number nor a valid national id.
    #[error("Unsupported PromptPay id '{raw}': only phone or national id is supported")]
    UnsupportedIdentifier { raw: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g. malformed TLV, bad country code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g. two participants with the same name).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
