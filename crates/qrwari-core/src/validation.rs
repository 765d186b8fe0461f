//! # Validation Module
//!
//! Opt-in input checks. The split engine and payload builder accept any
//! input they can compute with; callers that want stricter rules run these
//! first.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front end (UI / CLI)                                         │
//! │  ├── Parse amounts, trim names                                         │
//! │  └── detect_id_type before building a payload                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (optional)                                       │
//! │  ├── Tagged ids must name participants                                 │
//! │  ├── Participant names non-empty and unique                            │
//! │  └── Locale codes well-formed                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Engine / builder invariants                                  │
//! │  ├── EmptyParticipants                                                 │
//! │  └── FieldLengthOutOfRange                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{Event, Participant};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest participant name accepted.
pub const MAX_NAME_LEN: usize = 100;

// =============================================================================
// Event Validators
// =============================================================================

/// Checks that every tagged id names a participant of the event.
///
/// Items that split among everyone are skipped. In any other tag set the
/// `ALL` sentinel is just another id, and an unknown one.
///
/// Fails with [`CoreError::UnknownParticipant`] for the first offending tag,
/// in item order.
pub fn validate_event_references(event: &Event) -> CoreResult<()> {
    let known: HashSet<&str> = event.participants.iter().map(|p| p.id.as_str()).collect();

    for item in &event.items {
        if item.splits_among_everyone() {
            continue;
        }
        if let Some(unknown) = item
            .tagged_participant_ids
            .iter()
            .find(|id| !known.contains(id.as_str()))
        {
            return Err(CoreError::UnknownParticipant {
                item_id: item.id.clone(),
                participant_id: unknown.clone(),
            });
        }
    }

    Ok(())
}

/// Validates participant names.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most [`MAX_NAME_LEN`] characters
/// - Unique within the event (case-insensitive, trimmed)
pub fn validate_participant_names(participants: &[Participant]) -> ValidationResult<()> {
    let mut seen: HashSet<String> = HashSet::new();

    for participant in participants {
        let name = participant.name.trim();

        if name.is_empty() {
            return Err(ValidationError::Required {
                field: "participant name".to_string(),
            });
        }

        if name.chars().count() > MAX_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "participant name".to_string(),
                max: MAX_NAME_LEN,
            });
        }

        if !seen.insert(name.to_lowercase()) {
            return Err(ValidationError::Duplicate {
                field: "participant name".to_string(),
                value: name.to_string(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Locale Validators
// =============================================================================

/// Validates an ISO 3166 alpha-2 country code (`"TH"`, case-insensitive).
pub fn validate_country_code(code: &str) -> ValidationResult<()> {
    if code.len() != 2 || !code.bytes().all(|b| b.is_ascii_alphabetic()) {
        return Err(ValidationError::InvalidFormat {
            field: "country_code".to_string(),
            reason: "must be 2 ASCII letters".to_string(),
        });
    }

    Ok(())
}

/// Validates an ISO 4217 numeric currency code (`"764"`).
pub fn validate_currency_numeric(code: &str) -> ValidationResult<()> {
    if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "currency_numeric".to_string(),
            reason: "must be 3 ASCII digits".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
