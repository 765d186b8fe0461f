//! # Split Engine
//!
//! Allocates itemized charges across participants so that the rounded
//! per-person amounts add up to the rounded grand total, to the satang.
//!
//! ## Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. For each item                                                       │
//! │       targets = everyone (empty tags / {"ALL"}) or the tagged ids       │
//! │       share   = amount / |targets|     (10 digits, half-up)             │
//! │       running[target] += share                                          │
//! │                                                                         │
//! │  2. rounded[p]  = round_half_up(running[p], 2)                          │
//! │     grand_total = round_half_up(Σ item.amount, 2)   (independently!)    │
//! │     drift       = grand_total - Σ rounded                               │
//! │                                                                         │
//! │  3. 0 < |drift| ≤ 0.02  → add drift to the largest rounded total        │
//! │                           (ties: first in participant-list order)       │
//! │     |drift| > 0.02      → leave as accepted residual                    │
//! │                                                                         │
//! │  4. Sort by participant name ascending                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example: ฿100.00 among A, B, C
//! ```text
//! share       = 33.3333333333 each
//! rounded     = 33.33 + 33.33 + 33.33 = 99.99
//! grand_total = 100.00 → drift = 0.01
//! all tie     → A (first listed) absorbs it → A = 33.34
//! ```
//!
//! Tagged ids are not checked against the participants here. A share for an
//! unknown id still counts towards the divisor but is credited to nobody.
//! Use [`split_event_strict`] to reject such events instead.

use std::collections::HashMap;
use std::num::NonZeroUsize;

use tracing::{debug, warn};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Event, Participant, PersonTotal, SplitResult};
use crate::validation::validate_event_references;
use crate::MAX_DRIFT_CENTS;

/// Splits an event's items among its participants.
///
/// Fails with [`CoreError::EmptyParticipants`] if there is nobody to split
/// among, and with [`CoreError::AmountOverflow`] if a total leaves the
/// decimal range. Item amounts are not validated otherwise; negative amounts
/// (discounts) flow through the same arithmetic.
pub fn split_event(event: &Event) -> CoreResult<SplitResult> {
    if event.participants.is_empty() {
        return Err(CoreError::EmptyParticipants);
    }

    // Identity is the id: keep the first participant listed for each id.
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut participants: Vec<&Participant> = Vec::with_capacity(event.participants.len());
    for participant in &event.participants {
        if !index.contains_key(participant.id.as_str()) {
            index.insert(participant.id.as_str(), participants.len());
            participants.push(participant);
        }
    }

    let mut running = vec![Money::zero(); participants.len()];

    for item in &event.items {
        let targets: Vec<&str> = if item.splits_among_everyone() {
            participants.iter().map(|p| p.id.as_str()).collect()
        } else {
            item.tagged_participant_ids.iter().map(String::as_str).collect()
        };

        let Some(parts) = NonZeroUsize::new(targets.len()) else {
            continue;
        };
        let share = item.amount.share_of(parts);

        for target in targets {
            match index.get(target) {
                Some(&i) => running[i] = checked_add(running[i], share, "participant total")?,
                None => warn!(
                    item_id = %item.id,
                    participant_id = %target,
                    "Dropping share tagged to unknown participant"
                ),
            }
        }
    }

    let mut rounded: Vec<Money> = running.iter().map(Money::round_half_up).collect();
    let sum_rounded = checked_sum(rounded.iter().copied(), "sum of participant totals")?;

    let grand_total =
        checked_sum(event.items.iter().map(|item| item.amount), "grand total")?.round_half_up();

    let drift = grand_total
        .checked_sub(sum_rounded)
        .ok_or_else(|| overflow("rounding drift"))?;
    let mut drift_applied_to = None;

    if !drift.is_zero() {
        if drift.abs() <= Money::from_cents(MAX_DRIFT_CENTS) {
            let target = largest_first(&rounded);
            rounded[target] = checked_add(rounded[target], drift, "participant total")?;
            drift_applied_to = Some(participants[target].id.clone());
        } else {
            warn!(
                drift = %drift,
                grand_total = %grand_total,
                "Rounding drift exceeds tolerance, leaving as residual"
            );
        }
    }

    let mut per_person: Vec<PersonTotal> = participants
        .iter()
        .zip(rounded)
        .map(|(participant, amount)| PersonTotal {
            participant: (*participant).clone(),
            amount,
        })
        .collect();
    per_person.sort_by(|a, b| a.participant.name.cmp(&b.participant.name));

    debug!(
        participants = per_person.len(),
        items = event.items.len(),
        grand_total = %grand_total,
        drift = %drift,
        drift_applied_to = ?drift_applied_to,
        "Split event"
    );

    Ok(SplitResult {
        per_person,
        grand_total,
        drift_applied_to,
    })
}

/// Like [`split_event`], but first rejects items tagged with ids that are
/// not participants of the event.
pub fn split_event_strict(event: &Event) -> CoreResult<SplitResult> {
    validate_event_references(event)?;
    split_event(event)
}

fn overflow(context: &str) -> CoreError {
    CoreError::AmountOverflow {
        context: context.to_string(),
    }
}

fn checked_add(a: Money, b: Money, context: &str) -> CoreResult<Money> {
    a.checked_add(b).ok_or_else(|| overflow(context))
}

fn checked_sum(mut amounts: impl Iterator<Item = Money>, context: &str) -> CoreResult<Money> {
    amounts.try_fold(Money::zero(), |acc, amount| checked_add(acc, amount, context))
}

/// Index of the largest amount; the earliest index wins ties.
fn largest_first(amounts: &[Money]) -> usize {
    let mut best = 0;
    for (i, amount) in amounts.iter().enumerate().skip(1) {
        if *amount > amounts[best] {
            best = i;
        }
    }
    best
}

// =============================================================================
// Unit Tests
// =============================================================================
