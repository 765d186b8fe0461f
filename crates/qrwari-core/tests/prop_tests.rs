use proptest::prelude::*;
use qrwari_core::promptpay::{tlv, verify};
use qrwari_core::{build, split_event, Event, IdType, Item, Money, Participant, PayloadInput};
use std::num::NonZeroUsize;

fn participants(n: usize) -> Vec<Participant> {
    (0..n)
        .map(|i| Participant::with_id(format!("p{}", i), format!("Person {}", (b'A' + i as u8) as char)))
        .collect()
}

fn arb_amount() -> impl Strategy<Value = Money> {
    (-50_000i64..5_000_000).prop_map(Money::from_cents)
}

/// An event with 1..=max_people participants and items tagged either to
/// everyone or to a non-empty subset of known participants.
fn arb_event(max_people: usize) -> impl Strategy<Value = Event> {
    (1..=max_people).prop_flat_map(|n| {
        let item = (arb_amount(), prop::collection::vec(any::<bool>(), n)).prop_map(
            move |(amount, mask)| {
                let tags: Vec<String> = mask
                    .iter()
                    .enumerate()
                    .filter(|(_, on)| **on)
                    .map(|(i, _)| format!("p{}", i))
                    .collect();
                if tags.is_empty() {
                    Item::for_everyone(amount)
                } else {
                    Item::new(amount, tags)
                }
            },
        );
        prop::collection::vec(item, 0..8)
            .prop_map(move |items| Event::new("prop", participants(n), items))
    })
}

fn arb_everyone_event() -> impl Strategy<Value = Event> {
    (1usize..=8, prop::collection::vec(arb_amount(), 1..5)).prop_map(|(n, amounts)| {
        let items = amounts.into_iter().map(Item::for_everyone).collect();
        Event::new("prop", participants(n), items)
    })
}

fn arb_payload_input() -> impl Strategy<Value = PayloadInput> {
    let id = prop_oneof![
        "0[689][0-9]{8}".prop_map(|raw| (IdType::Phone, raw)),
        "\\+66 ?[689][0-9]{8}".prop_map(|raw| (IdType::Phone, raw)),
        "[1-8][0-9]{12}".prop_map(|raw| (IdType::NationalId, raw)),
        "[0-9]{13}".prop_map(|raw| (IdType::TaxId, raw)),
        "[0-9]{15}".prop_map(|raw| (IdType::EWallet, raw)),
        "[0-9A-Za-z-]{1,60}".prop_map(|raw| (IdType::BankAccount, raw)),
    ];
    let amount = prop::option::of((0i64..10_000_000).prop_map(Money::from_cents));

    (id, amount, any::<bool>()).prop_map(|((id_type, raw), amount, prefer_static)| {
        let mut input = PayloadInput::new(id_type, raw);
        input.amount = amount;
        input.prefer_static_when_no_amount = prefer_static;
        input
    })
}

proptest! {
    /// With up to 4 participants and satang amounts the drift never exceeds
    /// 0.02, so per-person amounts always add up to the grand total.
    #[test]
    fn split_reconciles(event in arb_event(4)) {
        let result = split_event(&event).unwrap();
        prop_assert_eq!(result.sum_per_person(), result.grand_total);
    }

    /// Any residual left unreconciled must be beyond tolerance.
    #[test]
    fn split_residual_only_beyond_tolerance(event in arb_event(8)) {
        let result = split_event(&event).unwrap();
        let residual = (result.grand_total - result.sum_per_person()).abs();
        prop_assert!(
            residual.is_zero()
                || (result.drift_applied_to.is_none() && residual > Money::from_cents(2))
        );
    }

    /// Every settled amount carries exactly 2 fractional digits.
    #[test]
    fn split_amounts_have_two_digits(event in arb_event(8)) {
        let result = split_event(&event).unwrap();
        prop_assert_eq!(result.grand_total.amount().scale(), 2);
        for pt in &result.per_person {
            prop_assert_eq!(pt.amount.amount().scale(), 2);
        }
    }

    #[test]
    fn split_is_idempotent(event in arb_event(8)) {
        prop_assert_eq!(split_event(&event).unwrap(), split_event(&event).unwrap());
    }

    #[test]
    fn split_sorted_by_name(event in arb_event(8)) {
        let result = split_event(&event).unwrap();
        let names: Vec<&str> = result.per_person.iter().map(|pt| pt.participant.name.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        prop_assert_eq!(names, sorted);
    }

    /// When drift is absorbed, exactly one participant differs from the
    /// naive rounding, by exactly the drift.
    #[test]
    fn split_drift_touches_one_participant(event in arb_everyone_event()) {
        let n = NonZeroUsize::new(event.participants.len()).unwrap();
        let naive = event
            .items
            .iter()
            .map(|item| item.amount.share_of(n))
            .sum::<Money>()
            .round_half_up();
        let naive_sum: Money = std::iter::repeat(naive).take(n.get()).sum();

        let result = split_event(&event).unwrap();
        let drift = result.grand_total - naive_sum;
        let changed: Vec<_> = result
            .per_person
            .iter()
            .filter(|pt| pt.amount != naive)
            .collect();

        if drift.is_zero() || drift.abs() > Money::from_cents(2) {
            prop_assert!(changed.is_empty());
            prop_assert!(result.drift_applied_to.is_none());
        } else {
            prop_assert_eq!(changed.len(), 1);
            prop_assert_eq!(changed[0].amount, naive + drift);
            prop_assert_eq!(result.drift_applied_to.as_deref(), Some(changed[0].participant.id.as_str()));
            // everyone ties, so the first listed participant absorbs it
            prop_assert_eq!(changed[0].participant.id.as_str(), "p0");
        }
    }

    /// Parsing a built payload from offset 0 consumes it exactly.
    #[test]
    fn payload_tlv_well_formed(input in arb_payload_input()) {
        let qr = build(&input).unwrap();
        let fields = tlv::parse(&qr.content).unwrap();

        let rebuilt: String = fields
            .iter()
            .map(|f| format!("{}{:02}{}", f.tag, f.value.chars().count(), f.value))
            .collect();
        prop_assert_eq!(&rebuilt, &qr.content);

        let tags: Vec<&str> = fields.iter().map(|f| f.tag.as_str()).collect();
        prop_assert_eq!(tags.first().copied(), Some("00"));
        prop_assert_eq!(tags.last().copied(), Some("63"));
        prop_assert_eq!(tags.contains(&"54"), input.amount.is_some());

        let merchant = tlv::find(&fields, "29").unwrap();
        let subs = tlv::parse(merchant).unwrap();
        prop_assert_eq!(subs.len(), 2);
    }

    #[test]
    fn payload_checksum_integrity(input in arb_payload_input()) {
        let qr = build(&input).unwrap();
        prop_assert!(verify(&qr.content));

        let (body, trailer) = qr.content.split_at(qr.content.len() - 4);
        prop_assert!(body.ends_with("6304"));
        prop_assert_eq!(qrwari_core::checksum(body.as_bytes()), trailer);
        prop_assert_eq!(qr.is_dynamic, input.amount.is_some());
    }
}
