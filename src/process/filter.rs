// src/process/filter.rs
use tracing::debug;

use crate::cards::RawCardRecord;

/// Keep only records whose applicant type is in the allow-list.
///
/// An empty result is valid; later stages accept empty input.
pub fn filter_qualified<'a>(
    cards: &'a [RawCardRecord],
    allow_list: &[String],
) -> Vec<&'a RawCardRecord> {
    let kept: Vec<&RawCardRecord> = cards
        .iter()
        .filter(|card| allow_list.iter().any(|a| a == &card.required_applicant_type))
        .collect();
    debug!(total = cards.len(), kept = kept.len(), "filtered to qualified applicants");
    kept
}

/// Drop records whose card name is on the exclusion list (cards with known-bad
/// source data). Cashback pipeline only.
pub fn drop_excluded_cards<'a>(
    cards: Vec<&'a RawCardRecord>,
    excluded: &[String],
) -> Vec<&'a RawCardRecord> {
    let before = cards.len();
    let kept: Vec<&RawCardRecord> = cards
        .into_iter()
        .filter(|card| !excluded.iter().any(|e| e == &card.card_name))
        .collect();
    debug!(dropped = before - kept.len(), "dropped excluded cards");
    kept
}
