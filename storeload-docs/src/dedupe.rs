//! Product deduplication.
//!
//! The export occasionally repeats product records under the same title.
//! Dedup policy is first-wins: the first occurrence of a title is kept and
//! later ones are dropped. Surviving records get a dense 1-based ordinal
//! id in first-seen order; downstream documents (order items) reference
//! products by these ordinals.

use std::collections::HashSet;

use crate::records::RawProduct;

/// Result of a dedup pass.
#[derive(Debug, Default)]
pub struct DedupeOutcome {
    /// Unique products in first-seen order, ordinal ids reassigned.
    pub products: Vec<RawProduct>,
    /// Titles of the dropped later occurrences, one entry per drop.
    pub duplicates: Vec<String>,
    /// Records without a title cannot be keyed and are dropped.
    pub untitled: u64,
}

/// Collapse repeated titles (first occurrence wins) and reassign dense
/// 1-based ordinal ids in first-seen order.
///
/// Running this on its own output changes nothing.
pub fn dedupe_products(records: Vec<RawProduct>) -> DedupeOutcome {
    let mut outcome = DedupeOutcome::default();
    let mut seen: HashSet<String> = HashSet::new();

    for mut record in records {
        let Some(title) = record.title.clone() else {
            outcome.untitled += 1;
            continue;
        };
        if !seen.insert(title.clone()) {
            log::warn!("dropping duplicate product record for '{title}'");
            outcome.duplicates.push(title);
            continue;
        }
        record.id = Some(outcome.products.len() as i64 + 1);
        outcome.products.push(record);
    }

    outcome
}
