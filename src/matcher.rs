//! Recommendation Matching
//!
//! Maps a predicted disease label to recommended treatment rows. A row
//! qualifies when the crop keyword AND the predicted label each appear as a
//! substring of at least one field. Matching is case-sensitive and
//! locale-naive on purpose: crop names and disease labels are short tokens,
//! not natural-language text needing fuzzy matching.

use crate::data::{Record, TabularStore};
use serde::Serialize;

/// Matched rows for one prediction, in dataset order, capped at the
/// configured limit
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    /// Display columns (currently the full store header order)
    pub headers: Vec<String>,
    /// Qualifying records, at most `limit`
    pub rows: Vec<Record>,
}

impl Recommendation {
    pub fn empty() -> Self {
        Self {
            headers: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Columns chosen for presentation and export.
///
/// Policy hook: currently identity pass-through. Narrowing or reordering
/// happens here, never in the matching predicates.
pub fn pick_display_columns(headers: &[String]) -> Vec<String> {
    headers.to_vec()
}

/// True iff the trimmed needle is a substring of any trimmed field value.
/// A blank needle never matches.
pub fn any_field_contains(record: &Record, needle: &str) -> bool {
    let needle = needle.trim();
    if needle.is_empty() {
        return false;
    }
    record
        .values()
        .iter()
        .any(|value| value.trim().contains(needle))
}

/// Filter `store` down to rows matching both the crop keyword and the
/// predicted disease label.
///
/// The filter is stable (dataset order preserved) and truncated to `limit`.
/// An empty store or zero qualifying rows yields an empty result, which is a
/// normal outcome distinct from a load failure.
pub fn match_recommendations(
    store: &TabularStore,
    crop_keyword: &str,
    disease_label: &str,
    limit: usize,
) -> Recommendation {
    if store.is_empty() {
        return Recommendation::empty();
    }

    let rows: Vec<Record> = store
        .records()
        .iter()
        .filter(|record| {
            any_field_contains(record, crop_keyword) && any_field_contains(record, disease_label)
        })
        .take(limit)
        .cloned()
        .collect();

    Recommendation {
        headers: pick_display_columns(store.headers()),
        rows,
    }
}
