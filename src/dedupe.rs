//! Exact full-row dedup over an in-memory table.

use crate::table::Table;
use ahash::AHashSet;

/// Drop rows that are exact duplicates of an earlier row (all columns equal),
/// preserving first-occurrence order. Returns how many rows were removed.
pub fn dedup_exact(table: &mut Table) -> usize {
    let before = table.rows.len();
    let mut seen: AHashSet<Vec<String>> = AHashSet::with_capacity(before);
    table.rows.retain(|row| seen.insert(row.clone()));
    before - table.rows.len()
}
