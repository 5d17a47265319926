//! Row predicates used by the clean and merge stages.

use crate::table::Table;
use regex::RegexBuilder;

/// Marker Reddit substitutes for moderator-removed content.
pub const REMOVED_MARKER: &str = r"\[removed\]";

/// Collect a copy of every row whose `text` column contains the literal
/// `[removed]` marker, case-insensitively. The source table is untouched —
/// the split is informational, and marker rows stay in the main output.
/// A table with no `text` column yields no matches.
pub fn removed_marker_rows(table: &Table, text_column: &str) -> Table {
    let mut subset = Table::new(table.headers.clone());
    let Some(idx) = table.col(text_column) else {
        return subset;
    };
    // Literal match; the escapes keep the brackets out of regex syntax.
    let re = RegexBuilder::new(REMOVED_MARKER)
        .case_insensitive(true)
        .build()
        .expect("static marker pattern");
    for row in &table.rows {
        if re.is_match(&row[idx]) {
            subset.rows.push(row.clone());
        }
    }
    subset
}

/// Drop rows whose `author` column equals `author` exactly (case-sensitive).
/// Returns how many rows were removed. No `author` column means no-op.
pub fn drop_author(table: &mut Table, author_column: &str, author: &str) -> usize {
    let Some(idx) = table.col(author_column) else {
        return 0;
    };
    let before = table.rows.len();
    table.rows.retain(|row| row[idx] != author);
    before - table.rows.len()
}
