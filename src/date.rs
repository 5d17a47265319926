//! Unix-seconds → UTC timestamp derivation for the `created_utc` column.

use time::format_description::FormatItem;
use time::macros::format_description;
use time::OffsetDateTime;

// Same rendering the historical CSVs use, so downstream dashboard code
// keeps parsing the same strings.
const TS_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]+00:00");

/// Parse a `created_utc` cell (Unix seconds, possibly with a fractional part —
/// the Reddit API reports floats) into whole epoch seconds. Malformed or empty
/// input is `None`, never an error.
pub fn parse_epoch_seconds(raw: &str) -> Option<i64> {
    let v: f64 = raw.trim().parse().ok()?;
    if !v.is_finite() {
        return None;
    }
    Some(v.trunc() as i64)
}

/// Render epoch seconds as a second-granularity UTC timestamp string.
/// Out-of-range values come back as `None`.
pub fn format_utc(secs: i64) -> Option<String> {
    let dt = OffsetDateTime::from_unix_timestamp(secs).ok()?;
    dt.format(TS_FORMAT).ok()
}

/// Derive the timestamp string for one `created_utc` cell. Rows with garbage
/// input get the empty string rather than failing the batch.
pub fn derive_timestamp(raw: &str) -> String {
    parse_epoch_seconds(raw)
        .and_then(format_utc)
        .unwrap_or_default()
}
