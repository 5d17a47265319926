//! Entity decoding for scraped Reddit text: one percent-decoding pass followed
//! by one HTML-entity pass. Total functions — bad input comes back verbatim.

use percent_encoding::percent_decode_str;
use std::borrow::Cow;

/// Decode the two encodings that routinely show up in scraped Reddit text:
/// percent escapes (`%20`, `%3C`) first, then HTML entities (`&amp;`, `&#39;`).
/// If percent-decoding does not yield valid UTF-8 the input is kept as-is.
/// Idempotent on already-decoded text.
pub fn decode_entities(text: &str) -> String {
    let unquoted: Cow<'_, str> = match percent_decode_str(text).decode_utf8() {
        Ok(s) => s,
        Err(_) => Cow::Borrowed(text),
    };
    html_escape::decode_html_entities(unquoted.as_ref()).into_owned()
}
