//! Best-effort mojibake repair for text that went through a UTF-8 →
//! Windows-1252 → UTF-8 round trip (`Ã©` → `é`, `â€™` → `’`).
//!
//! Deliberately narrow: only the classic 1252 double-encoding is undone,
//! which is the corruption Reddit scrapes actually exhibit. Output is
//! heuristic and best-effort by contract.

use encoding_rs::WINDOWS_1252;

/// Repair one string. Never fails; correct text comes back unchanged, so the
/// pass is idempotent and safe to run on every column of a dataset.
pub fn fix_text(text: &str) -> String {
    let mut cur = text.to_string();
    // Each successful undo strictly shortens the char count, so this
    // terminates; two rounds covers the double-mojibake seen in the wild.
    loop {
        match undo_1252_round_trip(&cur) {
            Some(fixed) if fixed != cur => cur = fixed,
            _ => return cur,
        }
    }
}

/// One undo step: if the string maps losslessly back to Windows-1252 bytes and
/// those bytes are themselves valid UTF-8, the UTF-8 reading is the intended
/// text. Plain ASCII and genuinely non-mojibake text fail one of the two
/// checks and pass through.
fn undo_1252_round_trip(s: &str) -> Option<String> {
    if s.is_ascii() {
        return None;
    }
    let (bytes, _, had_unmappable) = WINDOWS_1252.encode(s);
    if had_unmappable {
        return None;
    }
    match std::str::from_utf8(&bytes) {
        // Reject pure passthrough (all-Latin-1 text that happens to survive)
        // and anything that did not actually get shorter in chars.
        Ok(decoded) if decoded != s && decoded.chars().count() < s.chars().count() => {
            Some(decoded.to_string())
        }
        _ => None,
    }
}
