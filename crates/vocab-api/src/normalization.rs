//! Text normalization for card content.
//!
//! Cards arrive from a browser form, so the same word may be typed with
//! decomposed accents, stray spaces, or a trailing newline. Content is stored
//! in NFC so `"č"` typed either way is one card, not two lookalikes.

use unicode_normalization::UnicodeNormalization;

/// Normalize a single-line field (word, translation).
///
/// NFC composition, then whitespace collapsed to single spaces and trimmed.
pub fn normalize_line(s: &str) -> String {
    s.nfc()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize a free-form field (grammar notes, example sentence).
///
/// Line structure is kept since grammar notes may hold tables. Each line is
/// right-trimmed and the whole text trimmed. Returns `None` for blank input.
pub fn normalize_block(s: Option<&str>) -> Option<String> {
    let text = s?
        .nfc()
        .collect::<String>()
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n");
    let text = text.trim();

    (!text.is_empty()).then(|| text.to_string())
}
