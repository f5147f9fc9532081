//! Reformatting of raw OCR output before translation.
//!
//! OCR tends to break Japanese sentences across lines and to emit Western
//! punctuation for full-width characters. Joining the lines and remapping the
//! punctuation gives the translation backend one continuous sentence.

/// Fixed substitution table, applied literally to every occurrence.
/// Both straight double quotes map to the opening corner bracket; the mapping
/// is intentionally not context-sensitive.
const PUNCTUATION_MAP: [(char, char); 7] = [
    ('"', '「'),
    ('\'', '’'),
    ('`', '‘'),
    ('.', '。'),
    (',', '、'),
    ('!', '！'),
    ('?', '？'),
];

/// Trim each line and concatenate, dropping all line breaks.
pub fn join_lines(text: &str) -> String {
    text.trim().lines().map(str::trim).collect()
}

/// Replace every mapped punctuation character with its full-width equivalent.
pub fn map_punctuation(text: &str) -> String {
    text.chars()
        .map(|c| {
            PUNCTUATION_MAP
                .iter()
                .find(|(from, _)| *from == c)
                .map(|(_, to)| *to)
                .unwrap_or(c)
        })
        .collect()
}

/// Full normalization: line joining first, then punctuation substitution.
pub fn normalize(text: &str) -> String {
    map_punctuation(&join_lines(text))
}
