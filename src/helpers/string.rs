//! Text normalization utilities shared by the grid normalizer, header flattener and date extractor.

/// Non-breaking space, common in exported report labels.
const NBSP: char = '\u{a0}';

/// Returns true if the text is empty after trimming surrounding whitespace.
#[inline]
pub(crate) fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Replaces non-breaking spaces with plain spaces and trims the result.
pub(crate) fn normalize_spaces(text: &str) -> String {
    text.replace(NBSP, " ").trim().to_owned()
}

/// Upper-cases the first character and lower-cases the rest ("jAN" -> "Jan").
pub(crate) fn to_title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
