//! Text extraction and folding used by the search box and string collation.

use std::cmp::Ordering;

use serde_json::Value;
use unicode_normalization::UnicodeNormalization;

/// Flatten a source record into one space-joined string.
///
/// Scalars are written as-is, arrays and objects contribute their flattened
/// elements, `null` contributes nothing.
pub fn flatten_search_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(flatten_search_text)
            .collect::<Vec<_>>()
            .join(" "),
        Value::Object(fields) => fields
            .values()
            .map(flatten_search_text)
            .collect::<Vec<_>>()
            .join(" "),
    }
}

/// Lowercase, strip combining diacritics (U+0300..U+036F) after NFD, trim.
pub fn fold_for_search(value: &str) -> String {
    let folded: String = value
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_diacritic(*c))
        .collect();
    folded.trim().to_string()
}

fn is_combining_diacritic(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}

/// Locale-style string ordering: accent- and case-insensitive first, raw text breaks ties.
pub fn collate(a: &str, b: &str) -> Ordering {
    fold_for_search(a)
        .cmp(&fold_for_search(b))
        .then_with(|| a.cmp(b))
}
