//! Locale-aware ordering for display names.
//!
//! The bundled dataset is Brazilian Portuguese, so a plain byte comparison
//! would sort "Tática" after "Tecnologia". Ordering keys are built by
//! lowercasing and folding Latin diacritics to their base letters; ties on
//! the folded key fall back to the raw string so the order is total.

use std::cmp::Ordering;

/// Build the ordering key for a display name.
pub fn sort_key(s: &str) -> String {
    let mut key = String::with_capacity(s.len());
    for ch in s.chars() {
        for lower in ch.to_lowercase() {
            key.push(fold(lower));
        }
    }
    key
}

/// Compare two display names with locale-aware folding.
pub fn compare(a: &str, b: &str) -> Ordering {
    sort_key(a).cmp(&sort_key(b)).then_with(|| a.cmp(b))
}

fn fold(ch: char) -> char {
    match ch {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        'ý' => 'y',
        _ => ch,
    }
}
