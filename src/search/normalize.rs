/// Normalize text for matching: lowercase, then fold the fixed accent table
/// into base letters.
///
/// Applied identically to stored fields (once, at initialization) and to
/// queries (at search time), so the scan itself is a plain byte-wise
/// substring test. Deterministic, idempotent, and locale-independent beyond
/// Unicode lowercasing.
pub fn normalize(value: &str) -> String {
    value
        .chars()
        .flat_map(char::to_lowercase)
        .map(fold_accent)
        .collect()
}

/// Fixed folding table for the common Latin-1 vowel accents (acute, grave,
/// circumflex, diaeresis, and the Hungarian double-acute) plus `ç` and `ß`.
fn fold_accent(c: char) -> char {
    match c {
        'á' | 'â' => 'a',
        'é' | 'è' | 'ê' => 'e',
        'í' | 'ï' | 'ì' => 'i',
        'ó' | 'ö' | 'ő' | 'ô' => 'o',
        'ú' | 'ü' | 'ű' => 'u',
        'ç' => 'c',
        'ß' => 's',
        other => other,
    }
}
