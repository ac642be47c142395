use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonical comparable form of a food query or dataset key.
///
/// Lowercase, accents stripped (NFKD minus combining marks), restricted to
/// `[a-z0-9 +()×x/-]`, whitespace collapsed. Idempotent.
pub fn normalize(raw: &str) -> String {
    let lowered = collapse_whitespace(&raw.trim().to_lowercase());

    let filtered: String = lowered
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| is_allowed(*c))
        .collect();

    collapse_whitespace(&filtered)
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, ' ' | '+' | '(' | ')' | '×' | '/' | '-')
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
