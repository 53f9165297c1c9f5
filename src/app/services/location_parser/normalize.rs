//! Text normalization for location fragments

use regex::Regex;
use std::sync::LazyLock;

/// Characters removed before any other processing: degree signs and every
/// quote or prime mark inspectors use for feet and inches.
const STRIPPED_MARKS: &[char] = &[
    '°', 'º', '˚', '\'', '"', '`', '‘', '’', '“', '”', '′', '″',
];

static SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*-\s*").expect("separator pattern is valid"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Canonicalize a free-text fragment
///
/// Strips degree and quote marks, unifies `_` and `-` to `-` (dropping spaces
/// around the separator), collapses whitespace, trims and upper-cases.
///
/// # Examples
///
/// ```
/// use vessel_integrity::app::services::location_parser::normalize;
///
/// assert_eq!(normalize("  27 _ 45° "), "27-45");
/// assert_eq!(normalize("3' from  w seam"), "3 FROM W SEAM");
/// ```
pub fn normalize(text: &str) -> String {
    let stripped: String = text
        .chars()
        .filter(|c| !STRIPPED_MARKS.contains(c))
        .map(|c| if c == '_' { '-' } else { c })
        .collect();

    let separated = SEPARATOR.replace_all(&stripped, "-");
    let collapsed = WHITESPACE.replace_all(&separated, " ");

    collapsed.trim().to_uppercase()
}

/// Normalize an optional fragment; `None` yields an empty string
pub fn normalize_opt(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}
