//! Tests for text normalization

use super::super::normalize::{normalize, normalize_opt};

#[test]
fn test_normalize_strips_degree_and_quote_marks() {
    assert_eq!(normalize("27-45°"), "27-45");
    assert_eq!(normalize("3' from W seam"), "3 FROM W SEAM");
    assert_eq!(normalize("2\" shell side"), "2 SHELL SIDE");
    assert_eq!(normalize("3 o’clock"), "3 OCLOCK");
}

#[test]
fn test_normalize_unifies_separators() {
    assert_eq!(normalize("27_45"), "27-45");
    assert_eq!(normalize("27 - 45"), "27-45");
    assert_eq!(normalize("27 _ 45"), "27-45");
    assert_eq!(normalize("n_1a"), "N-1A");
}

#[test]
fn test_normalize_collapses_whitespace_and_uppercases() {
    assert_eq!(normalize("  south   head\t"), "SOUTH HEAD");
    assert_eq!(normalize("Shell\n course 2"), "SHELL COURSE 2");
}

#[test]
fn test_normalize_empty_input() {
    assert_eq!(normalize(""), "");
    assert_eq!(normalize("   "), "");
    assert_eq!(normalize("°''"), "");
}

#[test]
fn test_normalize_is_idempotent() {
    let inputs = ["  27 _ 45° ", "3' from  w seam", "South Head 3 o'clock", "N2 - SH"];
    for input in inputs {
        let once = normalize(input);
        assert_eq!(normalize(&once), once, "normalize not idempotent for {input:?}");
    }
}

#[test]
fn test_normalize_opt() {
    assert_eq!(normalize_opt(None), "");
    assert_eq!(normalize_opt(Some(" shell ")), "SHELL");
}
