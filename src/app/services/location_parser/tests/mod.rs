//! Tests for location text normalization and geometry extraction

mod normalize_tests;
