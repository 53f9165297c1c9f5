//! Geometry extraction from location text
//!
//! Pure extractors for the positional vocabulary found on thickness survey
//! sheets: shell slice/angle grids, axial offsets from seams, clock positions
//! on heads and head names.

use super::normalize::normalize;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

static SLICE_ANGLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)-(\d+)$").expect("slice/angle pattern is valid"));

// Inch marks are tried before feet marks: a doubled apostrophe is an inch mark.
static AXIAL_INCHES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)^\s*(\d+)\s*(?:''|"|”|″|inches\b|inch\b|in\b\.?)"#)
        .expect("inch pattern is valid")
});

static AXIAL_FEET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(\d+)\s*(?:'|’|′|feet\b|foot\b|ft\b\.?)").expect("feet pattern is valid")
});

static SIDE_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(SHELL|HEAD)\s*-?\s*SIDE\b").expect("side phrase pattern is valid")
});

static SIDE_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(SHELL|HEAD)\b").expect("side word pattern is valid"));

static CLOCK_POSITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{1,2})\s*-?\s*O\s*-?\s*CLOCK\b").expect("clock pattern is valid")
});

static CENTER_POSITION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(CENTER|CENTRE|CTR)\b").expect("center pattern is valid"));

static COMPASS_HEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(SOUTH|NORTH|EAST|WEST)\s*-?\s*HEAD\b").expect("compass head pattern is valid")
});

static LEGACY_HEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(TOP|BOTTOM|BTTM|BTM)\s*-?\s*HEAD\b").expect("legacy head pattern is valid")
});

static COMPASS_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(SOUTH|NORTH|EAST|WEST)\b").expect("compass word pattern is valid")
});

static COMPASS_ABBREVIATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(SH|NH|EH|WH)\b").expect("abbreviation pattern is valid"));

static LEGACY_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(TOP|BOTTOM|BTTM|BTM)\b").expect("legacy word pattern is valid"));

// =============================================================================
// Slice / Angle
// =============================================================================

/// A shell grid position: slice (axial band) and circumferential angle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SliceAngle {
    pub slice: u32,
    pub angle: u32,
}

/// Parse `"{slice}-{angle}"` exactly, e.g. `"27-45"`
///
/// Any other shape yields `None`; there is no partial credit for a slice
/// without an angle.
pub fn parse_slice_angle(text: &str) -> Option<SliceAngle> {
    let normalized = normalize(text);
    let captures = SLICE_ANGLE.captures(&normalized)?;
    let slice = captures[1].parse().ok()?;
    let angle = captures[2].parse().ok()?;
    Some(SliceAngle { slice, angle })
}

// =============================================================================
// Axial Position
// =============================================================================

/// Unit of an axial offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxialUnit {
    Feet,
    Inches,
}

/// Which side of a seam an inch offset was taken on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeamSide {
    Shell,
    Head,
}

/// An axial offset such as `3'` or `2" shell side`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AxialPosition {
    pub value: u32,
    pub unit: AxialUnit,
    pub side: Option<SeamSide>,
}

impl AxialPosition {
    /// Canonical token: `3FT`, `2IN`, `2IN-SHELL`, `2IN-HEAD`
    pub fn token(&self) -> String {
        let unit = match self.unit {
            AxialUnit::Feet => "FT",
            AxialUnit::Inches => "IN",
        };
        match self.side {
            Some(SeamSide::Shell) => format!("{}{}-SHELL", self.value, unit),
            Some(SeamSide::Head) => format!("{}{}-HEAD", self.value, unit),
            None => format!("{}{}", self.value, unit),
        }
    }

    /// Inch offset tagged with a seam side
    pub fn is_seam_adjacent(&self) -> bool {
        self.unit == AxialUnit::Inches && self.side.is_some()
    }
}

impl fmt::Display for AxialPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token())
    }
}

/// Parse a leading axial offset from the raw, un-normalized text
///
/// A leading integer followed by a foot mark gives a feet offset; followed by
/// an inch mark gives an inch offset, tagged `SHELL` or `HEAD` when the text
/// names that side. An explicit "shell side"/"head side" phrase wins over a
/// bare mention; otherwise the first side word in the text is used.
pub fn parse_axial_position(raw: &str) -> Option<AxialPosition> {
    if let Some(captures) = AXIAL_INCHES.captures(raw) {
        let value = captures[1].parse().ok()?;
        return Some(AxialPosition {
            value,
            unit: AxialUnit::Inches,
            side: seam_side(raw),
        });
    }

    let captures = AXIAL_FEET.captures(raw)?;
    let value = captures[1].parse().ok()?;
    Some(AxialPosition {
        value,
        unit: AxialUnit::Feet,
        side: None,
    })
}

fn seam_side(raw: &str) -> Option<SeamSide> {
    let side_of = |word: &str| {
        if word.eq_ignore_ascii_case("SHELL") {
            SeamSide::Shell
        } else {
            SeamSide::Head
        }
    };

    if let Some(captures) = SIDE_PHRASE.captures(raw) {
        return Some(side_of(&captures[1]));
    }
    SIDE_WORD.captures(raw).map(|captures| side_of(&captures[1]))
}

// =============================================================================
// Heads
// =============================================================================

/// Position on a head: a clock position or the crown centre
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeadPosition {
    Clock(u8),
    Center,
}

impl HeadPosition {
    /// Canonical token: `3-OCLOCK` or `CENTER`
    pub fn token(&self) -> String {
        match self {
            HeadPosition::Clock(hour) => format!("{}-OCLOCK", hour),
            HeadPosition::Center => crate::constants::station_keys::CENTER_POSITION.to_string(),
        }
    }
}

/// Parse a clock position (`3 o'clock`, `12 O CLOCK`) or the word centre
pub fn parse_head_position(text: &str) -> Option<HeadPosition> {
    let normalized = normalize(text);

    if let Some(captures) = CLOCK_POSITION.captures(&normalized) {
        let hour: u8 = captures[1].parse().ok()?;
        if (1..=12).contains(&hour) {
            return Some(HeadPosition::Clock(hour));
        }
    }

    CENTER_POSITION
        .is_match(&normalized)
        .then_some(HeadPosition::Center)
}

/// Compass identity of a head
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeadName {
    South,
    North,
    East,
    West,
}

impl HeadName {
    fn from_compass_word(word: &str) -> Option<Self> {
        match word {
            "SOUTH" | "SH" => Some(HeadName::South),
            "NORTH" | "NH" => Some(HeadName::North),
            "EAST" | "EH" => Some(HeadName::East),
            "WEST" | "WH" => Some(HeadName::West),
            _ => None,
        }
    }

    /// Legacy orientation alias for records that never named a compass point
    ///
    /// One-directional: Top reads as East and Bottom as West. Never applied to
    /// text that already carries a compass word.
    fn from_legacy_orientation(word: &str) -> Option<Self> {
        match word {
            "TOP" => Some(HeadName::East),
            "BOTTOM" | "BTTM" | "BTM" => Some(HeadName::West),
            _ => None,
        }
    }

    /// Compass word: `SOUTH`, `NORTH`, `EAST`, `WEST`
    pub fn compass(&self) -> &'static str {
        match self {
            HeadName::South => "SOUTH",
            HeadName::North => "NORTH",
            HeadName::East => "EAST",
            HeadName::West => "WEST",
        }
    }

    /// Key token: `SOUTH-HEAD`
    pub fn token(&self) -> String {
        format!("{}-HEAD", self.compass())
    }
}

/// Resolve a head name from component type and location text
///
/// A literal compass head ("South Head") is authoritative. Only when no
/// compass head is named does the legacy Top/Bottom alias apply.
pub fn parse_head_name(component: &str, location: &str) -> Option<HeadName> {
    let combined = format!("{} {}", normalize(component), normalize(location));

    if let Some(captures) = COMPASS_HEAD.captures(&combined) {
        return HeadName::from_compass_word(&captures[1]);
    }

    legacy_head_alias(&combined)
}

fn legacy_head_alias(normalized: &str) -> Option<HeadName> {
    LEGACY_HEAD
        .captures(normalized)
        .and_then(|captures| HeadName::from_legacy_orientation(&captures[1]))
}

/// Identify which head a seam reference points at
///
/// Full compass words are checked before two-letter abbreviations so that
/// `SHELL` is never read as `SH` (South Head); the legacy Top/Bottom alias is
/// the last resort.
pub fn parse_seam_head_ref(component: &str, location: &str) -> Option<HeadName> {
    let combined = format!("{} {}", normalize(component), normalize(location));

    if let Some(captures) = COMPASS_WORD.captures(&combined) {
        return HeadName::from_compass_word(&captures[1]);
    }

    if let Some(captures) = COMPASS_ABBREVIATION.captures(&combined) {
        return HeadName::from_compass_word(&captures[1]);
    }

    LEGACY_WORD
        .captures(&combined)
        .and_then(|captures| HeadName::from_legacy_orientation(&captures[1]))
}
