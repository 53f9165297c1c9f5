//! Component-group classification
//!
//! Maps arbitrary component-type text onto the closed set of vessel zones.
//! Rule order is fixed: nozzle, shell, compass heads, legacy orientation
//! alias, then everything else (including a bare "Head") is `OTHER`.

use crate::app::models::ComponentGroup;
use crate::app::services::location_parser::normalize;
use regex::Regex;
use std::sync::LazyLock;

static NOZZLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bNOZZLE|\bNOZ\b|\bNZL\b|^N-?\d+[A-Z]?\b").expect("nozzle pattern is valid")
});

static SHELL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"SHELL|\bCYL(INDER|INDRICAL)?\b").expect("shell pattern is valid"));

static LEGACY_TOP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bTOP\b").expect("top pattern is valid"));

static LEGACY_BOTTOM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(BOTTOM|BTTM|BTM)\b").expect("bottom pattern is valid"));

/// Classify component-type text into a vessel zone
///
/// Head identity as written is authoritative: "South Head" is always
/// `SOUTHHEAD`, never merged with another compass point. A bare "Head" is
/// ambiguous and classified `OTHER` rather than guessed.
pub fn classify(component_type: &str) -> ComponentGroup {
    let text = normalize(component_type);
    if text.is_empty() {
        return ComponentGroup::Other;
    }

    // Nozzles first: tags like "N2 SH" must not fall through to the shell rule
    if NOZZLE.is_match(&text) {
        return ComponentGroup::Nozzle;
    }

    if SHELL.is_match(&text) {
        return ComponentGroup::Shell;
    }

    if let Some(group) = compass_head(&text) {
        return group;
    }

    if let Some(group) = legacy_orientation_head(&text) {
        return group;
    }

    ComponentGroup::Other
}

/// Compass head by literal substring
fn compass_head(text: &str) -> Option<ComponentGroup> {
    if text.contains("SOUTH") {
        Some(ComponentGroup::SouthHead)
    } else if text.contains("NORTH") {
        Some(ComponentGroup::NorthHead)
    } else if text.contains("EAST") {
        Some(ComponentGroup::EastHead)
    } else if text.contains("WEST") {
        Some(ComponentGroup::WestHead)
    } else {
        None
    }
}

/// Legacy Top/Bottom alias, only reached when no compass word is present
fn legacy_orientation_head(text: &str) -> Option<ComponentGroup> {
    if LEGACY_TOP.is_match(text) {
        Some(ComponentGroup::EastHead)
    } else if LEGACY_BOTTOM.is_match(text) {
        Some(ComponentGroup::WestHead)
    } else {
        None
    }
}
