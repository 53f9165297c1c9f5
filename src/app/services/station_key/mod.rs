//! Station key resolution service
//!
//! Gives every reading a canonical identity that survives renumbering between
//! inspections. Each result carries the rule that produced it and a confidence,
//! which are part of the audit record rather than debug output.
//!
//! # Rule precedence
//!
//! First matching rule wins, there is no fallthrough once a rule matches:
//!
//! 1. Explicit slice + angle -> `SHELL-SLICE-{slice}-A{angle}` (high)
//! 2. Location text `{slice}-{angle}` -> same key shape (high)
//! 3. Inch offset tagged shell/head side -> `SEAM-{head}-{offset}`
//! 4. Feet offset on a shell -> `SHELL-{offset}` (high)
//! 5. Named head + clock position -> `{HEAD}-{position}` (high)
//! 6. Nozzle component or service -> `NOZZLE-{id}` (medium)
//! 7. Fallback -> `LOCATION-{text}` (low)

pub mod classifier;
pub mod resolver;
pub mod rules;

#[cfg(test)]
pub mod tests;

pub use classifier::classify;
pub use resolver::{find_mapping, resolve, resolve_all, resolve_with_correlation};
