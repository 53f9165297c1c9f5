//! Test fixtures for location correlation

use chrono::{DateTime, TimeZone, Utc};

use crate::app::models::{ExistingLocation, Location, Reading, ThicknessRecord, ThicknessUnit};

mod batch_tests;
mod matcher_tests;

pub fn inspection_date(year: i32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, 3, 15, 0, 0, 0).unwrap()
}

/// Existing shell location at a slice/angle, keyed by the given storage id
pub fn existing_shell(id: &str, cml: &str, slice: u32, angle: u32) -> ExistingLocation {
    ExistingLocation::new(id, Location::new(cml, "Shell", "").with_slice_angle(slice, angle))
}

pub fn existing_at(id: &str, location: Location) -> ExistingLocation {
    ExistingLocation::new(id, location)
}

pub fn reading(location: Location) -> Reading {
    Reading::new(location, 0.480, ThicknessUnit::Inches, inspection_date(2024)).unwrap()
}

pub fn shell_reading(cml: &str, slice: u32, angle: u32) -> Reading {
    reading(Location::new(cml, "Shell", "").with_slice_angle(slice, angle))
}

pub fn last_reading(thickness: f64, year: i32) -> ThicknessRecord {
    ThicknessRecord::new(thickness, inspection_date(year))
}
