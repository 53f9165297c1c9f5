//! Test fixtures for corrosion rate calculations

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::app::models::ThicknessRecord;
use crate::constants::corrosion::MILLIS_PER_YEAR;

mod life_tests;

/// Fixed reference date for reproducible tests
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2014, 6, 1, 0, 0, 0).unwrap()
}

/// Exactly `years` 365.25-day years after [`t0`]
pub fn years_after_t0(years: f64) -> DateTime<Utc> {
    t0() + Duration::milliseconds((MILLIS_PER_YEAR * years).round() as i64)
}

pub fn record(thickness: f64, date: DateTime<Utc>) -> ThicknessRecord {
    ThicknessRecord::new(thickness, date)
}
