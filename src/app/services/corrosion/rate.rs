//! Corrosion rate between two readings

use crate::app::models::{
    CorrosionRateResult, GoverningRate, RateBasis, RateUnit, ThicknessRecord,
};
use crate::constants::corrosion::{MILLIS_PER_YEAR, RATE_DECIMALS};

use super::CorrosionCalculator;

impl CorrosionCalculator {
    /// Corrosion rate from `previous` to `current`
    ///
    /// Elapsed time is measured in 365.25-day years. The result is invalid when
    /// either thickness is not a finite number, when the interval is shorter
    /// than the configured minimum, or when the current reading is thicker than
    /// the previous one. A valid rate above the anomaly
    /// threshold stays valid but carries a warning.
    pub fn rate(
        &self,
        previous: &ThicknessRecord,
        current: &ThicknessRecord,
        unit: RateUnit,
    ) -> CorrosionRateResult {
        let thickness_loss = previous.thickness - current.thickness;
        let elapsed_ms = (current.date - previous.date).num_milliseconds() as f64;
        let time_span_years = elapsed_ms / MILLIS_PER_YEAR;

        let invalid = |warning: String| CorrosionRateResult {
            thickness_loss,
            time_span_years,
            rate: None,
            unit,
            is_valid: false,
            warning: Some(warning),
        };

        if !previous.thickness.is_finite() || !current.thickness.is_finite() {
            return invalid(format!(
                "Non-finite thickness in readings: previous {}, current {}",
                previous.thickness, current.thickness
            ));
        }

        if time_span_years < self.config.min_time_span_years {
            return invalid(format!(
                "Time span too short: {:.3} years between readings (minimum {} years)",
                time_span_years, self.config.min_time_span_years
            ));
        }

        if thickness_loss < 0.0 {
            return invalid(format!(
                "Negative thickness loss ({:.4} in): current reading is thicker than previous, \
                 possible measurement error or repair",
                thickness_loss
            ));
        }

        let rate = round_to(
            unit.from_inches_per_year(thickness_loss / time_span_years),
            RATE_DECIMALS,
        );

        let threshold = match unit {
            RateUnit::MilsPerYear => self.config.anomaly_threshold_mpy,
            RateUnit::InchesPerYear => self.config.anomaly_threshold_ipy,
        };
        let warning = (rate > threshold).then(|| {
            format!(
                "Corrosion rate {} {} exceeds anomaly threshold {} {}; verify readings",
                rate, unit, threshold, unit
            )
        });

        CorrosionRateResult {
            thickness_loss,
            time_span_years,
            rate: Some(rate),
            unit,
            is_valid: true,
            warning,
        }
    }
}

/// Pick the governing rate from a long-term and a short-term rate
///
/// The larger valid rate governs. An invalid input is skipped with a warning;
/// with no valid input the result carries no rate.
pub fn governing_rate(
    long_term: &CorrosionRateResult,
    short_term: &CorrosionRateResult,
) -> GoverningRate {
    let mut warnings = Vec::new();
    let mut valid = Vec::with_capacity(2);

    for (basis, result) in [
        (RateBasis::LongTerm, long_term),
        (RateBasis::ShortTerm, short_term),
    ] {
        match result.rate_inches_per_year().filter(|_| result.is_valid) {
            Some(rate) => valid.push((basis, rate)),
            None => warnings.push(format!(
                "{} rate ignored: {}",
                match basis {
                    RateBasis::LongTerm => "Long-term",
                    RateBasis::ShortTerm => "Short-term",
                },
                result.warning.as_deref().unwrap_or("invalid rate")
            )),
        }
    }

    // Long-term wins ties
    let governing = valid
        .into_iter()
        .reduce(|best, next| if next.1 > best.1 { next } else { best });

    GoverningRate {
        rate_ipy: governing.map(|(_, rate)| rate),
        basis: governing.map(|(basis, _)| basis),
        warnings,
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
