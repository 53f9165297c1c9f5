//! Remaining life and inspection interval

use crate::app::models::RemainingLife;

/// Remaining life of a component corroding at `rate_ipy` inches per year
///
/// At or below the required thickness the outcome is `Critical`, whatever the
/// rate. With thickness in hand, a zero rate is `NotLimited` and a negative or
/// non-finite rate is `InvalidRate`.
pub fn remaining_life(actual: f64, required: f64, rate_ipy: f64) -> RemainingLife {
    let margin = actual - required;
    if margin <= 0.0 {
        return RemainingLife::Critical { shortfall: -margin };
    }

    if !rate_ipy.is_finite() || rate_ipy < 0.0 {
        return RemainingLife::InvalidRate { rate: rate_ipy };
    }
    if rate_ipy == 0.0 {
        return RemainingLife::NotLimited;
    }

    RemainingLife::Years {
        years: margin / rate_ipy,
    }
}

/// Next inspection interval: `min(life / safety_factor, code_max_years)`
///
/// A critical or undetermined life gives zero; an unlimited life gives the
/// code maximum.
pub fn next_inspection_interval(life: RemainingLife, safety_factor: f64, code_max_years: f64) -> f64 {
    match life {
        RemainingLife::Years { years } => (years / safety_factor).min(code_max_years),
        RemainingLife::Critical { .. } | RemainingLife::InvalidRate { .. } => 0.0,
        RemainingLife::NotLimited => code_max_years,
    }
}
