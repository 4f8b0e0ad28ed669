//! Converts a monthly obligation into required weekly work hours under
//! a two-tier regular/overtime pay model.

use crate::errors::{PlannerError, Result};

const REGULAR_WEEKLY_HOURS: f64 = 40.0;
const OVERTIME_MULTIPLIER: f64 = 1.5;
const WEEKS_PER_MONTH: f64 = 4.0;

/// Validates the rate inputs before any arithmetic runs.
///
/// The solver itself is unchecked: a tax rate at or above 1.0 or a
/// non-positive hourly rate would flow straight into a division, so the
/// input boundary rejects them first.
pub fn validate_rates(hourly_rate: f64, tax_rate: f64) -> Result<()> {
    if !hourly_rate.is_finite() || hourly_rate <= 0.0 {
        return Err(PlannerError::InvalidInput(format!(
            "hourly rate must be a positive number, got {hourly_rate}"
        )));
    }
    if !tax_rate.is_finite() || tax_rate >= 1.0 {
        return Err(PlannerError::InvalidInput(format!(
            "tax rate must be below 1, got {tax_rate}"
        )));
    }
    Ok(())
}

/// Weekly work hours needed to clear `monthly_cost` after taxes.
///
/// Grosses the net obligation up by the flat `tax_rate`, spreads it
/// over a fixed four-week month, and converts to hours at
/// `hourly_rate`. Up to 40 hours the base rate applies; past that the
/// remaining income is earned at 1.5x the base rate.
///
/// Pure and unchecked; callers run [`validate_rates`] on user input
/// before reaching this function.
pub fn compute_weekly_hours(hourly_rate: f64, monthly_cost: f64, tax_rate: f64) -> f64 {
    let required_gross = monthly_cost / (1.0 - tax_rate);
    let weekly_income_needed = required_gross / WEEKS_PER_MONTH;
    let hours_at_base_rate = weekly_income_needed / hourly_rate;
    if hours_at_base_rate <= REGULAR_WEEKLY_HOURS {
        return hours_at_base_rate;
    }
    let overtime_income = weekly_income_needed - REGULAR_WEEKLY_HOURS * hourly_rate;
    let overtime_hours = overtime_income / (hourly_rate * OVERTIME_MULTIPLIER);
    REGULAR_WEEKLY_HOURS + overtime_hours
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-3,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn regular_time_regime() {
        // 1000 / (1 - 0.1876) / 4 / 30 = 10.2577...
        let hours = compute_weekly_hours(30.0, 1000.0, 0.1876);
        assert!(hours <= REGULAR_WEEKLY_HOURS);
        assert_close(hours, 10.2577);
    }

    #[test]
    fn overtime_regime() {
        // Weekly income needed is 923.19; 400 comes from the first 40
        // hours, the remaining 523.19 at 15/hour takes 34.879 more.
        let hours = compute_weekly_hours(10.0, 3000.0, 0.1876);
        assert!(hours > REGULAR_WEEKLY_HOURS);
        assert_close(hours, 74.8794);
    }

    #[test]
    fn exactly_forty_hours_stays_regular() {
        // 1600 net at a zero tax rate is 400/week: 40 hours at 10/hour.
        let hours = compute_weekly_hours(10.0, 1600.0, 0.0);
        assert_close(hours, 40.0);
    }

    #[test]
    fn zero_cost_needs_zero_hours() {
        assert_close(compute_weekly_hours(25.0, 0.0, 0.1876), 0.0);
    }

    #[test]
    fn rate_validation_rejects_bad_inputs() {
        assert!(validate_rates(30.0, 0.1876).is_ok());
        assert!(validate_rates(0.0, 0.1876).is_err());
        assert!(validate_rates(-5.0, 0.1876).is_err());
        assert!(validate_rates(30.0, 1.0).is_err());
        assert!(validate_rates(30.0, 1.5).is_err());
        assert!(validate_rates(f64::NAN, 0.2).is_err());
        assert!(validate_rates(30.0, f64::NAN).is_err());
    }
}
