//! Capital recovery factor used to annualise up-front CAPEX.

/// Converts a present-value capital cost into an equal annual payment.
///
/// Returns `0.0` for a zero-year life or a non-finite rate, and `1 / years`
/// for a zero discount rate.
///
/// # Examples
///
/// ```
/// use solar_lcoe::cost::capital_recovery_factor;
///
/// assert_eq!(capital_recovery_factor(0.0, 20), 0.05);
/// assert_eq!(capital_recovery_factor(0.07, 0), 0.0);
/// ```
pub fn capital_recovery_factor(rate: f64, years: u32) -> f64 {
    if years == 0 || !rate.is_finite() {
        return 0.0;
    }
    let n = f64::from(years);
    if rate == 0.0 {
        return 1.0 / n;
    }

    let growth = (1.0 + rate).powf(n);
    let denominator = growth - 1.0;
    if denominator == 0.0 {
        return 0.0;
    }
    rate * growth / denominator
}
