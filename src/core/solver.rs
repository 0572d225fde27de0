use tracing::trace;

use super::error::{PlanError, Result, require_positive, require_years};

pub const MONTHS_PER_YEAR: u32 = 12;

pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 100.0 / f64::from(MONTHS_PER_YEAR)
}

// Future value of `months` unit contributions paid at the start of each period.
// Not finite once (1+i)^n leaves the f64 range.
pub fn annuity_due_factor(rate: f64, months: u32) -> f64 {
    let n = f64::from(months);
    if rate == 0.0 {
        return n;
    }
    // expm1/ln_1p keep (1+i)^n - 1 accurate when i is tiny.
    let growth = (n * rate.ln_1p()).exp_m1();
    growth * (1.0 + rate) / rate
}

pub fn solve_contribution(
    target_amount: f64,
    years: u32,
    annual_rate_percent: f64,
) -> Result<f64> {
    let target_amount = require_positive("targetAmount", target_amount)?;
    let years = require_years(years)?;
    let annual_rate_percent = require_positive("annualRatePercent", annual_rate_percent)?;

    let months = years.saturating_mul(MONTHS_PER_YEAR);
    let factor = annuity_due_factor(monthly_rate(annual_rate_percent), months);
    let contribution = target_amount / factor;
    if !factor.is_finite() || !contribution.is_normal() {
        return Err(PlanError::Overflow {
            years,
            annual_rate_percent,
        });
    }
    trace!(
        target_amount,
        years,
        annual_rate_percent,
        contribution,
        "solved contribution"
    );
    Ok(contribution)
}
