use std::iter::FusedIterator;

use super::error::{PlanError, Result, require_positive, require_years};
use super::solver::{MONTHS_PER_YEAR, annuity_due_factor, monthly_rate};
use super::types::{ChartHeights, GrowthPoint};

#[derive(Debug, Clone)]
pub struct GrowthSeries {
    contribution: f64,
    rate: f64,
    next_year: u64,
    years: u32,
    floor: GrowthPoint,
}

impl GrowthSeries {
    pub fn new(contribution: f64, years: u32, annual_rate_percent: f64) -> Result<Self> {
        let contribution = require_positive("contribution", contribution)?;
        let years = require_years(years)?;
        let annual_rate_percent = require_positive("annualRatePercent", annual_rate_percent)?;

        // Both fields grow with the year, so a finite final point bounds the series.
        let rate = monthly_rate(annual_rate_percent);
        let months = years.saturating_mul(MONTHS_PER_YEAR);
        let final_value = contribution * annuity_due_factor(rate, months);
        let final_principal = contribution * f64::from(months);
        if !final_value.is_finite() || !final_principal.is_finite() {
            return Err(PlanError::Overflow {
                years,
                annual_rate_percent,
            });
        }

        Ok(Self {
            contribution,
            rate,
            next_year: 0,
            years,
            floor: GrowthPoint {
                year: 0,
                compounded_value: 0.0,
                contributed_principal: 0.0,
            },
        })
    }

    fn point_at(&self, year: u32) -> GrowthPoint {
        let months = year.saturating_mul(MONTHS_PER_YEAR);
        let contributed_principal = self.contribution * f64::from(months);
        let compounded_value = self.contribution * annuity_due_factor(self.rate, months);

        // Rounding must never let a later point fall below an earlier one, nor the
        // compounded value dip under what was paid in.
        GrowthPoint {
            year,
            compounded_value: compounded_value
                .max(contributed_principal)
                .max(self.floor.compounded_value),
            contributed_principal: contributed_principal.max(self.floor.contributed_principal),
        }
    }
}

impl Iterator for GrowthSeries {
    type Item = GrowthPoint;

    fn next(&mut self) -> Option<GrowthPoint> {
        if self.next_year > u64::from(self.years) {
            return None;
        }
        let point = self.point_at(self.next_year as u32);
        self.floor = point;
        self.next_year += 1;
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (u64::from(self.years) + 1).saturating_sub(self.next_year) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GrowthSeries {}

impl FusedIterator for GrowthSeries {}

pub fn project_growth(
    contribution: f64,
    years: u32,
    annual_rate_percent: f64,
) -> Result<Vec<GrowthPoint>> {
    Ok(GrowthSeries::new(contribution, years, annual_rate_percent)?.collect())
}

pub fn normalized_heights(series: &[GrowthPoint]) -> Vec<ChartHeights> {
    let baseline = series.last().map_or(0.0, |p| p.compounded_value);
    let pct = |value: f64| {
        if baseline.is_finite() && baseline > 0.0 && value.is_finite() {
            (value / baseline * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        }
    };

    series
        .iter()
        .map(|p| ChartHeights {
            year: p.year,
            compounded_pct: pct(p.compounded_value),
            principal_pct: pct(p.contributed_principal),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::PlanError;
    use crate::core::solver::solve_contribution;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn assert_series_invariants(series: &[GrowthPoint]) {
        let first = series.first().expect("series is never empty");
        assert_eq!(first.year, 0);
        assert_eq!(first.compounded_value, 0.0);
        assert_eq!(first.contributed_principal, 0.0);

        for pair in series.windows(2) {
            assert_eq!(pair[1].year, pair[0].year + 1);
            assert!(pair[1].compounded_value >= pair[0].compounded_value);
            assert!(pair[1].contributed_principal >= pair[0].contributed_principal);
        }
        for point in series {
            assert!(point.compounded_value >= point.contributed_principal);
        }
    }

    #[test]
    fn project_growth_first_year_at_twelve_percent() {
        let series = project_growth(1_000.0, 1, 12.0).expect("valid inputs");
        assert_eq!(series.len(), 2);
        assert_approx(series[1].contributed_principal, 12_000.0);
        assert_approx(series[1].compounded_value, 12_809.328_043_328_94);
    }

    #[test]
    fn project_growth_reaches_solved_target() {
        let monthly = solve_contribution(10_000_000.0, 20, 12.0).expect("valid inputs");
        let series = project_growth(monthly, 20, 12.0).expect("valid inputs");

        assert_eq!(series.len(), 21);
        assert_series_invariants(&series);
        let last = series.last().expect("non-empty");
        assert!((last.compounded_value - 10_000_000.0).abs() / 10_000_000.0 < 1e-9);
    }

    #[test]
    fn project_growth_rejects_invalid_inputs() {
        assert!(matches!(
            project_growth(0.0, 10, 8.0),
            Err(PlanError::InvalidInput {
                field: "contribution",
                ..
            })
        ));
        assert!(project_growth(100.0, 0, 8.0).is_err());
        assert!(project_growth(100.0, 10, -2.0).is_err());
        assert!(project_growth(f64::NAN, 10, 8.0).is_err());
    }

    #[test]
    fn growth_series_underflowing_rate_is_flat() {
        let series = project_growth(50.0, 3, f64::from_bits(1)).expect("valid inputs");
        assert_series_invariants(&series);
        for point in &series {
            assert_eq!(point.compounded_value, point.contributed_principal);
        }
        assert_approx(series[3].contributed_principal, 1_800.0);
    }

    #[test]
    fn growth_series_is_restartable_and_exact_size() {
        let series = GrowthSeries::new(250.0, 5, 7.5).expect("valid inputs");
        assert_eq!(series.len(), 6);

        let first_pass: Vec<_> = series.clone().collect();
        let second_pass: Vec<_> = series.collect();
        assert_eq!(first_pass, second_pass);
    }

    #[test]
    fn growth_series_size_hint_shrinks_as_consumed() {
        let mut series = GrowthSeries::new(250.0, 2, 7.5).expect("valid inputs");
        series.next();
        assert_eq!(series.len(), 2);
        series.next();
        series.next();
        assert_eq!(series.len(), 0);
        assert!(series.next().is_none());
    }

    #[test]
    fn normalized_heights_use_final_point_as_baseline() {
        let series = project_growth(1_000.0, 10, 10.0).expect("valid inputs");
        let heights = normalized_heights(&series);

        assert_eq!(heights.len(), series.len());
        assert_approx(heights[0].compounded_pct, 0.0);
        assert_approx(heights[10].compounded_pct, 100.0);
        for h in &heights {
            assert!((0.0..=100.0).contains(&h.compounded_pct));
            assert!(h.principal_pct <= h.compounded_pct + EPS);
        }
    }

    #[test]
    fn normalized_heights_of_empty_series_is_empty() {
        assert!(normalized_heights(&[]).is_empty());
    }

    #[test]
    fn normalized_heights_never_emit_nan() {
        let series = [
            GrowthPoint {
                year: 0,
                compounded_value: 0.0,
                contributed_principal: 0.0,
            },
            GrowthPoint {
                year: 1,
                compounded_value: f64::INFINITY,
                contributed_principal: 12.0,
            },
        ];
        for h in normalized_heights(&series) {
            assert_eq!(h.compounded_pct, 0.0);
            assert_eq!(h.principal_pct, 0.0);
        }
    }

    #[test]
    fn project_growth_reports_overflow_instead_of_infinity() {
        let err = project_growth(1_000.0, 100, 1_000.0).expect_err("final point overflows");
        assert_eq!(
            err,
            PlanError::Overflow {
                years: 100,
                annual_rate_percent: 1_000.0
            }
        );
        assert!(matches!(
            project_growth(f64::MAX, 1, 12.0),
            Err(PlanError::Overflow { years: 1, .. })
        ));
    }

    #[test]
    fn project_growth_at_widest_bounded_inputs_is_finite() {
        let series = project_growth(1_000.0, 100, 100.0).expect("valid inputs");
        assert_series_invariants(&series);
        let json = serde_json::to_string(&series).expect("series serializes");
        assert!(!json.contains("null"));
        for h in normalized_heights(&series) {
            assert!((0.0..=100.0).contains(&h.compounded_pct));
            assert!((0.0..=100.0).contains(&h.principal_pct));
        }
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_solve_then_project_hits_target(
            target in 1_000u32..100_000_000,
            years in 1u32..=100,
            rate_bp in 1u32..10_001
        ) {
            let target = f64::from(target);
            let rate = f64::from(rate_bp) / 100.0;
            let monthly = solve_contribution(target, years, rate).expect("valid inputs");
            let series = project_growth(monthly, years, rate).expect("valid inputs");

            prop_assert_eq!(series.len(), years as usize + 1);
            let last = series.last().expect("non-empty");
            prop_assert!((last.compounded_value - target).abs() / target <= 1e-6);
        }

        #[test]
        fn prop_extreme_rates_stay_finite_or_overflow(
            contribution_cents in 1u32..10_000_000,
            years in 1u32..=100,
            rate_bp in 10_000u32..500_000
        ) {
            let contribution = f64::from(contribution_cents) / 100.0;
            let rate = f64::from(rate_bp) / 100.0;
            match project_growth(contribution, years, rate) {
                Ok(series) => {
                    for point in &series {
                        prop_assert!(point.compounded_value.is_finite());
                    }
                    for h in normalized_heights(&series) {
                        prop_assert!((0.0..=100.0).contains(&h.compounded_pct));
                    }
                }
                Err(err) => {
                    let is_overflow = matches!(err, PlanError::Overflow { .. });
                    prop_assert!(is_overflow);
                }
            }
        }

        #[test]
        fn prop_series_is_monotonic_and_final_point_is_max(
            contribution_cents in 1u32..10_000_000,
            years in 1u32..=100,
            rate_bp in 1u32..10_001
        ) {
            let contribution = f64::from(contribution_cents) / 100.0;
            let rate = f64::from(rate_bp) / 100.0;
            let series = project_growth(contribution, years, rate).expect("valid inputs");

            assert_series_invariants(&series);
            let last = series.last().expect("non-empty");
            for point in &series {
                prop_assert!(point.compounded_value <= last.compounded_value);
                prop_assert!(point.contributed_principal <= last.compounded_value);
            }
        }
    }
}
