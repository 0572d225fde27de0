use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionInput {
    pub target_amount: f64,
    pub years: u32,
    pub annual_rate_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthPoint {
    pub year: u32,
    pub compounded_value: f64,
    pub contributed_principal: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartHeights {
    pub year: u32,
    pub compounded_pct: f64,
    pub principal_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSummary {
    pub contribution: f64,
    pub total_contributed: f64,
    pub projected_value: f64,
    pub estimated_gain: f64,
    pub growth: Vec<GrowthPoint>,
}

impl PlanSummary {
    pub fn zeroed() -> Self {
        Self {
            contribution: 0.0,
            total_contributed: 0.0,
            projected_value: 0.0,
            estimated_gain: 0.0,
            growth: Vec::new(),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskLevel {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::VeryLow => "Very Low",
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::VeryHigh => "Very High",
        };
        f.write_str(label)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CeilingPeriod {
    PerContribution,
    Annual,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub provider: String,
    pub rate: String,
    pub risk: RiskLevel,
    pub reference_link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Instrument {
    pub id: String,
    pub name: String,
    pub min_contribution: f64,
    // `None` means no upper bound.
    pub max_contribution: Option<f64>,
    pub ceiling_period: CeilingPeriod,
    pub tenure: String,
    pub liquidity: String,
    pub tax_treatment: String,
    pub offers: Vec<Offer>,
}

impl Instrument {
    pub fn meets_minimum(&self, amount: f64) -> bool {
        amount >= self.min_contribution
    }

    pub fn within_bounds(&self, amount: f64) -> bool {
        self.meets_minimum(amount) && self.max_contribution.is_none_or(|max| amount <= max)
    }

    pub fn exceeds_ceiling(&self, amount: f64) -> bool {
        self.max_contribution.is_some_and(|max| amount > max)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    pub instrument_id: String,
    pub instrument_name: String,
    pub provider: String,
    pub rate: String,
    pub risk: RiskLevel,
    pub tenure: String,
    pub liquidity: String,
    pub tax_treatment: String,
    pub reference_link: String,
}
