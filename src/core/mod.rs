mod catalog;
mod error;
mod plan;
mod projector;
mod recommend;
mod solver;
mod types;

pub use catalog::{InstrumentCatalog, ids};
pub use error::{PlanError, Result};
pub use plan::plan;
pub use projector::{GrowthSeries, normalized_heights, project_growth};
pub use recommend::{Recommendation, suggest};
pub use solver::{MONTHS_PER_YEAR, annuity_due_factor, monthly_rate, solve_contribution};
pub use types::{
    CeilingPeriod, ChartHeights, ComparisonRow, GrowthPoint, Instrument, Offer, PlanSummary,
    ProjectionInput, RiskLevel,
};
