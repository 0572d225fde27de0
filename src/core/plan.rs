use super::error::Result;
use super::projector::project_growth;
use super::solver::solve_contribution;
use super::types::{PlanSummary, ProjectionInput};

pub fn plan(input: ProjectionInput) -> Result<PlanSummary> {
    let contribution = solve_contribution(
        input.target_amount,
        input.years,
        input.annual_rate_percent,
    )?;
    let growth = project_growth(contribution, input.years, input.annual_rate_percent)?;

    let (total_contributed, projected_value) = growth
        .last()
        .map_or((0.0, 0.0), |p| (p.contributed_principal, p.compounded_value));

    Ok(PlanSummary {
        contribution,
        total_contributed,
        projected_value,
        estimated_gain: projected_value - total_contributed,
        growth,
    })
}
