use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    #[error("{field} must be a finite number > 0, got {value}")]
    InvalidInput { field: &'static str, value: f64 },

    #[error("growth at {annual_rate_percent}% over {years} years is beyond f64 range")]
    Overflow { years: u32, annual_rate_percent: f64 },

    #[error("unknown instrument: {0}")]
    NotFound(String),

    #[error("duplicate instrument identifier: {0}")]
    DuplicateInstrument(String),
}

pub type Result<T> = std::result::Result<T, PlanError>;

pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(PlanError::InvalidInput { field, value })
    }
}

pub(crate) fn require_years(years: u32) -> Result<u32> {
    if years == 0 {
        return Err(PlanError::InvalidInput {
            field: "years",
            value: 0.0,
        });
    }
    Ok(years)
}
