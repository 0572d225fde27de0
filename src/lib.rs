pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod log;

pub use crate::core::{
    GrowthPoint, Instrument, InstrumentCatalog, PlanError, PlanSummary, ProjectionInput,
    Recommendation, plan, project_growth, solve_contribution,
};

pub fn suggest_instruments(amount: f64) -> Recommendation<'static> {
    crate::core::suggest(InstrumentCatalog::standard(), amount)
}

pub fn list_all_instruments() -> &'static [Instrument] {
    InstrumentCatalog::standard().list_all()
}

pub fn lookup_instrument(id: &str) -> crate::core::Result<&'static Instrument> {
    InstrumentCatalog::standard().lookup(id)
}
