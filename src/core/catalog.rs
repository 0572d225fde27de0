use std::collections::HashSet;
use std::sync::LazyLock;

use super::error::{PlanError, Result};
use super::types::{CeilingPeriod, ComparisonRow, Instrument, Offer, RiskLevel};

pub mod ids {
    pub const MUTUAL_FUND: &str = "mutual-fund";
    pub const PUBLIC_PROVIDENT_FUND: &str = "ppf";
    pub const FIXED_DEPOSIT: &str = "fd";
    // Derived from the provident fund when an amount exceeds its ceiling.
    pub const PPF_ANNUAL_CAP: &str = "ppf-annual-cap";
}

static STANDARD: LazyLock<InstrumentCatalog> = LazyLock::new(|| InstrumentCatalog {
    instruments: vec![mutual_fund(), public_provident_fund(), fixed_deposit()],
});

#[derive(Debug, Clone, PartialEq)]
pub struct InstrumentCatalog {
    instruments: Vec<Instrument>,
}

impl InstrumentCatalog {
    pub fn standard() -> &'static InstrumentCatalog {
        &STANDARD
    }

    pub fn from_instruments(instruments: Vec<Instrument>) -> Result<Self> {
        let mut seen = HashSet::new();
        for instrument in &instruments {
            if !seen.insert(instrument.id.as_str()) {
                return Err(PlanError::DuplicateInstrument(instrument.id.clone()));
            }
        }
        Ok(Self { instruments })
    }

    pub fn list_all(&self) -> &[Instrument] {
        &self.instruments
    }

    pub fn lookup(&self, id: &str) -> Result<&Instrument> {
        self.instruments
            .iter()
            .find(|instrument| instrument.id == id)
            .ok_or_else(|| PlanError::NotFound(id.to_string()))
    }

    pub fn comparison_rows(&self) -> Vec<ComparisonRow> {
        self.instruments
            .iter()
            .flat_map(|instrument| {
                instrument.offers.iter().map(move |offer| ComparisonRow {
                    instrument_id: instrument.id.clone(),
                    instrument_name: instrument.name.clone(),
                    provider: offer.provider.clone(),
                    rate: offer.rate.clone(),
                    risk: offer.risk,
                    tenure: instrument.tenure.clone(),
                    liquidity: instrument.liquidity.clone(),
                    tax_treatment: instrument.tax_treatment.clone(),
                    reference_link: offer.reference_link.clone(),
                })
            })
            .collect()
    }
}

fn offer(provider: &str, rate: &str, risk: RiskLevel, reference_link: &str) -> Offer {
    Offer {
        provider: provider.to_string(),
        rate: rate.to_string(),
        risk,
        reference_link: reference_link.to_string(),
    }
}

fn public_provident_fund() -> Instrument {
    Instrument {
        id: ids::PUBLIC_PROVIDENT_FUND.to_string(),
        name: "PPF".to_string(),
        min_contribution: 500.0,
        max_contribution: Some(150_000.0),
        ceiling_period: CeilingPeriod::PerContribution,
        tenure: "15 years".to_string(),
        liquidity: "Low (15 years lock-in)".to_string(),
        tax_treatment: "EEE (tax-free)".to_string(),
        offers: vec![
            offer("SBI", "7.1%", RiskLevel::VeryLow, "https://onlinesbi.sbi"),
            offer(
                "PNB",
                "7.1%",
                RiskLevel::VeryLow,
                "https://www.pnbindia.in/procedure-to-open-ppf-account.html",
            ),
            offer(
                "HDFC",
                "7.1%",
                RiskLevel::VeryLow,
                "https://www.hdfcbank.com/personal/save/accounts/public-provident-fund-ppf",
            ),
        ],
    }
}

fn fixed_deposit() -> Instrument {
    Instrument {
        id: ids::FIXED_DEPOSIT.to_string(),
        name: "FD".to_string(),
        min_contribution: 1_000.0,
        max_contribution: None,
        ceiling_period: CeilingPeriod::PerContribution,
        tenure: "7 days–10 years".to_string(),
        liquidity: "Medium (premature penalty)".to_string(),
        tax_treatment: "Taxable (80C for tax-saver FD)".to_string(),
        offers: vec![
            offer(
                "SBI",
                "6.70% (1Y), 6.75% (3Y), 6.50% (5Y), 7.25% (special)",
                RiskLevel::VeryLow,
                "https://www.paisabazaar.com/fixed-deposit/sbi-fd-rates/",
            ),
            offer(
                "PNB",
                "6.80% (1Y), 6.75% (3Y), 6.25% (5Y), 7.10% (special)",
                RiskLevel::VeryLow,
                "https://www.pnbindia.in/Interest-Rates-Deposit.html",
            ),
            offer(
                "HDFC",
                "6.60% (1Y), 6.90% (3Y), 6.75% (5Y), 7.05% (special)",
                RiskLevel::VeryLow,
                "https://www.hdfcbank.com/personal/save/deposits/fixed-deposit",
            ),
        ],
    }
}

fn mutual_fund() -> Instrument {
    Instrument {
        id: ids::MUTUAL_FUND.to_string(),
        name: "Mutual Fund".to_string(),
        min_contribution: 100.0,
        max_contribution: None,
        ceiling_period: CeilingPeriod::PerContribution,
        tenure: "Flexible".to_string(),
        liquidity: "High (can redeem anytime)".to_string(),
        tax_treatment: "Taxable (ELSS under 80C)".to_string(),
        offers: vec![
            offer(
                "SBI",
                "SBI Contra Fund: 36.7% (5Y)",
                RiskLevel::VeryHigh,
                "https://www.sbimf.com",
            ),
            offer(
                "PNB",
                "PNB Principal Emerging Bluechip: 13.4% (5Y)",
                RiskLevel::High,
                "https://www.pnbindia.in/mutual-fund.html",
            ),
            offer(
                "HDFC",
                "HDFC Flexi Cap Fund: ~18-20% (5Y)",
                RiskLevel::VeryHigh,
                "https://www.hdfcfund.com",
            ),
        ],
    }
}
