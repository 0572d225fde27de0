use std::borrow::Cow;
use std::collections::HashSet;

use serde::Serialize;
use tracing::trace;

use super::catalog::{InstrumentCatalog, ids};
use super::types::{CeilingPeriod, Instrument};

// Catalog entries are borrowed; derived variants are owned.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Recommendation<'a> {
    items: Vec<Cow<'a, Instrument>>,
}

impl<'a> Recommendation<'a> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Instrument> {
        self.items.iter().map(|item| item.as_ref())
    }

    pub fn ids(&self) -> Vec<&str> {
        self.iter().map(|instrument| instrument.id.as_str()).collect()
    }

    pub fn into_owned(self) -> Vec<Instrument> {
        self.items.into_iter().map(Cow::into_owned).collect()
    }

    fn push(&mut self, item: Cow<'a, Instrument>) {
        self.items.push(item);
    }

    fn dedup_by_id(&mut self) {
        let mut seen = HashSet::new();
        self.items.retain(|item| seen.insert(item.id.clone()));
    }
}

pub fn suggest(catalog: &InstrumentCatalog, amount: f64) -> Recommendation<'_> {
    let mut result = Recommendation::default();
    if !amount.is_finite() || amount <= 0.0 {
        return result;
    }

    let fund = catalog.lookup(ids::MUTUAL_FUND).ok();
    let ppf = catalog.lookup(ids::PUBLIC_PROVIDENT_FUND).ok();
    let deposit = catalog.lookup(ids::FIXED_DEPOSIT).ok();

    if let Some(fund) = fund.filter(|i| i.meets_minimum(amount)) {
        result.push(Cow::Borrowed(fund));
    }
    if let Some(ppf) = ppf.filter(|i| i.within_bounds(amount)) {
        result.push(Cow::Borrowed(ppf));
    }
    if let Some(deposit) = deposit.filter(|i| i.meets_minimum(amount)) {
        result.push(Cow::Borrowed(deposit));
    }
    // The ceiling is annual while `amount` is a single sum; the variant keeps
    // that distinction visible instead of dropping the instrument.
    if let Some(ppf) = ppf.filter(|i| i.exceeds_ceiling(amount)) {
        result.push(Cow::Owned(annual_cap_variant(ppf)));
    }

    result.dedup_by_id();
    trace!(amount, suggestions = ?result.ids(), "suggested instruments");
    result
}

fn annual_cap_variant(base: &Instrument) -> Instrument {
    let name = match base.max_contribution {
        Some(max) => format!("{} (max ₹{} lakh/year)", base.name, max / 100_000.0),
        None => format!("{} (annual limit)", base.name),
    };
    Instrument {
        id: ids::PPF_ANNUAL_CAP.to_string(),
        name,
        ceiling_period: CeilingPeriod::Annual,
        ..base.clone()
    }
}
