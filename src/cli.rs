use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::core::{
    CeilingPeriod, ComparisonRow, Instrument, PlanSummary, ProjectionInput, Recommendation,
    RiskLevel,
};

pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn amount_cell(amount: f64) -> Cell {
    Cell::new(format_inr(amount)).set_alignment(CellAlignment::Right)
}

fn risk_cell(risk: RiskLevel) -> Cell {
    let color = match risk {
        RiskLevel::VeryLow | RiskLevel::Low => Color::Green,
        RiskLevel::Medium => Color::Yellow,
        RiskLevel::High | RiskLevel::VeryHigh => Color::Red,
    };
    Cell::new(risk.to_string()).fg(color)
}

/// Rupee amount with Indian digit grouping and at most two decimals,
/// e.g. `₹1,00,00,000` or `₹10,008.53`.
pub fn format_inr(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("₹{amount}");
    }
    let sign = if amount < 0.0 { "-" } else { "" };
    let text = format!("{:.2}", amount.abs());
    let (whole, frac) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let frac = frac.trim_end_matches('0');

    let grouped = group_indian(whole);
    if frac.is_empty() {
        format!("{sign}₹{grouped}")
    } else {
        format!("{sign}₹{grouped}.{frac}")
    }
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (mut head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    while head.len() > 2 {
        let (rest, pair) = head.split_at(head.len() - 2);
        groups.push(pair);
        head = rest;
    }
    groups.push(head);
    groups.reverse();
    format!("{},{tail}", groups.join(","))
}

fn plan_table(summary: &PlanSummary) -> Table {
    let mut table = new_styled_table();
    table.set_header(vec![
        header_cell("Year"),
        header_cell("Total investment"),
        header_cell("Projected value"),
    ]);
    for point in summary.growth.iter().skip(1) {
        table.add_row(vec![
            Cell::new(point.year).set_alignment(CellAlignment::Right),
            amount_cell(point.contributed_principal),
            amount_cell(point.compounded_value),
        ]);
    }
    table
}

pub fn render_plan(input: &ProjectionInput, summary: &PlanSummary) -> String {
    format!(
        "To reach {} in {} years at {}% a year you'll need to invest {}/month\n\
         Total invested {}, estimated gain {}\n{table}",
        format_inr(input.target_amount),
        input.years,
        input.annual_rate_percent,
        format_inr(summary.contribution),
        format_inr(summary.total_contributed),
        format_inr(summary.estimated_gain),
        table = plan_table(summary),
    )
}

fn bounds_label(instrument: &Instrument) -> String {
    let min = format_inr(instrument.min_contribution);
    match (instrument.max_contribution, instrument.ceiling_period) {
        (None, _) => format!("from {min}"),
        (Some(max), CeilingPeriod::PerContribution) => format!("{min} – {}", format_inr(max)),
        (Some(max), CeilingPeriod::Annual) => format!("{min} – {} per year", format_inr(max)),
    }
}

pub fn render_suggestions(amount: f64, recommendation: &Recommendation<'_>) -> String {
    if recommendation.is_empty() {
        return format!(
            "Suggestions for {}\nNo products available for this amount.",
            format_inr(amount)
        );
    }

    let mut out = format!("Suggestions for {}\n", format_inr(amount));
    for instrument in recommendation.iter() {
        let mut table = new_styled_table();
        table.set_header(vec![
            header_cell(&instrument.name),
            header_cell("Rate"),
            header_cell("Risk"),
            header_cell("Link"),
        ]);
        for offer in &instrument.offers {
            table.add_row(vec![
                Cell::new(&offer.provider).add_attribute(Attribute::Bold),
                Cell::new(&offer.rate).fg(Color::Green),
                risk_cell(offer.risk),
                Cell::new(&offer.reference_link),
            ]);
        }
        out.push_str(&format!(
            "\nTenure: {} | Liquidity: {} | Tax Benefit: {} | Eligible: {}\n{table}\n",
            instrument.tenure,
            instrument.liquidity,
            instrument.tax_treatment,
            bounds_label(instrument),
        ));
    }
    out
}

fn comparison_table(rows: &[ComparisonRow]) -> Table {
    let mut table = new_styled_table();
    table.set_header(vec![
        header_cell("Product"),
        header_cell("Bank"),
        header_cell("Rate"),
        header_cell("Risk"),
        header_cell("Tenure"),
        header_cell("Liquidity"),
        header_cell("Tax Benefit"),
        header_cell("Link"),
    ]);
    for row in rows {
        table.add_row(vec![
            Cell::new(&row.instrument_name),
            Cell::new(&row.provider),
            Cell::new(&row.rate),
            risk_cell(row.risk),
            Cell::new(&row.tenure),
            Cell::new(&row.liquidity),
            Cell::new(&row.tax_treatment),
            Cell::new(&row.reference_link),
        ]);
    }
    table
}

pub fn render_comparison(rows: &[ComparisonRow]) -> String {
    comparison_table(rows).to_string()
}
