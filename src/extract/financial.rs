//! Revenue figures from tables and prose.

use super::cascade::{Cascade, Matcher};
use super::industry::Industry;
use super::synth::{parse_amount, random_in};
use regex::{Captures, Regex};
use serde::Serialize;
use std::sync::LazyLock;

pub const FINANCIAL_CAP: usize = 5;

/// A dollar amount attached to a period label. `amount` is never negative.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialPoint {
    pub period: String,
    pub amount: f64,
}

/// `$1,200`, `$1.5M`, `$2 million`. Groups: number, magnitude.
const AMOUNT: &str = r"\$\s*(\d[\d,]*(?:\.\d+)?)\s*(k|m|b|thousand|million|billion)?\b";

static TABLE_ROW_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?im)^[ \t]*\|[ \t]*([^|\n]*?[a-z0-9][^|\n]*?)[ \t]*\|[ \t]*{AMOUNT}"
    ))
    .unwrap()
});

static LABELED_PERIOD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b(year\s*\d{{1,2}}|q[1-4](?:\s+(?:19|20)\d{{2}})?|month\s*\d{{1,2}}|(?:fy\s*)?(?:19|20)\d{{2}})\b[^$\n]{{0,60}}?{AMOUNT}"
    ))
    .unwrap()
});

static REVENUE_OF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\brevenues?\s+(?:of|reaching|to|at|totall?ing)\s+{AMOUNT}"
    ))
    .unwrap()
});

static BARE_AMOUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("(?i){AMOUNT}")).unwrap());

fn normalize_period(raw: &str) -> String {
    let joined = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    let lower = joined.to_ascii_lowercase();
    if lower.starts_with("fy") || lower.starts_with('q') {
        return joined.to_ascii_uppercase();
    }
    let mut chars = joined.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => joined,
    }
}

fn amount_from(caps: &Captures<'_>, number: usize) -> Option<f64> {
    let magnitude = caps.get(number + 1).map(|m| m.as_str());
    parse_amount(caps.get(number)?.as_str(), magnitude)
}

/// Markdown table rows whose first cell is a label and second a dollar amount.
struct TableRow;

impl Matcher<FinancialPoint> for TableRow {
    fn name(&self) -> &'static str {
        "table_row"
    }

    fn find(&self, text: &str) -> Vec<FinancialPoint> {
        TABLE_ROW_RE
            .captures_iter(text)
            .filter_map(|caps| {
                let period = normalize_period(caps.get(1)?.as_str().trim_matches('*'));
                let amount = amount_from(&caps, 2)?;
                Some(FinancialPoint { period, amount })
            })
            .collect()
    }
}

/// "Year 1 revenue: $120,000", "Q3 2025 ... $40K", "2026: $1.2M".
struct LabeledPeriod;

impl Matcher<FinancialPoint> for LabeledPeriod {
    fn name(&self) -> &'static str {
        "labeled_period"
    }

    fn find(&self, text: &str) -> Vec<FinancialPoint> {
        LABELED_PERIOD_RE
            .captures_iter(text)
            .filter_map(|caps| {
                let period = normalize_period(caps.get(1)?.as_str());
                let amount = amount_from(&caps, 2)?;
                Some(FinancialPoint { period, amount })
            })
            .collect()
    }
}

/// "revenue of $2M" without a period.
struct RevenueStatement;

impl Matcher<FinancialPoint> for RevenueStatement {
    fn name(&self) -> &'static str {
        "revenue_statement"
    }

    fn find(&self, text: &str) -> Vec<FinancialPoint> {
        numbered(REVENUE_OF_RE.captures_iter(text), "Projection")
    }
}

/// Any dollar amount.
struct BareAmount;

impl Matcher<FinancialPoint> for BareAmount {
    fn name(&self) -> &'static str {
        "bare_amount"
    }

    fn find(&self, text: &str) -> Vec<FinancialPoint> {
        numbered(BARE_AMOUNT_RE.captures_iter(text), "Figure")
    }
}

fn numbered<'t>(
    captures: impl Iterator<Item = Captures<'t>>,
    label: &str,
) -> Vec<FinancialPoint> {
    captures
        .filter_map(|caps| amount_from(&caps, 1))
        .enumerate()
        .map(|(i, amount)| FinancialPoint {
            period: format!("{label} {}", i + 1),
            amount,
        })
        .collect()
}

/// Five years of growing revenue from a random base.
fn synthesize(_industry: Industry) -> Vec<FinancialPoint> {
    let mut revenue = f64::from(random_in(50u32..=500)) * 1_000.0;
    let growth = 1.0 + f64::from(random_in(20u32..=60)) / 100.0;
    (1..=FINANCIAL_CAP)
        .map(|year| {
            let point = FinancialPoint {
                period: format!("Year {year}"),
                amount: revenue.round(),
            };
            revenue *= growth;
            point
        })
        .collect()
}

pub fn cascade() -> Cascade<FinancialPoint> {
    Cascade::new(
        vec![
            Box::new(TableRow),
            Box::new(LabeledPeriod),
            Box::new(RevenueStatement),
            Box::new(BareAmount),
        ],
        synthesize,
        FINANCIAL_CAP,
    )
}
