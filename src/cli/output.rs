//! Output formatting helpers for CLI commands

use crate::extract::{EntityList, ExtractionSource, SwotItem};
use crate::ideas::BusinessIdea;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde_json::json;

const BAR_WIDTH: usize = 30;

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}

fn format_source(source: &ExtractionSource) -> String {
    match source {
        ExtractionSource::Matched { matcher } => {
            format!("Source: {} ({})", "matched".green(), matcher)
        }
        ExtractionSource::Synthesized { industry } => {
            format!("Source: {} ({} defaults)", "synthesized".yellow(), industry)
        }
    }
}

fn swot_table(items: &[SwotItem]) -> Table {
    let mut table = new_table(vec!["#", "Item"]);
    for (i, item) in items.iter().enumerate() {
        table.add_row(vec![Cell::new(i + 1), Cell::new(&item.text)]);
    }
    table
}

/// Format an extraction result as a table followed by its source.
pub fn format_entities_table(entities: &EntityList) -> String {
    let table = match entities {
        EntityList::Competitors(e) => {
            let mut table = new_table(vec![
                "Name", "Share", "Founded", "Revenue", "Strength", "Weakness",
            ]);
            for c in &e.items {
                table.add_row(vec![
                    Cell::new(&c.name),
                    Cell::new(format!("{:.0}%", c.market_share_percent)),
                    Cell::new(c.founded_year),
                    Cell::new(&c.annual_revenue),
                    Cell::new(&c.strength),
                    Cell::new(&c.weakness),
                ]);
            }
            table
        }
        EntityList::Financials(e) => {
            let mut table = new_table(vec!["Period", "Amount"]);
            for point in &e.items {
                table.add_row(vec![
                    Cell::new(&point.period),
                    Cell::new(format!("{:.2}", point.amount)),
                ]);
            }
            table
        }
        EntityList::MarketSegments(e) => {
            let mut table = new_table(vec!["Demographic", "Size", "Audience", "Growth"]);
            for s in &e.items {
                table.add_row(vec![
                    Cell::new(&s.demographic),
                    Cell::new(&s.size),
                    Cell::new(&s.audience),
                    Cell::new(&s.growth),
                ]);
            }
            table
        }
        EntityList::Strengths(e) | EntityList::Weaknesses(e) => swot_table(&e.items),
    };

    format!("{}\n{}", table, format_source(entities.source()))
}

/// Format an extraction result as JSON
pub fn format_entities_json(entities: &EntityList) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(entities)
}

/// Format ideas as a table
pub fn format_ideas_table(ideas: &[BusinessIdea]) -> String {
    let mut table = new_table(vec!["Name", "Description"]);
    for idea in ideas {
        table.add_row(vec![Cell::new(&idea.name), Cell::new(&idea.description)]);
    }
    table.to_string()
}

/// Format ideas as JSON
pub fn format_ideas_json(ideas: &[BusinessIdea]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({ "ideas": ideas }))
}

/// Render `[#####-----]  45%`.
pub fn format_progress_bar(percent: u8) -> String {
    let percent = percent.min(100);
    let filled = BAR_WIDTH * percent as usize / 100;
    format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        percent
    )
}
