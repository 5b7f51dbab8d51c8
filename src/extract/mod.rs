//! Heuristic business-entity extraction.
//!
//! Each entity kind runs a [`Cascade`] of regex matchers, most specific
//! first. The first matcher that finds anything wins; when none does, the
//! result is synthesized from seed data for the industry sniffed from the
//! text. Extraction is total: every input, including the empty string,
//! yields a non-empty list no longer than the kind's cap.

pub mod cascade;
pub mod competitor;
pub mod financial;
pub mod industry;
pub mod market;
pub mod swot;
mod synth;

pub use cascade::{Cascade, Extraction, ExtractionSource, Matcher};
pub use competitor::{Competitor, COMPETITOR_CAP};
pub use financial::{FinancialPoint, FINANCIAL_CAP};
pub use industry::{classify_industry, Industry};
pub use market::{MarketSegment, SEGMENT_CAP};
pub use swot::{Quadrant, SwotItem, SWOT_CAP};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Competitors,
    Financials,
    MarketSegments,
    Strengths,
    Weaknesses,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Competitors,
        EntityKind::Financials,
        EntityKind::MarketSegments,
        EntityKind::Strengths,
        EntityKind::Weaknesses,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Competitors => "competitors",
            EntityKind::Financials => "financials",
            EntityKind::MarketSegments => "market_segments",
            EntityKind::Strengths => "strengths",
            EntityKind::Weaknesses => "weaknesses",
        }
    }

    /// Upper bound on the number of entities returned.
    pub fn cap(&self) -> usize {
        match self {
            EntityKind::Competitors => COMPETITOR_CAP,
            EntityKind::Financials => FINANCIAL_CAP,
            EntityKind::MarketSegments => SEGMENT_CAP,
            EntityKind::Strengths | EntityKind::Weaknesses => SWOT_CAP,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "competitors" | "competitor" => Ok(EntityKind::Competitors),
            "financials" | "financial" => Ok(EntityKind::Financials),
            "market_segments" | "segments" | "market" => Ok(EntityKind::MarketSegments),
            "strengths" => Ok(EntityKind::Strengths),
            "weaknesses" => Ok(EntityKind::Weaknesses),
            other => Err(format!(
                "unknown entity kind '{other}' (expected competitors, financials, \
                 market_segments, strengths or weaknesses)"
            )),
        }
    }
}

/// Extraction result for one [`EntityKind`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityList {
    Competitors(Extraction<Competitor>),
    Financials(Extraction<FinancialPoint>),
    MarketSegments(Extraction<MarketSegment>),
    Strengths(Extraction<SwotItem>),
    Weaknesses(Extraction<SwotItem>),
}

impl EntityList {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityList::Competitors(_) => EntityKind::Competitors,
            EntityList::Financials(_) => EntityKind::Financials,
            EntityList::MarketSegments(_) => EntityKind::MarketSegments,
            EntityList::Strengths(_) => EntityKind::Strengths,
            EntityList::Weaknesses(_) => EntityKind::Weaknesses,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            EntityList::Competitors(e) => e.len(),
            EntityList::Financials(e) => e.len(),
            EntityList::MarketSegments(e) => e.len(),
            EntityList::Strengths(e) | EntityList::Weaknesses(e) => e.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn source(&self) -> &ExtractionSource {
        match self {
            EntityList::Competitors(e) => &e.source,
            EntityList::Financials(e) => &e.source,
            EntityList::MarketSegments(e) => &e.source,
            EntityList::Strengths(e) | EntityList::Weaknesses(e) => &e.source,
        }
    }
}

pub fn extract_competitors(text: &str) -> Extraction<Competitor> {
    let industry = classify_industry(text);
    competitor::cascade(industry).run(text, industry)
}

pub fn extract_financials(text: &str) -> Extraction<FinancialPoint> {
    financial::cascade().run(text, classify_industry(text))
}

pub fn extract_market_segments(text: &str) -> Extraction<MarketSegment> {
    market::cascade().run(text, classify_industry(text))
}

pub fn extract_swot(quadrant: Quadrant, text: &str) -> Extraction<SwotItem> {
    swot::cascade(quadrant).run(text, classify_industry(text))
}

/// Extract entities of `kind` from free text. Never fails and never returns
/// an empty list.
pub fn extract_entities(kind: EntityKind, text: &str) -> EntityList {
    let list = match kind {
        EntityKind::Competitors => EntityList::Competitors(extract_competitors(text)),
        EntityKind::Financials => EntityList::Financials(extract_financials(text)),
        EntityKind::MarketSegments => EntityList::MarketSegments(extract_market_segments(text)),
        EntityKind::Strengths => EntityList::Strengths(extract_swot(Quadrant::Strengths, text)),
        EntityKind::Weaknesses => EntityList::Weaknesses(extract_swot(Quadrant::Weaknesses, text)),
    };

    metrics::counter!(
        "plancraft_extractions_total",
        "kind" => kind.as_str(),
        "source" => list.source().label(),
    )
    .increment(1);

    list
}
