//! Static section table.

use serde::{Deserialize, Serialize};

/// Identifier of one document section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKey {
    ExecutiveSummary,
    MarketAnalysis,
    CompetitiveAnalysis,
    SwotAnalysis,
    MarketingStrategy,
    FinancialProjections,
    ImplementationTimeline,
}

impl SectionKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKey::ExecutiveSummary => "executive_summary",
            SectionKey::MarketAnalysis => "market_analysis",
            SectionKey::CompetitiveAnalysis => "competitive_analysis",
            SectionKey::SwotAnalysis => "swot_analysis",
            SectionKey::MarketingStrategy => "marketing_strategy",
            SectionKey::FinancialProjections => "financial_projections",
            SectionKey::ImplementationTimeline => "implementation_timeline",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SectionKey::ExecutiveSummary => "Executive Summary",
            SectionKey::MarketAnalysis => "Market Analysis",
            SectionKey::CompetitiveAnalysis => "Competitive Analysis",
            SectionKey::SwotAnalysis => "SWOT Analysis",
            SectionKey::MarketingStrategy => "Marketing Strategy",
            SectionKey::FinancialProjections => "Financial Projections",
            SectionKey::ImplementationTimeline => "Implementation Timeline",
        }
    }

    /// Output token budget. Market and financial sections need the most room.
    pub const fn token_budget(&self) -> u32 {
        match self {
            SectionKey::ExecutiveSummary => 1000,
            SectionKey::MarketAnalysis => 2000,
            SectionKey::CompetitiveAnalysis => 1800,
            SectionKey::SwotAnalysis => 1500,
            SectionKey::MarketingStrategy => 1500,
            SectionKey::FinancialProjections => 2000,
            SectionKey::ImplementationTimeline => 1200,
        }
    }

    /// Sections on the simple allow-list always run on the cheaper tier.
    pub const fn is_simple(&self) -> bool {
        matches!(self, SectionKey::ExecutiveSummary | SectionKey::SwotAnalysis)
    }
}

impl std::fmt::Display for SectionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static description of one section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpec {
    pub key: SectionKey,
    pub display_name: &'static str,
    pub prompt_template_id: &'static str,
    pub max_output_tokens: u32,
    /// Must reach the live service first; also pins the cheaper tier.
    pub force_live_generation: bool,
}

const fn spec(key: SectionKey, display_name: &'static str, template: &'static str) -> SectionSpec {
    SectionSpec {
        key,
        display_name,
        prompt_template_id: template,
        max_output_tokens: key.token_budget(),
        force_live_generation: false,
    }
}

static SECTION_SPECS: [SectionSpec; 7] = [
    SectionSpec {
        force_live_generation: true,
        ..spec(
            SectionKey::ExecutiveSummary,
            "Executive Summary",
            "executive_summary",
        )
    },
    spec(SectionKey::MarketAnalysis, "Market Analysis", "market_analysis"),
    spec(
        SectionKey::CompetitiveAnalysis,
        "Competitive Analysis",
        "competitive_analysis",
    ),
    spec(SectionKey::SwotAnalysis, "SWOT Analysis", "swot_analysis"),
    spec(
        SectionKey::MarketingStrategy,
        "Marketing Strategy",
        "marketing_strategy",
    ),
    spec(
        SectionKey::FinancialProjections,
        "Financial Projections",
        "financial_projections",
    ),
    spec(
        SectionKey::ImplementationTimeline,
        "Implementation Timeline",
        "implementation_timeline",
    ),
];

/// Sections in document order. The first entry is the critical one.
pub fn section_specs() -> &'static [SectionSpec] {
    &SECTION_SPECS
}

/// Spec for `key`.
pub fn spec_for(key: SectionKey) -> &'static SectionSpec {
    SECTION_SPECS
        .iter()
        .find(|s| s.key == key)
        .unwrap_or(&SECTION_SPECS[0])
}
