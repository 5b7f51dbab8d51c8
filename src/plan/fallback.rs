//! Template content used when generation fails.
//!
//! Output depends only on the business name and description, so repeated
//! calls return byte-identical text. Every template keeps the heading layout
//! downstream consumers expect for its section.

use super::sections::{SectionKey, SectionSpec};
use super::types::{truncate_chars, GenerationRequest};

const EXCERPT_CHARS: usize = 160;

/// Deterministic, section-shaped fallback text.
pub fn fallback_content(spec: &SectionSpec, request: &GenerationRequest) -> String {
    let name = display_name(request);
    let excerpt = excerpt(&request.business_description);

    let body = match spec.key {
        SectionKey::ExecutiveSummary => executive_summary(name, &excerpt),
        SectionKey::MarketAnalysis => market_analysis(name, &excerpt),
        SectionKey::CompetitiveAnalysis => competitive_analysis(name),
        SectionKey::SwotAnalysis => swot_analysis(name),
        SectionKey::MarketingStrategy => marketing_strategy(name),
        SectionKey::FinancialProjections => financial_projections(name),
        SectionKey::ImplementationTimeline => implementation_timeline(name),
    };

    format!("## {}\n\n{}", spec.display_name, body)
}

fn display_name(request: &GenerationRequest) -> &str {
    let name = request.business_name.trim();
    if name.is_empty() {
        "The business"
    } else {
        name
    }
}

/// First sentence of the description, bounded in length.
fn excerpt(description: &str) -> String {
    let description = description.trim();
    if description.is_empty() {
        return "a new venture".to_string();
    }
    let first_sentence = description
        .split_terminator(['.', '!', '?', '\n'])
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or(description);
    let cut = truncate_chars(first_sentence, EXCERPT_CHARS);
    if cut.len() < first_sentence.len() {
        format!("{}...", cut.trim_end())
    } else {
        cut.to_string()
    }
}

fn executive_summary(name: &str, excerpt: &str) -> String {
    format!(
        "### Business Overview\n\n\
         {name} is built around the following idea: {excerpt}.\n\n\
         ### Value Proposition\n\n\
         {name} aims to deliver a focused, reliable offering that solves a clear customer \
         problem better than existing alternatives.\n\n\
         ### Key Objectives\n\n\
         - Validate demand with an initial group of paying customers\n\
         - Reach sustainable monthly revenue within the first year\n\
         - Build a repeatable acquisition channel before scaling spend\n"
    )
}

fn market_analysis(name: &str, excerpt: &str) -> String {
    format!(
        "### Market Size\n\n\
         Market Sizing Pending. A bottom-up estimate for {name} should start from the number \
         of reachable customers and the expected annual spend per customer.\n\n\
         ### Target Segments\n\n\
         - Primary: early adopters who feel the problem most acutely ({excerpt})\n\
         - Secondary: price-sensitive customers currently served by generic alternatives\n\
         - Tertiary: organisations buying on behalf of end users\n\n\
         ### Competitive Landscape\n\n\
         The space includes established incumbents and smaller specialists. {name} will \
         compete on focus and customer experience rather than breadth.\n\n\
         ### Market Trends\n\n\
         - Growing customer expectations for convenience and transparency\n\
         - Shift toward digital channels for discovery and purchase\n\
         - Increasing attention to sustainability and long-term value\n"
    )
}

fn competitive_analysis(name: &str) -> String {
    format!(
        "### Direct Competitors\n\n\
         - Established market leader: broad offering and strong brand, slower to adapt\n\
         - Regional specialist: close customer relationships, limited reach\n\
         - Emerging startup: modern product, unproven economics\n\n\
         ### Indirect Competitors\n\n\
         Do-it-yourself approaches and adjacent products that solve part of the same problem.\n\n\
         ### Competitive Advantages\n\n\
         - {name} concentrates on a narrowly defined customer need\n\
         - Lean operations allow competitive pricing\n\
         - Direct feedback loops shorten product iteration\n"
    )
}

fn swot_analysis(name: &str) -> String {
    format!(
        "### Strengths\n\n\
         - Clear focus on a specific customer problem\n\
         - Low fixed costs and fast decision making\n\
         - Founder knowledge of the target market\n\n\
         ### Weaknesses\n\n\
         - Limited brand recognition at launch\n\
         - Small team with constrained capacity\n\
         - Limited capital for marketing\n\n\
         ### Opportunities\n\n\
         - Underserved customer segments ignored by incumbents\n\
         - Partnerships that give {name} access to existing audiences\n\
         - Expansion into adjacent products once the core offer is proven\n\n\
         ### Threats\n\n\
         - Incumbents copying the offer\n\
         - Economic conditions reducing customer spend\n\
         - Regulatory or supply-chain changes raising costs\n"
    )
}

fn marketing_strategy(name: &str) -> String {
    format!(
        "### Target Audience\n\n\
         Customers who experience the problem {name} solves often and are actively looking \
         for a better option.\n\n\
         ### Positioning\n\n\
         {name} is positioned as the dependable, specialised choice for this need.\n\n\
         ### Channels\n\n\
         - Content and search marketing: 40%\n\
         - Social media and community: 30%\n\
         - Partnerships and referrals: 20%\n\
         - Experiments: 10%\n\n\
         ### Key Metrics\n\n\
         - Customer acquisition cost\n\
         - Conversion rate from trial to paid\n\
         - Monthly retention\n"
    )
}

fn financial_projections(name: &str) -> String {
    format!(
        "### Revenue Projections\n\n\
         | Period | Revenue |\n\
         |--------|---------|\n\
         | Year 1 | Projection Pending |\n\
         | Year 2 | Projection Pending |\n\
         | Year 3 | Projection Pending |\n\n\
         ### Cost Structure\n\n\
         Major cost categories for {name}: product delivery, customer acquisition, staff and \
         general administration.\n\n\
         ### Break-even Analysis\n\n\
         Break-even is reached when monthly gross margin covers fixed operating costs; the \
         target is to reach it within 18 to 24 months.\n\n\
         ### Funding Requirements\n\n\
         Initial funding should cover twelve months of operating costs plus launch marketing.\n"
    )
}

fn implementation_timeline(name: &str) -> String {
    format!(
        "### Phase 1: Foundation (Months 1-3)\n\n\
         - Finalise the offer and pricing for {name}\n\
         - Set up legal entity, accounts and core tooling\n\n\
         ### Phase 2: Launch (Months 4-6)\n\n\
         - Release to a first group of customers\n\
         - Collect feedback and iterate weekly\n\n\
         ### Phase 3: Growth (Months 7-12)\n\n\
         - Scale the best-performing acquisition channel\n\
         - Hire for the most constrained function\n\n\
         ### Key Risks\n\n\
         - Slower than expected customer adoption\n\
         - Delays in hiring or supplier onboarding\n"
    )
}
