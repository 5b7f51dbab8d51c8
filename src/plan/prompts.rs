//! Prompt templates for each section.

use super::sections::SectionSpec;
use super::types::GenerationRequest;

/// Shared system prompt for every section.
pub const SYSTEM_PROMPT: &str = "You are an experienced business consultant writing one section \
of a professional business plan. Write in clear, confident prose. Use markdown: start with a \
level-two heading for the section, use level-three headings for sub-sections, and prefer bullet \
lists for enumerations. Stay specific to the business described; do not invent a different \
company name.";

/// Section instructions by prompt template id.
static TEMPLATES: &[(&str, &str)] = &[
    (
        "executive_summary",
        "Write the Executive Summary. Cover the business overview, the problem it solves, \
         the target customers, the value proposition and three key objectives. Keep it \
         under 300 words.",
    ),
    (
        "market_analysis",
        "Write the Market Analysis. Include sub-sections titled Market Size, Target \
         Segments, Competitive Landscape and Market Trends. Quote market sizes in dollars \
         and growth rates as percentages. Describe each target segment on one line in the \
         form 'Segment: <demographic>, Size: <amount>, Audience: <text>, Growth: <n>%'.",
    ),
    (
        "competitive_analysis",
        "Write the Competitive Analysis. Name three direct competitors. For each give a \
         line in the form 'Company: <name>, Market Share: <n>%, Founded: <year>, \
         Revenue: <amount>, Strength: <text>, Weakness: <text>'. Finish with the \
         business's competitive advantages.",
    ),
    (
        "swot_analysis",
        "Write the SWOT Analysis with exactly four sub-sections titled Strengths, \
         Weaknesses, Opportunities and Threats, each a bullet list of three to five items.",
    ),
    (
        "marketing_strategy",
        "Write the Marketing Strategy. Cover target audience, positioning, acquisition \
         channels, a budget allocation by channel in percentages, and the key metrics \
         to track.",
    ),
    (
        "financial_projections",
        "Write the Financial Projections. Give a revenue projection for Year 1, Year 2 \
         and Year 3 as dollar amounts (for example 'Year 1 revenue: $120,000'), then \
         the cost structure, break-even analysis and funding requirements.",
    ),
    (
        "implementation_timeline",
        "Write the Implementation Timeline as phases with month ranges, each with \
         concrete milestones, followed by the key risks to the schedule.",
    ),
];

/// Instructions for template `id`, if one is registered.
pub fn template(id: &str) -> Option<&'static str> {
    TEMPLATES
        .iter()
        .find(|(template_id, _)| *template_id == id)
        .map(|(_, text)| *text)
}

/// Build the user prompt for a section.
///
/// An unregistered template id gets a generic instruction naming the section.
pub fn build_prompt(spec: &SectionSpec, request: &GenerationRequest) -> String {
    let instructions = match template(spec.prompt_template_id) {
        Some(text) => text.to_string(),
        None => {
            tracing::warn!(template = spec.prompt_template_id, "Unknown prompt template");
            format!(
                "Write the {} section of the business plan.",
                spec.display_name
            )
        }
    };
    format!(
        "Business name: {}\nBusiness description: {}\n\n{}",
        request.business_name.trim(),
        request.business_description.trim(),
        instructions
    )
}
