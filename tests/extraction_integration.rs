//! Extraction scenarios over realistic generated-plan text.

use plancraft::extract::{
    classify_industry, extract_competitors, extract_entities, extract_financials,
    extract_market_segments, extract_swot, EntityKind, ExtractionSource, Industry, Quadrant,
};

const COMPETITIVE_SECTION: &str = "\
## Competitive Analysis

**Peloton** dominates connected fitness hardware.
**ClassPass** aggregates studio memberships.

Smaller local gyms compete on price.";

const SWOT_SECTION: &str = "\
## SWOT Analysis

### Strengths
- Experienced coaching team
- Proprietary scheduling app

### Weaknesses
- Limited marketing budget
- Single location at launch

### Opportunities
- Corporate wellness programs";

#[test]
fn test_fitness_text_without_competitors_uses_fitness_seeds() {
    let text = "A fitness studio offering small-group workouts and yoga classes.";
    let result = extract_competitors(text);

    assert!(!result.items.is_empty() && result.items.len() <= 3);
    assert_eq!(
        result.source,
        ExtractionSource::Synthesized {
            industry: Industry::Fitness
        }
    );
    let seeds = Industry::Fitness.seed_competitors();
    assert!(result
        .items
        .iter()
        .all(|c| seeds.contains(&c.name.as_str())));
}

#[test]
fn test_bold_competitors_from_generated_section() {
    let result = extract_competitors(COMPETITIVE_SECTION);
    let names: Vec<&str> = result.items.iter().map(|c| c.name.as_str()).collect();

    assert_eq!(names, vec!["Peloton", "ClassPass"]);
    assert!(!result.source.is_synthesized());
    for competitor in &result.items {
        assert!((5.0..=35.0).contains(&competitor.market_share_percent));
        assert!((1995..=2018).contains(&competitor.founded_year));
    }
}

#[test]
fn test_named_brands_win_over_bold_headings() {
    let text = "- **Our Mission**: make fitness fun for every gym member\n\
                We compete directly with Peloton and Strava for home workouts.";
    let result = extract_competitors(text);
    let names: Vec<&str> = result.items.iter().map(|c| c.name.as_str()).collect();

    assert_eq!(names, vec!["Peloton", "Strava"]);
    assert_eq!(
        result.source,
        ExtractionSource::Matched {
            matcher: "brand_scan"
        }
    );
}

#[test]
fn test_matched_competitor_attributes_are_stable() {
    assert_eq!(
        extract_competitors(COMPETITIVE_SECTION),
        extract_competitors(COMPETITIVE_SECTION)
    );
}

#[test]
fn test_year_revenue_sentence() {
    let result = extract_financials("Year 1 revenue was $120,000 and Year 3 revenue was $300,000");
    let points: Vec<(&str, f64)> = result
        .items
        .iter()
        .map(|p| (p.period.as_str(), p.amount))
        .collect();

    assert_eq!(points, vec![("Year 1", 120_000.0), ("Year 3", 300_000.0)]);
}

#[test]
fn test_financials_capped_at_five() {
    let text = (1..=8)
        .map(|year| format!("Year {year} revenue: ${},000", year * 100))
        .collect::<Vec<_>>()
        .join("\n");
    let result = extract_financials(&text);

    assert_eq!(result.items.len(), 5);
    assert_eq!(result.items[0].period, "Year 1");
}

#[test]
fn test_synthesized_financials_grow() {
    let result = extract_financials("No numbers here at all.");

    assert!(result.source.is_synthesized());
    assert_eq!(result.items.len(), 5);
    assert!(result
        .items
        .windows(2)
        .all(|w| w[1].amount > w[0].amount));
}

#[test]
fn test_market_segments_from_age_range() {
    let text = "Our core customers are aged 25-34 in urban areas, growing at 8% per year.";
    let result = extract_market_segments(text);

    assert!(!result.source.is_synthesized());
    assert!(result.items[0].demographic.contains("25-34"));
}

#[test]
fn test_swot_quadrants_stay_separate() {
    let strengths = extract_swot(Quadrant::Strengths, SWOT_SECTION);
    let weaknesses = extract_swot(Quadrant::Weaknesses, SWOT_SECTION);

    let s: Vec<&str> = strengths.items.iter().map(|i| i.text.as_str()).collect();
    let w: Vec<&str> = weaknesses.items.iter().map(|i| i.text.as_str()).collect();
    assert_eq!(s, vec!["Experienced coaching team", "Proprietary scheduling app"]);
    assert_eq!(w, vec!["Limited marketing budget", "Single location at launch"]);
}

#[test]
fn test_every_kind_is_total_on_empty_input() {
    for kind in EntityKind::ALL {
        let list = extract_entities(kind, "");
        assert!(!list.is_empty(), "{kind} was empty");
        assert!(list.len() <= kind.cap(), "{kind} exceeded cap");
        assert_eq!(list.kind(), kind);
    }
}

#[test]
fn test_industry_classification() {
    assert_eq!(classify_industry("a dating app for dog owners"), Industry::Dating);
    assert_eq!(classify_industry("meal kits and recipes"), Industry::Food);
    assert_eq!(classify_industry("bespoke furniture restoration"), Industry::Unclassified);
}
