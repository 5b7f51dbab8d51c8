//! Keyword-based industry sniffing and per-industry seed data.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Industry {
    Fitness,
    Dating,
    Food,
    Technology,
    Retail,
    /// No industry keywords found. Defaults come from a generic seed list.
    Unclassified,
}

impl Industry {
    pub const CLASSIFIED: [Industry; 5] = [
        Industry::Fitness,
        Industry::Dating,
        Industry::Food,
        Industry::Technology,
        Industry::Retail,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Industry::Fitness => "fitness",
            Industry::Dating => "dating",
            Industry::Food => "food",
            Industry::Technology => "technology",
            Industry::Retail => "retail",
            Industry::Unclassified => "unclassified",
        }
    }

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            Industry::Fitness => &[
                "fitness", "gym", "workout", "exercise", "yoga", "trainer", "wellness",
                "pilates", "athlete",
            ],
            Industry::Dating => &[
                "dating", "match", "singles", "relationship", "romance", "matchmaking",
            ],
            Industry::Food => &[
                "food", "restaurant", "meal", "recipe", "grocery", "catering", "kitchen",
                "delivery", "bakery", "cafe",
            ],
            Industry::Technology => &[
                "software", "saas", "platform", "app", "cloud", "ai", "technology", "api",
                "startup", "automation",
            ],
            Industry::Retail => &[
                "retail", "store", "shop", "ecommerce", "e-commerce", "boutique", "merchandise",
                "marketplace",
            ],
            Industry::Unclassified => &[],
        }
    }

    /// Competitor names used for synthesized defaults.
    pub fn seed_competitors(&self) -> &'static [&'static str] {
        match self {
            Industry::Fitness => &["Peloton", "ClassPass", "Planet Fitness"],
            Industry::Dating => &["Tinder", "Bumble", "Hinge"],
            Industry::Food => &["DoorDash", "HelloFresh", "Uber Eats"],
            Industry::Technology => &["Salesforce", "HubSpot", "Zoho"],
            Industry::Retail => &["Amazon", "Shopify", "Etsy"],
            Industry::Unclassified => &[
                "Established Market Leader",
                "Regional Competitor",
                "Emerging Startup",
            ],
        }
    }

    /// Brand names recognised in free text for this industry.
    pub fn known_brands(&self) -> &'static [&'static str] {
        match self {
            Industry::Fitness => &[
                "Peloton", "ClassPass", "Planet Fitness", "Equinox", "Strava", "Orangetheory",
                "Tonal",
            ],
            Industry::Dating => &["Tinder", "Bumble", "Hinge", "Match.com", "OkCupid", "eHarmony"],
            Industry::Food => &[
                "DoorDash", "HelloFresh", "Uber Eats", "Grubhub", "Blue Apron", "Instacart",
            ],
            Industry::Technology => &[
                "Salesforce", "HubSpot", "Zoho", "Microsoft", "Google", "Atlassian", "Notion",
            ],
            Industry::Retail => &["Amazon", "Shopify", "Etsy", "Walmart", "Target", "eBay"],
            Industry::Unclassified => &[],
        }
    }

    /// Target segments as `(demographic, audience)` pairs.
    pub fn seed_segments(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Industry::Fitness => &[
                ("Ages 25-34", "Urban professionals building a regular workout habit"),
                ("Ages 35-49", "Busy parents looking for flexible home fitness"),
                ("Ages 50-64", "Health-conscious adults focused on longevity"),
            ],
            Industry::Dating => &[
                ("Ages 22-29", "Young singles looking for casual and serious connections"),
                ("Ages 30-44", "Professionals seeking long-term relationships"),
                ("Ages 45-60", "Divorced or widowed adults re-entering dating"),
            ],
            Industry::Food => &[
                ("Ages 25-39", "Working professionals ordering convenient meals"),
                ("Ages 30-49", "Families planning weekly meals on a budget"),
                ("Ages 18-24", "Students favouring affordable quick options"),
            ],
            Industry::Technology => &[
                ("Small businesses", "Owners automating day-to-day operations"),
                ("Mid-market companies", "Operations teams replacing legacy tools"),
                ("Independent professionals", "Freelancers managing clients and billing"),
            ],
            Industry::Retail => &[
                ("Ages 18-34", "Digital-first shoppers discovering products on social media"),
                ("Ages 35-54", "Value-focused households buying repeat essentials"),
                ("Gift buyers", "Occasional shoppers looking for unique items"),
            ],
            Industry::Unclassified => &[
                ("Early adopters", "Customers who feel the problem most acutely"),
                ("Mainstream buyers", "Price-sensitive customers using generic alternatives"),
                ("Organisations", "Businesses buying on behalf of end users"),
            ],
        }
    }

    /// Leading SWOT strengths specific to the industry.
    pub fn seed_strengths(&self) -> &'static [&'static str] {
        match self {
            Industry::Fitness => &[
                "Rising consumer focus on health and wellness",
                "Recurring membership revenue",
            ],
            Industry::Dating => &[
                "Strong network effects once a user base forms",
                "High willingness to pay for premium features",
            ],
            Industry::Food => &[
                "Frequent repeat purchases",
                "Everyday necessity with broad appeal",
            ],
            Industry::Technology => &[
                "Highly scalable delivery at low marginal cost",
                "Recurring subscription revenue",
            ],
            Industry::Retail => &[
                "Direct relationship with end customers",
                "Flexible product assortment",
            ],
            Industry::Unclassified => &[],
        }
    }

    /// Leading SWOT weaknesses specific to the industry.
    pub fn seed_weaknesses(&self) -> &'static [&'static str] {
        match self {
            Industry::Fitness => &[
                "High member churn after the first months",
                "Seasonal demand swings",
            ],
            Industry::Dating => &[
                "Users leave once they find a match",
                "Trust and safety costs",
            ],
            Industry::Food => &["Thin operating margins", "Perishable inventory"],
            Industry::Technology => &[
                "Long enterprise sales cycles",
                "Dependence on scarce engineering talent",
            ],
            Industry::Retail => &[
                "Inventory carrying costs",
                "Intense price competition",
            ],
            Industry::Unclassified => &[],
        }
    }
}

impl fmt::Display for Industry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify `text` by counting industry keyword hits.
///
/// The industry with the most hits wins; ties go to the earlier industry in
/// [`Industry::CLASSIFIED`]. Text without any keyword is
/// [`Industry::Unclassified`].
pub fn classify_industry(text: &str) -> Industry {
    let lower = text.to_lowercase();
    let words: Vec<&str> = lower
        .split(|c: char| !(c.is_alphanumeric() || c == '-'))
        .filter(|w| !w.is_empty())
        .collect();

    let mut best = Industry::Unclassified;
    let mut best_hits = 0;
    for industry in Industry::CLASSIFIED {
        let keywords = industry.keywords();
        let hits = words
            .iter()
            .filter(|word| {
                keywords
                    .iter()
                    .any(|k| **word == *k || word.strip_suffix('s') == Some(*k))
            })
            .count();
        if hits > best_hits {
            best = industry;
            best_hits = hits;
        }
    }
    best
}
