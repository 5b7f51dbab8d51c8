//! Competitor profiles from analysis text.

use super::cascade::{Cascade, Matcher};
use super::industry::Industry;
use super::synth::{
    format_money, parse_amount, pick_in, random_in, stable_hash, FOUNDED_YEAR, REVENUE_MILLIONS,
    SHARE_PERCENT,
};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

pub const COMPETITOR_CAP: usize = 3;

pub const REVENUE_UNDISCLOSED: &str = "Revenue Undisclosed";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Competitor {
    pub name: String,
    pub market_share_percent: f64,
    pub founded_year: u16,
    pub annual_revenue: String,
    pub strength: String,
    pub weakness: String,
}

const STRENGTHS: &[&str] = &[
    "Strong brand recognition",
    "Large existing customer base",
    "Deep marketing budget",
    "Broad product range",
    "Established distribution partnerships",
];

const WEAKNESSES: &[&str] = &[
    "Slow to adopt new features",
    "Premium pricing",
    "Generic customer experience",
    "Limited local presence",
    "Legacy technology",
];

impl Competitor {
    /// A competitor whose unknown attributes are derived from its name, so
    /// the same name always yields the same profile.
    fn from_name(name: &str) -> Self {
        let hash = stable_hash(name);
        let years = u32::from(*FOUNDED_YEAR.start())..=u32::from(*FOUNDED_YEAR.end());
        Self {
            name: name.to_string(),
            market_share_percent: f64::from(pick_in(hash, SHARE_PERCENT)),
            founded_year: pick_in(hash >> 16, years) as u16,
            annual_revenue: REVENUE_UNDISCLOSED.to_string(),
            strength: STRENGTHS[(hash >> 32) as usize % STRENGTHS.len()].to_string(),
            weakness: WEAKNESSES[(hash >> 40) as usize % WEAKNESSES.len()].to_string(),
        }
    }
}

static LABELED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)company:\s*\**([^,\n*]+?)\**\s*,\s*market share:\s*(\d{1,3}(?:\.\d+)?)\s*%([^\n]*)",
    )
    .unwrap()
});

static FOUNDED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)founded:\s*((?:18|19|20)\d{2})").unwrap());

static REVENUE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)revenue:\s*\$\s*(\d[\d,]*(?:\.\d+)?)\s*(k|m|b|thousand|million|billion)?\b")
        .unwrap()
});

static STRENGTH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)strength:\s*([^,\n]+)").unwrap());

static WEAKNESS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)weakness:\s*([^,\n]+)").unwrap());

static BOLD_ITEM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:[-*+]|\d+[.)])[ \t]+\*\*([^*\n]{2,60}?)\*\*").unwrap()
});

static INLINE_LIST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\bcompetitors?\s+(?:include|includes|are|such as|like)\s*:?\s+([^.\n;]+)",
    )
    .unwrap()
});

/// Words that open a bold list item that is a heading rather than a name.
const NOT_A_NAME: &[&str] = &[
    "strength",
    "weakness",
    "opportunit",
    "threat",
    "market",
    "revenue",
    "pricing",
    "summary",
    "overview",
    "competitive",
];

fn clean_name(raw: &str) -> Option<String> {
    let name = raw
        .trim()
        .trim_end_matches([':', '.', ',', '-'])
        .trim()
        .to_string();
    if name.is_empty() || name.chars().count() > 60 {
        return None;
    }
    let lower = name.to_lowercase();
    if NOT_A_NAME.iter().any(|w| lower.starts_with(w)) {
        return None;
    }
    Some(name)
}

fn push_unique(found: &mut Vec<Competitor>, competitor: Competitor) {
    if !found
        .iter()
        .any(|c| c.name.eq_ignore_ascii_case(&competitor.name))
    {
        found.push(competitor);
    }
}

/// "Company: X, Market Share: 12%, Founded: 2010, Revenue: $5M, ..."
struct LabeledProfile;

impl Matcher<Competitor> for LabeledProfile {
    fn name(&self) -> &'static str {
        "labeled_profile"
    }

    fn find(&self, text: &str) -> Vec<Competitor> {
        let mut found = Vec::new();
        for caps in LABELED_RE.captures_iter(text) {
            let (Some(name), Some(share)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            let Some(name) = clean_name(name.as_str()) else {
                continue;
            };
            let mut competitor = Competitor::from_name(&name);
            if let Ok(share) = share.as_str().parse::<f64>() {
                competitor.market_share_percent = share.clamp(0.0, 100.0);
            }

            let rest = caps.get(3).map_or("", |m| m.as_str());
            if let Some(year) = FOUNDED_RE
                .captures(rest)
                .and_then(|c| c.get(1)?.as_str().parse().ok())
            {
                competitor.founded_year = year;
            }
            if let Some(amount) = REVENUE_RE.captures(rest).and_then(|c| {
                parse_amount(c.get(1)?.as_str(), c.get(2).map(|m| m.as_str()))
            }) {
                competitor.annual_revenue = format_money(amount);
            }
            if let Some(strength) = STRENGTH_RE.captures(rest).and_then(|c| c.get(1)) {
                competitor.strength = strength.as_str().trim().to_string();
            }
            if let Some(weakness) = WEAKNESS_RE.captures(rest).and_then(|c| c.get(1)) {
                competitor.weakness = weakness.as_str().trim().to_string();
            }
            push_unique(&mut found, competitor);
        }
        found
    }
}

/// List items led by a bold name: "- **Acme Corp**: ...".
struct BoldListItem;

impl Matcher<Competitor> for BoldListItem {
    fn name(&self) -> &'static str {
        "bold_list_item"
    }

    fn find(&self, text: &str) -> Vec<Competitor> {
        let mut found = Vec::new();
        for caps in BOLD_ITEM_RE.captures_iter(text) {
            if let Some(name) = caps.get(1).and_then(|m| clean_name(m.as_str())) {
                push_unique(&mut found, Competitor::from_name(&name));
            }
        }
        found
    }
}

/// "Competitors include Acme, Globex and Initech."
struct InlineList;

impl Matcher<Competitor> for InlineList {
    fn name(&self) -> &'static str {
        "inline_list"
    }

    fn find(&self, text: &str) -> Vec<Competitor> {
        let mut found = Vec::new();
        for caps in INLINE_LIST_RE.captures_iter(text) {
            let Some(list) = caps.get(1) else { continue };
            for part in list
                .as_str()
                .split([',', '/'])
                .flat_map(|p| p.split(" and "))
                .flat_map(|p| p.split(" or "))
            {
                let part = part.trim().trim_start_matches("and ").trim();
                let capitalized = part.chars().next().is_some_and(char::is_uppercase);
                if !capitalized {
                    continue;
                }
                if let Some(name) = clean_name(part) {
                    push_unique(&mut found, Competitor::from_name(&name));
                }
            }
        }
        found
    }
}

/// Known brands of the sniffed industry, in order of first mention.
struct BrandScan {
    industry: Industry,
}

impl Matcher<Competitor> for BrandScan {
    fn name(&self) -> &'static str {
        "brand_scan"
    }

    fn find(&self, text: &str) -> Vec<Competitor> {
        let lower = text.to_lowercase();
        let mut hits: Vec<(usize, &str)> = self
            .industry
            .known_brands()
            .iter()
            .filter_map(|brand| {
                if CASE_SENSITIVE_BRANDS.contains(brand) {
                    return first_word_match(text, brand).map(|at| (at, *brand));
                }
                first_word_match(&lower, &brand.to_lowercase()).map(|at| (at, *brand))
            })
            .collect();
        hits.sort_by_key(|(at, _)| *at);
        hits.into_iter()
            .map(|(_, brand)| Competitor::from_name(brand))
            .collect()
    }
}

/// Brands that are also everyday words; only their exact spelling counts.
const CASE_SENSITIVE_BRANDS: &[&str] = &["Target", "Notion"];

fn first_word_match(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .match_indices(needle)
        .find(|(at, _)| is_word_at(haystack, *at, needle.len()))
        .map(|(at, _)| at)
}

fn is_word_at(text: &str, at: usize, len: usize) -> bool {
    let before = text[..at].chars().next_back();
    let after = text[at + len..].chars().next();
    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}

/// Seed competitors with random bounded attributes.
fn synthesize(industry: Industry) -> Vec<Competitor> {
    industry
        .seed_competitors()
        .iter()
        .map(|name| {
            let mut competitor = Competitor::from_name(name);
            competitor.market_share_percent = f64::from(random_in(SHARE_PERCENT));
            competitor.founded_year = random_in(FOUNDED_YEAR);
            competitor.annual_revenue =
                format_money(f64::from(random_in(REVENUE_MILLIONS)) * 1e6);
            competitor
        })
        .collect()
}

pub fn cascade(industry: Industry) -> Cascade<Competitor> {
    Cascade::new(
        vec![
            Box::new(LabeledProfile),
            Box::new(BrandScan { industry }),
            Box::new(BoldListItem),
            Box::new(InlineList),
        ],
        synthesize,
        COMPETITOR_CAP,
    )
}
