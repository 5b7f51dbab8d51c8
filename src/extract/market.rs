//! Target market segments.

use super::cascade::{Cascade, Matcher};
use super::industry::Industry;
use super::synth::{random_in, GROWTH_PERCENT};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

pub const SEGMENT_CAP: usize = 3;

pub const SIZE_PENDING: &str = "Market Sizing Pending";
pub const GROWTH_PENDING: &str = "Growth Rate Pending";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarketSegment {
    pub demographic: String,
    pub size: String,
    pub audience: String,
    pub growth: String,
}

static LABELED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)segment:\s*\**([^,\n*]+?)\**\s*(?:,([^\n]*))?$").unwrap()
});

static SIZE_FIELD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)size:\s*([^,\n]+)").unwrap());

static AUDIENCE_FIELD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)audience:\s*([^,\n]+)").unwrap());

static GROWTH_FIELD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)growth:\s*([^,\n]+)").unwrap());

static AGE_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\bage[sd]?\s+(\d{1,2})\s*(?:-|–|to)\s*(\d{1,2})\b|\b(\d{1,2})\s*(?:-|–|to)\s*(\d{1,2})[- ]year[- ]olds?\b",
    )
    .unwrap()
});

static MARKET_SIZE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:market|industry)\b[^.\n]{0,80}?\b(?:valued at|worth|size of|estimated at|reach(?:ing)?|of)\s+(\$\s*\d[\d,]*(?:\.\d+)?\s*(?:trillion|billion|million|[tbmk]\b)?)",
    )
    .unwrap()
});

static PERCENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,3}(?:\.\d+)?)\s*%").unwrap());

static DOLLAR_FIGURE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\$\s*\d[\d,]*(?:\.\d+)?\s*(?:trillion|billion|million|[tbmk]\b)?").unwrap()
});

/// The sentence of `text` that contains byte offset `at`. A period only ends
/// a sentence when followed by whitespace, so "$4.2" stays whole.
fn sentence_around(text: &str, at: usize) -> &str {
    let ends_sentence = |i: usize, c: char| match c {
        '!' | '?' | '\n' => true,
        '.' => text[i + 1..].chars().next().map_or(true, char::is_whitespace),
        _ => false,
    };
    let start = text[..at]
        .char_indices()
        .rev()
        .find(|&(i, c)| ends_sentence(i, c))
        .map_or(0, |(i, _)| i + 1);
    let end = text[at..]
        .char_indices()
        .find(|&(i, c)| ends_sentence(at + i, c))
        .map_or(text.len(), |(i, _)| at + i);
    text[start..end].trim()
}

fn growth_in(sentence: &str) -> String {
    PERCENT_RE
        .captures(sentence)
        .and_then(|c| c.get(1))
        .map_or_else(
            || GROWTH_PENDING.to_string(),
            |m| format!("{}% annually", m.as_str()),
        )
}

fn bounded(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim().trim_start_matches(['-', '*', '#', ' ']).trim();
    match trimmed.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", trimmed[..idx].trim_end()),
        None => trimmed.to_string(),
    }
}

fn field(re: &Regex, fields: &str) -> Option<String> {
    re.captures(fields)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// "Segment: Ages 25-34, Size: $2B, Audience: ..., Growth: 8%".
struct LabeledSegment;

impl Matcher<MarketSegment> for LabeledSegment {
    fn name(&self) -> &'static str {
        "labeled_segment"
    }

    fn find(&self, text: &str) -> Vec<MarketSegment> {
        LABELED_RE
            .captures_iter(text)
            .filter_map(|caps| {
                let demographic = caps.get(1)?.as_str().trim().to_string();
                let fields = caps.get(2).map_or("", |m| m.as_str());
                let growth = field(&GROWTH_FIELD_RE, fields)
                    .map(|g| {
                        if g.ends_with('%') {
                            format!("{g} annually")
                        } else {
                            g
                        }
                    })
                    .unwrap_or_else(|| GROWTH_PENDING.to_string());
                Some(MarketSegment {
                    size: field(&SIZE_FIELD_RE, fields).unwrap_or_else(|| SIZE_PENDING.to_string()),
                    audience: field(&AUDIENCE_FIELD_RE, fields)
                        .unwrap_or_else(|| demographic.clone()),
                    growth,
                    demographic,
                })
            })
            .collect()
    }
}

/// Age ranges such as "ages 25-34" or "18 to 24 year olds".
struct AgeRange;

impl Matcher<MarketSegment> for AgeRange {
    fn name(&self) -> &'static str {
        "age_range"
    }

    fn find(&self, text: &str) -> Vec<MarketSegment> {
        let mut found: Vec<MarketSegment> = Vec::new();
        for caps in AGE_RANGE_RE.captures_iter(text) {
            let (Some(low), Some(high)) = (
                caps.get(1).or_else(|| caps.get(3)),
                caps.get(2).or_else(|| caps.get(4)),
            ) else {
                continue;
            };
            let demographic = format!("Ages {}-{}", low.as_str(), high.as_str());
            if found.iter().any(|s| s.demographic == demographic) {
                continue;
            }
            let Some(whole) = caps.get(0) else { continue };
            let sentence = sentence_around(text, whole.start());
            found.push(MarketSegment {
                size: DOLLAR_FIGURE_RE
                    .find(sentence)
                    .map_or_else(|| SIZE_PENDING.to_string(), |m| m.as_str().to_string()),
                audience: bounded(sentence, 120),
                growth: growth_in(sentence),
                demographic,
            });
        }
        found
    }
}

/// A whole-market size statement: "the market is valued at $4.2 billion".
struct MarketSize;

impl Matcher<MarketSegment> for MarketSize {
    fn name(&self) -> &'static str {
        "market_size"
    }

    fn find(&self, text: &str) -> Vec<MarketSegment> {
        MARKET_SIZE_RE
            .captures_iter(text)
            .filter_map(|caps| {
                let size = caps.get(1)?;
                let sentence = sentence_around(text, size.start());
                Some(MarketSegment {
                    demographic: "Total Addressable Market".to_string(),
                    size: size.as_str().split_whitespace().collect::<Vec<_>>().join(" "),
                    audience: bounded(sentence, 120),
                    growth: growth_in(sentence),
                })
            })
            .take(1)
            .collect()
    }
}

fn synthesize(industry: Industry) -> Vec<MarketSegment> {
    industry
        .seed_segments()
        .iter()
        .map(|(demographic, audience)| MarketSegment {
            demographic: demographic.to_string(),
            size: SIZE_PENDING.to_string(),
            audience: audience.to_string(),
            growth: format!("{}% annually", random_in(GROWTH_PERCENT)),
        })
        .collect()
}

pub fn cascade() -> Cascade<MarketSegment> {
    Cascade::new(
        vec![
            Box::new(LabeledSegment),
            Box::new(AgeRange),
            Box::new(MarketSize),
        ],
        synthesize,
        SEGMENT_CAP,
    )
}
