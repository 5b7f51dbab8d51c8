//! Strengths and weaknesses from SWOT write-ups.

use super::cascade::{Cascade, Matcher, Synthesizer};
use super::industry::Industry;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

pub const SWOT_CAP: usize = 5;

const ITEM_MAX_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwotItem {
    pub text: String,
}

/// SWOT quadrant handled by a cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    Strengths,
    Weaknesses,
}

impl Quadrant {
    fn heading_re(&self) -> &'static Regex {
        match self {
            Quadrant::Strengths => &*STRENGTHS_HEADING_RE,
            Quadrant::Weaknesses => &*WEAKNESSES_HEADING_RE,
        }
    }

    fn inline_re(&self) -> &'static Regex {
        match self {
            Quadrant::Strengths => &*STRENGTHS_INLINE_RE,
            Quadrant::Weaknesses => &*WEAKNESSES_INLINE_RE,
        }
    }
}

static STRENGTHS_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:#{1,6}\s*|\*\*)?(?:key\s+)?strengths?\b[^a-z]*$").unwrap()
});

static WEAKNESSES_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:#{1,6}\s*|\*\*)?(?:key\s+)?weakness(?:es)?\b[^a-z]*$").unwrap()
});

static STRENGTHS_INLINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bstrengths?\s+(?:include|includes|are|:)\s*:?\s*([^.\n]+)").unwrap()
});

static WEAKNESSES_INLINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bweakness(?:es)?\s+(?:include|includes|are|:)\s*:?\s*([^.\n]+)").unwrap()
});

static BULLET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:[-*+•]|\d+[.)])\s+(.+)$").unwrap());

fn clean_item(raw: &str) -> Option<SwotItem> {
    let text = raw
        .replace("**", "")
        .trim()
        .trim_end_matches(['.', ',', ';'])
        .trim()
        .to_string();
    if text.is_empty() {
        return None;
    }
    let text = match text.char_indices().nth(ITEM_MAX_CHARS) {
        Some((idx, _)) => text[..idx].trim_end().to_string(),
        None => text,
    };
    Some(SwotItem { text })
}

/// Bullets under a "Strengths"/"Weaknesses" heading, up to the next
/// non-bullet line.
struct HeadingList {
    quadrant: Quadrant,
}

impl Matcher<SwotItem> for HeadingList {
    fn name(&self) -> &'static str {
        "heading_list"
    }

    fn find(&self, text: &str) -> Vec<SwotItem> {
        let heading = self.quadrant.heading_re();
        let mut found = Vec::new();
        let mut in_list = false;

        for line in text.lines() {
            if heading.is_match(line) {
                in_list = true;
                continue;
            }
            if !in_list {
                continue;
            }
            if line.trim().is_empty() {
                continue;
            }
            match BULLET_RE.captures(line).and_then(|c| c.get(1)) {
                Some(item) => found.extend(clean_item(item.as_str())),
                None => in_list = false,
            }
        }
        found
    }
}

/// "Strengths include a loyal community, low costs and ..."
struct InlineList {
    quadrant: Quadrant,
}

impl Matcher<SwotItem> for InlineList {
    fn name(&self) -> &'static str {
        "inline_list"
    }

    fn find(&self, text: &str) -> Vec<SwotItem> {
        self.quadrant
            .inline_re()
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .flat_map(|list| {
                list.as_str()
                    .split([',', ';'])
                    .flat_map(|p| p.split(" and "))
                    .filter_map(|p| clean_item(p.trim().trim_start_matches("and ")))
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}

const GENERAL_STRENGTHS: &[&str] = &[
    "Clear focus on a specific customer problem",
    "Low fixed costs and fast decision making",
    "Founder knowledge of the target market",
    "Direct relationships with early customers",
    "Ability to iterate quickly on feedback",
];

const GENERAL_WEAKNESSES: &[&str] = &[
    "Limited brand recognition at launch",
    "Small team with constrained capacity",
    "Limited capital for marketing",
    "Unproven unit economics",
    "Dependence on a few early customers",
];

fn seeded(industry_items: &[&'static str], general: &[&'static str]) -> Vec<SwotItem> {
    industry_items
        .iter()
        .chain(general)
        .take(SWOT_CAP)
        .map(|text| SwotItem {
            text: text.to_string(),
        })
        .collect()
}

fn synthesize_strengths(industry: Industry) -> Vec<SwotItem> {
    seeded(industry.seed_strengths(), GENERAL_STRENGTHS)
}

fn synthesize_weaknesses(industry: Industry) -> Vec<SwotItem> {
    seeded(industry.seed_weaknesses(), GENERAL_WEAKNESSES)
}

pub fn cascade(quadrant: Quadrant) -> Cascade<SwotItem> {
    let synthesize: Synthesizer<SwotItem> = match quadrant {
        Quadrant::Strengths => synthesize_strengths,
        Quadrant::Weaknesses => synthesize_weaknesses,
    };
    Cascade::new(
        vec![
            Box::new(HeadingList { quadrant }),
            Box::new(InlineList { quadrant }),
        ],
        synthesize,
        SWOT_CAP,
    )
}
