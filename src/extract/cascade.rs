//! Ordered matcher cascade with a synthesized default.

use super::industry::Industry;
use serde::Serialize;

/// One extraction strategy for entities of type `T`.
pub trait Matcher<T>: Send + Sync {
    /// Identifier reported in [`ExtractionSource::Matched`] and logs.
    fn name(&self) -> &'static str;

    /// All matches in `text`, in document order. Must not panic.
    fn find(&self, text: &str) -> Vec<T>;
}

/// How an [`Extraction`] was produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExtractionSource {
    /// Found in the text by the named matcher.
    Matched { matcher: &'static str },
    /// Nothing matched; plausible defaults for the sniffed industry.
    Synthesized { industry: Industry },
}

impl ExtractionSource {
    pub fn is_synthesized(&self) -> bool {
        matches!(self, ExtractionSource::Synthesized { .. })
    }

    /// Short label used as a metric dimension.
    pub fn label(&self) -> &'static str {
        match self {
            ExtractionSource::Matched { .. } => "matched",
            ExtractionSource::Synthesized { .. } => "synthesized",
        }
    }
}

/// Non-empty, capped list of entities plus where they came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extraction<T> {
    pub items: Vec<T>,
    pub source: ExtractionSource,
}

impl<T> Extraction<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Produces defaults when no matcher fires.
pub type Synthesizer<T> = fn(Industry) -> Vec<T>;

/// Matchers tried most-specific first; the first that yields anything wins.
pub struct Cascade<T> {
    matchers: Vec<Box<dyn Matcher<T>>>,
    synthesize: Synthesizer<T>,
    cap: usize,
}

impl<T> Cascade<T> {
    pub fn new(matchers: Vec<Box<dyn Matcher<T>>>, synthesize: Synthesizer<T>, cap: usize) -> Self {
        Self {
            matchers,
            synthesize,
            cap: cap.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Run the cascade over `text`.
    ///
    /// Later matchers are not consulted once one matches. The result always
    /// holds between 1 and `cap` items unless the synthesizer itself returns
    /// nothing.
    pub fn run(&self, text: &str, industry: Industry) -> Extraction<T> {
        for (position, matcher) in self.matchers.iter().enumerate() {
            let mut items = matcher.find(text);
            if items.is_empty() {
                tracing::trace!(matcher = matcher.name(), position, "Matcher found nothing");
                continue;
            }
            items.truncate(self.cap);
            tracing::debug!(
                matcher = matcher.name(),
                position,
                matched = items.len(),
                "Matcher accepted"
            );
            return Extraction {
                items,
                source: ExtractionSource::Matched {
                    matcher: matcher.name(),
                },
            };
        }

        let mut items = (self.synthesize)(industry);
        items.truncate(self.cap);
        tracing::debug!(%industry, synthesized = items.len(), "No matcher accepted, synthesizing");
        Extraction {
            items,
            source: ExtractionSource::Synthesized { industry },
        }
    }
}
