//! Core data model for business-plan generation.

use super::error::PipelineError;
use super::sections::{section_specs, SectionKey};
use crate::completion::QualityTier;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What the caller asked for. Immutable once a session starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub business_name: String,
    pub business_description: String,
    #[serde(default)]
    pub quality_tier: QualityTier,
    #[serde(default)]
    pub caller_authenticated: bool,
}

impl GenerationRequest {
    pub fn new(business_name: impl Into<String>, business_description: impl Into<String>) -> Self {
        Self {
            business_name: business_name.into(),
            business_description: business_description.into(),
            quality_tier: QualityTier::Standard,
            caller_authenticated: false,
        }
    }

    pub fn with_tier(mut self, tier: QualityTier) -> Self {
        self.quality_tier = tier;
        self
    }

    pub fn authenticated(mut self, authenticated: bool) -> Self {
        self.caller_authenticated = authenticated;
        self
    }

    /// Check required fields and tier entitlement.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.business_name.trim().is_empty() {
            return Err(PipelineError::MissingField("business_name"));
        }
        if self.business_description.trim().is_empty() {
            return Err(PipelineError::MissingField("business_description"));
        }
        if self.quality_tier == QualityTier::Enhanced && !self.caller_authenticated {
            return Err(PipelineError::EntitlementRequired {
                tier: self.quality_tier,
            });
        }
        Ok(())
    }

    /// Copy used for degraded retries: cheap tier, description cut to
    /// `max_chars` characters.
    pub fn degraded(&self, max_chars: usize) -> Self {
        Self {
            business_name: self.business_name.clone(),
            business_description: truncate_chars(&self.business_description, max_chars)
                .to_string(),
            quality_tier: QualityTier::Standard,
            caller_authenticated: self.caller_authenticated,
        }
    }
}

/// Prefix of `s` holding at most `max_chars` characters.
pub(crate) fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Outcome of generating one section. `content` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionResult {
    pub content: String,
    pub succeeded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SectionResult {
    pub fn generated(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            succeeded: true,
            error: None,
        }
    }

    pub fn fallback(content: String, error: impl Into<String>) -> Self {
        Self {
            content,
            succeeded: false,
            error: Some(error.into()),
        }
    }
}

/// Where a section's text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentSource {
    Generated,
    Fallback,
}

/// One populated section of the final document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSection {
    pub key: SectionKey,
    pub title: String,
    pub content: String,
    pub source: ContentSource,
}

/// A complete business plan: exactly one section per [`SectionSpec`](super::SectionSpec),
/// in document order.
///
/// Only [`BusinessPlanDocument::assemble`] constructs one, so a partially
/// built document can never escape the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessPlanDocument {
    business_name: String,
    generated_at: DateTime<Utc>,
    sections: Vec<DocumentSection>,
}

impl BusinessPlanDocument {
    /// Assemble and check the document invariant.
    pub fn assemble(
        business_name: impl Into<String>,
        sections: Vec<DocumentSection>,
    ) -> Result<Self, PipelineError> {
        let specs = section_specs();
        if sections.len() != specs.len() {
            return Err(PipelineError::Invariant(format!(
                "expected {} sections, got {}",
                specs.len(),
                sections.len()
            )));
        }
        for (spec, section) in specs.iter().zip(&sections) {
            if spec.key != section.key {
                return Err(PipelineError::Invariant(format!(
                    "section '{}' out of order (expected '{}')",
                    section.key, spec.key
                )));
            }
            if section.content.trim().is_empty() {
                return Err(PipelineError::Invariant(format!(
                    "section '{}' has no content",
                    section.key
                )));
            }
        }

        Ok(Self {
            business_name: business_name.into(),
            generated_at: Utc::now(),
            sections,
        })
    }

    pub fn business_name(&self) -> &str {
        &self.business_name
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn sections(&self) -> &[DocumentSection] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Content for `key`. Always `Some` for keys of the section table.
    pub fn get(&self, key: SectionKey) -> Option<&str> {
        self.sections
            .iter()
            .find(|s| s.key == key)
            .map(|s| s.content.as_str())
    }

    /// Keys of sections that used fallback content.
    pub fn fallback_sections(&self) -> Vec<SectionKey> {
        self.sections
            .iter()
            .filter(|s| s.source == ContentSource::Fallback)
            .map(|s| s.key)
            .collect()
    }

    /// Render as a single markdown document.
    pub fn to_markdown(&self) -> String {
        let mut out = format!("# {} Business Plan\n\n", self.business_name);
        for section in &self.sections {
            let content = section.content.trim();
            // Generated text usually starts with its own heading.
            if !content.starts_with('#') {
                out.push_str(&format!("## {}\n\n", section.title));
            }
            out.push_str(content);
            out.push_str("\n\n");
        }
        out
    }
}

/// Non-fatal notice that a section fell back to template content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionWarning {
    pub section: SectionKey,
    pub message: String,
}

impl std::fmt::Display for SectionWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} used fallback content: {}",
            self.section.display_name(),
            self.message
        )
    }
}

/// Result of a successful build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationOutcome {
    pub document: BusinessPlanDocument,
    pub warnings: Vec<SectionWarning>,
}

/// Interim notifications from the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    SectionStarted {
        index: usize,
        total: usize,
        key: SectionKey,
    },
    SectionFinished {
        index: usize,
        total: usize,
        key: SectionKey,
        succeeded: bool,
    },
}
