//! Random business-idea selection without short-term repeats.

mod recent;

pub use recent::RecentSet;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A seed idea for a business plan.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BusinessIdea {
    pub name: String,
    pub description: String,
}

impl BusinessIdea {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Built-in catalog used by the CLI.
pub fn default_catalog() -> Vec<BusinessIdea> {
    [
        ("FitLoop", "A subscription app pairing home workouts with live small-group coaching"),
        ("TableTalk", "A dating service that matches singles through hosted group dinners"),
        ("PrepBox", "Weekly meal-prep kits built around local farm produce"),
        ("LedgerLite", "Bookkeeping software that automates invoicing for freelancers"),
        ("Second Stitch", "An online marketplace for refurbished designer clothing"),
        ("TrailPaws", "On-demand dog walking with GPS-tracked routes"),
        ("GreenCommute", "Corporate e-bike leasing for urban offices"),
        ("StudyNest", "Quiet, bookable study pods near university campuses"),
        ("CraftCrate", "Monthly DIY craft boxes for families with young children"),
        ("FixIt Now", "Same-day home appliance repair booked through an app"),
    ]
    .into_iter()
    .map(|(name, description)| BusinessIdea::new(name, description))
    .collect()
}

/// Picks ideas from a catalog, avoiding the most recent picks.
///
/// The selector owns its [`RecentSet`], so each caller keeps its own
/// history.
pub struct IdeaSelector {
    catalog: Vec<BusinessIdea>,
    recent: RecentSet<usize>,
}

impl IdeaSelector {
    /// `history` is how many recent picks are excluded. It is clamped below
    /// the catalog size so a pick is always possible.
    pub fn new(catalog: Vec<BusinessIdea>, history: usize) -> Self {
        let history = history.min(catalog.len().saturating_sub(1)).max(1);
        Self {
            catalog,
            recent: RecentSet::new(history),
        }
    }

    pub fn catalog(&self) -> &[BusinessIdea] {
        &self.catalog
    }

    pub fn recent(&self) -> &RecentSet<usize> {
        &self.recent
    }

    /// Pick one idea not among the recent picks. If every idea is recent the
    /// oldest recent pick is reused. `None` only for an empty catalog.
    pub fn pick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<&BusinessIdea> {
        if self.catalog.is_empty() {
            return None;
        }
        let fresh: Vec<usize> = (0..self.catalog.len())
            .filter(|i| !self.recent.contains(i))
            .collect();
        let index = match fresh.choose(rng) {
            Some(&index) => index,
            None => self.recent.oldest().copied().unwrap_or(0),
        };
        self.recent.push(index);
        self.catalog.get(index)
    }

    /// Pick `count` ideas, each excluding the picks before it.
    pub fn pick_many<R: Rng + ?Sized>(&mut self, rng: &mut R, count: usize) -> Vec<BusinessIdea> {
        (0..count)
            .filter_map(|_| self.pick(rng).cloned())
            .collect()
    }
}
