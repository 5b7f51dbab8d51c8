//! Idea command implementation

use crate::cli::{output, IdeaArgs};
use crate::ideas::{default_catalog, IdeaSelector};
use rand::Rng;

/// Handle `plancraft idea`, drawing from the built-in catalog.
pub fn handle_idea<R: Rng + ?Sized>(
    args: &IdeaArgs,
    rng: &mut R,
) -> Result<String, Box<dyn std::error::Error>> {
    let mut selector = IdeaSelector::new(default_catalog(), args.history);
    let ideas = selector.pick_many(rng, args.count);

    if args.json {
        Ok(output::format_ideas_json(&ideas)?)
    } else {
        Ok(output::format_ideas_table(&ideas))
    }
}
