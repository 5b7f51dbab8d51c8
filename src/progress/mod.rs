//! Tick-driven progress estimation for plan generation.
//!
//! Completion calls give no intermediate progress, so the percentage is an
//! estimate: each tick advances a share of one section's allocation, and
//! finished sections raise the floor. The value never reaches 100 until the
//! build reaches a terminal phase.

mod estimator;
mod ticker;

pub use estimator::{ProgressEstimator, ProgressPhase, ProgressState, RUNNING_CEILING};
pub use ticker::ProgressTicker;
