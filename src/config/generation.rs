//! Section generation and progress configuration

use serde::{Deserialize, Serialize};

/// Retry and degradation policy for section generation.
///
/// # Example
///
/// ```toml
/// [generation]
/// retry_delay_ms = 1000
/// degraded_description_chars = 200
/// temperature = 0.7
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Fixed pause before the degraded retry of a failed section.
    pub retry_delay_ms: u64,
    /// Description prefix kept on degraded retries, in characters.
    pub degraded_description_chars: usize,
    pub temperature: f32,
    /// Retries allowed for the executive summary.
    pub critical_max_attempts: u32,
    /// Retries allowed for every other section.
    pub section_max_attempts: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            retry_delay_ms: 1000,
            degraded_description_chars: 200,
            temperature: 0.7,
            critical_max_attempts: 2,
            section_max_attempts: 1,
        }
    }
}

/// Progress estimator tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    pub tick_interval_ms: u64,
    /// Share of one section's allocation added per tick (0.0, 1.0].
    pub tick_fraction: f64,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 500,
            tick_fraction: 0.25,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_defaults() {
        let config = GenerationConfig::default();
        assert_eq!(config.retry_delay_ms, 1000);
        assert_eq!(config.degraded_description_chars, 200);
        assert_eq!(config.critical_max_attempts, 2);
        assert_eq!(config.section_max_attempts, 1);
        assert!((config.temperature - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn test_progress_defaults() {
        let config = ProgressConfig::default();
        assert_eq!(config.tick_interval_ms, 500);
        assert!((config.tick_fraction - 0.25).abs() < f64::EPSILON);
    }
}
