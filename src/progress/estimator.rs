use serde::{Deserialize, Serialize};

/// Highest percentage reported while a build is still running.
pub const RUNNING_CEILING: f64 = 90.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressPhase {
    #[default]
    Idle,
    Running,
    Completed,
    Failed,
}

impl ProgressPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProgressPhase::Completed | ProgressPhase::Failed)
    }
}

/// Snapshot published to observers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressState {
    pub percent_complete: u8,
    pub phase: ProgressPhase,
}

/// Pure progress state machine.
///
/// `Idle -> Running -> Completed | Failed`. While running the value is
/// non-decreasing and clamped to [`RUNNING_CEILING`]; terminal phases report
/// 100 and ignore further input.
#[derive(Debug, Clone)]
pub struct ProgressEstimator {
    per_section: f64,
    tick_fraction: f64,
    value: f64,
    phase: ProgressPhase,
}

impl ProgressEstimator {
    pub fn new(sections: usize, tick_fraction: f64) -> Self {
        let per_section = RUNNING_CEILING / sections.max(1) as f64;
        Self {
            per_section,
            tick_fraction: tick_fraction.clamp(f64::EPSILON, 1.0),
            value: 0.0,
            phase: ProgressPhase::Idle,
        }
    }

    pub fn state(&self) -> ProgressState {
        let percent_complete = match self.phase {
            ProgressPhase::Completed | ProgressPhase::Failed => 100,
            _ => self.value.floor() as u8,
        };
        ProgressState {
            percent_complete,
            phase: self.phase,
        }
    }

    pub fn phase(&self) -> ProgressPhase {
        self.phase
    }

    /// Enter `Running` at 0%. No effect outside `Idle`.
    pub fn start(&mut self) -> ProgressState {
        if self.phase == ProgressPhase::Idle {
            self.phase = ProgressPhase::Running;
            self.value = 0.0;
        }
        self.state()
    }

    /// Advance by one tick's worth of a section allocation.
    pub fn tick(&mut self) -> ProgressState {
        if self.phase == ProgressPhase::Running {
            self.value = (self.value + self.per_section * self.tick_fraction).min(RUNNING_CEILING);
        }
        self.state()
    }

    /// Raise the floor to the allocation of `completed` finished sections.
    pub fn section_completed(&mut self, completed: usize) -> ProgressState {
        if self.phase == ProgressPhase::Running {
            let floor = (self.per_section * completed as f64).min(RUNNING_CEILING);
            self.value = self.value.max(floor);
        }
        self.state()
    }

    pub fn complete(&mut self) -> ProgressState {
        self.finish(ProgressPhase::Completed)
    }

    pub fn fail(&mut self) -> ProgressState {
        self.finish(ProgressPhase::Failed)
    }

    fn finish(&mut self, phase: ProgressPhase) -> ProgressState {
        if !self.phase.is_terminal() {
            self.phase = phase;
            self.value = 100.0;
        }
        self.state()
    }
}
