//! Timing and size knobs for the lessons.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::TourError;

/// Lesson configuration.
///
/// Every field has a default, so a config file only needs the keys it changes:
///
/// ```json
/// { "fast_interval_ms": 100, "run_for_ms": 3000 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TourConfig {
    /// Number of messages the handoff producer sends.
    pub handoff_messages: usize,

    /// Pause after each handoff send.
    pub handoff_interval_ms: u64,

    /// Capacity used by the buffered-channel lesson.
    pub buffer_capacity: usize,

    /// Fan-in: interval of the fast producer.
    pub fast_interval_ms: u64,

    /// Fan-in: interval of the slow producer.
    pub slow_interval_ms: u64,

    /// Pause between counter prints.
    pub counter_interval_ms: u64,

    /// How long a channel operation may stay blocked before it is reported as a deadlock.
    pub stall_timeout_ms: u64,

    /// Upper bound for lessons that otherwise never end. `None` runs until the process exits.
    pub run_for_ms: Option<u64>,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            handoff_messages: 6,
            handoff_interval_ms: 500,
            buffer_capacity: 2,
            fast_interval_ms: 500,
            slow_interval_ms: 2000,
            counter_interval_ms: 500,
            stall_timeout_ms: 3000,
            run_for_ms: None,
        }
    }
}

impl TourConfig {
    pub fn from_json_str(s: &str) -> Result<Self, TourError> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, TourError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Load from `path` if given, otherwise defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, TourError> {
        match path {
            Some(p) => {
                tracing::debug!(path = %p.display(), "loading config");
                Self::from_json_file(p)
            }
            None => Ok(Self::default()),
        }
    }

    /// Reject combinations that would make a healthy lesson look deadlocked.
    ///
    /// A handoff send waits one `handoff_interval_ms` before the next one, so the
    /// receiver's stall timeout has to be longer than that pause.
    pub fn validate(&self) -> Result<(), TourError> {
        if self.stall_timeout_ms <= self.handoff_interval_ms {
            return Err(TourError::InvalidConfig(format!(
                "stall_timeout_ms ({}) must be greater than handoff_interval_ms ({})",
                self.stall_timeout_ms, self.handoff_interval_ms
            )));
        }
        Ok(())
    }

    pub fn handoff_interval(&self) -> Duration {
        Duration::from_millis(self.handoff_interval_ms)
    }

    pub fn fast_interval(&self) -> Duration {
        Duration::from_millis(self.fast_interval_ms)
    }

    pub fn slow_interval(&self) -> Duration {
        Duration::from_millis(self.slow_interval_ms)
    }

    pub fn counter_interval(&self) -> Duration {
        Duration::from_millis(self.counter_interval_ms)
    }

    pub fn stall_timeout(&self) -> Duration {
        Duration::from_millis(self.stall_timeout_ms)
    }

    pub fn run_for(&self) -> Option<Duration> {
        self.run_for_ms.map(Duration::from_millis)
    }
}
