//! Scheduler configuration.
//!
//! Every search constant is tunable. Configuration can be built in code or
//! loaded from TOML; missing keys take their defaults.
//!
//! # Example
//!
//! ```
//! use retake_schedule::config::SchedulerConfig;
//! use retake_schedule::models::ExamDuration;
//!
//! let config = SchedulerConfig::from_toml_str(r#"
//!     duration = 60
//!     random_restarts = 200
//!     random_seed = 7
//! "#).unwrap();
//!
//! assert_eq!(config.duration, ExamDuration::Sixty);
//! assert_eq!(config.random_restarts, 200);
//! assert_eq!(config.slot_search_bound, 150);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::ExamDuration;

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Search and placement parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SchedulerConfig {
    /// Exam length; selects the weekly slot pattern.
    pub duration: ExamDuration,

    /// Slot indices scanned per subject before giving up.
    pub slot_search_bound: u32,

    /// Maximum exams a student may sit on one calendar day.
    pub daily_exam_limit: usize,

    /// Shuffled attempts run after the deterministic ones.
    pub random_restarts: usize,

    /// Maximum number of ranked timetables returned.
    pub shortlist_size: usize,

    /// Base seed for the restart streams. `None` draws one from OS entropy.
    pub random_seed: Option<u64>,

    /// Run restarts on the rayon thread pool.
    pub parallel: bool,

    /// Budget after which remaining restarts are skipped.
    pub time_limit_ms: Option<u64>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            duration: ExamDuration::Ninety,
            slot_search_bound: 150,
            daily_exam_limit: 2,
            random_restarts: 1000,
            shortlist_size: 10,
            random_seed: None,
            parallel: true,
            time_limit_ms: None,
        }
    }
}

impl SchedulerConfig {
    /// Creates a default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file can't be read, contains invalid TOML, or
    /// fails [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slot_search_bound == 0 {
            return Err(ConfigError::Invalid(
                "slot_search_bound must be at least 1".into(),
            ));
        }
        if self.daily_exam_limit == 0 {
            return Err(ConfigError::Invalid(
                "daily_exam_limit must be at least 1".into(),
            ));
        }
        if self.shortlist_size == 0 {
            return Err(ConfigError::Invalid(
                "shortlist_size must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Sets the exam duration.
    pub fn with_duration(mut self, duration: ExamDuration) -> Self {
        self.duration = duration;
        self
    }

    /// Sets the per-subject slot search bound.
    pub fn with_slot_search_bound(mut self, bound: u32) -> Self {
        self.slot_search_bound = bound;
        self
    }

    /// Sets the per-student daily exam limit.
    pub fn with_daily_exam_limit(mut self, limit: usize) -> Self {
        self.daily_exam_limit = limit;
        self
    }

    /// Sets the number of random restarts.
    pub fn with_restarts(mut self, restarts: usize) -> Self {
        self.random_restarts = restarts;
        self
    }

    /// Sets the shortlist size.
    pub fn with_shortlist_size(mut self, size: usize) -> Self {
        self.shortlist_size = size;
        self
    }

    /// Sets the base random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Enables or disables parallel restarts.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the restart time budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit_ms = Some(limit.as_millis() as u64);
        self
    }

    /// The restart time budget, if configured.
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_ms.map(Duration::from_millis)
    }
}
