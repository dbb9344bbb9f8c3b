//! Multi-start search over subject orderings.
//!
//! # Strategy
//!
//! 1. Two deterministic orderings: by size, then by conflict degree.
//! 2. `random_restarts` shuffled orderings.
//!
//! Every ordering is an independent [`GreedyAssigner`] attempt. Restart `i`
//! shuffles with its own ChaCha stream (`base seed`, stream `i`), so the
//! attempt list depends only on the seed, whether restarts run on the rayon
//! pool or sequentially.

use std::time::Instant;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::{debug, info};

use super::{rank_and_dedupe, GreedyAssigner};
use crate::config::SchedulerConfig;
use crate::dispatching::{by_conflict_degree, by_size, OrderingContext, RuleEngine};
use crate::error::ScheduleError;
use crate::merge::merge_math_subjects;
use crate::models::{ConflictRules, ScheduleResult, Subject};
use crate::validation::validate_subjects;

/// Generates orderings and runs one attempt per ordering.
#[derive(Debug, Clone)]
pub struct SearchDriver {
    assigner: GreedyAssigner,
    random_restarts: usize,
    random_seed: Option<u64>,
    parallel: bool,
    time_limit_ms: Option<u64>,
}

impl SearchDriver {
    /// Creates a driver with 1000 restarts, an entropy seed and parallel
    /// execution.
    pub fn new(assigner: GreedyAssigner) -> Self {
        Self {
            assigner,
            random_restarts: 1000,
            random_seed: None,
            parallel: true,
            time_limit_ms: None,
        }
    }

    /// Creates a driver from configuration.
    pub fn from_config(config: &SchedulerConfig, rules: ConflictRules) -> Self {
        Self {
            assigner: GreedyAssigner::from_config(config, rules),
            random_restarts: config.random_restarts,
            random_seed: config.random_seed,
            parallel: config.parallel,
            time_limit_ms: config.time_limit_ms,
        }
    }

    /// Sets the number of shuffled attempts.
    pub fn with_restarts(mut self, restarts: usize) -> Self {
        self.random_restarts = restarts;
        self
    }

    /// Sets the base seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Enables or disables the rayon pool for restarts.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Runs every attempt and returns the raw, unranked results.
    ///
    /// Deterministic attempts come first, then restarts in stream order.
    /// Restarts started after the time limit are skipped.
    ///
    /// Subject names must be unique, as checked by [`validate_subjects`];
    /// [`ExamScheduler::schedule`] enforces this before searching.
    pub fn search(&self, subjects: &[Subject]) -> Vec<ScheduleResult> {
        debug_assert!(
            validate_subjects(subjects).is_ok(),
            "search requires unique, non-empty subject names"
        );
        let start = Instant::now();
        let seed = self.random_seed.unwrap_or_else(rand::random);

        info!(
            event = "search_start",
            subjects = subjects.len(),
            restarts = self.random_restarts,
            seed,
            duration = self.assigner.calendar().duration().minutes(),
        );

        let context = OrderingContext::from_subjects(subjects);
        let mut results = Vec::with_capacity(2 + self.random_restarts);
        let strategies = [
            ("by_size", by_size()),
            ("by_conflict_degree", by_conflict_degree()),
        ];
        for (strategy, engine) in strategies {
            let result = self.ordered_attempt(subjects, &context, &engine);
            debug!(
                strategy,
                unassigned = result.unassignable.len(),
                distinct_days = result.total_distinct_days,
                "deterministic attempt"
            );
            results.push(result);
        }

        let restart = |i: usize| self.restart_attempt(subjects, seed, i, start);
        let restarts: Vec<Option<ScheduleResult>> = if self.parallel {
            (0..self.random_restarts).into_par_iter().map(restart).collect()
        } else {
            (0..self.random_restarts).map(restart).collect()
        };
        let skipped = restarts.iter().filter(|r| r.is_none()).count();
        results.extend(restarts.into_iter().flatten());

        if skipped > 0 {
            debug!(skipped, "time limit reached, restarts skipped");
        }
        info!(
            event = "search_end",
            attempts = results.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
        );
        results
    }

    fn ordered_attempt(
        &self,
        subjects: &[Subject],
        context: &OrderingContext,
        engine: &RuleEngine,
    ) -> ScheduleResult {
        let ordered: Vec<&Subject> = engine
            .sort_indices(subjects, context)
            .into_iter()
            .map(|i| &subjects[i])
            .collect();
        self.assigner.run_attempt(&ordered)
    }

    fn restart_attempt(
        &self,
        subjects: &[Subject],
        seed: u64,
        index: usize,
        start: Instant,
    ) -> Option<ScheduleResult> {
        if let Some(limit) = self.time_limit_ms {
            if start.elapsed().as_millis() as u64 >= limit {
                return None;
            }
        }

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_stream(index as u64);

        let mut ordered: Vec<&Subject> = subjects.iter().collect();
        ordered.shuffle(&mut rng);
        Some(self.assigner.run_attempt(&ordered))
    }
}

/// End-to-end scheduling: validate, merge math subjects, search, rank.
///
/// # Example
///
/// ```
/// use retake_schedule::config::SchedulerConfig;
/// use retake_schedule::models::Subject;
/// use retake_schedule::scheduler::ExamScheduler;
///
/// let subjects = vec![
///     Subject::new("MATES").with_students(["1", "2"]),
///     Subject::new("MATES CS").with_student("3"),
///     Subject::new("ANGLÈS").with_students(["1", "3"]),
/// ];
/// let config = SchedulerConfig::new().with_restarts(50).with_random_seed(7);
///
/// let shortlist = ExamScheduler::new(config).schedule(subjects).unwrap();
/// let best = &shortlist[0];
/// assert!(best.is_complete());
/// assert!(best.exam_for("MATEMÀTIQUES / MATES CS").is_some());
/// ```
#[derive(Debug, Clone)]
pub struct ExamScheduler {
    config: SchedulerConfig,
    rules: ConflictRules,
}

impl ExamScheduler {
    /// Creates a scheduler with the standard incompatibility rules.
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            config,
            rules: ConflictRules::standard(),
        }
    }

    /// Replaces the incompatibility rules.
    pub fn with_rules(mut self, rules: ConflictRules) -> Self {
        self.rules = rules;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// The active incompatibility rules.
    pub fn rules(&self) -> &ConflictRules {
        &self.rules
    }

    /// Produces a ranked shortlist of distinct timetables.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidInput`] for blank or duplicate subject
    /// names and [`ScheduleError::Config`] for out-of-range settings.
    /// Unplaceable subjects are not errors; they are reported per result.
    pub fn schedule(&self, subjects: Vec<Subject>) -> Result<Vec<ScheduleResult>, ScheduleError> {
        self.config.validate()?;
        validate_subjects(&subjects)?;

        let subjects = merge_math_subjects(subjects);
        let results = SearchDriver::from_config(&self.config, self.rules.clone()).search(&subjects);
        Ok(rank_and_dedupe(results, self.config.shortlist_size))
    }
}
