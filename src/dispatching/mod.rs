//! Ordering rules for assignment attempts.
//!
//! The greedy assigner is order-sensitive: the subject order is the only
//! knob the search varies. This module provides priority rules that score
//! subjects and a composable rule engine that turns scores into an order.
//!
//! # Usage
//!
//! ```
//! use retake_schedule::dispatching::{rules, OrderingContext, RuleEngine};
//! use retake_schedule::models::Subject;
//!
//! let subjects = vec![
//!     Subject::new("ANGLÈS").with_students(["1"]),
//!     Subject::new("QUÍMICA").with_students(["1", "2"]),
//! ];
//! let context = OrderingContext::from_subjects(&subjects);
//! let engine = RuleEngine::new()
//!     .with_rule(rules::MostConflicts)
//!     .with_tie_breaker(rules::LargestFirst);
//!
//! let order = engine.sort_indices(&subjects, &context);
//! assert_eq!(subjects[order[0]].name, "QUÍMICA");
//! ```

mod context;
mod engine;
pub mod rules;

pub use context::OrderingContext;
pub use engine::RuleEngine;

use crate::models::Subject;
use std::fmt::Debug;

/// Score returned by a dispatching rule.
///
/// Lower scores = higher priority (placed first).
pub type RuleScore = f64;

/// A rule that evaluates how early a subject should be placed.
///
/// # Score Convention
/// **Lower score = higher priority.** Rules favouring "bigger" subjects
/// return negated magnitudes.
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "LARGEST").
    fn name(&self) -> &'static str;

    /// Evaluates the priority of a subject.
    fn evaluate(&self, subject: &Subject, context: &OrderingContext) -> RuleScore;
}

/// Orders subjects by descending student count.
pub fn by_size() -> RuleEngine {
    RuleEngine::new().with_rule(rules::LargestFirst)
}

/// Orders subjects by descending conflict degree, ties by descending size.
pub fn by_conflict_degree() -> RuleEngine {
    RuleEngine::new()
        .with_rule(rules::MostConflicts)
        .with_tie_breaker(rules::LargestFirst)
}
