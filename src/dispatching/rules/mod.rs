//! Built-in ordering rules.
//!
//! # Score Convention
//! All rules return lower scores for subjects that should be placed first.
//! Placing the hardest subjects early leaves the greedy assigner the most
//! freedom for them.

use super::{DispatchingRule, OrderingContext, RuleScore};
use crate::models::Subject;

/// Largest enrolment first.
#[derive(Debug, Clone, Copy)]
pub struct LargestFirst;

impl DispatchingRule for LargestFirst {
    fn name(&self) -> &'static str {
        "LARGEST"
    }

    fn evaluate(&self, subject: &Subject, _context: &OrderingContext) -> RuleScore {
        -(subject.student_count() as f64)
    }
}

/// Highest conflict degree first.
///
/// Uses `context.conflict_degree`: the number of students the subject
/// shares with all other subjects combined.
#[derive(Debug, Clone, Copy)]
pub struct MostConflicts;

impl DispatchingRule for MostConflicts {
    fn name(&self) -> &'static str {
        "CONFLICTS"
    }

    fn evaluate(&self, subject: &Subject, context: &OrderingContext) -> RuleScore {
        -(context.conflict_degree(&subject.name) as f64)
    }
}
