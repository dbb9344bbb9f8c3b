//! Rule engine for multi-criteria subject ordering.
//!
//! Applies rules in sequence: the next rule is consulted only when the
//! previous ones tie. Sorting is stable, so subjects tied on every rule
//! keep their input order.

use std::sync::Arc;

use super::{DispatchingRule, OrderingContext, RuleScore};
use crate::models::Subject;

/// A composable rule engine for subject prioritization.
///
/// # Example
/// ```
/// use retake_schedule::dispatching::{rules, RuleEngine};
///
/// let engine = RuleEngine::new()
///     .with_rule(rules::MostConflicts)
///     .with_tie_breaker(rules::LargestFirst);
/// assert_eq!(engine.rule_names(), vec!["CONFLICTS", "LARGEST"]);
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn DispatchingRule>>,
    epsilon: f64,
}

impl RuleEngine {
    /// Creates an empty rule engine.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            epsilon: 1e-9,
        }
    }

    /// Adds a primary rule.
    pub fn with_rule<R: DispatchingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Adds a tie-breaking rule, consulted when earlier rules tie.
    pub fn with_tie_breaker<R: DispatchingRule + 'static>(self, rule: R) -> Self {
        self.with_rule(rule)
    }

    /// Names of the configured rules, in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Sorts subjects by priority (highest priority first).
    ///
    /// Returns indices into the original subject slice.
    pub fn sort_indices(&self, subjects: &[Subject], context: &OrderingContext) -> Vec<usize> {
        let scores: Vec<Vec<RuleScore>> = subjects
            .iter()
            .map(|s| self.evaluate(s, context))
            .collect();

        let mut indices: Vec<usize> = (0..subjects.len()).collect();
        indices.sort_by(|&a, &b| self.compare_sequential(&scores[a], &scores[b]));
        indices
    }

    /// Evaluates a single subject and returns scores from each rule.
    pub fn evaluate(&self, subject: &Subject, context: &OrderingContext) -> Vec<RuleScore> {
        self.rules
            .iter()
            .map(|rule| rule.evaluate(subject, context))
            .collect()
    }

    fn compare_sequential(&self, a: &[RuleScore], b: &[RuleScore]) -> std::cmp::Ordering {
        for (score_a, score_b) in a.iter().zip(b) {
            if (score_a - score_b).abs() > self.epsilon {
                return score_a
                    .partial_cmp(score_b)
                    .unwrap_or(std::cmp::Ordering::Equal);
            }
        }
        std::cmp::Ordering::Equal
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatching::{by_conflict_degree, by_size, rules};

    fn subject(name: &str, students: &[&str]) -> Subject {
        Subject::new(name).with_students(students.iter().copied())
    }

    fn names(subjects: &[Subject], order: &[usize]) -> Vec<String> {
        order.iter().map(|&i| subjects[i].name.clone()).collect()
    }

    #[test]
    fn test_by_size_ordering() {
        let subjects = vec![
            subject("SMALL", &["1"]),
            subject("LARGE", &["1", "2", "3"]),
            subject("MEDIUM", &["4", "5"]),
        ];
        let ctx = OrderingContext::from_subjects(&subjects);
        let order = by_size().sort_indices(&subjects, &ctx);
        assert_eq!(names(&subjects, &order), ["LARGE", "MEDIUM", "SMALL"]);
    }

    #[test]
    fn test_by_conflict_with_size_tie_breaker() {
        // A∩B = {1}; C and D share nothing, D larger than C
        let subjects = vec![
            subject("C", &["7"]),
            subject("A", &["1", "2"]),
            subject("D", &["8", "9"]),
            subject("B", &["1"]),
        ];
        let ctx = OrderingContext::from_subjects(&subjects);
        let order = by_conflict_degree().sort_indices(&subjects, &ctx);
        // A and B degree 1 (A larger), then D, C degree 0 (D larger)
        assert_eq!(names(&subjects, &order), ["A", "B", "D", "C"]);
    }

    #[test]
    fn test_stable_on_full_tie() {
        let subjects = vec![subject("Z", &["1"]), subject("Y", &["2"])];
        let ctx = OrderingContext::from_subjects(&subjects);
        let order = by_size().sort_indices(&subjects, &ctx);
        assert_eq!(order, vec![0, 1]);
    }

    #[test]
    fn test_empty_subjects() {
        let ctx = OrderingContext::new();
        assert!(by_size().sort_indices(&[], &ctx).is_empty());
    }

    #[test]
    fn test_evaluate_scores() {
        let s = subject("A", &["1", "2"]);
        let ctx = OrderingContext::new().with_conflict_degree("A", 5);
        let scores = by_conflict_degree().evaluate(&s, &ctx);
        assert_eq!(scores.len(), 2);
        assert!((scores[0] + 5.0).abs() < 1e-10);
        assert!((scores[1] + 2.0).abs() < 1e-10);
    }
}
