//! Ordering context for dispatching rule evaluation.

use std::collections::HashMap;

use crate::models::Subject;

/// Precomputed subject statistics passed to dispatching rules.
#[derive(Debug, Clone, Default)]
pub struct OrderingContext {
    /// Conflict degree per subject: total students shared with every other
    /// subject (subject name → count).
    pub conflict_degree: HashMap<String, usize>,
}

impl OrderingContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes conflict degrees for a subject list.
    ///
    /// # Complexity
    /// O(n² · s) where n = subjects, s = students per subject.
    pub fn from_subjects(subjects: &[Subject]) -> Self {
        let mut conflict_degree = HashMap::with_capacity(subjects.len());
        for (i, a) in subjects.iter().enumerate() {
            let degree: usize = subjects
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, b)| a.shared_students(b))
                .sum();
            conflict_degree.insert(a.name.clone(), degree);
        }
        Self { conflict_degree }
    }

    /// Sets the conflict degree of a subject.
    pub fn with_conflict_degree(mut self, subject: impl Into<String>, degree: usize) -> Self {
        self.conflict_degree.insert(subject.into(), degree);
        self
    }

    /// Conflict degree of a subject (0 if unknown).
    pub fn conflict_degree(&self, subject: &str) -> usize {
        self.conflict_degree.get(subject).copied().unwrap_or(0)
    }
}
