//! Subject (retake exam) model.
//!
//! A subject is one exam sitting identified by its normalized name, with the
//! set of students required to sit it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Stable student identifier assigned by the data source.
pub type StudentId = String;

/// A retake exam to be scheduled.
///
/// Names are upper-cased on construction; they double as category keys for
/// [`ConflictRules`](super::ConflictRules).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Upper-cased subject name.
    pub name: String,
    /// Students required to sit this exam.
    pub students: BTreeSet<StudentId>,
}

impl Subject {
    /// Creates a subject with no students.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            name: name.as_ref().trim().to_uppercase(),
            students: BTreeSet::new(),
        }
    }

    /// Adds a student.
    pub fn with_student(mut self, student: impl Into<StudentId>) -> Self {
        self.students.insert(student.into());
        self
    }

    /// Adds several students.
    pub fn with_students<I, S>(mut self, students: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StudentId>,
    {
        self.students.extend(students.into_iter().map(Into::into));
        self
    }

    /// Number of enrolled students.
    #[inline]
    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    /// Number of students shared with another subject.
    pub fn shared_students(&self, other: &Subject) -> usize {
        self.students.intersection(&other.students).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_builder() {
        let s = Subject::new("  Química ")
            .with_student("1")
            .with_students(["2", "3"])
            .with_student("1");
        assert_eq!(s.name, "QUÍMICA");
        assert_eq!(s.student_count(), 3);
    }

    #[test]
    fn test_shared_students() {
        let a = Subject::new("A").with_students(["1", "2", "3"]);
        let b = Subject::new("B").with_students(["2", "3", "4"]);
        let c = Subject::new("C");
        assert_eq!(a.shared_students(&b), 2);
        assert_eq!(b.shared_students(&a), 2);
        assert_eq!(a.shared_students(&c), 0);
    }
}
