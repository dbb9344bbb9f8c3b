//! Mathematics-family merging.
//!
//! All mathematics variants must be examined at the same time. Rather than
//! teach the assigner a "must coincide" constraint, every math-family subject
//! is folded into one combined subject before scheduling, so co-placement
//! follows from the subject being a single exam.

use std::collections::BTreeSet;

use crate::models::{is_math_subject, Subject};

/// Name of the combined mathematics subject.
///
/// Contains `MATEMÀTIQUES` so the category rules still recognise it.
pub const MERGED_MATH_NAME: &str = "MATEMÀTIQUES / MATES CS";

/// Folds all math-family subjects into one.
///
/// With fewer than two math subjects the input is returned unchanged.
/// Otherwise the non-math subjects keep their relative order and the
/// combined subject, holding the union of all math students, is appended.
pub fn merge_math_subjects(subjects: Vec<Subject>) -> Vec<Subject> {
    let math_count = subjects.iter().filter(|s| is_math_subject(&s.name)).count();
    if math_count < 2 {
        return subjects;
    }

    let (math, mut others): (Vec<Subject>, Vec<Subject>) = subjects
        .into_iter()
        .partition(|s| is_math_subject(&s.name));

    let students: BTreeSet<_> = math.into_iter().flat_map(|s| s.students).collect();

    tracing::debug!(
        merged = math_count,
        students = students.len(),
        "merged math-family subjects"
    );

    others.push(Subject {
        name: MERGED_MATH_NAME.to_string(),
        students,
    });
    others
}
