//! Input validation and timetable audits.
//!
//! [`validate_subjects`] checks the caller's contract before scheduling:
//! - Blank subject names
//! - Duplicate subject names
//!
//! Empty student sets are accepted; such subjects are always placeable.
//!
//! [`audit_schedule`] re-derives every hard constraint from scratch for a
//! finished [`ScheduleResult`], independent of the assigner's incremental
//! bookkeeping. An empty violation list means the timetable is valid.

use std::collections::{BTreeMap, HashMap, HashSet};

use thiserror::Error;

use crate::models::{
    ConflictRules, DayKey, ScheduleResult, ScheduledExam, SlotCalendar, Subject, Violation,
    ViolationType,
};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two subjects share the same name.
    DuplicateName,
    /// A subject name is empty or whitespace.
    EmptyName,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the subject list for a scheduling run.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_subjects(subjects: &[Subject]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut names = HashSet::new();

    for (i, subject) in subjects.iter().enumerate() {
        if subject.name.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyName,
                format!("Subject #{} has no name", i + 1),
            ));
            continue;
        }
        if !names.insert(subject.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate subject: {}", subject.name),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Checks a timetable against every hard constraint.
///
/// `subjects` must be the list the attempt was run on (after merging).
///
/// Checks:
/// 1. Every subject appears exactly once, placed or unassignable
/// 2. No student sits two exams in the same slot
/// 3. No student exceeds `daily_limit` exams on one calendar day
/// 4. No two incompatible subjects share a calendar day
/// 5. `used_slots` and `total_distinct_days` match the placed exams
pub fn audit_schedule(
    result: &ScheduleResult,
    subjects: &[Subject],
    calendar: &SlotCalendar,
    rules: &ConflictRules,
    daily_limit: usize,
) -> Vec<Violation> {
    let mut violations = Vec::new();

    check_coverage(result, subjects, &mut violations);

    let mut by_slot: BTreeMap<u32, Vec<&ScheduledExam>> = BTreeMap::new();
    let mut by_day: BTreeMap<DayKey, Vec<&ScheduledExam>> = BTreeMap::new();
    for exam in &result.exams {
        by_slot.entry(exam.slot_id).or_default().push(exam);
        by_day
            .entry(calendar.day_key(exam.slot_id))
            .or_default()
            .push(exam);
    }

    for (slot_id, exams) in &by_slot {
        for (i, a) in exams.iter().enumerate() {
            for b in &exams[i + 1..] {
                if let Some(student) = a.students.intersection(&b.students).next() {
                    violations.push(Violation::new(
                        ViolationType::DoubleBooking,
                        student.clone(),
                        format!(
                            "Student {student} has {} and {} in slot {slot_id}",
                            a.subject, b.subject
                        ),
                    ));
                }
            }
        }
    }

    for (day, exams) in &by_day {
        let mut per_student: BTreeMap<&str, usize> = BTreeMap::new();
        for exam in exams {
            for student in &exam.students {
                *per_student.entry(student.as_str()).or_insert(0) += 1;
            }
        }
        for (student, count) in per_student {
            if count > daily_limit {
                violations.push(Violation::new(
                    ViolationType::DailyLimitExceeded,
                    student,
                    format!(
                        "Student {student} has {count} exams on {} of week {}",
                        day.day.label(),
                        day.week + 1
                    ),
                ));
            }
        }

        for (i, a) in exams.iter().enumerate() {
            for b in &exams[i + 1..] {
                if rules.incompatible(&a.subject, &b.subject) {
                    violations.push(Violation::new(
                        ViolationType::IncompatibleSameDay,
                        a.subject.clone(),
                        format!(
                            "{} and {} share {} of week {}",
                            a.subject,
                            b.subject,
                            day.day.label(),
                            day.week + 1
                        ),
                    ));
                }
            }
        }
    }

    let expected: Vec<u32> = by_slot.keys().copied().collect();
    let listed: Vec<u32> = result.used_slots.iter().map(|s| s.id).collect();
    if expected != listed {
        violations.push(Violation::new(
            ViolationType::SlotListMismatch,
            "used_slots",
            format!("Expected slots {expected:?}, found {listed:?}"),
        ));
    }
    if let Some(slot) = result
        .used_slots
        .iter()
        .find(|s| **s != calendar.slot(s.id))
    {
        violations.push(Violation::new(
            ViolationType::SlotListMismatch,
            "used_slots",
            format!("Slot {} does not match the calendar", slot.id),
        ));
    }
    if by_day.len() != result.total_distinct_days {
        violations.push(Violation::new(
            ViolationType::SlotListMismatch,
            "total_distinct_days",
            format!(
                "Exams span {} days, result reports {}",
                by_day.len(),
                result.total_distinct_days
            ),
        ));
    }

    violations
}

fn check_coverage(result: &ScheduleResult, subjects: &[Subject], violations: &mut Vec<Violation>) {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    let reported = result
        .exams
        .iter()
        .map(|e| e.subject.as_str())
        .chain(result.unassignable.iter().map(String::as_str));
    for name in reported {
        *seen.entry(name).or_insert(0) += 1;
    }

    for subject in subjects {
        match seen.get(subject.name.as_str()).copied().unwrap_or(0) {
            0 => violations.push(Violation::new(
                ViolationType::MissingSubject,
                subject.name.clone(),
                format!("Subject {} is neither placed nor unassignable", subject.name),
            )),
            1 => {}
            n => violations.push(Violation::new(
                ViolationType::DuplicateSubject,
                subject.name.clone(),
                format!("Subject {} is reported {n} times", subject.name),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExamDuration;

    fn subject(name: &str, students: &[&str]) -> Subject {
        Subject::new(name).with_students(students.iter().copied())
    }

    fn exam(subject: &Subject, slot_id: u32) -> ScheduledExam {
        ScheduledExam::new(subject.name.clone(), slot_id, subject.students.clone())
    }

    fn result(exams: Vec<ScheduledExam>, calendar: &SlotCalendar) -> ScheduleResult {
        let mut ids: Vec<u32> = exams.iter().map(|e| e.slot_id).collect();
        ids.sort_unstable();
        ids.dedup();
        let days: HashSet<_> = ids.iter().map(|&id| calendar.day_key(id)).collect();
        ScheduleResult {
            exams,
            used_slots: ids.iter().map(|&id| calendar.slot(id)).collect(),
            total_distinct_days: days.len(),
            unassignable: Vec::new(),
        }
    }

    fn audit(r: &ScheduleResult, subjects: &[Subject], calendar: &SlotCalendar) -> Vec<Violation> {
        audit_schedule(r, subjects, calendar, &ConflictRules::standard(), 2)
    }

    fn kinds(violations: &[Violation]) -> Vec<ViolationType> {
        violations.iter().map(|v| v.violation_type.clone()).collect()
    }

    #[test]
    fn test_valid_subjects() {
        let subjects = vec![subject("MATES", &["1"]), subject("MÚSICA", &[])];
        assert!(validate_subjects(&subjects).is_ok());
        assert!(validate_subjects(&[]).is_ok());
    }

    #[test]
    fn test_duplicate_name() {
        let subjects = vec![subject("Mates", &["1"]), subject("MATES ", &["2"])];
        let errors = validate_subjects(&subjects).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::DuplicateName);
        assert_eq!(errors[0].to_string(), "Duplicate subject: MATES");
    }

    #[test]
    fn test_empty_name() {
        let subjects = vec![subject("  ", &["1"]), subject("", &["2"])];
        let errors = validate_subjects(&subjects).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| e.kind == ValidationErrorKind::EmptyName));
    }

    #[test]
    fn test_audit_clean() {
        let cal = SlotCalendar::new(ExamDuration::Ninety);
        let subjects = vec![subject("MATES", &["A", "B"]), subject("CASTELLÀ", &["A"])];
        let r = result(vec![exam(&subjects[0], 0), exam(&subjects[1], 1)], &cal);
        assert!(audit(&r, &subjects, &cal).is_empty());
    }

    #[test]
    fn test_audit_double_booking() {
        let cal = SlotCalendar::new(ExamDuration::Ninety);
        let subjects = vec![subject("ANGLÈS", &["A"]), subject("HISTÒRIA", &["A"])];
        let r = result(vec![exam(&subjects[0], 0), exam(&subjects[1], 0)], &cal);
        let v = audit(&r, &subjects, &cal);
        assert_eq!(kinds(&v), vec![ViolationType::DoubleBooking]);
        assert_eq!(v[0].entity_id, "A");
    }

    #[test]
    fn test_audit_daily_limit() {
        let cal = SlotCalendar::new(ExamDuration::Sixty);
        let subjects = vec![
            subject("ANGLÈS", &["A"]),
            subject("HISTÒRIA", &["A"]),
            subject("FILOSOFIA", &["A"]),
        ];
        // Tuesday slots 2, 3, 4
        let r = result(
            vec![
                exam(&subjects[0], 2),
                exam(&subjects[1], 3),
                exam(&subjects[2], 4),
            ],
            &cal,
        );
        let v = audit(&r, &subjects, &cal);
        assert_eq!(kinds(&v), vec![ViolationType::DailyLimitExceeded]);
        assert!(v[0].message.contains("Dimarts"));
    }

    #[test]
    fn test_audit_incompatible_same_day() {
        let cal = SlotCalendar::new(ExamDuration::Ninety);
        let subjects = vec![subject("QUÍMICA", &["A"]), subject("BIOLOGIA", &["B"])];
        // Tuesday slots 1 and 2
        let r = result(vec![exam(&subjects[0], 1), exam(&subjects[1], 2)], &cal);
        let v = audit(&r, &subjects, &cal);
        assert_eq!(kinds(&v), vec![ViolationType::IncompatibleSameDay]);
    }

    #[test]
    fn test_audit_coverage() {
        let cal = SlotCalendar::new(ExamDuration::Ninety);
        let subjects = vec![subject("ANGLÈS", &["A"]), subject("HISTÒRIA", &["B"])];
        let mut r = result(vec![exam(&subjects[0], 0)], &cal);
        r.unassignable.push("ANGLÈS".into());
        let v = audit(&r, &subjects, &cal);
        assert_eq!(
            kinds(&v),
            vec![ViolationType::DuplicateSubject, ViolationType::MissingSubject]
        );
    }

    #[test]
    fn test_audit_slot_list_mismatch() {
        let cal = SlotCalendar::new(ExamDuration::Ninety);
        let subjects = vec![subject("ANGLÈS", &["A"])];
        let mut r = result(vec![exam(&subjects[0], 0)], &cal);
        r.used_slots.push(cal.slot(5));
        r.total_distinct_days = 3;
        let v = audit(&r, &subjects, &cal);
        assert_eq!(
            kinds(&v),
            vec![ViolationType::SlotListMismatch, ViolationType::SlotListMismatch]
        );
    }
}
