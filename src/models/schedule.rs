//! Timetable (solution) model.
//!
//! A `ScheduleResult` is the outcome of one assignment attempt: the exams
//! that were placed, the slots they occupy, and the subjects that could not
//! be placed within the search bound. Failures are data, not errors.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{Slot, StudentId};

/// A subject placed in a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledExam {
    /// Subject name.
    pub subject: String,
    /// Slot index the exam occupies.
    pub slot_id: u32,
    /// Students sitting the exam.
    pub students: BTreeSet<StudentId>,
}

impl ScheduledExam {
    /// Creates a scheduled exam.
    pub fn new(subject: impl Into<String>, slot_id: u32, students: BTreeSet<StudentId>) -> Self {
        Self {
            subject: subject.into(),
            slot_id,
            students,
        }
    }
}

/// Outcome of one assignment attempt.
///
/// Every input subject appears exactly once, either in `exams` or in
/// `unassignable`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleResult {
    /// Placed exams, in placement order.
    pub exams: Vec<ScheduledExam>,
    /// Occupied slots, ascending by id, each id once.
    pub used_slots: Vec<Slot>,
    /// Number of distinct calendar days holding at least one exam.
    pub total_distinct_days: usize,
    /// Subjects that exhausted the slot search bound.
    pub unassignable: Vec<String>,
}

impl ScheduleResult {
    /// Whether every subject was placed.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.unassignable.is_empty()
    }

    /// Highest occupied slot id, or 0 when nothing was placed.
    pub fn last_slot_id(&self) -> u32 {
        self.used_slots.last().map(|s| s.id).unwrap_or(0)
    }

    /// Number of placed exams.
    #[inline]
    pub fn exam_count(&self) -> usize {
        self.exams.len()
    }

    /// Finds the exam for a subject.
    pub fn exam_for(&self, subject: &str) -> Option<&ScheduledExam> {
        self.exams.iter().find(|e| e.subject == subject)
    }

    /// Exams held in a given slot.
    pub fn exams_in_slot(&self, slot_id: u32) -> impl Iterator<Item = &ScheduledExam> {
        self.exams.iter().filter(move |e| e.slot_id == slot_id)
    }

    /// Looks up an occupied slot by id.
    pub fn slot(&self, slot_id: u32) -> Option<&Slot> {
        self.used_slots
            .binary_search_by_key(&slot_id, |s| s.id)
            .ok()
            .map(|i| &self.used_slots[i])
    }
}

/// A broken timetable invariant found by an audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Related entity (subject name or student id).
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Classification of timetable violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// Two exams in the same slot share a student.
    DoubleBooking,
    /// A student sits more exams on one day than allowed.
    DailyLimitExceeded,
    /// Two incompatible subjects share a calendar day.
    IncompatibleSameDay,
    /// An input subject is neither placed nor reported unassignable.
    MissingSubject,
    /// A subject is reported more than once.
    DuplicateSubject,
    /// `used_slots` does not match the slots occupied by `exams`.
    SlotListMismatch,
}

impl Violation {
    /// Creates a violation.
    pub fn new(
        violation_type: ViolationType,
        entity_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            violation_type,
            entity_id: entity_id.into(),
            message: message.into(),
        }
    }
}
