//! First-fit greedy exam placement.
//!
//! # Algorithm
//!
//! For each subject, in the given order:
//! 1. Scan slot indices `0..bound`.
//! 2. Reject a slot if an exam already in it shares a student (overlap),
//!    if any student would exceed the daily limit on that calendar day, or
//!    if an exam already on that day is category-incompatible.
//! 3. Place the subject in the first slot passing all checks; otherwise
//!    record it as unassignable and continue with the next subject.
//!
//! The attempt keeps per-slot, per-day and per-student-day indices so each
//! check only looks at exams that can actually collide.
//!
//! # Complexity
//! O(n · b · (e + s)) where n = subjects, b = slot bound, e = exams sharing a
//! slot or day, s = students per subject.

use std::collections::{BTreeMap, HashMap};

use crate::config::SchedulerConfig;
use crate::models::{
    Categories, ConflictRules, DayKey, ExamDuration, ScheduleResult, ScheduledExam, Slot,
    SlotCalendar, Subject,
};

/// Places an ordered list of subjects into the earliest feasible slots.
///
/// # Example
///
/// ```
/// use retake_schedule::models::{ExamDuration, Subject};
/// use retake_schedule::scheduler::GreedyAssigner;
///
/// let mates = Subject::new("MATES").with_students(["A", "B"]);
/// let castella = Subject::new("CASTELLÀ").with_student("A");
///
/// let result = GreedyAssigner::new(ExamDuration::Ninety).run_attempt(&[&mates, &castella]);
/// assert_eq!(result.exam_for("MATES").unwrap().slot_id, 0);
/// // Monday is ruled out for CASTELLÀ; Tuesday 15:00 is free
/// assert_eq!(result.exam_for("CASTELLÀ").unwrap().slot_id, 1);
/// assert_eq!(result.total_distinct_days, 2);
/// ```
#[derive(Debug, Clone)]
pub struct GreedyAssigner {
    calendar: SlotCalendar,
    rules: ConflictRules,
    slot_search_bound: u32,
    daily_exam_limit: usize,
}

impl GreedyAssigner {
    /// Creates an assigner with the standard rules, a 150-slot bound and a
    /// daily limit of 2.
    pub fn new(duration: ExamDuration) -> Self {
        Self {
            calendar: SlotCalendar::new(duration),
            rules: ConflictRules::standard(),
            slot_search_bound: 150,
            daily_exam_limit: 2,
        }
    }

    /// Creates an assigner from configuration.
    pub fn from_config(config: &SchedulerConfig, rules: ConflictRules) -> Self {
        Self::new(config.duration)
            .with_rules(rules)
            .with_slot_search_bound(config.slot_search_bound)
            .with_daily_exam_limit(config.daily_exam_limit)
    }

    /// Replaces the same-day incompatibility rules.
    pub fn with_rules(mut self, rules: ConflictRules) -> Self {
        self.rules = rules;
        self
    }

    /// Sets how many slot indices are scanned per subject.
    pub fn with_slot_search_bound(mut self, bound: u32) -> Self {
        self.slot_search_bound = bound;
        self
    }

    /// Sets the maximum exams per student per calendar day.
    pub fn with_daily_exam_limit(mut self, limit: usize) -> Self {
        self.daily_exam_limit = limit;
        self
    }

    /// The calendar slots are resolved against.
    pub fn calendar(&self) -> &SlotCalendar {
        &self.calendar
    }

    /// The active incompatibility rules.
    pub fn rules(&self) -> &ConflictRules {
        &self.rules
    }

    /// Runs one assignment attempt over subjects in the given order.
    ///
    /// Never fails: subjects without a feasible slot within the bound are
    /// listed in [`ScheduleResult::unassignable`].
    pub fn run_attempt(&self, subjects: &[&Subject]) -> ScheduleResult {
        let mut state = AttemptState::default();
        let mut unassignable = Vec::new();

        for &subject in subjects {
            let categories = self.rules.classify(&subject.name);
            // Slots are resolved one at a time as the scan reaches them
            let found = (0..self.slot_search_bound)
                .map(|i| self.calendar.slot(i))
                .find(|slot| self.fits(&state, subject, &categories, slot));
            match found {
                Some(slot) => state.place(subject, categories, &slot),
                None => {
                    tracing::debug!(
                        subject = %subject.name,
                        bound = self.slot_search_bound,
                        "no feasible slot within search bound"
                    );
                    unassignable.push(subject.name.clone());
                }
            }
        }

        state.into_result(unassignable)
    }

    fn fits<'s>(
        &self,
        state: &AttemptState<'s>,
        subject: &'s Subject,
        categories: &Categories,
        slot: &Slot,
    ) -> bool {
        let day = slot.day_key();

        let overlaps = state.slot_exams(slot.id).iter().any(|&i| {
            !state.exams[i].students.is_disjoint(&subject.students)
        });
        if overlaps {
            return false;
        }

        let over_limit = subject
            .students
            .iter()
            .any(|student| state.exams_on_day(student.as_str(), day) >= self.daily_exam_limit);
        if over_limit {
            return false;
        }

        !state
            .day_categories(day)
            .iter()
            .any(|other| self.rules.conflicts(categories, other))
    }
}

/// Incremental indices for a single attempt.
#[derive(Default)]
struct AttemptState<'s> {
    exams: Vec<ScheduledExam>,
    used_slots: BTreeMap<u32, Slot>,
    by_slot: HashMap<u32, Vec<usize>>,
    by_day: HashMap<DayKey, Vec<Categories>>,
    student_day: HashMap<(&'s str, DayKey), usize>,
}

impl<'s> AttemptState<'s> {
    fn slot_exams(&self, slot_id: u32) -> &[usize] {
        self.by_slot.get(&slot_id).map(Vec::as_slice).unwrap_or(&[])
    }

    fn day_categories(&self, day: DayKey) -> &[Categories] {
        self.by_day.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    fn exams_on_day(&self, student: &'s str, day: DayKey) -> usize {
        self.student_day.get(&(student, day)).copied().unwrap_or(0)
    }

    fn place(&mut self, subject: &'s Subject, categories: Categories, slot: &Slot) {
        let day = slot.day_key();

        self.by_slot.entry(slot.id).or_default().push(self.exams.len());
        self.by_day.entry(day).or_default().push(categories);
        for student in &subject.students {
            *self.student_day.entry((student.as_str(), day)).or_insert(0) += 1;
        }
        self.used_slots.insert(slot.id, *slot);
        self.exams.push(ScheduledExam::new(
            subject.name.clone(),
            slot.id,
            subject.students.clone(),
        ));
    }

    fn into_result(self, unassignable: Vec<String>) -> ScheduleResult {
        ScheduleResult {
            exams: self.exams,
            used_slots: self.used_slots.into_values().collect(),
            total_distinct_days: self.by_day.len(),
            unassignable,
        }
    }
}
