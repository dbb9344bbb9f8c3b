//! Timetabling domain models.
//!
//! Provides the data types for retake exam scheduling: subjects and their
//! students, the weekly slot calendar, same-day category rules, and the
//! timetables produced by the scheduler.
//!
//! # Domain Mappings
//!
//! | retake-schedule | Meaning |
//! |-----------------|---------|
//! | Subject | Retake exam and its enrolled students |
//! | Slot | One afternoon exam window |
//! | DayKey | One calendar day (week × weekday) |
//! | ScheduleResult | One candidate timetable |

mod calendar;
mod constraint;
mod schedule;
mod subject;

pub use calendar::{
    slot_of, DayKey, ExamDuration, InvalidDuration, Slot, SlotCalendar, TimeRange, Weekday,
};
pub use constraint::{
    groups, is_math_subject, Categories, CategoryGroup, ConflictRules, ExclusionRule,
    MATH_KEYWORDS,
};
pub use schedule::{ScheduleResult, ScheduledExam, Violation, ViolationType};
pub use subject::{StudentId, Subject};
