//! Weekly slot calendar.
//!
//! Exam sittings happen in fixed, recurring afternoon windows on Mondays,
//! Tuesdays and Thursdays. A slot is identified by a monotonically increasing
//! index; the calendar resolves an index to its week, weekday and time range
//! using one of two weekly patterns selected by the exam duration.
//!
//! # Patterns
//!
//! | Duration | Slots/week | Monday | Tuesday | Thursday |
//! |----------|-----------|--------|---------|----------|
//! | 90 min | 4 | 15:00 | 15:00, 16:30 | 15:00 |
//! | 60 min | 7 | 15:00, 16:00 | 15:00, 16:00, 17:00 | 15:00, 16:00 |
//!
//! # Time Model
//! Slot descriptors are computed on demand from `(index, duration)` and never
//! stored in bulk. The mapping is total and stable: the same index always
//! yields the same descriptor, and no two indices share a descriptor.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Exam length, which selects the weekly slot pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum ExamDuration {
    /// One-hour exams: seven slots per week.
    Sixty,
    /// Ninety-minute exams: four slots per week.
    #[default]
    Ninety,
}

/// Rejected exam length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("exam duration must be 60 or 90 minutes, got {0}")]
pub struct InvalidDuration(pub u32);

impl ExamDuration {
    /// Exam length in minutes.
    pub fn minutes(self) -> u32 {
        match self {
            Self::Sixty => 60,
            Self::Ninety => 90,
        }
    }

    /// Number of slots in one weekly cycle.
    #[inline]
    pub fn slots_per_week(self) -> u32 {
        self.pattern().len() as u32
    }

    fn pattern(self) -> &'static [PatternEntry] {
        match self {
            Self::Sixty => &SIXTY_MINUTE_WEEK,
            Self::Ninety => &NINETY_MINUTE_WEEK,
        }
    }
}

impl TryFrom<u32> for ExamDuration {
    type Error = InvalidDuration;

    fn try_from(minutes: u32) -> Result<Self, Self::Error> {
        match minutes {
            60 => Ok(Self::Sixty),
            90 => Ok(Self::Ninety),
            other => Err(InvalidDuration(other)),
        }
    }
}

impl From<ExamDuration> for u32 {
    fn from(duration: ExamDuration) -> Self {
        duration.minutes()
    }
}

/// Teaching days on which exams may be held.
///
/// Wednesday and Friday are never used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Thursday,
}

impl Weekday {
    /// Day index: Monday = 0, Tuesday = 1, Thursday = 2.
    #[inline]
    pub fn index(self) -> u8 {
        match self {
            Self::Monday => 0,
            Self::Tuesday => 1,
            Self::Thursday => 2,
        }
    }

    /// Local (Catalan) day name shown to schedulers.
    pub fn label(self) -> &'static str {
        match self {
            Self::Monday => "Dilluns",
            Self::Tuesday => "Dimarts",
            Self::Thursday => "Dijous",
        }
    }
}

/// Wall-clock window of a slot, in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeRange {
    /// Start minute (inclusive).
    pub start_minute: u16,
    /// End minute (exclusive).
    pub end_minute: u16,
}

impl TimeRange {
    /// Creates a range starting at `start_minute` lasting `length` minutes.
    pub fn starting_at(start_minute: u16, length: u16) -> Self {
        Self {
            start_minute,
            end_minute: start_minute + length,
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02} - {:02}:{:02}",
            self.start_minute / 60,
            self.start_minute % 60,
            self.end_minute / 60,
            self.end_minute % 60
        )
    }
}

/// Identifies one calendar day: `(week, weekday)`.
///
/// Daily-limit and category-incompatibility checks compare day keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DayKey {
    /// Zero-based week number.
    pub week: u32,
    /// Weekday within the week.
    pub day: Weekday,
}

/// One bookable exam window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    /// Global slot index (0-based, monotonically increasing in time).
    pub id: u32,
    /// Zero-based week number.
    pub week_index: u32,
    /// Weekday of the slot.
    pub day: Weekday,
    /// Position within the day (0 = first afternoon window).
    pub slot_in_day: u8,
    /// Wall-clock window.
    pub time_range: TimeRange,
}

impl Slot {
    /// Day index: Monday = 0, Tuesday = 1, Thursday = 2.
    #[inline]
    pub fn day_index(&self) -> u8 {
        self.day.index()
    }

    /// The calendar day this slot falls on.
    #[inline]
    pub fn day_key(&self) -> DayKey {
        DayKey {
            week: self.week_index,
            day: self.day,
        }
    }
}

struct PatternEntry {
    day: Weekday,
    slot_in_day: u8,
    start_minute: u16,
}

const fn entry(day: Weekday, slot_in_day: u8, start_minute: u16) -> PatternEntry {
    PatternEntry {
        day,
        slot_in_day,
        start_minute,
    }
}

const NINETY_MINUTE_WEEK: [PatternEntry; 4] = [
    entry(Weekday::Monday, 0, 15 * 60),
    entry(Weekday::Tuesday, 0, 15 * 60),
    entry(Weekday::Tuesday, 1, 16 * 60 + 30),
    entry(Weekday::Thursday, 0, 15 * 60),
];

const SIXTY_MINUTE_WEEK: [PatternEntry; 7] = [
    entry(Weekday::Monday, 0, 15 * 60),
    entry(Weekday::Monday, 1, 16 * 60),
    entry(Weekday::Tuesday, 0, 15 * 60),
    entry(Weekday::Tuesday, 1, 16 * 60),
    entry(Weekday::Tuesday, 2, 17 * 60),
    entry(Weekday::Thursday, 0, 15 * 60),
    entry(Weekday::Thursday, 1, 16 * 60),
];

/// Resolves slot indices for a fixed exam duration.
///
/// Stateless apart from the duration; cheap to copy.
///
/// # Example
/// ```
/// use retake_schedule::models::{ExamDuration, SlotCalendar, Weekday};
///
/// let calendar = SlotCalendar::new(ExamDuration::Ninety);
/// let slot = calendar.slot(6);
/// assert_eq!(slot.week_index, 1);
/// assert_eq!(slot.day, Weekday::Tuesday);
/// assert_eq!(slot.time_range.to_string(), "16:30 - 18:00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotCalendar {
    duration: ExamDuration,
}

impl SlotCalendar {
    /// Creates a calendar for the given exam duration.
    pub fn new(duration: ExamDuration) -> Self {
        Self { duration }
    }

    /// The exam duration this calendar was built for.
    pub fn duration(&self) -> ExamDuration {
        self.duration
    }

    /// Resolves a slot index to its descriptor.
    pub fn slot(&self, index: u32) -> Slot {
        let pattern = self.duration.pattern();
        let per_week = pattern.len() as u32;
        let position = &pattern[(index % per_week) as usize];

        Slot {
            id: index,
            week_index: index / per_week,
            day: position.day,
            slot_in_day: position.slot_in_day,
            time_range: TimeRange::starting_at(
                position.start_minute,
                self.duration.minutes() as u16,
            ),
        }
    }

    /// The calendar day of a slot index.
    #[inline]
    pub fn day_key(&self, index: u32) -> DayKey {
        self.slot(index).day_key()
    }
}

/// Resolves a slot index for the given duration.
///
/// Equivalent to `SlotCalendar::new(duration).slot(index)`.
pub fn slot_of(index: u32, duration: ExamDuration) -> Slot {
    SlotCalendar::new(duration).slot(index)
}
