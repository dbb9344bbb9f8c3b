//! Retake exam timetabling.
//!
//! Places retake exams into a recurring weekly afternoon calendar so that no
//! student sits two exams at once, no student sits more than two exams a
//! day, and subjects that must not share a day never do. Many orderings are
//! tried and the most compact distinct timetables are returned.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Subject`, `Slot`, `SlotCalendar`,
//!   `ConflictRules`, `ScheduleResult`
//! - **`merge`**: Folding of math-family subjects into one exam
//! - **`dispatching`**: Subject ordering rules and rule engine
//! - **`scheduler`**: Greedy assigner, multi-start search, ranking, KPIs
//! - **`validation`**: Input checks and timetable audits
//! - **`config`**: Tunable search parameters (TOML)
//! - **`ingest`**: Parsing of pasted spreadsheet data
//!
//! # Example
//!
//! ```
//! use retake_schedule::config::SchedulerConfig;
//! use retake_schedule::models::{ExamDuration, Subject};
//! use retake_schedule::scheduler::ExamScheduler;
//!
//! let subjects = vec![
//!     Subject::new("MATES").with_students(["A", "B"]),
//!     Subject::new("CASTELLÀ").with_student("A"),
//! ];
//! let config = SchedulerConfig::new()
//!     .with_duration(ExamDuration::Ninety)
//!     .with_restarts(100)
//!     .with_random_seed(42);
//!
//! let shortlist = ExamScheduler::new(config).schedule(subjects).unwrap();
//! assert!(shortlist[0].is_complete());
//! assert_eq!(shortlist[0].total_distinct_days, 2);
//! ```

pub mod config;
pub mod dispatching;
pub mod error;
pub mod ingest;
pub mod merge;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use error::ScheduleError;
