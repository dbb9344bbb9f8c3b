//! Exam placement, multi-start search and ranking.
//!
//! # Pipeline
//!
//! 1. [`GreedyAssigner`] places one ordering of subjects, first fit.
//! 2. [`SearchDriver`] runs the assigner over two deterministic orderings
//!    and many seeded shuffles.
//! 3. [`rank_and_dedupe`] sorts the attempts by [`ScheduleKpi::rank_key`]
//!    and keeps the distinct best timetables.
//!
//! [`ExamScheduler`] wires validation, math merging and the three stages
//! together.
//!
//! # KPI
//!
//! `ScheduleKpi` computes the ranking key (unassigned subjects, exam days,
//! last slot) plus weeks spanned and exam count.

mod greedy;
mod kpi;
mod ranking;
mod search;

pub use greedy::GreedyAssigner;
pub use kpi::ScheduleKpi;
pub use ranking::{rank_and_dedupe, signature};
pub use search::{ExamScheduler, SearchDriver};
