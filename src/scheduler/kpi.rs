//! Timetable quality metrics (KPIs).
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Unassigned | Subjects with no feasible slot |
//! | Distinct days | Calendar days holding at least one exam |
//! | Last slot | Highest occupied slot id (0 when empty) |
//! | Weeks spanned | Weeks from first to last occupied slot, inclusive |
//! | Exam count | Placed exams |
//!
//! The first three metrics, in that order, form the ranking key: fewer
//! failures first, then fewer exam days, then the earliest finish.

use crate::models::ScheduleResult;

/// Timetable performance indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleKpi {
    /// Subjects left unplaced.
    pub unassigned_count: usize,
    /// Distinct calendar days used.
    pub distinct_days: usize,
    /// Highest occupied slot id, 0 when nothing was placed.
    pub last_slot_id: u32,
    /// Number of calendar weeks the timetable touches.
    pub weeks_spanned: u32,
    /// Placed exams.
    pub exam_count: usize,
}

impl ScheduleKpi {
    /// Computes KPIs for a timetable.
    pub fn calculate(result: &ScheduleResult) -> Self {
        let weeks_spanned = match (result.used_slots.first(), result.used_slots.last()) {
            (Some(first), Some(last)) => last.week_index - first.week_index + 1,
            _ => 0,
        };

        Self {
            unassigned_count: result.unassignable.len(),
            distinct_days: result.total_distinct_days,
            last_slot_id: result.last_slot_id(),
            weeks_spanned,
            exam_count: result.exam_count(),
        }
    }

    /// Ranking key; smaller is better.
    #[inline]
    pub fn rank_key(&self) -> (usize, usize, u32) {
        (self.unassigned_count, self.distinct_days, self.last_slot_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{slot_of, ExamDuration, ScheduledExam};

    fn result(slot_ids: &[u32], days: usize, unassignable: &[&str]) -> ScheduleResult {
        ScheduleResult {
            exams: slot_ids
                .iter()
                .enumerate()
                .map(|(i, &id)| ScheduledExam::new(format!("S{i}"), id, Default::default()))
                .collect(),
            used_slots: slot_ids
                .iter()
                .map(|&id| slot_of(id, ExamDuration::Ninety))
                .collect(),
            total_distinct_days: days,
            unassignable: unassignable.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_kpi_basic() {
        // 90 min: slot 1 in week 0, slot 9 in week 2
        let kpi = ScheduleKpi::calculate(&result(&[1, 9], 2, &["X"]));
        assert_eq!(kpi.unassigned_count, 1);
        assert_eq!(kpi.distinct_days, 2);
        assert_eq!(kpi.last_slot_id, 9);
        assert_eq!(kpi.weeks_spanned, 3);
        assert_eq!(kpi.exam_count, 2);
        assert_eq!(kpi.rank_key(), (1, 2, 9));
    }

    #[test]
    fn test_kpi_empty() {
        let kpi = ScheduleKpi::calculate(&ScheduleResult::default());
        assert_eq!(kpi.rank_key(), (0, 0, 0));
        assert_eq!(kpi.weeks_spanned, 0);
        assert_eq!(kpi.exam_count, 0);
    }

    #[test]
    fn test_rank_key_ordering() {
        let complete_late = ScheduleKpi::calculate(&result(&[0, 5], 2, &[]));
        let complete_early = ScheduleKpi::calculate(&result(&[0, 3], 2, &[]));
        let fewer_days = ScheduleKpi::calculate(&result(&[0, 8], 1, &[]));
        let incomplete = ScheduleKpi::calculate(&result(&[0], 1, &["X"]));

        assert!(complete_early.rank_key() < complete_late.rank_key());
        assert!(fewer_days.rank_key() < complete_early.rank_key());
        assert!(complete_late.rank_key() < incomplete.rank_key());
    }
}
