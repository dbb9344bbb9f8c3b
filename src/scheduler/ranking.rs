//! Ranking and deduplication of attempt results.
//!
//! Results are ordered by [`ScheduleKpi::rank_key`] with a stable sort, so
//! among equal keys the earlier attempt wins. Two results with the same
//! placement signature are the same timetable; only the first is kept.

use std::collections::HashSet;

use super::ScheduleKpi;
use crate::models::ScheduleResult;

/// Canonical placement signature: sorted `"subject:slot"` pairs joined by `|`.
///
/// # Example
/// ```
/// use retake_schedule::models::{ScheduleResult, ScheduledExam};
/// use retake_schedule::scheduler::signature;
///
/// let result = ScheduleResult {
///     exams: vec![
///         ScheduledExam::new("QUÍMICA", 4, Default::default()),
///         ScheduledExam::new("ANGLÈS", 0, Default::default()),
///     ],
///     ..Default::default()
/// };
/// assert_eq!(signature(&result), "ANGLÈS:0|QUÍMICA:4");
/// ```
pub fn signature(result: &ScheduleResult) -> String {
    let mut parts: Vec<String> = result
        .exams
        .iter()
        .map(|e| format!("{}:{}", e.subject, e.slot_id))
        .collect();
    parts.sort_unstable();
    parts.join("|")
}

/// Sorts results best-first and keeps at most `shortlist_size` distinct
/// timetables.
pub fn rank_and_dedupe(mut results: Vec<ScheduleResult>, shortlist_size: usize) -> Vec<ScheduleResult> {
    let total = results.len();
    results.sort_by_cached_key(|r| ScheduleKpi::calculate(r).rank_key());

    let mut seen = HashSet::new();
    let shortlist: Vec<ScheduleResult> = results
        .into_iter()
        .filter(|r| seen.insert(signature(r)))
        .take(shortlist_size)
        .collect();

    tracing::debug!(
        attempts = total,
        retained = shortlist.len(),
        "ranked distinct timetables"
    );
    shortlist
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScheduledExam;

    fn result(placements: &[(&str, u32)], days: usize, unassignable: &[&str]) -> ScheduleResult {
        ScheduleResult {
            exams: placements
                .iter()
                .map(|&(name, slot)| ScheduledExam::new(name, slot, Default::default()))
                .collect(),
            used_slots: Vec::new(),
            total_distinct_days: days,
            unassignable: unassignable.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_signature_order_independent() {
        let a = result(&[("A", 0), ("B", 1)], 2, &[]);
        let b = result(&[("B", 1), ("A", 0)], 2, &[]);
        assert_eq!(signature(&a), signature(&b));
        assert_eq!(signature(&ScheduleResult::default()), "");
    }

    #[test]
    fn test_ranking_order() {
        let ranked = rank_and_dedupe(
            vec![
                result(&[("A", 0)], 1, &["B"]),
                result(&[("A", 0), ("B", 3)], 2, &[]),
                result(&[("A", 0), ("B", 0)], 1, &[]),
            ],
            10,
        );
        assert_eq!(ranked.len(), 3);
        assert_eq!(signature(&ranked[0]), "A:0|B:0");
        assert_eq!(signature(&ranked[1]), "A:0|B:3");
        assert_eq!(ranked[2].unassignable, vec!["B".to_string()]);
    }

    #[test]
    fn test_dedup_keeps_first() {
        let first = result(&[("A", 0), ("B", 1)], 2, &[]);
        let dup = result(&[("B", 1), ("A", 0)], 2, &[]);

        let ranked = rank_and_dedupe(vec![first.clone(), dup], 10);
        assert_eq!(ranked, vec![first]);
    }

    #[test]
    fn test_shortlist_truncated() {
        let results: Vec<ScheduleResult> = (0..25)
            .map(|i| result(&[("A", i)], 1, &[]))
            .collect();
        let ranked = rank_and_dedupe(results, 10);
        assert_eq!(ranked.len(), 10);
        for pair in ranked.windows(2) {
            assert!(pair[0].exams[0].slot_id <= pair[1].exams[0].slot_id);
        }
    }

    #[test]
    fn test_empty_results() {
        assert!(rank_and_dedupe(Vec::new(), 10).is_empty());
    }

    #[test]
    fn test_identical_empty_results_collapse() {
        let ranked = rank_and_dedupe(vec![ScheduleResult::default(); 5], 10);
        assert_eq!(ranked.len(), 1);
    }
}
