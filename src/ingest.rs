//! Enrolment data ingestion.
//!
//! Parses text pasted from a spreadsheet into [`Subject`]s. The layout is
//! loose: several tables may follow each other, each introduced by its own
//! header row, and columns are separated by one or more tabs.
//!
//! | Row kind | Recognised by |
//! |----------|---------------|
//! | Header | Contains `CATALÀ` or `CASTELLÀ` (any case) |
//! | Student | First cell starts with an integer (the student id) |
//! | Anything else | Ignored |
//!
//! A student sits a subject when the cell under its header is one of
//! `TRUE`, `VERITAT`, `1` or `SÍ` (any case).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{StudentId, Subject};

const ENROLLED_MARKERS: [&str; 4] = ["TRUE", "VERITAT", "1", "SÍ"];
const HEADER_MARKERS: [&str; 2] = ["CATALÀ", "CASTELLÀ"];

/// One student row with the subjects they sit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Student id, as written in the first column.
    pub id: StudentId,
    /// Upper-cased subject names, in column order.
    pub subjects: Vec<String>,
}

/// Parsed enrolment table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PastedTable {
    /// Students with at least one marked subject, in input order.
    pub students: Vec<StudentRecord>,
    /// Subjects by descending student count, ties in order of first enrolment.
    pub subjects: Vec<Subject>,
}

impl PastedTable {
    /// Whether no enrolment was found.
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}

/// Parses tab-separated text pasted from a spreadsheet.
///
/// # Example
/// ```
/// use retake_schedule::ingest::parse_pasted_table;
///
/// let text = "ID\tCATALÀ\tMATES\n1\tTRUE\tFALSE\n2\tveritat\tsí\n";
/// let table = parse_pasted_table(text);
///
/// assert_eq!(table.students.len(), 2);
/// assert_eq!(table.subjects[0].name, "CATALÀ");
/// assert_eq!(table.subjects[0].student_count(), 2);
/// assert_eq!(table.subjects[1].name, "MATES");
/// ```
pub fn parse_pasted_table(text: &str) -> PastedTable {
    let mut headers: Option<Vec<String>> = None;
    let mut students = Vec::new();
    let mut subjects: Vec<Subject> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let cells = split_cells(line);

        let upper = line.to_uppercase();
        if HEADER_MARKERS.iter().any(|m| upper.contains(m)) {
            headers = Some(cells.iter().map(|c| c.to_uppercase()).collect());
            continue;
        }

        let Some(columns) = headers.as_ref() else {
            continue;
        };
        let Some(id) = cells.first().filter(|c| starts_with_integer(c)) else {
            continue;
        };

        let enrolled: Vec<String> = cells
            .iter()
            .zip(columns)
            .skip(1)
            .filter(|(cell, _)| is_enrolled(cell))
            .map(|(_, subject)| subject.clone())
            .collect();

        for name in &enrolled {
            let i = *index.entry(name.clone()).or_insert_with(|| {
                subjects.push(Subject::new(name));
                subjects.len() - 1
            });
            subjects[i].students.insert((*id).to_string());
        }
        if !enrolled.is_empty() {
            students.push(StudentRecord {
                id: (*id).to_string(),
                subjects: enrolled,
            });
        }
    }

    // Stable: equal counts keep first-enrolment order
    subjects.sort_by(|a, b| b.student_count().cmp(&a.student_count()));

    tracing::debug!(
        students = students.len(),
        subjects = subjects.len(),
        "parsed enrolment table"
    );
    PastedTable { students, subjects }
}

fn split_cells(line: &str) -> Vec<&str> {
    line.split('\t')
        .filter(|c| !c.is_empty())
        .map(str::trim)
        .collect()
}

fn starts_with_integer(cell: &str) -> bool {
    let digits = cell.strip_prefix(['+', '-']).unwrap_or(cell);
    digits.starts_with(|c: char| c.is_ascii_digit())
}

fn is_enrolled(cell: &str) -> bool {
    let upper = cell.to_uppercase();
    ENROLLED_MARKERS.contains(&upper.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_basic_table() {
        let text = "\
ALUMNE\tCATALÀ\tCASTELLÀ\tMATES
1\tTRUE\tFALSE\tTRUE
2\tFALSE\tFALSE\tFALSE
3\t1\tSí\tveritat
";
        let table = parse_pasted_table(text);
        assert_eq!(table.students.len(), 2);
        assert_eq!(table.students[0].id, "1");
        assert_eq!(table.students[0].subjects, vec!["CATALÀ", "MATES"]);
        assert_eq!(table.students[1].subjects, vec!["CATALÀ", "CASTELLÀ", "MATES"]);

        let names: Vec<&str> = table.subjects.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["CATALÀ", "MATES", "CASTELLÀ"]);
        assert_eq!(table.subjects[2].students, BTreeSet::from(["3".to_string()]));
    }

    #[test]
    fn test_rows_before_header_ignored() {
        let text = "1\tTRUE\nID\tCATALÀ\n2\tTRUE\n";
        let table = parse_pasted_table(text);
        assert_eq!(table.students.len(), 1);
        assert_eq!(table.students[0].id, "2");
    }

    #[test]
    fn test_non_numeric_rows_skipped() {
        let text = "ID\tCATALÀ\nTotal\tTRUE\n\n  \n12a\tTRUE\n";
        let table = parse_pasted_table(text);
        assert_eq!(table.students.len(), 1);
        assert_eq!(table.students[0].id, "12a");
    }

    #[test]
    fn test_tab_runs_and_short_rows() {
        let text = "ID\t\tCATALÀ\t\tFÍSICA\n7\t\tTRUE\n";
        let table = parse_pasted_table(text);
        assert_eq!(table.students[0].subjects, vec!["CATALÀ"]);
        assert_eq!(table.subjects.len(), 1);
    }

    #[test]
    fn test_second_header_redefines_columns() {
        let text = "\
ID\tCATALÀ\tFÍSICA
1\tTRUE\tTRUE
ID\tCASTELLÀ\tQUÍMICA
2\tTRUE\tTRUE
";
        let table = parse_pasted_table(text);
        assert_eq!(table.students[1].subjects, vec!["CASTELLÀ", "QUÍMICA"]);
        assert_eq!(table.subjects.len(), 4);
    }

    #[test]
    fn test_ties_keep_first_enrolment_order() {
        let text = "ID\tCATALÀ\tZOOLOGIA\tANGLÈS\n1\tTRUE\tTRUE\tTRUE\n";
        let table = parse_pasted_table(text);
        let names: Vec<&str> = table.subjects.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["CATALÀ", "ZOOLOGIA", "ANGLÈS"]);

        let text = "ID\tCATALÀ\tANGLÈS\tBIOLOGIA\n1\tTRUE\tFALSE\tTRUE\n2\tFALSE\tTRUE\tFALSE\n3\tFALSE\tTRUE\tFALSE\n";
        let table = parse_pasted_table(text);
        let names: Vec<&str> = table.subjects.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["ANGLÈS", "CATALÀ", "BIOLOGIA"]);
    }

    #[test]
    fn test_empty_input() {
        let table = parse_pasted_table("");
        assert!(table.is_empty());
        assert!(table.students.is_empty());
    }

    #[test]
    fn test_lowercase_headers_normalized() {
        let text = "id\tcatalà\tmates cs\n4\ttrue\ttrue\n";
        let table = parse_pasted_table(text);
        assert_eq!(table.students[0].subjects, vec!["CATALÀ", "MATES CS"]);
    }
}
