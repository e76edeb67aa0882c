use std::collections::HashMap;

use tracing::{debug, warn};

use crate::model::attendance::{AttendanceRecord, StudentAttendance};
use crate::model::report::{RecordKind, RejectedRecord};
use crate::service::collation::CollationKey;
use crate::time::{day_in_period, utc_calendar_date};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AttendanceMatrix {
    pub students: Vec<StudentAttendance>,
    pub rejected: Vec<RejectedRecord>,
}

/// Folds flat attendance marks into one sparse presence map per student.
///
/// Later records overwrite earlier ones for the same (student, day). Records
/// whose date cannot be read, or whose UTC date is outside the period, are
/// reported in `rejected` and place nothing. Students are ordered by
/// [`CollationKey`] with a stable sort, so equal names keep first-seen order.
pub fn build_attendance_matrix(records: &[AttendanceRecord], year: i32, month: u32) -> AttendanceMatrix {
    let mut students: Vec<StudentAttendance> = Vec::new();
    let mut positions: HashMap<i64, usize> = HashMap::new();
    let mut rejected = Vec::new();

    for (index, record) in records.iter().enumerate() {
        let day = match utc_calendar_date(&record.date).and_then(|d| day_in_period(d, year, month)) {
            Ok(day) => day,
            Err(error) => {
                warn!(index, student_id = record.student_id, %error, "attendance record rejected");
                rejected.push(RejectedRecord {
                    kind: RecordKind::Attendance,
                    index,
                    error,
                });
                continue;
            }
        };

        let slot = *positions.entry(record.student_id).or_insert_with(|| {
            students.push(StudentAttendance::new(record.student_id, record.student_name()));
            students.len() - 1
        });
        students[slot].days_presence.insert(day, record.present);
    }

    students.sort_by_cached_key(|s| CollationKey::new(&s.name));

    debug!(
        records = records.len(),
        students = students.len(),
        rejected = rejected.len(),
        "attendance matrix built"
    );

    AttendanceMatrix { students, rejected }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecordError;

    fn rec(id: i64, name: &str, day: u32, present: bool) -> AttendanceRecord {
        AttendanceRecord::new(id, name, &format!("2024-02-{:02}T00:00:00.000Z", day), present)
    }

    #[test]
    fn test_last_write_wins() {
        let records = vec![rec(1, "Ana", 1, true), rec(1, "Ana", 2, true), rec(1, "Ana", 1, false)];
        let matrix = build_attendance_matrix(&records, 2024, 2);
        assert_eq!(matrix.students.len(), 1);
        assert_eq!(matrix.students[0].days_presence.get(&1), Some(&false));
        assert_eq!(matrix.students[0].days_presence.get(&2), Some(&true));
    }

    #[test]
    fn test_sorted_by_name_not_by_input_order() {
        let records = vec![rec(2, "Érica", 1, true), rec(3, "Bruno", 1, true), rec(1, "Davi", 1, false)];
        let matrix = build_attendance_matrix(&records, 2024, 2);
        let names: Vec<&str> = matrix.students.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Bruno", "Davi", "Érica"]);
    }

    #[test]
    fn test_only_students_with_records_appear() {
        let matrix = build_attendance_matrix(&[], 2024, 2);
        assert!(matrix.students.is_empty());
        assert!(matrix.rejected.is_empty());
    }

    #[test]
    fn test_malformed_date_is_rejected_not_keyed() {
        let mut bad = rec(1, "Ana", 1, true);
        bad.date = "not a date".to_string();
        let records = vec![bad, rec(2, "Bia", 3, true)];
        let matrix = build_attendance_matrix(&records, 2024, 2);

        assert_eq!(matrix.students.len(), 1);
        assert_eq!(matrix.students[0].name, "Bia");
        assert_eq!(matrix.rejected.len(), 1);
        assert_eq!(matrix.rejected[0].index, 0);
        assert!(matches!(matrix.rejected[0].error, RecordError::MalformedDate { .. }));
    }

    #[test]
    fn test_out_of_period_record_is_rejected() {
        let records = vec![AttendanceRecord::new(1, "Ana", "2024-03-01T00:00:00.000Z", true)];
        let matrix = build_attendance_matrix(&records, 2024, 2);
        assert!(matrix.students.is_empty());
        assert!(matches!(matrix.rejected[0].error, RecordError::OutsidePeriod { .. }));
    }

    #[test]
    fn test_utc_midnight_stays_on_its_day() {
        let records = vec![AttendanceRecord::new(1, "Ana", "2024-02-01T00:00:00.000Z", true)];
        let matrix = build_attendance_matrix(&records, 2024, 2);
        assert_eq!(matrix.students[0].days_presence.keys().copied().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_input_is_not_mutated_and_rebuild_is_identical() {
        let records = vec![rec(1, "Ana", 1, true), rec(2, "Bia", 1, false), rec(1, "Ana", 1, false)];
        let snapshot = records.clone();
        let first = build_attendance_matrix(&records, 2024, 2);
        let second = build_attendance_matrix(&records, 2024, 2);
        assert_eq!(first, second);
        assert_eq!(format!("{:?}", first), format!("{:?}", second));
        assert_eq!(records, snapshot);
    }
}
