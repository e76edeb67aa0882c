use crate::error::RecordError;
use crate::model::activity::ActivityEntry;
use crate::model::attendance::StudentAttendance;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Attendance,
    Activity,
}

/// An input record left out of the report, with its position in the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    pub kind: RecordKind,
    pub index: usize,
    pub error: RecordError,
}

/// Canonical monthly report. Every renderer reads this one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyReport {
    pub class_name: String,
    pub month: u32,
    pub year: i32,
    pub days_in_month: u32,
    pub students: Vec<StudentAttendance>,
    pub activities: Vec<ActivityEntry>,
    pub rejected: Vec<RejectedRecord>,
}

impl MonthlyReport {
    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    pub fn days(&self) -> impl Iterator<Item = u32> {
        1..=self.days_in_month
    }
}
