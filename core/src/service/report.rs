use anyhow::Result;
use tracing::info;

use crate::model::attendance::{RosterEntry, StudentAttendance};
use crate::model::report::MonthlyReport;
use crate::payload::{ReportPayload, ReportPeriod};
use crate::repository::ReportSource;
use crate::service::collation::CollationKey;
use crate::service::matrix::build_attendance_matrix;
use crate::service::timeline::build_activity_timeline;
use crate::time::days_in_month;

/// The one derivation from raw payload to [`MonthlyReport`]. Pure: the same
/// payload and period always give an equal report.
pub fn compile_monthly_report(payload: &ReportPayload, period: &ReportPeriod) -> MonthlyReport {
    let matrix = build_attendance_matrix(&payload.frequencias, period.year, period.month);
    let (activities, rejected_activities) = build_activity_timeline(&payload.atividades);

    let mut rejected = matrix.rejected;
    rejected.extend(rejected_activities);

    MonthlyReport {
        class_name: period.class_name.clone(),
        month: period.month,
        year: period.year,
        days_in_month: days_in_month(period.year, period.month),
        students: matrix.students,
        activities,
        rejected,
    }
}

/// Adds an empty row for every roster student without marks, keeping the
/// collation order. Existing rows are left untouched.
pub fn merge_roster(mut report: MonthlyReport, roster: &[RosterEntry]) -> MonthlyReport {
    for entry in roster {
        if report.students.iter().all(|s| s.student_id != entry.id) {
            report
                .students
                .push(StudentAttendance::new(entry.id, entry.name.clone()));
        }
    }
    report.students.sort_by_cached_key(|s| CollationKey::new(&s.name));
    report
}

pub struct ReportService<S: ReportSource> {
    source: S,
}

impl<S: ReportSource> ReportService<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetches the period's payload and compiles it from scratch.
    pub fn load(&self, period: &ReportPeriod) -> Result<MonthlyReport> {
        let payload = self.source.fetch(period)?;
        let report = compile_monthly_report(&payload, period);
        info!(
            class = %report.class_name,
            month = report.month,
            year = report.year,
            students = report.students.len(),
            activities = report.activities.len(),
            rejected = report.rejected.len(),
            "monthly report compiled"
        );
        Ok(report)
    }
}
