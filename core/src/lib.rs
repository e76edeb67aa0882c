pub mod document;
pub mod error;
pub mod model;
pub mod payload;
pub mod repository;
pub mod service;
pub mod time;

pub use document::{compile_class_diary, write_artifact, DiaryOptions, Document, DocumentSink, JsonSink};
pub use error::RecordError;
pub use model::activity::{ActivityEntry, ActivityRecord};
pub use model::attendance::{AttendanceRecord, Presence, RosterEntry, StudentAttendance, Tally};
pub use model::report::{MonthlyReport, RecordKind, RejectedRecord};
pub use payload::{ReportPayload, ReportPeriod};
pub use repository::{FileReportSource, PayloadFileSource, ReportSource};
pub use service::report::{compile_monthly_report, merge_roster, ReportService};
pub use time::{days_in_month, month_name};
