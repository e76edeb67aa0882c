use chrono::NaiveDate;
use thiserror::Error;

/// Why a single input record could not be placed in the monthly report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("malformed date '{raw}'")]
    MalformedDate { raw: String },
    #[error("date {date} is outside {month:02}/{year}")]
    OutsidePeriod { date: NaiveDate, month: u32, year: i32 },
}
