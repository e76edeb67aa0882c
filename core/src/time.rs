use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};

use crate::error::RecordError;

/// Number of days in `month` (1-based) of `year`, leap years included.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let leap = (year % 4 == 0 && year % 100 != 0) || year % 400 == 0;
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if leap => 29,
        2 => 28,
        _ => 30,
    }
}

/// Parses a persisted timestamp into UTC.
///
/// Accepts RFC 3339 with any offset, a naive `YYYY-MM-DDTHH:MM:SS[.fff]`
/// (read as UTC) and a bare `YYYY-MM-DD` (UTC midnight).
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, RecordError> {
    let input = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(dt.and_utc());
    }
    if let Ok(d) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(dt) = d.and_hms_opt(0, 0, 0) {
            return Ok(dt.and_utc());
        }
    }

    Err(RecordError::MalformedDate { raw: raw.to_string() })
}

/// Calendar date of a timestamp read from its UTC fields.
///
/// Records are stored at UTC midnight, so the viewer's local offset must never
/// take part in this.
pub fn utc_date(ts: &DateTime<Utc>) -> NaiveDate {
    ts.date_naive()
}

/// Parses `raw` and returns its UTC calendar date.
pub fn utc_calendar_date(raw: &str) -> Result<NaiveDate, RecordError> {
    parse_timestamp(raw).map(|ts| utc_date(&ts))
}

/// Day of month of `date`, provided it falls inside (`year`, `month`).
pub fn day_in_period(date: NaiveDate, year: i32, month: u32) -> Result<u32, RecordError> {
    if date.year() == year && date.month() == month {
        Ok(date.day())
    } else {
        Err(RecordError::OutsidePeriod { date, month, year })
    }
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "Janeiro",
        2 => "Fevereiro",
        3 => "Março",
        4 => "Abril",
        5 => "Maio",
        6 => "Junho",
        7 => "Julho",
        8 => "Agosto",
        9 => "Setembro",
        10 => "Outubro",
        11 => "Novembro",
        12 => "Dezembro",
        _ => "?",
    }
}

/// Steps (`year`, `month`) by `delta` months, crossing year boundaries.
pub fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let zero_based = year * 12 + (month as i32 - 1) + delta;
    (zero_based.div_euclid(12), zero_based.rem_euclid(12) as u32 + 1)
}
