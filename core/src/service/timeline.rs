use tracing::warn;

use crate::model::activity::{ActivityEntry, ActivityRecord};
use crate::model::report::{RecordKind, RejectedRecord};
use crate::time::utc_calendar_date;

/// Normalizes activities into chronological order by UTC calendar day.
/// Same-day activities keep their input order. Undatable ones are rejected.
pub fn build_activity_timeline(records: &[ActivityRecord]) -> (Vec<ActivityEntry>, Vec<RejectedRecord>) {
    let mut entries = Vec::with_capacity(records.len());
    let mut rejected = Vec::new();

    for (index, record) in records.iter().enumerate() {
        match utc_calendar_date(&record.date) {
            Ok(date) => entries.push(ActivityEntry {
                date,
                objective_code: record.objective_code.clone(),
                description: record.description.trim().to_string(),
            }),
            Err(error) => {
                warn!(index, %error, "activity record rejected");
                rejected.push(RejectedRecord {
                    kind: RecordKind::Activity,
                    index,
                    error,
                });
            }
        }
    }

    entries.sort_by_key(|e| e.date);
    (entries, rejected)
}
