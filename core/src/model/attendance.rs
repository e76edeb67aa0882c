use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Student reference embedded in each attendance record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StudentRef {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "nome")]
    pub name: String,
}

/// One attendance mark as served by the report endpoint.
///
/// `date` stays the raw wire string; it is only ever read through
/// [`crate::time::utc_calendar_date`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AttendanceRecord {
    #[serde(rename = "alunoId")]
    pub student_id: i64,
    #[serde(rename = "data")]
    pub date: String,
    #[serde(rename = "presente")]
    pub present: bool,
    #[serde(rename = "aluno", default)]
    pub student: Option<StudentRef>,
}

impl AttendanceRecord {
    pub fn new(student_id: i64, name: &str, date: &str, present: bool) -> Self {
        Self {
            student_id,
            date: date.to_string(),
            present,
            student: Some(StudentRef {
                id: Some(student_id),
                name: name.to_string(),
            }),
        }
    }

    pub fn student_name(&self) -> String {
        match &self.student {
            Some(s) if !s.name.trim().is_empty() => s.name.clone(),
            _ => format!("Aluno {}", self.student_id),
        }
    }
}

/// Class roster line, used when every enrolled student must get a row.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RosterEntry {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Presence {
    Present,
    Absent,
    NoRecord,
}

impl Presence {
    pub fn from_mark(mark: Option<bool>) -> Self {
        match mark {
            Some(true) => Presence::Present,
            Some(false) => Presence::Absent,
            None => Presence::NoRecord,
        }
    }

    /// Printable symbol: P (presente), F (falta), - (sem registro).
    pub fn symbol(&self) -> &'static str {
        match self {
            Presence::Present => "P",
            Presence::Absent => "F",
            Presence::NoRecord => "-",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Presence::Present => "Presente",
            Presence::Absent => "Falta",
            Presence::NoRecord => "Sem registro",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tally {
    pub present: u32,
    pub absent: u32,
    pub no_record: u32,
}

/// Sparse presence map of one student for one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentAttendance {
    pub student_id: i64,
    pub name: String,
    pub days_presence: BTreeMap<u32, bool>,
}

impl StudentAttendance {
    pub fn new(student_id: i64, name: String) -> Self {
        Self {
            student_id,
            name,
            days_presence: BTreeMap::new(),
        }
    }

    pub fn presence_on(&self, day: u32) -> Presence {
        Presence::from_mark(self.days_presence.get(&day).copied())
    }

    /// Counts over `1..=days_in_month`; days without a mark only feed `no_record`.
    pub fn tally(&self, days_in_month: u32) -> Tally {
        let mut tally = Tally::default();
        for day in 1..=days_in_month {
            match self.presence_on(day) {
                Presence::Present => tally.present += 1,
                Presence::Absent => tally.absent += 1,
                Presence::NoRecord => tally.no_record += 1,
            }
        }
        tally
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_wire_record() {
        let json = r#"{"alunoId":7,"data":"2024-02-01T00:00:00.000Z","presente":true,"aluno":{"id":7,"nome":"Ana"}}"#;
        let record: AttendanceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.student_id, 7);
        assert!(record.present);
        assert_eq!(record.student_name(), "Ana");
    }

    #[test]
    fn test_missing_student_ref_falls_back_to_id() {
        let json = r#"{"alunoId":9,"data":"2024-02-01","presente":false}"#;
        let record: AttendanceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.student_name(), "Aluno 9");
    }

    #[test]
    fn test_presence_is_exactly_one_state() {
        let mut s = StudentAttendance::new(1, "Ana".to_string());
        s.days_presence.insert(1, true);
        s.days_presence.insert(2, false);
        assert_eq!(s.presence_on(1), Presence::Present);
        assert_eq!(s.presence_on(2), Presence::Absent);
        assert_eq!(s.presence_on(3), Presence::NoRecord);
        assert_eq!(s.presence_on(1).symbol(), "P");
        assert_eq!(s.presence_on(2).symbol(), "F");
        assert_eq!(s.presence_on(3).symbol(), "-");
    }

    #[test]
    fn test_tally_bounds() {
        let mut s = StudentAttendance::new(1, "Ana".to_string());
        let t = s.tally(30);
        assert_eq!(t, Tally { present: 0, absent: 0, no_record: 30 });

        for day in 1..=30 {
            s.days_presence.insert(day, day % 3 != 0);
        }
        let t = s.tally(30);
        assert_eq!(t.present + t.absent, 30);
        assert_eq!(t.absent, 10);
    }
}
