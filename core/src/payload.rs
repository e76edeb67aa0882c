use std::io::Read;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Deserializer, Serialize};

use crate::model::activity::ActivityRecord;
use crate::model::attendance::AttendanceRecord;

/// Raw body of `GET /frequencias/turmas/{classId}/relatorio`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ReportPayload {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub frequencias: Vec<AttendanceRecord>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub atividades: Vec<ActivityRecord>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl ReportPayload {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid report payload")
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        serde_json::from_reader(reader).context("invalid report payload")
    }
}

/// Which class and month a report is compiled for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPeriod {
    pub class_id: Option<String>,
    pub class_name: String,
    pub month: u32,
    pub year: i32,
}

impl ReportPeriod {
    pub fn new(class_id: Option<String>, class_name: &str, month: u32, year: i32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(anyhow!("month must be between 1 and 12, got {}", month));
        }
        let class_name = class_name.trim();
        if class_name.is_empty() {
            return Err(anyhow!("class name is required"));
        }
        Ok(Self {
            class_id,
            class_name: class_name.to_string(),
            month,
            year,
        })
    }

    /// Same class, another month.
    pub fn with_month(&self, year: i32, month: u32) -> Result<Self> {
        Self::new(self.class_id.clone(), &self.class_name, month, year)
    }

    pub fn endpoint_path(&self) -> Option<String> {
        self.class_id.as_ref().map(|id| {
            format!(
                "/frequencias/turmas/{}/relatorio?mes={}&ano={}",
                id, self.month, self.year
            )
        })
    }
}
