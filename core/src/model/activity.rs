use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One lesson activity as served by the report endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ActivityRecord {
    #[serde(rename = "data")]
    pub date: String,
    #[serde(rename = "codigoObjetivo", default)]
    pub objective_code: Option<String>,
    #[serde(rename = "descricao", default)]
    pub description: String,
}

/// Activity normalized for display and print, dated by its UTC calendar day.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ActivityEntry {
    pub date: NaiveDate,
    pub objective_code: Option<String>,
    pub description: String,
}

impl ActivityEntry {
    /// `dd/mm`, as printed in the diary.
    pub fn display_date(&self) -> String {
        self.date.format("%d/%m").to_string()
    }

    pub fn objective_or_dash(&self) -> &str {
        match self.objective_code.as_deref() {
            Some(code) if !code.trim().is_empty() => code,
            _ => "-",
        }
    }
}
