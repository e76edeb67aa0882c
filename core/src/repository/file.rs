use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use tracing::info;

use crate::payload::{ReportPayload, ReportPeriod};
use crate::repository::traits::ReportSource;

const DATA_DIR_NAME: &str = "diario";

/// Serves payloads saved under
/// `<base>/turmas/{classId}/relatorio_{YYYY}_{MM}.json`, the file-system
/// image of the report endpoint.
#[derive(Clone)]
pub struct FileReportSource {
    base_dir: PathBuf,
}

impl FileReportSource {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let path = match base_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        Ok(FileReportSource { base_dir: path })
    }

    pub fn payload_path(&self, class_id: &str, year: i32, month: u32) -> PathBuf {
        self.base_dir
            .join("turmas")
            .join(class_id)
            .join(format!("relatorio_{:04}_{:02}.json", year, month))
    }
}

pub fn default_data_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().ok_or_else(|| anyhow!("Could not determine data directory"))?;
    Ok(data_dir.join(DATA_DIR_NAME))
}

impl ReportSource for FileReportSource {
    fn fetch(&self, period: &ReportPeriod) -> Result<ReportPayload> {
        let class_id = period
            .class_id
            .as_deref()
            .ok_or_else(|| anyhow!("class id is required to fetch a report"))?;
        let path = self.payload_path(class_id, period.year, period.month);
        info!(path = %path.display(), "loading report payload");
        read_payload(&path)
    }
}

/// Serves one fixed payload file regardless of the requested period.
#[derive(Clone)]
pub struct PayloadFileSource {
    path: PathBuf,
}

impl PayloadFileSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ReportSource for PayloadFileSource {
    fn fetch(&self, _period: &ReportPeriod) -> Result<ReportPayload> {
        info!(path = %self.path.display(), "loading report payload");
        read_payload(&self.path)
    }
}

fn read_payload(path: &Path) -> Result<ReportPayload> {
    let file = File::open(path)
        .with_context(|| format!("could not open report payload {}", path.display()))?;
    ReportPayload::from_reader(BufReader::new(file))
        .with_context(|| format!("could not read report payload {}", path.display()))
}
