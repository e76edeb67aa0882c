use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::document::descriptor::Document;
use crate::model::report::MonthlyReport;

/// Turns a laid-out [`Document`] into the bytes of one artifact format.
pub trait DocumentSink {
    fn extension(&self) -> &'static str;
    fn render(&self, document: &Document) -> Result<Vec<u8>>;
}

/// Writes the descriptor itself, for downstream PDF tooling.
pub struct JsonSink;

impl DocumentSink for JsonSink {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn render(&self, document: &Document) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(document)?)
    }
}

/// `Diario_Classe_{className}_{month}_{year}`; path separators in the class
/// name become `-`.
pub fn artifact_stem(report: &MonthlyReport) -> String {
    let class_name: String = report
        .class_name
        .chars()
        .map(|c| if c == '/' || c == '\\' { '-' } else { c })
        .collect();
    format!("Diario_Classe_{}_{}_{}", class_name, report.month, report.year)
}

pub fn artifact_file_name(report: &MonthlyReport, extension: &str) -> String {
    format!("{}.{}", artifact_stem(report), extension)
}

/// Renders `document` through `sink` into `out_dir` and returns the file path.
pub fn write_artifact<S: DocumentSink + ?Sized>(
    sink: &S,
    document: &Document,
    report: &MonthlyReport,
    out_dir: &Path,
) -> Result<PathBuf> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("could not create output directory {}", out_dir.display()))?;
    let path = out_dir.join(artifact_file_name(report, sink.extension()));
    let bytes = sink.render(document)?;
    fs::write(&path, &bytes).with_context(|| format!("could not write {}", path.display()))?;
    info!(path = %path.display(), bytes = bytes.len(), "class diary written");
    Ok(path)
}
