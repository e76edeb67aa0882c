mod config;
mod logging;
mod printable;
mod tui;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use clap::{Parser, ValueEnum};
use diario_core::document::{compile_class_diary, write_artifact, DiaryOptions, DocumentSink, JsonSink};
use diario_core::{
    merge_roster, FileReportSource, PayloadFileSource, ReportPeriod, ReportService, ReportSource, RosterEntry,
};
use tracing::warn;

use crate::config::Config;
use crate::logging::{init_logging, LogTarget};
use crate::printable::TextSink;
use crate::tui::app::App;

#[derive(Parser)]
#[command(name = "diario")]
#[command(about = "Monthly attendance and activity report (class diary) for one class", long_about = None)]
struct Cli {
    /// Institution name printed on the diary header
    #[arg(long, global = true)]
    institution: Option<String>,
    /// Root of the saved report payloads (turmas/{id}/relatorio_YYYY_MM.json)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Review attendance and activities interactively
    View {
        #[command(flatten)]
        report: ReportArgs,
    },
    /// Write the printable class diary
    Download {
        #[command(flatten)]
        report: ReportArgs,
        #[arg(long, value_enum, default_value_t = Format::Txt)]
        format: Format,
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

#[derive(clap::Args)]
struct ReportArgs {
    /// A single payload file as served by the report endpoint
    #[arg(long, conflicts_with = "class_id")]
    input: Option<PathBuf>,
    /// Class id, resolved under the data directory
    #[arg(long, required_unless_present = "input")]
    class_id: Option<String>,
    #[arg(long)]
    class_name: String,
    /// Defaults to the current month
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    month: Option<u32>,
    /// Defaults to the current year
    #[arg(long)]
    year: Option<i32>,
    /// JSON roster ([{"id": 1, "nome": "..."}]) so students without marks still get a row
    #[arg(long)]
    roster: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Txt,
    Json,
}

impl ReportArgs {
    fn period(&self) -> Result<ReportPeriod> {
        let today = Local::now().date_naive();
        ReportPeriod::new(
            self.class_id.clone(),
            &self.class_name,
            self.month.unwrap_or_else(|| today.month()),
            self.year.unwrap_or_else(|| today.year()),
        )
    }

    fn source(&self, config: &Config) -> Result<Box<dyn ReportSource>> {
        let source: Box<dyn ReportSource> = match &self.input {
            Some(path) => Box::new(PayloadFileSource::new(path.clone())),
            None => Box::new(FileReportSource::new(Some(config.data_dir()?))?),
        };
        Ok(source)
    }

    fn roster(&self) -> Result<Vec<RosterEntry>> {
        let Some(path) = &self.roster else {
            return Ok(Vec::new());
        };
        let file = File::open(path).with_context(|| format!("could not open roster {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file)).with_context(|| format!("invalid roster {}", path.display()))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load()?;
    if let Some(name) = cli.institution {
        config.institution_name = Some(name);
    }
    if let Some(dir) = cli.data_dir {
        config.data_dir = Some(dir);
    }
    let diary = DiaryOptions {
        institution_name: config.institution_name(),
    };

    match cli.command {
        Commands::View { report } => {
            init_logging(
                config.log_filter.as_deref(),
                LogTarget::File(config.data_dir()?.join("diario.log")),
            )?;
            let service = ReportService::new(report.source(&config)?);
            let app = App::new(service, report.period()?, report.roster()?, diary, config.output_dir());
            tui::run(app)?;
        }
        Commands::Download { report, format, out_dir } => {
            init_logging(config.log_filter.as_deref(), LogTarget::Stderr)?;
            let service = ReportService::new(report.source(&config)?);
            let monthly = merge_roster(service.load(&report.period()?)?, &report.roster()?);
            if !monthly.rejected.is_empty() {
                warn!(count = monthly.rejected.len(), "some records were left out of the diary");
            }

            let document = compile_class_diary(&monthly, &diary);
            let sink: &dyn DocumentSink = match format {
                Format::Txt => &TextSink,
                Format::Json => &JsonSink,
            };
            let out_dir = out_dir.unwrap_or_else(|| config.output_dir());
            let path = write_artifact(sink, &document, &monthly, &out_dir)?;
            println!("Diário salvo em {}", path.display());
        }
    }
    Ok(())
}
