use std::fmt::Write;

use anyhow::Result;
use diario_core::document::{BlockContent, Document, DocumentSink, TableBlock};
use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Modify, Style, Width};
use unicode_width::UnicodeWidthStr;

const MAX_CELL_WIDTH: usize = 70;
const SIGNATURE_WIDTH: usize = 36;
const SIGNATURE_SPACING: usize = 8;

/// Plain-text class diary: one tabled table per fragment, pages separated
/// by form feeds.
pub struct TextSink;

impl DocumentSink for TextSink {
    fn extension(&self) -> &'static str {
        "txt"
    }

    fn render(&self, document: &Document) -> Result<Vec<u8>> {
        Ok(render_text(document)?.into_bytes())
    }
}

pub fn render_text(document: &Document) -> Result<String, std::fmt::Error> {
    let total = document.pages.len();
    let mut out = String::new();

    for (i, page) in document.pages.iter().enumerate() {
        if i > 0 {
            out.push('\x0c');
            out.push('\n');
        }
        for block in &page.blocks {
            match &block.content {
                BlockContent::Heading { text } => {
                    writeln!(out, "{}", text)?;
                    writeln!(out, "{}", "=".repeat(text.width()))?;
                }
                BlockContent::Text { text } => writeln!(out, "{}", text)?,
                BlockContent::Table(table) => {
                    writeln!(out)?;
                    writeln!(out, "{}", render_table(table))?;
                    writeln!(out)?;
                }
                BlockContent::SignatureLines { labels } => {
                    writeln!(out, "\n\n")?;
                    let spacer = " ".repeat(SIGNATURE_SPACING);
                    let lines: Vec<String> = labels.iter().map(|_| "_".repeat(SIGNATURE_WIDTH)).collect();
                    writeln!(out, "{}", lines.join(&spacer))?;
                    let captions: Vec<String> = labels.iter().map(|l| center(l, SIGNATURE_WIDTH)).collect();
                    writeln!(out, "{}", captions.join(&spacer).trim_end())?;
                }
            }
        }
        writeln!(out, "\nPágina {} de {}", page.number, total)?;
    }

    Ok(out)
}

fn render_table(block: &TableBlock) -> String {
    let mut builder = Builder::default();
    builder.push_record(block.head.clone());
    for row in &block.body {
        builder.push_record(row.clone());
    }
    let mut table = builder.build();
    table.with(Style::modern());

    // Wide free-text columns (activity descriptions) wrap instead of
    // stretching the page.
    for column in 0..block.head.len() {
        let widest = block
            .body
            .iter()
            .filter_map(|row| row.get(column))
            .map(|cell| cell.width())
            .max()
            .unwrap_or(0);
        if widest > MAX_CELL_WIDTH {
            table.with(Modify::new(Columns::new(column..column + 1)).with(Width::wrap(MAX_CELL_WIDTH)));
        }
    }

    table.to_string()
}

fn center(text: &str, width: usize) -> String {
    let used = text.width();
    if used >= width {
        return text.to_string();
    }
    let left = (width - used) / 2;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(width - used - left))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use diario_core::document::{compile_class_diary, DiaryOptions};
    use diario_core::{ActivityEntry, MonthlyReport, StudentAttendance};

    fn report(with_activity: bool) -> MonthlyReport {
        let mut alice = StudentAttendance::new(1, "Alice".to_string());
        alice.days_presence.extend([(1, true), (2, true), (3, false)]);
        MonthlyReport {
            class_name: "Pré 1".to_string(),
            month: 2,
            year: 2024,
            days_in_month: 29,
            students: vec![alice, StudentAttendance::new(2, "Bruno".to_string())],
            activities: if with_activity {
                vec![ActivityEntry {
                    date: NaiveDate::from_ymd_opt(2024, 2, 7).unwrap(),
                    objective_code: None,
                    description: "Contação de história ".repeat(10),
                }]
            } else {
                vec![]
            },
            rejected: vec![],
        }
    }

    #[test]
    fn test_text_contains_header_rows_and_signatures() {
        let doc = compile_class_diary(&report(false), &DiaryOptions::default());
        let text = render_text(&doc).unwrap();

        assert!(text.contains("DIÁRIO DE CLASSE"));
        assert!(text.contains("Turma: Pré 1"));
        assert!(text.contains("Alice"));
        assert!(text.contains("Bruno"));
        assert!(text.contains("Legenda: P = Presente"));
        assert!(text.contains("Professor(a)"));
        assert!(text.contains("Coordenação"));
        assert!(text.contains("Página 1 de 1"));
        assert!(!text.contains('\x0c'));
        assert!(!text.contains("REGISTRO DE ATIVIDADES"));
    }

    #[test]
    fn test_legend_and_signatures_come_after_table() {
        let doc = compile_class_diary(&report(false), &DiaryOptions::default());
        let text = render_text(&doc).unwrap();
        let bruno = text.find("Bruno").unwrap();
        assert!(text.find("Legenda").unwrap() > bruno);
        assert!(text.find("Professor(a)").unwrap() > bruno);
    }

    #[test]
    fn test_activities_on_separate_page() {
        let doc = compile_class_diary(&report(true), &DiaryOptions::default());
        let text = render_text(&doc).unwrap();
        let (first, second) = text.split_once('\x0c').unwrap();
        assert!(first.contains("Alice"));
        assert!(second.contains("REGISTRO DE ATIVIDADES"));
        assert!(second.contains("07/02"));
        assert!(second.contains("Página 2 de 2"));
    }

    #[test]
    fn test_center() {
        assert_eq!(center("ab", 6), "  ab  ");
        assert_eq!(center("Coordenação", 4), "Coordenação");
    }
}
