use tracing::debug;

use crate::document::descriptor::{BlockContent, Document, Section};
use crate::document::layout::{
    max_row_lines, split_row, PageCursor, BLOCK_GAP, CONTENT_WIDTH, HEADING_HEIGHT, PAGE_HEIGHT, PAGE_WIDTH,
    SIGNATURE_GAP, SIGNATURE_HEIGHT, TEXT_HEIGHT,
};
use crate::document::sink::artifact_stem;
use crate::model::attendance::Presence;
use crate::model::report::MonthlyReport;
use crate::time::month_name;

const STUDENT_COLUMN_WIDTH: f32 = 60.0;
const DATE_COLUMN_WIDTH: f32 = 22.0;
const OBJECTIVE_COLUMN_WIDTH: f32 = 38.0;

// Space taken above the first table of each section.
const ATTENDANCE_HEADER_HEIGHT: f32 = HEADING_HEIGHT + 4.0 * TEXT_HEIGHT + BLOCK_GAP;
const ACTIVITY_HEADER_HEIGHT: f32 = HEADING_HEIGHT + TEXT_HEIGHT + BLOCK_GAP;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiaryOptions {
    pub institution_name: String,
}

impl Default for DiaryOptions {
    fn default() -> Self {
        Self {
            institution_name: "Escola".to_string(),
        }
    }
}

/// `[name, symbol for day 1, ..., symbol for day N]` per student, in report order.
pub fn attendance_rows(report: &MonthlyReport) -> Vec<Vec<String>> {
    report
        .students
        .iter()
        .map(|student| {
            std::iter::once(student.name.clone())
                .chain(report.days().map(|d| student.presence_on(d).symbol().to_string()))
                .collect()
        })
        .collect()
}

fn legend() -> String {
    let entries: Vec<String> = [Presence::Present, Presence::Absent, Presence::NoRecord]
        .iter()
        .map(|p| format!("{} = {}", p.symbol(), p.label()))
        .collect();
    format!("Legenda: {}", entries.join("   "))
}

fn period_label(report: &MonthlyReport) -> String {
    format!("{}/{}", month_name(report.month), report.year)
}

/// Lays out the class diary for `report`.
///
/// Section A (attendance) is always present. Section B (activities) starts on
/// its own page and exists only when there is at least one activity.
pub fn compile_class_diary(report: &MonthlyReport, options: &DiaryOptions) -> Document {
    let mut cursor = PageCursor::new();

    cursor.new_page(Section::Attendance);
    cursor.place(BlockContent::Heading { text: "DIÁRIO DE CLASSE".to_string() }, HEADING_HEIGHT);
    for line in [
        options.institution_name.clone(),
        format!("Turma: {}", report.class_name),
        format!("Mês/Ano: {}", period_label(report)),
        format!("Total de alunos: {}", report.student_count()),
    ] {
        cursor.place(BlockContent::Text { text: line }, TEXT_HEIGHT);
    }
    cursor.gap(BLOCK_GAP);

    let day_width = (CONTENT_WIDTH - STUDENT_COLUMN_WIDTH) / report.days_in_month.max(1) as f32;
    let head: Vec<String> = std::iter::once("Aluno".to_string())
        .chain(report.days().map(|d| d.to_string()))
        .collect();
    let widths: Vec<f32> = std::iter::once(STUDENT_COLUMN_WIDTH)
        .chain(report.days().map(|_| day_width))
        .collect();
    let max_lines = max_row_lines(ATTENDANCE_HEADER_HEIGHT);
    let body = attendance_rows(report)
        .into_iter()
        .flat_map(|row| split_row(row, 0, STUDENT_COLUMN_WIDTH, max_lines))
        .collect();
    let table_end = cursor.place_table(head, body, widths);

    // Legend and signatures travel together, right under the table.
    cursor.gap(BLOCK_GAP);
    let closing_height = TEXT_HEIGHT + SIGNATURE_GAP + SIGNATURE_HEIGHT;
    if !cursor.fits(closing_height) {
        cursor.new_page(Section::Attendance);
    }
    cursor.place(BlockContent::Text { text: legend() }, TEXT_HEIGHT);
    cursor.gap(SIGNATURE_GAP);
    cursor.place(
        BlockContent::SignatureLines {
            labels: vec!["Professor(a)".to_string(), "Coordenação".to_string()],
        },
        SIGNATURE_HEIGHT,
    );

    if !report.activities.is_empty() {
        cursor.new_page(Section::Activities);
        cursor.place(
            BlockContent::Heading { text: "REGISTRO DE ATIVIDADES".to_string() },
            HEADING_HEIGHT,
        );
        cursor.place(
            BlockContent::Text {
                text: format!("Turma: {} | {}", report.class_name, period_label(report)),
            },
            TEXT_HEIGHT,
        );
        cursor.gap(BLOCK_GAP);

        let description_width = CONTENT_WIDTH - DATE_COLUMN_WIDTH - OBJECTIVE_COLUMN_WIDTH;
        let max_lines = max_row_lines(ACTIVITY_HEADER_HEIGHT);
        let body = report
            .activities
            .iter()
            .flat_map(|a| {
                let row = vec![
                    a.display_date(),
                    a.objective_or_dash().to_string(),
                    a.description.clone(),
                ];
                split_row(row, 2, description_width, max_lines)
            })
            .collect();
        cursor.place_table(
            vec!["Data".to_string(), "Objetivo".to_string(), "Descrição".to_string()],
            body,
            vec![DATE_COLUMN_WIDTH, OBJECTIVE_COLUMN_WIDTH, description_width],
        );
    }

    let pages = cursor.finish();
    debug!(pages = pages.len(), table_end, "class diary laid out");

    Document {
        title: artifact_stem(report),
        page_width: PAGE_WIDTH,
        page_height: PAGE_HEIGHT,
        pages,
    }
}
