use diario_core::time::month_name;
use diario_core::{MonthlyReport, Presence, ReportSource};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, Tabs, Wrap},
    Frame,
};

use crate::tui::app::{App, Notification, Tab};

struct Theme {
    primary: Color,
    muted: Color,
    text: Color,
    present: Color,
    absent: Color,
}

const THEME: Theme = Theme {
    primary: Color::Cyan,
    muted: Color::DarkGray,
    text: Color::White,
    present: Color::Green,
    absent: Color::Red,
};

const NAME_WIDTH: u16 = 22;

pub fn draw<S: ReportSource>(f: &mut Frame, app: &mut App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Tabs
            Constraint::Min(5),    // Grid / timeline
            Constraint::Length(3), // Selected student
            Constraint::Length(1), // Notification / help
        ])
        .split(f.area());

    draw_header(f, app, chunks[0]);

    let tabs = Tabs::new(Tab::TITLES.to_vec())
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded))
        .select(app.tab.index())
        .style(Style::default().fg(THEME.muted))
        .highlight_style(Style::default().fg(THEME.primary).add_modifier(Modifier::BOLD))
        .divider(" | ");
    f.render_widget(tabs, chunks[1]);

    match app.tab {
        Tab::Attendance => draw_attendance(f, app, chunks[2]),
        Tab::Activities => draw_activities(f, app, chunks[2]),
    }

    draw_detail(f, app, chunks[3]);
    draw_footer(f, app, chunks[4]);
}

fn draw_header<S: ReportSource>(f: &mut Frame, app: &App<S>, area: Rect) {
    let title = Line::from(vec![
        Span::styled("DIÁRIO DE CLASSE", Style::default().fg(THEME.primary).add_modifier(Modifier::BOLD)),
        Span::styled("  |  ", Style::default().fg(THEME.muted)),
        Span::styled(app.period.class_name.clone(), Style::default().fg(THEME.text)),
        Span::styled("   < ", Style::default().fg(THEME.muted)),
        Span::styled(
            format!("{}/{}", month_name(app.period.month), app.period.year),
            Style::default().fg(THEME.text).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" >", Style::default().fg(THEME.muted)),
    ]);
    let header = Paragraph::new(title)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(header, area);
}

fn chip(presence: Presence) -> Span<'static> {
    match presence {
        Presence::Present => Span::styled(" P", Style::default().fg(Color::Black).bg(THEME.present)),
        Presence::Absent => Span::styled(" F", Style::default().fg(Color::White).bg(THEME.absent)),
        Presence::NoRecord => Span::styled(" ·", Style::default().fg(THEME.muted)),
    }
}

fn attendance_table(report: &MonthlyReport) -> Table<'static> {
    let header = std::iter::once(Cell::from("Aluno"))
        .chain(report.days().map(|d| Cell::from(format!("{:>2}", d))))
        .chain([Cell::from("  P"), Cell::from("  F")]);

    let rows: Vec<Row> = report
        .students
        .iter()
        .map(|student| {
            let tally = student.tally(report.days_in_month);
            let cells = std::iter::once(Cell::from(Span::styled(
                student.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )))
            .chain(report.days().map(|d| Cell::from(chip(student.presence_on(d)))))
            .chain([
                Cell::from(Span::styled(format!("{:>3}", tally.present), Style::default().fg(THEME.present))),
                Cell::from(Span::styled(format!("{:>3}", tally.absent), Style::default().fg(THEME.absent))),
            ]);
            Row::new(cells.collect::<Vec<_>>())
        })
        .collect();

    let widths: Vec<Constraint> = std::iter::once(Constraint::Length(NAME_WIDTH))
        .chain(report.days().map(|_| Constraint::Length(2)))
        .chain([Constraint::Length(3), Constraint::Length(3)])
        .collect();

    Table::new(rows, widths)
        .header(Row::new(header.collect::<Vec<_>>()).style(Style::default().fg(Color::Yellow)))
        .column_spacing(0)
        .row_highlight_style(Style::default().bg(THEME.muted).add_modifier(Modifier::BOLD))
        .highlight_symbol(">> ")
}

fn draw_attendance<S: ReportSource>(f: &mut Frame, app: &mut App<S>, area: Rect) {
    let block = Block::default()
        .title(" Frequência ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);

    let Some(report) = &app.report else {
        f.render_widget(Paragraph::new("Nenhum relatório carregado").block(block), area);
        return;
    };
    if report.students.is_empty() {
        f.render_widget(
            Paragraph::new("Nenhum aluno com registro neste mês")
                .style(Style::default().fg(THEME.muted))
                .block(block),
            area,
        );
        return;
    }

    let table = attendance_table(report).block(block);
    f.render_stateful_widget(table, area, &mut app.state);
}

fn draw_activities<S: ReportSource>(f: &mut Frame, app: &mut App<S>, area: Rect) {
    let block = Block::default()
        .title(" Atividades ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);

    let Some(report) = &app.report else {
        f.render_widget(Paragraph::new("Nenhum relatório carregado").block(block), area);
        return;
    };
    if report.activities.is_empty() {
        f.render_widget(
            Paragraph::new("Nenhuma atividade registrada neste mês")
                .style(Style::default().fg(THEME.muted))
                .block(block),
            area,
        );
        return;
    }

    let rows: Vec<Row> = report
        .activities
        .iter()
        .map(|a| {
            Row::new(vec![
                Cell::from(a.display_date()),
                Cell::from(a.objective_or_dash().to_string()),
                Cell::from(a.description.clone()),
            ])
        })
        .collect();

    let table = Table::new(rows, [Constraint::Length(6), Constraint::Length(12), Constraint::Min(10)])
        .header(Row::new(vec!["Data", "Objetivo", "Descrição"]).style(Style::default().fg(Color::Yellow)))
        .block(block)
        .row_highlight_style(Style::default().bg(THEME.muted).add_modifier(Modifier::BOLD))
        .highlight_symbol(">> ");
    f.render_stateful_widget(table, area, &mut app.activity_state);
}

fn draw_detail<S: ReportSource>(f: &mut Frame, app: &App<S>, area: Rect) {
    let block = Block::default()
        .title(" Detalhe ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);

    let line = match (&app.report, app.state.selected()) {
        (Some(report), Some(i)) if app.tab == Tab::Attendance => match report.students.get(i) {
            Some(student) => {
                let tally = student.tally(report.days_in_month);
                Line::from(vec![
                    Span::styled(student.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
                    Span::styled("  Presenças: ", Style::default().fg(THEME.muted)),
                    Span::styled(tally.present.to_string(), Style::default().fg(THEME.present)),
                    Span::styled("  Faltas: ", Style::default().fg(THEME.muted)),
                    Span::styled(tally.absent.to_string(), Style::default().fg(THEME.absent)),
                    Span::styled("  Sem registro: ", Style::default().fg(THEME.muted)),
                    Span::raw(tally.no_record.to_string()),
                ])
            }
            None => Line::from(""),
        },
        (Some(report), _) => Line::from(vec![
            Span::styled("Alunos: ", Style::default().fg(THEME.muted)),
            Span::raw(report.students.len().to_string()),
            Span::styled("  Atividades: ", Style::default().fg(THEME.muted)),
            Span::raw(report.activities.len().to_string()),
        ]),
        (None, _) => Line::from(""),
    };

    f.render_widget(Paragraph::new(line).block(block).wrap(Wrap { trim: true }), area);
}

fn draw_footer<S: ReportSource>(f: &mut Frame, app: &App<S>, area: Rect) {
    let footer = match &app.notification {
        Some(Notification::Info(msg)) => Paragraph::new(msg.as_str()).style(Style::default().fg(THEME.present)),
        Some(Notification::Error(msg)) => Paragraph::new(msg.as_str()).style(Style::default().fg(THEME.absent)),
        None => Paragraph::new("Tab: Alternar | j/k: Navegar | ←/→: Mês | d: Baixar diário | q: Sair")
            .style(Style::default().fg(THEME.muted)),
    };
    f.render_widget(footer.alignment(Alignment::Center), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::tests::app;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen<S: ReportSource>(app: &mut App<S>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 30)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_attendance_tab_renders_grid() {
        let mut app = app();
        let text = screen(&mut app);
        assert!(text.contains("Frequência"));
        assert!(text.contains("Alice"));
        assert!(text.contains("Bruno"));
        assert!(text.contains("Fevereiro/2024"));
        assert!(text.contains("Presenças: 1"));
    }

    #[test]
    fn test_activities_tab_without_activities() {
        let mut app = app();
        app.next_tab();
        let text = screen(&mut app);
        assert!(text.contains("Nenhuma atividade registrada"));
        assert_eq!(app.derivations(), 1);
    }

    #[test]
    fn test_student_order_matches_printable_rows() {
        let mut app = app();
        let report = app.report.clone().unwrap();
        let printable: Vec<String> = diario_core::document::attendance_rows(&report)
            .into_iter()
            .map(|row| row[0].clone())
            .collect();
        let text = screen(&mut app);
        let alice = text.find("Alice").unwrap();
        let bruno = text.find("Bruno").unwrap();
        assert_eq!(printable, vec!["Alice".to_string(), "Bruno".to_string()]);
        assert!(alice < bruno);
    }
}
