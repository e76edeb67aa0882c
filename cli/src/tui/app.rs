use std::path::PathBuf;

use diario_core::document::{compile_class_diary, write_artifact, DiaryOptions};
use diario_core::time::shift_month;
use diario_core::{merge_roster, MonthlyReport, ReportPeriod, ReportService, ReportSource, RosterEntry};
use ratatui::widgets::TableState;
use tracing::error;

use crate::printable::TextSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Attendance,
    Activities,
}

impl Tab {
    pub const TITLES: [&'static str; 2] = ["Frequência", "Atividades"];

    pub fn index(&self) -> usize {
        match self {
            Tab::Attendance => 0,
            Tab::Activities => 1,
        }
    }

    pub fn toggle(&self) -> Tab {
        match self {
            Tab::Attendance => Tab::Activities,
            Tab::Activities => Tab::Attendance,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Info(String),
    Error(String),
}

pub struct App<S: ReportSource> {
    pub service: ReportService<S>,
    pub period: ReportPeriod,
    pub roster: Vec<RosterEntry>,
    pub report: Option<MonthlyReport>,
    pub tab: Tab,
    pub state: TableState,
    pub activity_state: TableState,
    pub notification: Option<Notification>,
    pub diary: DiaryOptions,
    pub out_dir: PathBuf,
    derivations: usize,
}

impl<S: ReportSource> App<S> {
    pub fn new(
        service: ReportService<S>,
        period: ReportPeriod,
        roster: Vec<RosterEntry>,
        diary: DiaryOptions,
        out_dir: PathBuf,
    ) -> App<S> {
        let mut app = App {
            service,
            period,
            roster,
            report: None,
            tab: Tab::Attendance,
            state: TableState::default(),
            activity_state: TableState::default(),
            notification: None,
            diary,
            out_dir,
            derivations: 0,
        };
        app.reload();
        app
    }

    /// How many times a report has been compiled since start.
    pub fn derivations(&self) -> usize {
        self.derivations
    }

    /// Fetches and rebuilds the report for the current period. On failure the
    /// previous report stays on screen and the error becomes a notification.
    fn reload(&mut self) -> bool {
        match self.service.load(&self.period) {
            Ok(report) => {
                let report = merge_roster(report, &self.roster);
                self.notification = if report.rejected.is_empty() {
                    None
                } else {
                    Some(Notification::Error(format!(
                        "{} registro(s) ignorado(s) por data inválida ou fora do mês",
                        report.rejected.len()
                    )))
                };
                self.state.select(if report.students.is_empty() { None } else { Some(0) });
                self.activity_state
                    .select(if report.activities.is_empty() { None } else { Some(0) });
                self.report = Some(report);
                self.derivations += 1;
                true
            }
            Err(e) => {
                error!(error = %e, "could not load report");
                self.notification = Some(Notification::Error(format!("Falha ao carregar relatório: {}", e)));
                false
            }
        }
    }

    pub fn next_tab(&mut self) {
        self.tab = self.tab.toggle();
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    fn row_count(&self) -> usize {
        match (&self.report, self.tab) {
            (Some(r), Tab::Attendance) => r.students.len(),
            (Some(r), Tab::Activities) => r.activities.len(),
            (None, _) => 0,
        }
    }

    fn current_state(&mut self) -> &mut TableState {
        match self.tab {
            Tab::Attendance => &mut self.state,
            Tab::Activities => &mut self.activity_state,
        }
    }

    pub fn next(&mut self) {
        let len = self.row_count();
        if len == 0 {
            return;
        }
        let state = self.current_state();
        let i = match state.selected() {
            Some(i) if i >= len - 1 => 0,
            Some(i) => i + 1,
            None => 0,
        };
        state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.row_count();
        if len == 0 {
            return;
        }
        let state = self.current_state();
        let i = match state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        state.select(Some(i));
    }

    /// Moves the month selector and recompiles from a fresh fetch.
    pub fn change_month(&mut self, delta: i32) {
        let (year, month) = shift_month(self.period.year, self.period.month, delta);
        let next = match self.period.with_month(year, month) {
            Ok(p) => p,
            Err(e) => {
                self.notification = Some(Notification::Error(e.to_string()));
                return;
            }
        };
        let previous = std::mem::replace(&mut self.period, next);
        if !self.reload() {
            self.period = previous;
        }
    }

    /// Writes the printable diary of the report on screen.
    pub fn download(&mut self) {
        let Some(report) = &self.report else {
            self.notification = Some(Notification::Error("Nenhum relatório carregado".to_string()));
            return;
        };
        let document = compile_class_diary(report, &self.diary);
        self.notification = Some(match write_artifact(&TextSink, &document, report, &self.out_dir) {
            Ok(path) => Notification::Info(format!("Diário salvo em {}", path.display())),
            Err(e) => {
                error!(error = %e, "could not write class diary");
                Notification::Error(format!("Falha ao salvar diário: {}", e))
            }
        });
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use anyhow::{anyhow, Result};
    use diario_core::{AttendanceRecord, ReportPayload};
    use std::cell::RefCell;

    pub(crate) struct MockSource {
        pub months: RefCell<Vec<(i32, u32)>>,
    }

    impl ReportSource for MockSource {
        fn fetch(&self, period: &ReportPeriod) -> Result<ReportPayload> {
            self.months.borrow_mut().push((period.year, period.month));
            if period.month != 2 {
                return Err(anyhow!("not found"));
            }
            Ok(ReportPayload {
                frequencias: vec![
                    AttendanceRecord::new(2, "Bruno", "2024-02-02T00:00:00.000Z", false),
                    AttendanceRecord::new(1, "Alice", "2024-02-01T00:00:00.000Z", true),
                ],
                atividades: vec![],
            })
        }
    }

    pub(crate) fn app() -> App<MockSource> {
        let service = ReportService::new(MockSource {
            months: RefCell::new(vec![]),
        });
        let period = ReportPeriod::new(Some("1".to_string()), "Pré 1", 2, 2024).unwrap();
        App::new(service, period, vec![], DiaryOptions::default(), std::env::temp_dir())
    }

    #[test]
    fn test_initial_load() {
        let app = app();
        let report = app.report.as_ref().unwrap();
        assert_eq!(report.students[0].name, "Alice");
        assert_eq!(app.state.selected(), Some(0));
        assert_eq!(app.derivations(), 1);
    }

    #[test]
    fn test_tab_switch_does_not_refetch_or_rebuild() {
        let mut app = app();
        app.next_tab();
        assert_eq!(app.tab, Tab::Activities);
        app.next_tab();
        app.select_tab(Tab::Activities);
        assert_eq!(app.derivations(), 1);
        assert_eq!(app.service.source().months.borrow().len(), 1);
    }

    #[test]
    fn test_failed_month_change_keeps_previous_report() {
        let mut app = app();
        app.change_month(1);
        assert_eq!(app.period.month, 2);
        assert!(app.report.is_some());
        assert!(matches!(app.notification, Some(Notification::Error(_))));
        assert_eq!(app.derivations(), 1);
        assert_eq!(*app.service.source().months.borrow(), vec![(2024, 2), (2024, 3)]);
    }

    #[test]
    fn test_month_change_rederives() {
        let mut app = app();
        app.change_month(12);
        assert_eq!(app.derivations(), 2);
        assert_eq!((app.period.year, app.period.month), (2025, 2));
        app.change_month(-12);
        assert_eq!(app.derivations(), 3);
        assert_eq!((app.period.year, app.period.month), (2024, 2));
    }

    #[test]
    fn test_navigation_wraps() {
        let mut app = app();
        app.next();
        assert_eq!(app.state.selected(), Some(1));
        app.next();
        assert_eq!(app.state.selected(), Some(0));
        app.previous();
        assert_eq!(app.state.selected(), Some(1));
    }

    #[test]
    fn test_download_writes_the_report_on_screen() {
        let mut app = app();
        let out_dir = std::env::temp_dir().join(format!("diario-app-download-{}", std::process::id()));
        app.out_dir = out_dir.clone();
        app.download();

        let path = out_dir.join("Diario_Classe_Pré 1_2_2024.txt");
        assert!(matches!(app.notification, Some(Notification::Info(_))));
        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.find("Alice").unwrap() < text.find("Bruno").unwrap());
        assert_eq!(app.derivations(), 1);
    }
}
