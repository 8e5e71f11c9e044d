//! Main UI layout and rendering
//!
//! Splits the frame with the layout shell and delegates each region to a
//! widget. Pages render from derived data only.

use crate::{
    app::App,
    routes::Route,
    shell::NavMode,
    view::{DashboardView, DatabasePanel},
    widgets::{
        AlertBannerWidget, DatabasePanelWidget, HistoryLogWidget, NavPanelWidget,
        SchedulerControlWidget, StatisticsPanelWidget, StatusCardsWidget, StrategyTableWidget,
    },
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    prelude::*,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::time::Instant;

/// Console title shown in the header
pub const TITLE: &str = "Sistema de Gestión de Respaldo Oracle";

/// Draw the entire console UI
pub fn draw(frame: &mut Frame, app: &App) {
    let geometry = app.shell.geometry(frame.area(), Instant::now());

    if let Some(panel) = geometry.panel {
        frame.render_widget(
            WidgetAdapter::new(|area, buf| {
                NavPanelWidget::render(&app.router, None, app.shell.expanded(), true, area, buf)
            }),
            panel,
        );
    }

    render_header(frame, geometry.header, app, geometry.mode);

    match app.router.route() {
        Some(Route::Dashboard) => render_dashboard(frame, geometry.content, app),
        Some(Route::Backups) => render_backups(frame, geometry.content, app),
        Some(Route::Logs) => render_logs(frame, geometry.content, app),
        Some(Route::Settings) => render_settings(frame, geometry.content, app),
        None => render_not_found(frame, geometry.content, app.router.path()),
    }

    // Overlay last so it sits above the content
    if let Some(overlay) = geometry.overlay {
        frame.render_widget(
            WidgetAdapter::new(|area, buf| {
                NavPanelWidget::render(
                    &app.router,
                    Some(app.shell.overlay_cursor()),
                    true,
                    false,
                    area,
                    buf,
                )
            }),
            overlay,
        );
    }
}

/// Render the header with title and keybindings
fn render_header(frame: &mut Frame, area: Rect, app: &App, mode: NavMode) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let mut title_spans = Vec::new();
    if mode == NavMode::Overlay {
        title_spans.push(Span::styled("☰ ", Style::default().fg(Color::Yellow)));
    }
    title_spans.push(Span::styled(
        TITLE,
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ));
    title_spans.push(Span::raw("  "));
    title_spans.push(Span::styled(
        app.auth.label(),
        Style::default().fg(Color::Gray),
    ));
    let title = Paragraph::new(Line::from(title_spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, header_chunks[0]);

    let toggle_key = match mode {
        NavMode::Overlay => "[m]",
        NavMode::Permanent => "[b]",
    };
    let keybindings = Paragraph::new(Line::from(vec![
        Span::styled("[q]", Style::default().fg(Color::Yellow)),
        Span::raw("uit "),
        Span::styled("[r]", Style::default().fg(Color::Yellow)),
        Span::raw("efresh "),
        Span::styled(toggle_key, Style::default().fg(Color::Yellow)),
        Span::raw(" menu"),
    ]))
    .block(Block::default().borders(Borders::ALL))
    .alignment(Alignment::Right);
    frame.render_widget(keybindings, header_chunks[1]);
}

/// Render the dashboard page
fn render_dashboard(frame: &mut Frame, area: Rect, app: &App) {
    let view = app.dashboard.view(&app.system, &app.scheduler);
    render_dashboard_view(frame, area, &view, app.dashboard.statistics_slice().is_loading());
}

fn render_dashboard_view(frame: &mut Frame, area: Rect, view: &DashboardView, loading: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(AlertBannerWidget::height(&view.alerts)),
            Constraint::Length(StatusCardsWidget::HEIGHT),
            Constraint::Length(SchedulerControlWidget::HEIGHT),
            Constraint::Min(0),
        ])
        .split(area);

    frame.render_widget(
        WidgetAdapter::new(|area, buf| AlertBannerWidget::render(&view.alerts, area, buf)),
        chunks[0],
    );
    frame.render_widget(
        WidgetAdapter::new(|area, buf| StatusCardsWidget::render(view, area, buf)),
        chunks[1],
    );
    frame.render_widget(
        WidgetAdapter::new(|area, buf| SchedulerControlWidget::render(&view.control, area, buf)),
        chunks[2],
    );

    match (&view.statistics, &view.database_panel) {
        (Some(statistics), Some(database)) => {
            let panels = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                .split(chunks[3]);
            frame.render_widget(
                WidgetAdapter::new(|area, buf| StatisticsPanelWidget::render(statistics, area, buf)),
                panels[0],
            );
            frame.render_widget(
                WidgetAdapter::new(|area, buf| DatabasePanelWidget::render(database, area, buf)),
                panels[1],
            );
        }
        _ if loading => {
            let placeholder = Paragraph::new(Span::styled(
                " Cargando estadísticas…",
                Style::default().fg(Color::DarkGray),
            ));
            frame.render_widget(placeholder, chunks[3]);
        }
        _ => {}
    }
}

/// Render the strategies page
fn render_backups(frame: &mut Frame, area: Rect, app: &App) {
    let strategies = app.scheduler.strategies();
    frame.render_widget(
        WidgetAdapter::new(|area, buf| StrategyTableWidget::render(&strategies, area, buf)),
        area,
    );
}

/// Render the activity history page
fn render_logs(frame: &mut Frame, area: Rect, app: &App) {
    let entries = app.history.entries();
    frame.render_widget(
        WidgetAdapter::new(|area, buf| HistoryLogWidget::render(&entries, area, buf)),
        area,
    );
}

/// Render the settings page: effective configuration and database details
fn render_settings(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(10), Constraint::Min(0)])
        .split(area);

    let config = &app.config;
    let auto_refresh = match config.auto_refresh_ms {
        Some(ms) if ms > 0 => format!("{} ms", ms),
        _ => "manual".to_string(),
    };
    let rows = [
        ("API", config.api_url.clone()),
        ("Autenticación", app.auth.label().to_string()),
        ("Ventana", format!("{} días", config.stats_window_days)),
        ("Actualización", auto_refresh),
        ("Timeout", format!("{} ms", config.request_timeout_ms)),
        (
            "Panel",
            format!(
                "{} / {} columnas (ancho mínimo {})",
                config.panel_expanded_width, config.panel_collapsed_width, config.wide_breakpoint
            ),
        ),
        ("Log", config.effective_log_file().display().to_string()),
    ];
    let lines: Vec<Line> = rows
        .into_iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{:<15}", format!("{}:", label)), Style::default().fg(Color::Gray)),
                Span::styled(value, Style::default().fg(Color::White)),
            ])
        })
        .collect();
    let settings = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" CONFIGURACIÓN ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(settings, chunks[0]);

    let database = DatabasePanel::from_info(app.system.database_info().as_ref());
    frame.render_widget(
        WidgetAdapter::new(|area, buf| DatabasePanelWidget::render(&database, area, buf)),
        chunks[1],
    );
}

/// Render the fallback for paths that match no route
fn render_not_found(frame: &mut Frame, area: Rect, path: &str) {
    let body = Paragraph::new(vec![
        Line::from(Span::styled(
            "404",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("Página no encontrada: {}", path),
            Style::default().fg(Color::Gray),
        )),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(body, area);
}

/// Widget adapter to bridge static render methods to ratatui's Widget trait
struct WidgetAdapter<F>
where
    F: Fn(Rect, &mut Buffer),
{
    render_fn: F,
}

impl<F> WidgetAdapter<F>
where
    F: Fn(Rect, &mut Buffer),
{
    fn new(render_fn: F) -> Self {
        Self { render_fn }
    }
}

impl<F> Widget for WidgetAdapter<F>
where
    F: Fn(Rect, &mut Buffer),
{
    fn render(self, area: Rect, buf: &mut Buffer) {
        (self.render_fn)(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::AuthContext;
    use crate::event::Action;
    use crate::fake::{self, FakeBackend};
    use crate::view::AlertKind;
    use orabak_core::{BackupStatistics, ConsoleConfig, SchedulerStatus, Strategy};
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    fn render(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn scenario_backend() -> Arc<FakeBackend> {
        let backend = FakeBackend::healthy();
        backend.set_strategies(Some(vec![
            Strategy::new(1, "full nightly", true),
            Strategy::new(2, "archive sweep", false),
        ]));
        backend.set_status(Some(SchedulerStatus {
            running: true,
            scheduled_jobs_count: 3,
        }));
        backend.set_statistics(Some(BackupStatistics {
            total_backups: 40,
            completed: 38,
            failed: 2,
            success_rate: 95.0,
            total_size_mb: 512.25,
        }));
        Arc::new(backend)
    }

    async fn mounted(backend: Arc<FakeBackend>) -> App {
        let mut app = App::new(ConsoleConfig::default(), backend, AuthContext::default());
        app.mount();
        app.settle().await;
        app
    }

    #[tokio::test]
    async fn test_healthy_dashboard_renders_all_cards() {
        let app = mounted(scenario_backend()).await;
        let screen = render(&app, 160, 40);

        assert!(screen.contains(TITLE));
        assert!(screen.contains("Conectada"));
        assert!(screen.contains("Activo"));
        assert!(screen.contains("1/2"));
        assert!(screen.contains("1 inactivas"));
        assert!(screen.contains("◷ 3"));
        assert!(screen.contains("95%"));
        assert!(screen.contains("512.25 MB"));
        assert!(screen.contains("Detener Programador"));
        assert!(!screen.contains(AlertKind::SchedulerStopped.message()));
        assert!(!screen.contains(AlertKind::OracleDisconnected.message()));
    }

    #[tokio::test]
    async fn test_partial_load_still_renders() {
        let backend = Arc::new(FakeBackend::failing());
        backend.set_status(Some(SchedulerStatus::default()));
        let app = mounted(backend).await;
        let screen = render(&app, 160, 40);

        assert!(screen.contains("Desconectada"));
        assert!(screen.contains("Inactivo"));
        assert!(screen.contains("0/0"));
        assert!(screen.contains("Iniciar Programador"));
        assert!(screen.contains(AlertKind::SchedulerStopped.message()));
        assert!(!screen.contains("Estadísticas de Backups"));
        assert!(!screen.contains(DatabasePanel::UNAVAILABLE_MESSAGE));
    }

    #[tokio::test]
    async fn test_statistics_without_database_shows_unavailable() {
        let backend = scenario_backend();
        backend.set_database(None);
        let app = mounted(backend).await;
        let screen = render(&app, 160, 40);

        assert!(screen.contains("Últimos 30 días"));
        assert!(screen.contains(DatabasePanel::UNAVAILABLE_MESSAGE));
    }

    #[tokio::test]
    async fn test_pending_statistics_shows_placeholder() {
        let backend = scenario_backend();
        let gate = backend.gate(fake::STATISTICS);
        let mut app = App::new(ConsoleConfig::default(), backend.clone(), AuthContext::default());
        app.mount();
        backend.wait_for_calls(fake::STATISTICS, 1).await;

        let screen = render(&app, 160, 40);
        assert!(screen.contains("Cargando estadísticas"));

        gate.send(()).unwrap();
        app.settle().await;
        assert!(render(&app, 160, 40).contains("95%"));
    }

    #[test]
    fn test_wide_mode_draws_permanent_panel() {
        let app = App::new(
            ConsoleConfig::default(),
            Arc::new(FakeBackend::healthy()),
            AuthContext::default(),
        );
        let screen = render(&app, 160, 30);
        assert!(screen.contains("ORABAK"));
        assert!(screen.contains("Configuración"));
        assert!(screen.contains("[b]"));
    }

    #[test]
    fn test_narrow_mode_hides_panel_until_overlay_opens() {
        let mut app = App::new(
            ConsoleConfig::default(),
            Arc::new(FakeBackend::healthy()),
            AuthContext::default(),
        );
        app.set_viewport_width(80);
        let screen = render(&app, 80, 30);
        assert!(!screen.contains("ORABAK"));
        assert!(screen.contains("[m]"));

        app.dispatch(Action::ToggleOverlay, Instant::now());
        let screen = render(&app, 80, 30);
        assert!(screen.contains("ORABAK"));
        assert!(screen.contains("Configuración"));
    }

    #[tokio::test]
    async fn test_routed_pages() {
        let mut app = mounted(scenario_backend()).await;
        let now = Instant::now();

        app.dispatch(Action::Navigate(Route::Backups), now);
        let screen = render(&app, 160, 30);
        assert!(screen.contains("ESTRATEGIAS DE BACKUP"));
        assert!(screen.contains("archive sweep"));

        app.dispatch(Action::Navigate(Route::Logs), now);
        assert!(render(&app, 160, 30).contains("HISTORIAL DE ACTIVIDAD"));

        app.dispatch(Action::Navigate(Route::Settings), now);
        let screen = render(&app, 160, 30);
        assert!(screen.contains("http://localhost:8000"));
        assert!(screen.contains("24 / 6 columnas"));
        assert!(screen.contains("ORCL"));
    }

    #[test]
    fn test_empty_pages_on_short_terminal() {
        let mut app = App::new(
            ConsoleConfig::default(),
            Arc::new(FakeBackend::healthy()),
            AuthContext::default(),
        );
        app.set_viewport_width(80);

        app.router.navigate("/logs");
        for height in 1..=6 {
            render(&app, 80, height);
        }
        assert!(render(&app, 80, 4).contains("HISTORIAL DE ACTIVIDAD"));

        app.router.navigate("/backups");
        for height in 1..=6 {
            render(&app, 80, height);
        }
        assert!(render(&app, 80, 4).contains("ESTRATEGIAS DE BACKUP"));
    }

    #[test]
    fn test_unknown_path_renders_not_found() {
        let mut app = App::new(
            ConsoleConfig::default(),
            Arc::new(FakeBackend::healthy()),
            AuthContext::default(),
        );
        app.router.navigate("/reports");
        let screen = render(&app, 160, 30);
        assert!(screen.contains("404"));
        assert!(screen.contains("Página no encontrada: /reports"));
    }
}
