//! Main application state and logic
//!
//! The `App` owns the shell state and the context handles, and turns
//! operator actions into spawned fetches and commands. It never blocks on
//! the network: every request runs as its own task and lands in its slice.

use crate::context::{AuthContext, ConfigContext, SchedulerCommand, SchedulerContext};
use crate::dashboard::DashboardPage;
use crate::event::Action;
use crate::history::ActivityHistory;
use crate::routes::{Route, Router};
use crate::shell::{LayoutShell, NavMode};
use orabak_client::BackendApi;
use orabak_core::ConsoleConfig;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

/// Main application state
pub struct App {
    /// Effective configuration
    pub config: ConsoleConfig,
    pub auth: AuthContext,
    /// Health and database info
    pub system: ConfigContext,
    /// Scheduler status, strategies and commands
    pub scheduler: SchedulerContext,
    /// Dashboard page with its own statistics
    pub dashboard: DashboardPage,
    pub history: ActivityHistory,
    pub shell: LayoutShell,
    pub router: Router,
    /// Signal to exit the application
    pub should_quit: bool,
    /// Last periodic refresh (only used when auto refresh is configured)
    pub last_auto_refresh: Instant,
    viewport_width: u16,
    tasks: Vec<JoinHandle<()>>,
}

impl App {
    /// Create a new application. Nothing is fetched until [`App::mount`].
    pub fn new(config: ConsoleConfig, api: Arc<dyn BackendApi>, auth: AuthContext) -> Self {
        let history = ActivityHistory::new(config.history_limit);
        Self {
            system: ConfigContext::new(api.clone(), history.clone()),
            scheduler: SchedulerContext::new(api.clone(), history.clone()),
            dashboard: DashboardPage::new(api, config.stats_window_days, history.clone()),
            shell: LayoutShell::from_config(&config),
            router: Router::default(),
            history,
            auth,
            config,
            should_quit: false,
            last_auto_refresh: Instant::now(),
            viewport_width: u16::MAX,
            tasks: Vec::new(),
        }
    }

    fn spawn<F>(&mut self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.tasks.retain(|handle| !handle.is_finished());
        self.tasks.push(tokio::spawn(fut));
    }

    /// Issue every initial load independently: health, database info,
    /// scheduler status, strategies, and the dashboard statistics
    pub fn mount(&mut self) {
        tracing::info!("Mounting console against {}", self.config.api_url);

        let system = self.system.clone();
        self.spawn(async move {
            system.refresh_health().await;
        });
        let system = self.system.clone();
        self.spawn(async move {
            system.refresh_database().await;
        });
        let scheduler = self.scheduler.clone();
        self.spawn(async move {
            scheduler.refresh_status().await;
        });
        let scheduler = self.scheduler.clone();
        self.spawn(async move {
            scheduler.refresh_strategies().await;
        });
        let dashboard = self.dashboard.clone();
        self.spawn(async move {
            dashboard.load_statistics().await;
        });
    }

    /// Re-read health and database info. Statistics are left alone.
    pub fn refresh_health(&mut self) {
        let system = self.system.clone();
        self.spawn(async move {
            system.refresh().await;
        });
    }

    /// Run whichever scheduler command the control currently offers.
    /// Ignored while a command is outstanding.
    pub fn toggle_scheduler(&mut self) {
        if self.scheduler.command_in_flight() {
            tracing::debug!("Scheduler control disabled while a command is in flight");
            return;
        }
        let command = SchedulerCommand::toggle_for(self.scheduler.status().running);
        let scheduler = self.scheduler.clone();
        self.spawn(async move {
            // Failures are recorded on the context and shown on the control
            let _ = scheduler.run(command).await;
        });
    }

    /// Check if the periodic refresh interval has elapsed
    pub fn should_auto_refresh(&self, now: Instant) -> bool {
        match self.config.auto_refresh_ms {
            Some(ms) if ms > 0 => {
                now.saturating_duration_since(self.last_auto_refresh) >= Duration::from_millis(ms)
            }
            _ => false,
        }
    }

    /// Periodic refresh of health and scheduler state
    pub fn auto_refresh(&mut self, now: Instant) {
        self.last_auto_refresh = now;
        self.refresh_health();
        let scheduler = self.scheduler.clone();
        self.spawn(async move {
            scheduler.refresh().await;
        });
    }

    /// Record the terminal width; leaving narrow mode closes the overlay
    pub fn set_viewport_width(&mut self, width: u16) {
        self.viewport_width = width;
        if self.shell.mode(width) == NavMode::Permanent {
            self.shell.close_overlay();
        }
    }

    pub fn nav_mode(&self) -> NavMode {
        self.shell.mode(self.viewport_width)
    }

    pub fn dispatch(&mut self, action: Action, now: Instant) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::RefreshHealth => self.refresh_health(),
            Action::ToggleScheduler => self.toggle_scheduler(),
            Action::ToggleExpanded => self.shell.toggle_expanded(now),
            Action::ToggleOverlay => {
                if self.nav_mode() == NavMode::Overlay {
                    self.shell.toggle_overlay(&self.router);
                }
            }
            Action::CloseOverlay => self.shell.close_overlay(),
            Action::OverlayUp => self.shell.overlay_up(),
            Action::OverlayDown => self.shell.overlay_down(),
            Action::OverlaySelect => self.shell.overlay_select(&mut self.router),
            Action::Navigate(route) => {
                self.router.go(route);
                self.shell.close_overlay();
            }
            Action::NextRoute => {
                let next = self.router.route().map(|r| r.next()).unwrap_or(Route::Dashboard);
                self.router.go(next);
            }
            Action::PrevRoute => {
                let prev = self.router.route().map(|r| r.prev()).unwrap_or(Route::Dashboard);
                self.router.go(prev);
            }
        }
    }

    /// Changes whenever any slice or the history changes
    pub fn generation(&self) -> u64 {
        self.system.generation()
            + self.scheduler.generation()
            + self.dashboard.generation()
            + self.history.generation()
    }

    pub fn is_busy(&self) -> bool {
        self.tasks.iter().any(|handle| !handle.is_finished())
    }

    /// Wait for every spawned fetch and command to finish
    pub async fn settle(&mut self) {
        for handle in self.tasks.drain(..) {
            if let Err(e) = handle.await {
                tracing::warn!("Background task ended abnormally: {}", e);
            }
        }
    }

    /// Close every context and abort outstanding requests
    pub fn shutdown(&mut self) {
        self.system.close();
        self.scheduler.close();
        self.dashboard.close();
        for handle in self.tasks.drain(..) {
            handle.abort();
        }
        tracing::info!("Console shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{self, CommandReply, FakeBackend};
    use crate::view::AlertKind;
    use orabak_core::SchedulerStatus;

    fn app_with(backend: Arc<FakeBackend>, config: ConsoleConfig) -> App {
        App::new(config, backend, AuthContext::default())
    }

    #[tokio::test]
    async fn test_mount_issues_all_loads_independently() {
        let backend = Arc::new(FakeBackend::healthy());
        let mut app = app_with(backend.clone(), ConsoleConfig::default());
        app.mount();
        app.settle().await;

        for endpoint in [
            fake::HEALTH,
            fake::DATABASE,
            fake::STATUS,
            fake::STRATEGIES,
            fake::STATISTICS,
        ] {
            assert_eq!(backend.calls(endpoint), 1, "{}", endpoint);
        }
        let view = app.dashboard.view(&app.system, &app.scheduler);
        assert!(view.alerts.is_empty());
        assert!(view.statistics.is_some());
    }

    #[tokio::test]
    async fn test_refresh_does_not_refetch_statistics() {
        let backend = Arc::new(FakeBackend::healthy());
        let mut app = app_with(backend.clone(), ConsoleConfig::default());
        app.mount();
        app.settle().await;

        app.dispatch(Action::RefreshHealth, Instant::now());
        app.settle().await;
        assert_eq!(backend.calls(fake::HEALTH), 2);
        assert_eq!(backend.calls(fake::DATABASE), 2);
        assert_eq!(backend.calls(fake::STATISTICS), 1);
        assert_eq!(backend.calls(fake::STATUS), 1);
    }

    #[tokio::test]
    async fn test_toggle_scheduler_picks_single_action() {
        let backend = Arc::new(FakeBackend::healthy());
        let mut app = app_with(backend.clone(), ConsoleConfig::default());
        app.mount();
        app.settle().await;
        assert!(app.scheduler.status().running);

        app.dispatch(Action::ToggleScheduler, Instant::now());
        app.settle().await;
        assert_eq!(backend.calls(fake::STOP), 1);
        assert_eq!(backend.calls(fake::START), 0);
        assert!(!app.scheduler.status().running);

        app.dispatch(Action::ToggleScheduler, Instant::now());
        app.settle().await;
        assert_eq!(backend.calls(fake::START), 1);
        assert!(app.scheduler.status().running);
    }

    #[tokio::test]
    async fn test_toggle_ignored_while_command_outstanding() {
        let backend = Arc::new(FakeBackend::healthy());
        backend.set_status(Some(SchedulerStatus::default()));
        let mut app = app_with(backend.clone(), ConsoleConfig::default());

        let gate = backend.gate(fake::START);
        app.dispatch(Action::ToggleScheduler, Instant::now());
        backend.wait_for_calls(fake::START, 1).await;

        app.dispatch(Action::ToggleScheduler, Instant::now());
        gate.send(()).unwrap();
        app.settle().await;

        assert_eq!(backend.calls(fake::START), 1);
        assert_eq!(backend.calls(fake::STOP), 0);
        assert!(app.scheduler.status().running);
    }

    #[tokio::test]
    async fn test_failed_command_is_surfaced_on_control() {
        let backend = Arc::new(FakeBackend::healthy());
        backend.set_command_reply(CommandReply::Fail);
        let mut app = app_with(backend.clone(), ConsoleConfig::default());
        app.mount();
        app.settle().await;

        app.dispatch(Action::ToggleScheduler, Instant::now());
        app.settle().await;

        let view = app.dashboard.view(&app.system, &app.scheduler);
        assert!(view.control.failure.is_some());
        assert!(view.control.running);
        assert!(!view.alerts.contains(&AlertKind::SchedulerStopped));
    }

    #[tokio::test]
    async fn test_shutdown_discards_late_responses() {
        let backend = Arc::new(FakeBackend::healthy());
        let mut app = app_with(backend.clone(), ConsoleConfig::default());
        let gate = backend.gate(fake::HEALTH);
        app.mount();
        backend.wait_for_calls(fake::HEALTH, 1).await;

        app.shutdown();
        let _ = gate.send(());
        tokio::task::yield_now().await;
        assert!(app.system.health().is_none());
        assert!(!app.is_busy());
    }

    #[test]
    fn test_auto_refresh_disabled_by_default() {
        let app = app_with(Arc::new(FakeBackend::healthy()), ConsoleConfig::default());
        assert!(!app.should_auto_refresh(Instant::now() + Duration::from_secs(3600)));
    }

    #[test]
    fn test_auto_refresh_interval() {
        let config = ConsoleConfig {
            auto_refresh_ms: Some(1000),
            ..Default::default()
        };
        let app = app_with(Arc::new(FakeBackend::healthy()), config);
        let start = app.last_auto_refresh;
        assert!(!app.should_auto_refresh(start + Duration::from_millis(500)));
        assert!(app.should_auto_refresh(start + Duration::from_millis(1000)));
    }

    #[test]
    fn test_navigation_actions() {
        let mut app = app_with(Arc::new(FakeBackend::healthy()), ConsoleConfig::default());
        let now = Instant::now();
        app.dispatch(Action::Navigate(Route::Logs), now);
        assert_eq!(app.router.path(), "/logs");
        app.dispatch(Action::NextRoute, now);
        assert_eq!(app.router.path(), "/settings");
        app.dispatch(Action::NextRoute, now);
        assert_eq!(app.router.path(), "/");
        app.dispatch(Action::PrevRoute, now);
        assert_eq!(app.router.path(), "/settings");
    }

    #[test]
    fn test_overlay_only_in_narrow_mode() {
        let mut app = app_with(Arc::new(FakeBackend::healthy()), ConsoleConfig::default());
        let now = Instant::now();

        app.set_viewport_width(160);
        app.dispatch(Action::ToggleOverlay, now);
        assert!(!app.shell.overlay_open());

        app.set_viewport_width(80);
        app.dispatch(Action::ToggleOverlay, now);
        assert!(app.shell.overlay_open());
        assert!(app.shell.expanded());

        app.dispatch(Action::OverlayDown, now);
        app.dispatch(Action::OverlaySelect, now);
        assert_eq!(app.router.path(), "/backups");
        assert!(!app.shell.overlay_open());

        app.dispatch(Action::ToggleOverlay, now);
        app.set_viewport_width(160);
        assert!(!app.shell.overlay_open());
    }

    #[test]
    fn test_quit() {
        let mut app = app_with(Arc::new(FakeBackend::healthy()), ConsoleConfig::default());
        app.dispatch(Action::Quit, Instant::now());
        assert!(app.should_quit);
    }
}
