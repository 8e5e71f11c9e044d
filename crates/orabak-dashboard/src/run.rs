//! Main run loop for the console
//!
//! Handles terminal initialization, event loop, and cleanup.

use crate::{
    app::App,
    context::AuthContext,
    event::{self, action_for_key, AppEvent},
    terminal, ui, Result,
};
use orabak_client::{BackendApi, HttpBackend};
use orabak_core::{ConsoleConfig, OrabakError};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Poll timeout while idle
const IDLE_POLL: Duration = Duration::from_millis(100);
/// Poll timeout while the side panel is animating
const ANIMATION_POLL: Duration = Duration::from_millis(16);

/// Main entry point for running the console against the configured backend
pub async fn run(config: ConsoleConfig) -> Result<()> {
    config.validate()?;
    let auth = AuthContext::resolve(&config);
    let api: Arc<dyn BackendApi> = Arc::new(HttpBackend::from_config(&config, auth.token().map(str::to_string))?);
    run_with(config, api, auth).await
}

/// Run the console against any backend
pub async fn run_with(config: ConsoleConfig, api: Arc<dyn BackendApi>, auth: AuthContext) -> Result<()> {
    // Initialize terminal
    let mut terminal = terminal::init()?;

    // Create terminal guard for cleanup on panic
    let _guard = terminal::TerminalGuard::new();

    let mut app = App::new(config, api, auth);
    let size = terminal
        .size()
        .map_err(|e| OrabakError::Terminal(format!("Failed to read terminal size: {}", e)))?;
    app.set_viewport_width(size.width);

    // Initial loads run in the background; the first frame shows placeholders
    app.mount();

    let result = event_loop(&mut terminal, &mut app).await;

    app.shutdown();
    terminal::restore()?;
    result
}

async fn event_loop(terminal: &mut terminal::Tui, app: &mut App) -> Result<()> {
    let mut drawn_state = None;
    let mut dirty = true;

    loop {
        let now = Instant::now();
        let animating = app.shell.is_animating(now);
        app.shell.tick(now);

        // Redraw on input, on any slice or history change, and every animation frame
        let generation = app.generation();
        let busy = app.scheduler.command_in_flight();
        if dirty || animating || drawn_state != Some((generation, busy)) {
            terminal
                .draw(|frame| ui::draw(frame, app))
                .map_err(|e| OrabakError::Terminal(format!("Failed to draw frame: {}", e)))?;
            drawn_state = Some((generation, busy));
            // One more frame once the transition settles
            dirty = animating;
        }

        if app.should_auto_refresh(now) {
            app.auto_refresh(now);
        }

        let timeout = if animating {
            ANIMATION_POLL
        } else {
            IDLE_POLL
        };
        // crossterm polling blocks; keep it off the runtime's worker
        let polled = tokio::task::block_in_place(|| event::poll_event(timeout))?;
        match polled {
            Some(AppEvent::Key(key)) => {
                if let Some(action) = action_for_key(key, app.shell.overlay_open()) {
                    app.dispatch(action, Instant::now());
                    dirty = true;
                }
            }
            Some(AppEvent::Resize(width, _)) => {
                app.set_viewport_width(width);
                dirty = true;
            }
            Some(AppEvent::Tick) | None => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
