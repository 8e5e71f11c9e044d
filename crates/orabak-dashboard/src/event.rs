//! Event handling for crossterm terminal events
//!
//! Polls for keyboard, resize, and tick events and maps keys to actions.

use crate::routes::Route;
use crate::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use orabak_core::OrabakError;
use std::time::Duration;

/// Application events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// Key press event
    Key(KeyEvent),
    /// Timer tick for refresh checks
    Tick,
    /// Terminal resize event
    Resize(u16, u16),
}

/// Operator intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Re-read health and database info (statistics are not re-fetched)
    RefreshHealth,
    /// Start or stop the scheduler, whichever is currently offered
    ToggleScheduler,
    ToggleExpanded,
    ToggleOverlay,
    CloseOverlay,
    OverlayUp,
    OverlayDown,
    OverlaySelect,
    Navigate(Route),
    NextRoute,
    PrevRoute,
}

/// Poll for the next event with timeout
pub fn poll_event(timeout: Duration) -> Result<Option<AppEvent>> {
    let ready = event::poll(timeout)
        .map_err(|e| OrabakError::Terminal(format!("Failed to poll events: {}", e)))?;
    if !ready {
        return Ok(Some(AppEvent::Tick));
    }

    match event::read().map_err(|e| OrabakError::Terminal(format!("Failed to read event: {}", e)))? {
        Event::Key(key) if key.kind != KeyEventKind::Release => Ok(Some(AppEvent::Key(key))),
        Event::Resize(width, height) => Ok(Some(AppEvent::Resize(width, height))),
        _ => Ok(Some(AppEvent::Tick)),
    }
}

/// Check if a key event is a quit command (q or Ctrl+C)
pub fn is_quit_event(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Check if a key event is a refresh command (r or F5)
pub fn is_refresh_event(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::F(5))
}

/// Map a key to an action. Arrow keys and Enter only act while the overlay is open.
pub fn action_for_key(key: KeyEvent, overlay_open: bool) -> Option<Action> {
    if is_quit_event(key) {
        return Some(Action::Quit);
    }
    if is_refresh_event(key) {
        return Some(Action::RefreshHealth);
    }

    if overlay_open {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => return Some(Action::OverlayUp),
            KeyCode::Down | KeyCode::Char('j') => return Some(Action::OverlayDown),
            KeyCode::Enter => return Some(Action::OverlaySelect),
            KeyCode::Esc => return Some(Action::CloseOverlay),
            _ => {}
        }
    }

    match key.code {
        KeyCode::Char('s') | KeyCode::Char('S') => Some(Action::ToggleScheduler),
        KeyCode::Char('b') | KeyCode::Char('B') => Some(Action::ToggleExpanded),
        KeyCode::Char('m') | KeyCode::Char('M') => Some(Action::ToggleOverlay),
        KeyCode::Char(c @ '1'..='4') => {
            let index = c as usize - '1' as usize;
            Route::all().get(index).copied().map(Action::Navigate)
        }
        KeyCode::BackTab => Some(Action::PrevRoute),
        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => Some(Action::PrevRoute),
        KeyCode::Tab => Some(Action::NextRoute),
        _ => None,
    }
}
