//! Terminal setup and teardown utilities
//!
//! Handles entering/exiting raw mode and alternate screen.

use crate::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use orabak_core::OrabakError;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};

/// Terminal type for the console
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI rendering
pub fn init() -> Result<Tui> {
    enable_raw_mode()
        .map_err(|e| OrabakError::Terminal(format!("Failed to enable raw mode: {}", e)))?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| OrabakError::Terminal(format!("Failed to enter alternate screen: {}", e)))?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
        .map_err(|e| OrabakError::Terminal(format!("Failed to create terminal: {}", e)))
}

/// Restore the terminal to its original state
pub fn restore() -> Result<()> {
    execute!(io::stdout(), LeaveAlternateScreen)
        .map_err(|e| OrabakError::Terminal(format!("Failed to leave alternate screen: {}", e)))?;

    disable_raw_mode()
        .map_err(|e| OrabakError::Terminal(format!("Failed to disable raw mode: {}", e)))?;

    Ok(())
}

/// RAII guard for terminal state
///
/// Restores the terminal on drop, including when the run loop panics.
pub struct TerminalGuard;

impl TerminalGuard {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Errors are ignored on drop
        let _ = restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Affects terminal state; run manually with --ignored
    #[test]
    #[ignore]
    fn test_init_restore() {
        let terminal = init().expect("Failed to init terminal");
        assert!(terminal.size().is_ok());
        restore().expect("Failed to restore terminal");
    }

    #[test]
    #[ignore]
    fn test_guard_restores_on_drop() {
        let _terminal = init().expect("Failed to init terminal");
        drop(TerminalGuard::new());
        assert!(!crossterm::terminal::is_raw_mode_enabled().unwrap());
    }
}
