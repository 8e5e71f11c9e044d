//! Console widgets
//!
//! Each widget renders one region of a page from already-derived data.

use orabak_core::Severity;
use ratatui::style::Color;

mod alerts;
mod history_log;
mod nav_panel;
mod scheduler_control;
mod statistics_panel;
mod status_cards;
mod strategy_table;

pub use alerts::AlertBannerWidget;
pub use history_log::HistoryLogWidget;
pub use nav_panel::NavPanelWidget;
pub use scheduler_control::SchedulerControlWidget;
pub use statistics_panel::{DatabasePanelWidget, StatisticsPanelWidget};
pub use status_cards::StatusCardsWidget;
pub use strategy_table::StrategyTableWidget;

/// Map a severity to its display color.
///
/// Shared by every widget that shows a status chip, alert or rate.
pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Success => Color::Green,
        Severity::Error => Color::Red,
        Severity::Warning => Color::Yellow,
        Severity::Neutral => Color::DarkGray,
    }
}

/// Truncate text to at most `max_len` characters, marking the cut
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}
