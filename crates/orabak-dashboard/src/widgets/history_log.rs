//! Activity history log
//!
//! Displays recorded loads and commands, newest first.

use super::truncate_text;
use crate::history::{ActivityEntry, ActivityKind};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem},
};

pub struct HistoryLogWidget;

impl HistoryLogWidget {
    pub fn render(entries: &[ActivityEntry], area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" HISTORIAL DE ACTIVIDAD ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        if entries.is_empty() {
            buf.set_string(
                inner.x + 1,
                inner.y,
                "Sin actividad registrada",
                Style::default().fg(Color::DarkGray),
            );
            return;
        }

        let width = inner.width as usize;
        let items: Vec<ListItem> = entries
            .iter()
            .take(inner.height as usize)
            .map(|entry| Self::format_entry(entry, width))
            .collect();

        Widget::render(List::new(items), inner, buf);
    }

    /// Format: "HH:MM:SS  icon source: message"
    fn format_entry(entry: &ActivityEntry, width: usize) -> ListItem<'static> {
        let line = format!(
            "{}  {} {}: {}",
            entry.formatted_time(),
            entry.kind.icon(),
            entry.source,
            entry.message
        );
        ListItem::new(truncate_text(&line, width.max(1)))
            .style(Style::default().fg(Self::kind_color(entry.kind)))
    }

    fn kind_color(kind: ActivityKind) -> Color {
        match kind {
            ActivityKind::Loaded => Color::DarkGray,
            ActivityKind::LoadFailed => Color::Red,
            ActivityKind::Command => Color::Green,
            ActivityKind::CommandFailed => Color::LightRed,
        }
    }
}
