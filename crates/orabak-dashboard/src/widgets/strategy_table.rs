//! Backup strategy table

use super::truncate_text;
use orabak_core::Strategy;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Row, Table},
};
use serde_json::Value;

pub struct StrategyTableWidget;

impl StrategyTableWidget {
    /// Render all strategies, active first
    pub fn render(strategies: &[Strategy], area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" ESTRATEGIAS DE BACKUP ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        if strategies.is_empty() {
            buf.set_string(
                inner.x + 1,
                inner.y,
                "No hay estrategias configuradas",
                Style::default().fg(Color::DarkGray),
            );
            return;
        }

        let widths = [
            Constraint::Length(8),  // ID
            Constraint::Min(20),    // Name
            Constraint::Length(10), // State
            Constraint::Length(14), // Type
            Constraint::Length(16), // Schedule
        ];

        let header = Row::new(vec![
            Cell::from("ID"),
            Cell::from("Nombre"),
            Cell::from("Estado"),
            Cell::from("Tipo"),
            Cell::from("Programación"),
        ])
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

        let mut ordered: Vec<&Strategy> = strategies.iter().collect();
        ordered.sort_by_key(|s| !s.is_active);
        let rows: Vec<Row> = ordered.into_iter().map(Self::create_row).collect();

        let table = Table::new(rows, widths).header(header).column_spacing(1);
        Widget::render(table, inner, buf);
    }

    fn create_row(strategy: &Strategy) -> Row<'static> {
        let (state, color) = if strategy.is_active {
            ("Activa", Color::Green)
        } else {
            ("Inactiva", Color::DarkGray)
        };

        Row::new(vec![
            Cell::from(truncate_text(&strategy.id.to_string(), 7))
                .style(Style::default().fg(Color::Gray)),
            Cell::from(truncate_text(&strategy.name, 30)).style(Style::default().fg(Color::White)),
            Cell::from(state).style(Style::default().fg(color)),
            Cell::from(Self::metadata_text(strategy, "backup_type"))
                .style(Style::default().fg(Color::Cyan)),
            Cell::from(Self::metadata_text(strategy, "schedule"))
                .style(Style::default().fg(Color::Gray)),
        ])
    }

    /// Display text for an optional metadata field
    fn metadata_text(strategy: &Strategy, key: &str) -> String {
        match strategy.metadata.get(key) {
            Some(Value::String(s)) => truncate_text(s, 15),
            Some(Value::Null) | None => "—".to_string(),
            Some(other) => truncate_text(&other.to_string(), 15),
        }
    }
}
