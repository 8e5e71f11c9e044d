//! Backup statistics and database information panels
//!
//! Both panels are drawn only once statistics have loaded.

use super::severity_color;
use crate::view::{DatabasePanel, StatisticsPanel};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};

pub struct StatisticsPanelWidget;

impl StatisticsPanelWidget {
    pub fn render(panel: &StatisticsPanel, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" {} ", panel.title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
            .split(inner);

        let tier_color = severity_color(panel.tier);
        let ratio = (panel.success_rate / 100.0).clamp(0.0, 1.0);
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(tier_color).bg(Color::Black))
            .ratio(ratio)
            .label(format!("Tasa de éxito {}", panel.rate_label));
        Widget::render(gauge, chunks[0], buf);

        let lines = Self::format_counts(panel);
        for (idx, line) in lines.into_iter().enumerate() {
            let y = chunks[2].y + idx as u16;
            if y >= chunks[2].y + chunks[2].height {
                break;
            }
            buf.set_line(chunks[2].x + 1, y, &line, chunks[2].width.saturating_sub(1));
        }
    }

    fn format_counts(panel: &StatisticsPanel) -> Vec<Line<'static>> {
        let failed_style = if panel.failed > 0 {
            Style::default().fg(Color::Red).bold()
        } else {
            Style::default().fg(Color::White)
        };
        vec![
            Line::from(vec![
                Span::styled("Total:       ", Style::default().fg(Color::Gray)),
                Span::styled(panel.total.to_string(), Style::default().fg(Color::White)),
            ]),
            Line::from(vec![
                Span::styled("Completados: ", Style::default().fg(Color::Gray)),
                Span::styled(panel.completed.to_string(), Style::default().fg(Color::Green)),
            ]),
            Line::from(vec![
                Span::styled("Fallidos:    ", Style::default().fg(Color::Gray)),
                Span::styled(panel.failed.to_string(), failed_style),
            ]),
            Line::from(vec![
                Span::styled("Tamaño:      ", Style::default().fg(Color::Gray)),
                Span::styled(panel.size_label.clone(), Style::default().fg(Color::Cyan)),
            ]),
        ]
    }
}

pub struct DatabasePanelWidget;

impl DatabasePanelWidget {
    pub fn render(panel: &DatabasePanel, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Información de la Base de Datos ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let lines = match panel {
            DatabasePanel::Details {
                name,
                log_mode,
                tablespaces,
                schemas,
                archivelog_enabled,
            } => {
                let (archivelog, color) = if *archivelog_enabled {
                    ("Habilitado", Color::Green)
                } else {
                    ("Deshabilitado", Color::Yellow)
                };
                vec![
                    Self::field("Nombre", name.clone(), Color::White),
                    Self::field("Log Mode", log_mode.clone(), Color::White),
                    Self::field("Tablespaces", tablespaces.to_string(), Color::White),
                    Self::field("Esquemas", schemas.to_string(), Color::White),
                    Self::field("ARCHIVELOG", archivelog.to_string(), color),
                ]
            }
            DatabasePanel::Unavailable => vec![Line::from(Span::styled(
                DatabasePanel::UNAVAILABLE_MESSAGE,
                Style::default().fg(Color::DarkGray),
            ))],
        };

        let body = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
        Widget::render(body, area, buf);
    }

    fn field(label: &str, value: String, color: Color) -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("{:<13}", format!("{}:", label)), Style::default().fg(Color::Gray)),
            Span::styled(value, Style::default().fg(color)),
        ])
    }
}
