//! Status card row
//!
//! Database connection, scheduler state, strategy count and scheduled jobs,
//! side by side.

use super::severity_color;
use crate::view::{DashboardView, JobsCard, StatusCard, StrategyCard};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

pub struct StatusCardsWidget;

impl StatusCardsWidget {
    /// Rows needed for the card row
    pub const HEIGHT: u16 = 5;

    pub fn render(view: &DashboardView, area: Rect, buf: &mut Buffer) {
        let cards = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(area);

        Self::render_status(&view.database_card, cards[0], buf);
        Self::render_status(&view.scheduler_card, cards[1], buf);
        Self::render_strategies(&view.strategy_card, cards[2], buf);
        Self::render_jobs(&view.jobs_card, cards[3], buf);
    }

    fn card_block(title: &str, accent: Color) -> Block<'_> {
        Block::default()
            .title(format!(" {} ", title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent))
    }

    fn render_status(card: &StatusCard, area: Rect, buf: &mut Buffer) {
        let color = severity_color(card.severity);
        let chip = match &card.token {
            Some(token) => Span::styled(format!("[{}]", token), Style::default().fg(color)),
            None => Span::styled("[—]", Style::default().fg(Color::DarkGray)),
        };
        let body = Paragraph::new(vec![
            Line::from(Span::styled(
                card.headline,
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(chip),
        ])
        .block(Self::card_block(card.title, color));
        Widget::render(body, area, buf);
    }

    fn render_strategies(card: &StrategyCard, area: Rect, buf: &mut Buffer) {
        let body = Paragraph::new(vec![
            Line::from(Span::styled(
                card.ratio_label(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                card.inactive_label(),
                Style::default().fg(Color::Gray),
            )),
        ])
        .block(Self::card_block("Estrategias Activas", Color::Cyan));
        Widget::render(body, area, buf);
    }

    fn render_jobs(card: &JobsCard, area: Rect, buf: &mut Buffer) {
        let icon_color = if card.highlighted {
            Color::Cyan
        } else {
            Color::DarkGray
        };
        let body = Paragraph::new(vec![
            Line::from(vec![
                Span::styled("◷ ", Style::default().fg(icon_color)),
                Span::styled(
                    card.count.to_string(),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(Span::styled("programados", Style::default().fg(Color::Gray))),
        ])
        .block(Self::card_block("Trabajos", icon_color));
        Widget::render(body, area, buf);
    }
}
