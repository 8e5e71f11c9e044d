//! Scheduler start/stop control

use crate::view::SchedulerControl;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

pub struct SchedulerControlWidget;

impl SchedulerControlWidget {
    pub const HEIGHT: u16 = 3;

    pub fn render(control: &SchedulerControl, area: Rect, buf: &mut Buffer) {
        let button_style = if control.busy {
            Style::default().fg(Color::DarkGray)
        } else if control.running {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        };

        let mut spans = vec![
            Span::styled("[s] ", Style::default().fg(Color::Yellow)),
            Span::styled(control.action.label(), button_style),
        ];
        if control.busy {
            spans.push(Span::styled("  …", Style::default().fg(Color::DarkGray)));
        }
        if let Some(failure) = &control.failure {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                format!("Error: {}", failure),
                Style::default().fg(Color::Red),
            ));
        }

        let body = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
        Widget::render(body, area, buf);
    }
}
