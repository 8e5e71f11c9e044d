//! Alert banner
//!
//! One line per active alert, colored by severity.

use super::severity_color;
use crate::view::AlertKind;
use ratatui::prelude::*;

pub struct AlertBannerWidget;

impl AlertBannerWidget {
    /// Rows needed to show `alerts`
    pub fn height(alerts: &[AlertKind]) -> u16 {
        alerts.len() as u16
    }

    pub fn render(alerts: &[AlertKind], area: Rect, buf: &mut Buffer) {
        for (idx, alert) in alerts.iter().enumerate() {
            if idx as u16 >= area.height {
                break;
            }
            let style = Style::default()
                .fg(severity_color(alert.severity()))
                .add_modifier(Modifier::BOLD);
            let line = Line::from(vec![
                Span::styled(" ▲ ", style),
                Span::styled(alert.message(), style),
            ]);
            buf.set_line(area.x, area.y + idx as u16, &line, area.width);
        }
    }
}
