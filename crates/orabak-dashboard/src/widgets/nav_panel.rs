//! Navigation panel
//!
//! Drawn as the permanent side panel in wide mode and as the overlay in
//! narrow mode. Labels are shown whenever the panel is wide enough; a
//! narrow panel shows icons only.

use crate::routes::{Route, Router};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear},
};

/// Narrowest inner width that still fits icon and label
const LABEL_MIN_WIDTH: u16 = 12;

pub struct NavPanelWidget;

impl NavPanelWidget {
    /// Render the panel. `cursor` marks the overlay entry under keyboard
    /// focus; `chevron` draws the expand/collapse affordance.
    pub fn render(
        router: &Router,
        cursor: Option<usize>,
        expanded: bool,
        chevron: bool,
        area: Rect,
        buf: &mut Buffer,
    ) {
        Widget::render(Clear, area, buf);
        let block = Block::default()
            .borders(Borders::RIGHT)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let show_labels = inner.width >= LABEL_MIN_WIDTH;
        let brand = if show_labels { " ORABAK" } else { " ◆" };
        buf.set_string(
            inner.x,
            inner.y,
            brand,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        );

        for (idx, route) in Route::all().iter().enumerate() {
            let y = inner.y + 2 + idx as u16;
            if y >= inner.y + inner.height {
                break;
            }
            let line = Self::entry(
                *route,
                router.is_selected(*route),
                cursor == Some(idx),
                show_labels,
            );
            buf.set_line(inner.x, y, &line, inner.width);
        }

        if chevron && inner.height > Route::all().len() as u16 + 3 {
            let glyph = if expanded { " «" } else { " »" };
            buf.set_string(
                inner.x,
                inner.y + inner.height - 1,
                glyph,
                Style::default().fg(Color::DarkGray),
            );
        }
    }

    fn entry(route: Route, selected: bool, focused: bool, show_labels: bool) -> Line<'static> {
        let mut style = if selected {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        if focused {
            style = style.add_modifier(Modifier::REVERSED);
        }
        let marker = if selected { "▌" } else { " " };
        let text = if show_labels {
            format!("{} {}  {}", marker, route.icon(), route.title())
        } else {
            format!("{} {}", marker, route.icon())
        };
        Line::from(Span::styled(text, style))
    }
}
