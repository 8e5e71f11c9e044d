//! Responsive layout shell
//!
//! Two navigation modes, chosen by terminal width:
//!
//! - **Overlay** (narrow): navigation is a dismissible overlay drawn on top
//!   of the content. Opening or closing it never touches `expanded`.
//! - **Permanent** (wide): navigation is a side panel of one of two widths.
//!   Toggling `expanded` animates the width; header and content always take
//!   exactly the remaining columns.

use crate::routes::{Route, Router};
use ratatui::layout::Rect;
use std::time::{Duration, Instant};

/// Header bar height in rows
pub const HEADER_HEIGHT: u16 = 3;

/// Navigation mode for a given viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavMode {
    Overlay,
    Permanent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct WidthTransition {
    from: u16,
    to: u16,
    started: Instant,
}

/// Regions of one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellGeometry {
    pub mode: NavMode,
    /// Permanent side panel (wide mode only)
    pub panel: Option<Rect>,
    pub header: Rect,
    pub content: Rect,
    /// Navigation overlay (narrow mode, while open)
    pub overlay: Option<Rect>,
}

/// Shell state for one mounted console
#[derive(Debug, Clone)]
pub struct LayoutShell {
    expanded: bool,
    overlay_open: bool,
    overlay_cursor: usize,
    expanded_width: u16,
    collapsed_width: u16,
    breakpoint: u16,
    transition_duration: Duration,
    transition: Option<WidthTransition>,
}

impl LayoutShell {
    pub fn new(expanded_width: u16, collapsed_width: u16, breakpoint: u16, transition: Duration) -> Self {
        Self {
            expanded: true,
            overlay_open: false,
            overlay_cursor: 0,
            expanded_width,
            collapsed_width,
            breakpoint,
            transition_duration: transition,
            transition: None,
        }
    }

    pub fn from_config(config: &orabak_core::ConsoleConfig) -> Self {
        Self::new(
            config.panel_expanded_width,
            config.panel_collapsed_width,
            config.wide_breakpoint,
            Duration::from_millis(config.transition_ms),
        )
    }

    pub fn expanded(&self) -> bool {
        self.expanded
    }

    pub fn overlay_open(&self) -> bool {
        self.overlay_open
    }

    pub fn overlay_cursor(&self) -> usize {
        self.overlay_cursor
    }

    pub fn mode(&self, viewport_width: u16) -> NavMode {
        if viewport_width >= self.breakpoint {
            NavMode::Permanent
        } else {
            NavMode::Overlay
        }
    }

    fn target_width(&self) -> u16 {
        if self.expanded {
            self.expanded_width
        } else {
            self.collapsed_width
        }
    }

    /// Panel width at `now`, interpolated while a transition runs
    pub fn panel_width(&self, now: Instant) -> u16 {
        let Some(t) = self.transition else {
            return self.target_width();
        };
        let total = self.transition_duration.as_millis();
        let elapsed = now.saturating_duration_since(t.started).as_millis();
        if total == 0 || elapsed >= total {
            return t.to;
        }
        let from = t.from as i64;
        let to = t.to as i64;
        let width = from + (to - from) * elapsed as i64 / total as i64;
        width as u16
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.transition
            .is_some_and(|t| now.saturating_duration_since(t.started) < self.transition_duration)
    }

    /// Drop a finished transition
    pub fn tick(&mut self, now: Instant) {
        if self.transition.is_some() && !self.is_animating(now) {
            self.transition = None;
        }
    }

    /// Flip `expanded`, animating from whatever width is showing right now
    pub fn toggle_expanded(&mut self, now: Instant) {
        let from = self.panel_width(now);
        self.expanded = !self.expanded;
        self.transition = Some(WidthTransition {
            from,
            to: self.target_width(),
            started: now,
        });
    }

    pub fn open_overlay(&mut self, router: &Router) {
        self.overlay_open = true;
        self.overlay_cursor = router.route().map(|r| r.index()).unwrap_or(0);
    }

    pub fn close_overlay(&mut self) {
        self.overlay_open = false;
    }

    pub fn toggle_overlay(&mut self, router: &Router) {
        if self.overlay_open {
            self.close_overlay();
        } else {
            self.open_overlay(router);
        }
    }

    pub fn overlay_up(&mut self) {
        let len = Route::all().len();
        self.overlay_cursor = (self.overlay_cursor + len - 1) % len;
    }

    pub fn overlay_down(&mut self) {
        self.overlay_cursor = (self.overlay_cursor + 1) % Route::all().len();
    }

    /// Navigate to the entry under the overlay cursor and close the overlay
    pub fn overlay_select(&mut self, router: &mut Router) {
        let route = Route::all()[self.overlay_cursor % Route::all().len()];
        router.go(route);
        self.close_overlay();
    }

    /// Split `area` into panel, header, content and overlay regions
    pub fn geometry(&self, area: Rect, now: Instant) -> ShellGeometry {
        let mode = self.mode(area.width);
        let header_height = HEADER_HEIGHT.min(area.height);
        let body_height = area.height - header_height;

        match mode {
            NavMode::Permanent => {
                let panel_width = self.panel_width(now).min(area.width);
                let rest = area.width - panel_width;
                ShellGeometry {
                    mode,
                    panel: Some(Rect::new(area.x, area.y, panel_width, area.height)),
                    header: Rect::new(area.x + panel_width, area.y, rest, header_height),
                    content: Rect::new(
                        area.x + panel_width,
                        area.y + header_height,
                        rest,
                        body_height,
                    ),
                    overlay: None,
                }
            }
            NavMode::Overlay => ShellGeometry {
                mode,
                panel: None,
                header: Rect::new(area.x, area.y, area.width, header_height),
                content: Rect::new(area.x, area.y + header_height, area.width, body_height),
                overlay: self.overlay_open.then(|| {
                    Rect::new(
                        area.x,
                        area.y,
                        self.expanded_width.min(area.width),
                        area.height,
                    )
                }),
            },
        }
    }
}
