//! # orabak-dashboard
//!
//! Terminal console for the Orabak Oracle backup platform.
//!
//! This crate provides a Ratatui-based TUI for operating the platform:
//! - Oracle connection and database information
//! - Backup scheduler status, with start/stop control
//! - Backup strategies and success statistics
//! - In-memory history of every load and command
//!
//! ## Usage
//!
//! ```bash
//! orabak dashboard                    # Console against orabak.toml
//! orabak --config prod.toml dashboard
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┬──────────────────────────────────────────────────┐
//! │ ORABAK   │  Sistema de Gestión de Respaldo Oracle  [q][r][b] │
//! │          ├──────────────────────────────────────────────────┤
//! │▌▦ Dash   │  ▲ alerts                                        │
//! │ ⛁ Estr.  │  [DB] [Programador] [Estrategias] [Trabajos]     │
//! │ ☰ Logs   │  [s] Detener Programador                         │
//! │ ⚙ Conf.  │  ┌ Estadísticas ─────────────┐┌ Base de Datos ─┐ │
//! │          │  │ ████████░░ 95%            ││ ORCL           │ │
//! │ «        │  └───────────────────────────┘└────────────────┘ │
//! └──────────┴──────────────────────────────────────────────────┘
//! ```
//!
//! Below a configurable width the side panel becomes an overlay.
//!
//! Data flows one way: contexts own slices, each fetch lands in exactly one
//! slice, and pages derive their view from a snapshot on every frame.

mod error;

pub use error::{DashboardError, Result};

// State
mod context;
mod dashboard;
mod history;
mod slice;
mod view;

pub use context::{AuthContext, CommandOutcome, ConfigContext, SchedulerCommand, SchedulerContext};
pub use dashboard::DashboardPage;
pub use history::{ActivityEntry, ActivityHistory, ActivityKind};
pub use slice::{Applied, Slice, Ticket};
pub use view::{
    alerts_for, partition_strategies, AlertKind, DashboardSnapshot, DashboardView, DatabasePanel,
    JobsCard, SchedulerAction, SchedulerControl, StatisticsPanel, StatusCard, StrategyCard,
};

// Shell
mod routes;
mod shell;
mod widgets;

pub use routes::{Route, Router};
pub use shell::{LayoutShell, NavMode, ShellGeometry, HEADER_HEIGHT};

// Terminal integration
mod app;
mod event;
mod run;
mod terminal;
mod ui;

pub use app::App;
pub use event::Action;
pub use run::{run, run_with};

#[cfg(test)]
mod fake;
