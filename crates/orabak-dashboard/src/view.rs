//! Derived dashboard view model
//!
//! [`DashboardView::derive`] is a pure function of a [`DashboardSnapshot`].
//! It is recomputed on every frame; nothing here is cached between renders.

use orabak_core::{
    classify_status, BackupStatistics, DatabaseInfo, OracleConnection, SchedulerStatus, Severity,
    Strategy, SystemHealth,
};

/// Everything the dashboard reads, captured at one instant
#[derive(Debug, Clone, Default)]
pub struct DashboardSnapshot {
    pub health: Option<SystemHealth>,
    pub database: Option<DatabaseInfo>,
    pub scheduler: SchedulerStatus,
    pub strategies: Vec<Strategy>,
    pub statistics: Option<BackupStatistics>,
    pub command_in_flight: bool,
    pub command_error: Option<String>,
    pub window_days: u32,
}

/// Domain-level problem shown at the top of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    OracleDisconnected,
    SchedulerStopped,
    ArchivelogDisabled,
}

impl AlertKind {
    pub fn severity(&self) -> Severity {
        match self {
            Self::OracleDisconnected => Severity::Error,
            Self::SchedulerStopped | Self::ArchivelogDisabled => Severity::Warning,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::OracleDisconnected => "La conexión a Oracle no está disponible",
            Self::SchedulerStopped => "El programador de backups está detenido",
            Self::ArchivelogDisabled => {
                "El modo ARCHIVELOG no está habilitado - Los backups pueden no ser consistentes"
            }
        }
    }
}

/// Split strategies into (active, inactive), preserving order
pub fn partition_strategies(strategies: &[Strategy]) -> (Vec<&Strategy>, Vec<&Strategy>) {
    strategies.iter().partition(|s| s.is_active)
}

/// Alerts in display order. Absent inputs suppress their alert.
pub fn alerts_for(
    health: Option<&SystemHealth>,
    scheduler: Option<&SchedulerStatus>,
    database: Option<&DatabaseInfo>,
) -> Vec<AlertKind> {
    let mut alerts = Vec::new();
    if health.is_some_and(SystemHealth::is_disconnected) {
        alerts.push(AlertKind::OracleDisconnected);
    }
    if scheduler.is_some_and(|s| !s.running) {
        alerts.push(AlertKind::SchedulerStopped);
    }
    if database.is_some_and(|db| db.archivelog_warning) {
        alerts.push(AlertKind::ArchivelogDisabled);
    }
    alerts
}

/// Status card: headline plus a classified chip
#[derive(Debug, Clone, PartialEq)]
pub struct StatusCard {
    pub title: &'static str,
    pub headline: &'static str,
    /// Raw status token shown in the chip; `None` when the source is absent
    pub token: Option<String>,
    pub severity: Severity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyCard {
    pub active: usize,
    pub total: usize,
    pub inactive: usize,
}

impl StrategyCard {
    pub fn ratio_label(&self) -> String {
        format!("{}/{}", self.active, self.total)
    }

    pub fn inactive_label(&self) -> String {
        format!("{} inactivas", self.inactive)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobsCard {
    pub count: u32,
    /// Icon is lit only when something is scheduled
    pub highlighted: bool,
}

/// The single scheduler action offered to the operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerAction {
    Start,
    Stop,
}

impl SchedulerAction {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Start => "Iniciar Programador",
            Self::Stop => "Detener Programador",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SchedulerControl {
    pub action: SchedulerAction,
    /// A command is outstanding; the control is disabled
    pub busy: bool,
    /// Last command failure, shown next to the action
    pub failure: Option<String>,
    pub running: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsPanel {
    pub title: String,
    pub success_rate: f64,
    pub rate_label: String,
    pub tier: Severity,
    pub total: u64,
    pub completed: u64,
    pub failed: u64,
    pub size_label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DatabasePanel {
    Details {
        name: String,
        log_mode: String,
        tablespaces: usize,
        schemas: usize,
        archivelog_enabled: bool,
    },
    Unavailable,
}

impl DatabasePanel {
    pub const UNAVAILABLE_MESSAGE: &'static str =
        "No se pudo obtener información de la base de datos";

    pub fn from_info(info: Option<&DatabaseInfo>) -> Self {
        match info {
            Some(db) => Self::Details {
                name: db.name.clone(),
                log_mode: db.log_mode.clone(),
                tablespaces: db.tablespaces.len(),
                schemas: db.schemas.len(),
                archivelog_enabled: db.archivelog_enabled,
            },
            None => Self::Unavailable,
        }
    }
}

/// Fully derived dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub alerts: Vec<AlertKind>,
    pub database_card: StatusCard,
    pub scheduler_card: StatusCard,
    pub strategy_card: StrategyCard,
    pub jobs_card: JobsCard,
    pub control: SchedulerControl,
    /// Present only once statistics have loaded
    pub statistics: Option<StatisticsPanel>,
    /// Shown next to the statistics panel
    pub database_panel: Option<DatabasePanel>,
}

impl DashboardView {
    pub fn derive(snapshot: &DashboardSnapshot) -> Self {
        let alerts = alerts_for(
            snapshot.health.as_ref(),
            Some(&snapshot.scheduler),
            snapshot.database.as_ref(),
        );

        let connection = snapshot.health.as_ref().map(|h| h.oracle_connection);
        let database_card = StatusCard {
            title: "Base de Datos",
            headline: if connection == Some(OracleConnection::Connected) {
                "Conectada"
            } else {
                "Desconectada"
            },
            token: connection.map(|c| c.as_str().to_string()),
            severity: connection
                .map(|c| c.severity())
                .unwrap_or(Severity::Neutral),
        };

        let scheduler = snapshot.scheduler;
        let scheduler_card = StatusCard {
            title: "Programador",
            headline: if scheduler.running { "Activo" } else { "Inactivo" },
            token: Some(scheduler.token().to_string()),
            severity: classify_status(scheduler.token()),
        };

        let (active, inactive) = partition_strategies(&snapshot.strategies);
        let strategy_card = StrategyCard {
            active: active.len(),
            total: snapshot.strategies.len(),
            inactive: inactive.len(),
        };

        let jobs_card = JobsCard {
            count: scheduler.scheduled_jobs_count,
            highlighted: scheduler.scheduled_jobs_count > 0,
        };

        let control = SchedulerControl {
            action: if scheduler.running {
                SchedulerAction::Stop
            } else {
                SchedulerAction::Start
            },
            busy: snapshot.command_in_flight,
            failure: snapshot.command_error.clone(),
            running: scheduler.running,
        };

        let statistics = snapshot.statistics.as_ref().map(|stats| StatisticsPanel {
            title: format!(
                "Estadísticas de Backups (Últimos {} días)",
                snapshot.window_days
            ),
            success_rate: stats.success_rate,
            rate_label: stats.success_rate_label(),
            tier: stats.rate_tier(),
            total: stats.total_backups,
            completed: stats.completed,
            failed: stats.failed,
            size_label: stats.size_label(),
        });

        let database_panel = statistics
            .as_ref()
            .map(|_| DatabasePanel::from_info(snapshot.database.as_ref()));

        Self {
            alerts,
            database_card,
            scheduler_card,
            strategy_card,
            jobs_card,
            control,
            statistics,
            database_panel,
        }
    }
}
