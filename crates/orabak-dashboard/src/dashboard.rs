//! Dashboard page state
//!
//! The page owns its backup statistics outright; they are not shared with
//! any context. Everything else it shows comes from the contexts.

use crate::context::{load_slice, ConfigContext, SchedulerContext};
use crate::history::ActivityHistory;
use crate::slice::{Applied, Slice};
use crate::view::{DashboardSnapshot, DashboardView};
use orabak_client::BackendApi;
use orabak_core::BackupStatistics;
use std::sync::Arc;

#[derive(Clone)]
pub struct DashboardPage {
    api: Arc<dyn BackendApi>,
    statistics: Slice<BackupStatistics>,
    window_days: u32,
    history: ActivityHistory,
}

impl DashboardPage {
    pub fn new(api: Arc<dyn BackendApi>, window_days: u32, history: ActivityHistory) -> Self {
        Self {
            api,
            statistics: Slice::new("backup statistics"),
            window_days,
            history,
        }
    }

    pub fn window_days(&self) -> u32 {
        self.window_days
    }

    /// Statistics, absent while the first request is outstanding or after it failed
    pub fn statistics(&self) -> Option<BackupStatistics> {
        self.statistics.get()
    }

    pub fn statistics_slice(&self) -> &Slice<BackupStatistics> {
        &self.statistics
    }

    pub async fn load_statistics(&self) -> Applied {
        load_slice(
            &self.statistics,
            &self.history,
            self.api.backup_statistics(self.window_days),
        )
        .await
    }

    /// Capture every input of the dashboard at this instant
    pub fn snapshot(&self, config: &ConfigContext, scheduler: &SchedulerContext) -> DashboardSnapshot {
        DashboardSnapshot {
            health: config.health(),
            database: config.database_info(),
            scheduler: scheduler.status(),
            strategies: scheduler.strategies(),
            statistics: self.statistics(),
            command_in_flight: scheduler.command_in_flight(),
            command_error: scheduler.last_command_error(),
            window_days: self.window_days,
        }
    }

    pub fn view(&self, config: &ConfigContext, scheduler: &SchedulerContext) -> DashboardView {
        DashboardView::derive(&self.snapshot(config, scheduler))
    }

    pub fn generation(&self) -> u64 {
        self.statistics.generation()
    }

    pub fn close(&self) {
        self.statistics.close();
    }
}
