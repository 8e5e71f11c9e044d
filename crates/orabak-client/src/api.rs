//! Backend API contract

use async_trait::async_trait;
use orabak_core::{BackupStatistics, DatabaseInfo, Result, SchedulerStatus, Strategy, SystemHealth};

/// Endpoint paths, relative to the configured API base URL
pub mod endpoints {
    pub const HEALTH: &str = "/api/config/health";
    pub const DATABASE: &str = "/api/config/database";
    pub const STRATEGIES: &str = "/api/scheduler/strategies";
    pub const SCHEDULER_STATUS: &str = "/api/scheduler/status";
    pub const SCHEDULER_START: &str = "/api/scheduler/start";
    pub const SCHEDULER_STOP: &str = "/api/scheduler/stop";
    pub const STATISTICS: &str = "/api/logs/statistics";
}

/// Read and command surface of the backup backend
///
/// Commands return the updated scheduler status when the backend includes
/// one in its reply, `None` otherwise.
#[async_trait]
pub trait BackendApi: Send + Sync {
    async fn health(&self) -> Result<SystemHealth>;

    async fn database_info(&self) -> Result<DatabaseInfo>;

    async fn strategies(&self) -> Result<Vec<Strategy>>;

    async fn scheduler_status(&self) -> Result<SchedulerStatus>;

    async fn backup_statistics(&self, days: u32) -> Result<BackupStatistics>;

    async fn start_scheduler(&self) -> Result<Option<SchedulerStatus>>;

    async fn stop_scheduler(&self) -> Result<Option<SchedulerStatus>>;
}
