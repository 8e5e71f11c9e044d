//! Health and database-info context

use super::load_slice;
use crate::history::ActivityHistory;
use crate::slice::{Applied, Slice};
use orabak_client::BackendApi;
use orabak_core::{DatabaseInfo, SystemHealth};
use std::sync::Arc;

/// Owns the system health and database info slices
#[derive(Clone)]
pub struct ConfigContext {
    api: Arc<dyn BackendApi>,
    health: Slice<SystemHealth>,
    database: Slice<DatabaseInfo>,
    history: ActivityHistory,
}

impl ConfigContext {
    pub fn new(api: Arc<dyn BackendApi>, history: ActivityHistory) -> Self {
        Self {
            api,
            health: Slice::new("health"),
            database: Slice::new("database info"),
            history,
        }
    }

    /// Latest health snapshot, absent until the first successful load
    pub fn health(&self) -> Option<SystemHealth> {
        self.health.get()
    }

    pub fn database_info(&self) -> Option<DatabaseInfo> {
        self.database.get()
    }

    pub fn health_slice(&self) -> &Slice<SystemHealth> {
        &self.health
    }

    pub async fn refresh_health(&self) -> Applied {
        load_slice(&self.health, &self.history, self.api.health()).await
    }

    pub async fn refresh_database(&self) -> Applied {
        load_slice(&self.database, &self.history, self.api.database_info()).await
    }

    /// Re-read health and database info concurrently
    pub async fn refresh(&self) -> (Applied, Applied) {
        tokio::join!(self.refresh_health(), self.refresh_database())
    }

    pub fn is_loading(&self) -> bool {
        self.health.is_loading() || self.database.is_loading()
    }

    pub fn generation(&self) -> u64 {
        self.health.generation() + self.database.generation()
    }

    pub fn close(&self) {
        self.health.close();
        self.database.close();
    }
}
