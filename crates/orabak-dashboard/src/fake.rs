//! In-memory backend for tests
//!
//! Responses are captured when a call starts. A call can be held open with
//! [`FakeBackend::gate`] so tests control the order in which fetches finish.

use async_trait::async_trait;
use orabak_client::BackendApi;
use orabak_core::{
    BackupStatistics, DatabaseInfo, OracleConnection, OrabakError, Result, SchedulerStatus,
    Strategy, SystemHealth,
};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use tokio::sync::oneshot;

pub const HEALTH: &str = "health";
pub const DATABASE: &str = "database";
pub const STRATEGIES: &str = "strategies";
pub const STATUS: &str = "status";
pub const STATISTICS: &str = "statistics";
pub const START: &str = "start";
pub const STOP: &str = "stop";

/// How start/stop reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandReply {
    /// Reply carries the new status
    WithStatus,
    /// Reply carries no status; the client must re-read it
    Empty,
    /// Command fails
    Fail,
}

#[derive(Default)]
struct Gates {
    pending: HashMap<&'static str, VecDeque<oneshot::Receiver<()>>>,
    calls: HashMap<&'static str, usize>,
}

pub struct FakeBackend {
    pub health: Mutex<Option<SystemHealth>>,
    pub database: Mutex<Option<DatabaseInfo>>,
    pub strategies: Mutex<Option<Vec<Strategy>>>,
    pub status: Mutex<Option<SchedulerStatus>>,
    pub statistics: Mutex<Option<BackupStatistics>>,
    pub command_reply: Mutex<CommandReply>,
    /// Server-side scheduler state, mutated by start/stop
    pub server_running: Mutex<bool>,
    gates: Mutex<Gates>,
}

pub fn healthy_health() -> SystemHealth {
    SystemHealth {
        oracle_connection: OracleConnection::Connected,
        timestamp: None,
    }
}

pub fn archivelog_database() -> DatabaseInfo {
    DatabaseInfo {
        name: "ORCL".to_string(),
        log_mode: "ARCHIVELOG".to_string(),
        tablespaces: vec!["SYSTEM".into(), "USERS".into()],
        schemas: vec!["HR".into()],
        archivelog_enabled: true,
        archivelog_warning: false,
    }
}

impl FakeBackend {
    /// Every endpoint fails
    pub fn failing() -> Self {
        Self {
            health: Mutex::new(None),
            database: Mutex::new(None),
            strategies: Mutex::new(None),
            status: Mutex::new(None),
            statistics: Mutex::new(None),
            command_reply: Mutex::new(CommandReply::Fail),
            server_running: Mutex::new(false),
            gates: Mutex::new(Gates::default()),
        }
    }

    /// Every endpoint succeeds with a healthy, running system
    pub fn healthy() -> Self {
        let fake = Self::failing();
        fake.set_health(Some(healthy_health()));
        fake.set_database(Some(archivelog_database()));
        fake.set_strategies(Some(vec![
            Strategy::new(1, "full nightly", true),
            Strategy::new(2, "incremental", true),
        ]));
        fake.set_status(Some(SchedulerStatus {
            running: true,
            scheduled_jobs_count: 2,
        }));
        fake.set_statistics(Some(BackupStatistics {
            total_backups: 10,
            completed: 10,
            failed: 0,
            success_rate: 100.0,
            total_size_mb: 20.0,
        }));
        *fake.command_reply.lock().unwrap() = CommandReply::WithStatus;
        *fake.server_running.lock().unwrap() = true;
        fake
    }

    pub fn set_health(&self, value: Option<SystemHealth>) {
        *self.health.lock().unwrap() = value;
    }

    pub fn set_database(&self, value: Option<DatabaseInfo>) {
        *self.database.lock().unwrap() = value;
    }

    pub fn set_strategies(&self, value: Option<Vec<Strategy>>) {
        *self.strategies.lock().unwrap() = value;
    }

    pub fn set_status(&self, value: Option<SchedulerStatus>) {
        if let Some(status) = value {
            *self.server_running.lock().unwrap() = status.running;
        }
        *self.status.lock().unwrap() = value;
    }

    pub fn set_statistics(&self, value: Option<BackupStatistics>) {
        *self.statistics.lock().unwrap() = value;
    }

    pub fn set_command_reply(&self, reply: CommandReply) {
        *self.command_reply.lock().unwrap() = reply;
    }

    /// Hold the next call to `endpoint` open until the returned sender fires
    pub fn gate(&self, endpoint: &'static str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates
            .lock()
            .unwrap()
            .pending
            .entry(endpoint)
            .or_default()
            .push_back(rx);
        tx
    }

    pub fn calls(&self, endpoint: &'static str) -> usize {
        self.gates
            .lock()
            .unwrap()
            .calls
            .get(endpoint)
            .copied()
            .unwrap_or(0)
    }

    /// Yield until `endpoint` has been called `count` times
    pub async fn wait_for_calls(&self, endpoint: &'static str, count: usize) {
        for _ in 0..10_000 {
            if self.calls(endpoint) >= count {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("{} was never called {} times", endpoint, count);
    }

    async fn enter(&self, endpoint: &'static str) {
        let gate = {
            let mut gates = self.gates.lock().unwrap();
            *gates.calls.entry(endpoint).or_default() += 1;
            gates.pending.get_mut(endpoint).and_then(VecDeque::pop_front)
        };
        if let Some(gate) = gate {
            let _ = gate.await;
        }
    }

    async fn respond<T: Clone>(&self, endpoint: &'static str, slot: &Mutex<Option<T>>) -> Result<T> {
        let captured = slot.lock().unwrap().clone();
        self.enter(endpoint).await;
        captured.ok_or_else(|| OrabakError::Transport(format!("{} unavailable", endpoint)))
    }

    async fn command(&self, endpoint: &'static str, running: bool) -> Result<Option<SchedulerStatus>> {
        let reply = *self.command_reply.lock().unwrap();
        self.enter(endpoint).await;
        match reply {
            CommandReply::Fail => Err(OrabakError::Http {
                status: 500,
                body: "scheduler unavailable".to_string(),
            }),
            CommandReply::WithStatus | CommandReply::Empty => {
                *self.server_running.lock().unwrap() = running;
                let mut status = self.status.lock().unwrap();
                let updated = SchedulerStatus {
                    running,
                    scheduled_jobs_count: (*status).map(|s| s.scheduled_jobs_count).unwrap_or(0),
                };
                if status.is_some() {
                    *status = Some(updated);
                }
                Ok((reply == CommandReply::WithStatus).then_some(updated))
            }
        }
    }
}

#[async_trait]
impl BackendApi for FakeBackend {
    async fn health(&self) -> Result<SystemHealth> {
        self.respond(HEALTH, &self.health).await
    }

    async fn database_info(&self) -> Result<DatabaseInfo> {
        self.respond(DATABASE, &self.database).await
    }

    async fn strategies(&self) -> Result<Vec<Strategy>> {
        self.respond(STRATEGIES, &self.strategies).await
    }

    async fn scheduler_status(&self) -> Result<SchedulerStatus> {
        self.respond(STATUS, &self.status).await
    }

    async fn backup_statistics(&self, _days: u32) -> Result<BackupStatistics> {
        self.respond(STATISTICS, &self.statistics).await
    }

    async fn start_scheduler(&self) -> Result<Option<SchedulerStatus>> {
        self.command(START, true).await
    }

    async fn stop_scheduler(&self) -> Result<Option<SchedulerStatus>> {
        self.command(STOP, false).await
    }
}
