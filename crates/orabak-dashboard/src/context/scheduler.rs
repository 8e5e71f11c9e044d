//! Scheduler context: run status, strategies, and start/stop commands
//!
//! Commands are serialized: while one is outstanding, a second start or stop
//! is ignored and reported as [`CommandOutcome::Busy`]. A finished command
//! takes a fresh ticket on the status slice, so a status read that was issued
//! before the command cannot overwrite its result.

use super::load_slice;
use crate::history::{ActivityHistory, ActivityKind};
use crate::slice::{Applied, Slice};
use orabak_client::BackendApi;
use orabak_core::{OrabakError, Result, SchedulerStatus, Strategy};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use tokio::sync::Mutex;

/// Scheduler command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerCommand {
    Start,
    Stop,
}

impl SchedulerCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
        }
    }

    /// Command that flips the scheduler from its `running` state
    pub fn toggle_for(running: bool) -> Self {
        if running {
            Self::Stop
        } else {
            Self::Start
        }
    }

    fn target_running(&self) -> bool {
        matches!(self, Self::Start)
    }
}

/// Result of a command that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The command ran; this is the status now held by the context
    Applied(SchedulerStatus),
    /// Another command was still outstanding; nothing was sent
    Busy,
}

/// Raises the in-flight flag for as long as it lives
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn raise(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Owns the scheduler status and strategy slices
#[derive(Clone)]
pub struct SchedulerContext {
    api: Arc<dyn BackendApi>,
    status: Slice<SchedulerStatus>,
    strategies: Slice<Vec<Strategy>>,
    command_lock: Arc<Mutex<()>>,
    in_flight: Arc<AtomicBool>,
    last_command_error: Arc<RwLock<Option<String>>>,
    history: ActivityHistory,
}

impl SchedulerContext {
    pub fn new(api: Arc<dyn BackendApi>, history: ActivityHistory) -> Self {
        Self {
            api,
            status: Slice::with_default("scheduler status", SchedulerStatus::default()),
            strategies: Slice::with_default("strategies", Vec::new()),
            command_lock: Arc::new(Mutex::new(())),
            in_flight: Arc::new(AtomicBool::new(false)),
            last_command_error: Arc::new(RwLock::new(None)),
            history,
        }
    }

    /// Current status. Never absent: `{running: false, scheduled_jobs_count: 0}` before the first load.
    pub fn status(&self) -> SchedulerStatus {
        self.status.get().unwrap_or_default()
    }

    pub fn strategies(&self) -> Vec<Strategy> {
        self.strategies.get().unwrap_or_default()
    }

    pub fn status_slice(&self) -> &Slice<SchedulerStatus> {
        &self.status
    }

    pub async fn refresh_status(&self) -> Applied {
        load_slice(&self.status, &self.history, self.api.scheduler_status()).await
    }

    pub async fn refresh_strategies(&self) -> Applied {
        load_slice(&self.strategies, &self.history, self.api.strategies()).await
    }

    /// Re-read status and strategies concurrently
    pub async fn refresh(&self) -> (Applied, Applied) {
        tokio::join!(self.refresh_status(), self.refresh_strategies())
    }

    pub async fn start(&self) -> Result<CommandOutcome> {
        self.run(SchedulerCommand::Start).await
    }

    pub async fn stop(&self) -> Result<CommandOutcome> {
        self.run(SchedulerCommand::Stop).await
    }

    /// Run `command`. Failures keep the previous status and are returned.
    pub async fn run(&self, command: SchedulerCommand) -> Result<CommandOutcome> {
        let Ok(_guard) = self.command_lock.try_lock() else {
            tracing::debug!("Ignoring scheduler {}: a command is in flight", command.as_str());
            return Ok(CommandOutcome::Busy);
        };
        let _in_flight = InFlight::raise(&self.in_flight);

        tracing::info!("Scheduler {} requested", command.as_str());
        let reply = match command {
            SchedulerCommand::Start => self.api.start_scheduler().await,
            SchedulerCommand::Stop => self.api.stop_scheduler().await,
        };

        match reply {
            Ok(Some(status)) => {
                self.store_status(status);
            }
            Ok(None) => {
                // No status in the reply: reconcile, or flip optimistically if the read fails.
                // A superseded read means a newer one already landed.
                if self.refresh_status().await == Applied::Failed {
                    let optimistic = SchedulerStatus {
                        running: command.target_running(),
                        ..self.status()
                    };
                    self.store_status(optimistic);
                }
            }
            Err(e) => {
                let err = OrabakError::command(command.as_str(), &e);
                tracing::error!("{}", err);
                self.set_command_error(Some(err.to_string()));
                self.history
                    .record(ActivityKind::CommandFailed, command.as_str(), err.to_string());
                return Err(err);
            }
        }

        let status = self.status();
        self.set_command_error(None);
        self.history.record(
            ActivityKind::Command,
            command.as_str(),
            format!("scheduler {}", status.token()),
        );
        Ok(CommandOutcome::Applied(status))
    }

    fn store_status(&self, status: SchedulerStatus) {
        let ticket = self.status.begin();
        self.status.apply(ticket, Ok(status));
    }

    fn set_command_error(&self, error: Option<String>) {
        let mut slot = self
            .last_command_error
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = error;
    }

    /// Error from the last failed command, cleared by the next successful one
    pub fn last_command_error(&self) -> Option<String> {
        self.last_command_error
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Whether a start/stop is outstanding (the control is disabled meanwhile)
    pub fn command_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn is_loading(&self) -> bool {
        self.status.is_loading() || self.strategies.is_loading()
    }

    pub fn generation(&self) -> u64 {
        self.status.generation() + self.strategies.generation()
    }

    pub fn close(&self) {
        self.status.close();
        self.strategies.close();
    }
}
