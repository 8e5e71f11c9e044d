//! Process-wide state providers
//!
//! Each context owns one or more slices, is the only writer of them, and is
//! handed to consumers as a cheap clonable handle. Contexts are created when
//! the shell starts and closed when it shuts down.

mod auth;
mod config;
mod scheduler;

pub use auth::AuthContext;
pub use config::ConfigContext;
pub use scheduler::{CommandOutcome, SchedulerCommand, SchedulerContext};

use crate::history::{ActivityHistory, ActivityKind};
use crate::slice::{Applied, Slice};
use orabak_core::{OrabakError, Result};
use std::future::Future;

/// Load `slice` through `fetch`, logging and recording the outcome
pub(crate) async fn load_slice<T, F>(slice: &Slice<T>, history: &ActivityHistory, fetch: F) -> Applied
where
    T: Clone,
    F: Future<Output = Result<T>>,
{
    let ticket = slice.begin();
    let result = fetch.await.map_err(|e| OrabakError::load(slice.name(), &e));

    let failure = result.as_ref().err().map(ToString::to_string);
    let applied = slice.apply(ticket, result);

    match (applied, failure) {
        (Applied::Stored, _) => {
            tracing::debug!("Loaded {}", slice.name());
            history.record(ActivityKind::Loaded, slice.name(), "loaded");
        }
        (Applied::Failed, Some(message)) => {
            tracing::warn!("{}", message);
            history.record(ActivityKind::LoadFailed, slice.name(), message);
        }
        (Applied::Superseded, _) | (Applied::Closed, _) | (Applied::Failed, None) => {}
    }

    applied
}
