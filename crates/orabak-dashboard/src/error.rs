//! Dashboard error types - re-exports the unified OrabakError from orabak-core
//!
//! Terminal setup and rendering failures use `OrabakError::Terminal`; backend
//! failures arrive already classified as load or command failures.

pub use orabak_core::{OrabakError, Result};

pub type DashboardError = OrabakError;
