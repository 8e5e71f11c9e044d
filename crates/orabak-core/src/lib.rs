//! # orabak-core
//!
//! Core types for the Orabak console, the operator front end of an Oracle
//! backup management platform.
//!
//! ## Core Paradigm
//!
//! - Every piece of backend state is a slice with exactly one owner
//! - Slices are replaced wholesale, never patched field by field
//! - Missing data is a normal state, not an error
//! - Status tokens are classified into a small fixed set of severities

mod config;
mod error;
mod status;
mod types;

pub use config::{ConsoleConfig, CONFIG_ENV, DEFAULT_CONFIG_FILE};
pub use error::{ErrorClass, OrabakError, Result};
pub use status::{classify_status, Severity};
pub use types::*;
