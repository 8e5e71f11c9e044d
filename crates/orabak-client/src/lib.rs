//! # orabak-client
//!
//! Backend access for the Orabak console.
//!
//! The console only talks to the backup platform through [`BackendApi`]:
//! five read endpoints (health, database info, strategies, scheduler status,
//! backup statistics) and two scheduler commands (start, stop).
//! [`HttpBackend`] is the reqwest implementation used in production; tests
//! substitute in-memory implementations of the same trait.

mod api;
mod auth;
mod client;

pub use api::{endpoints, BackendApi};
pub use auth::{resolve_token, TOKEN_ENV};
pub use client::HttpBackend;
