//! Credential lookup for the backup backend
//!
//! Priority:
//! 1. ORABAK_TOKEN environment variable
//! 2. `token` from the config file

use std::env;

/// Environment variable holding the bearer token
pub const TOKEN_ENV: &str = "ORABAK_TOKEN";

/// Resolve the bearer token, if any
pub fn resolve_token(config_token: Option<&str>) -> Option<String> {
    if let Ok(token) = env::var(TOKEN_ENV) {
        if !token.trim().is_empty() {
            tracing::info!("Using {} for backend authentication", TOKEN_ENV);
            return Some(token);
        }
    }

    match config_token {
        Some(token) if !token.trim().is_empty() => {
            tracing::info!("Using token from config file");
            Some(token.to_string())
        }
        _ => {
            tracing::debug!("No backend token configured, requests are anonymous");
            None
        }
    }
}
