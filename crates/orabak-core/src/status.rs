//! Status token classification
//!
//! Maps raw status tokens reported by the backend (or synthesized by the
//! console, like `running`/`stopped`) to a presentation severity.

use serde::{Deserialize, Serialize};

/// Presentation severity of a status token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Warning,
    Neutral,
}

impl Severity {
    /// Short label for chips and legends
    pub fn label(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Neutral => "neutral",
        }
    }
}

/// Classify a status token. Total over all inputs: unknown tokens are neutral.
pub fn classify_status(token: &str) -> Severity {
    match token {
        "connected" | "running" => Severity::Success,
        "disconnected" => Severity::Error,
        "stopped" => Severity::Warning,
        _ => Severity::Neutral,
    }
}
