//! Core type definitions for the backup console
//!
//! Field names follow the backend's snake_case JSON contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::status::{classify_status, Severity};

/// Oracle connectivity as reported by the backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum OracleConnection {
    Connected,
    Disconnected,
    #[default]
    Unknown,
}

impl OracleConnection {
    /// Raw token as the backend spells it
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
            Self::Unknown => "unknown",
        }
    }

    pub fn severity(&self) -> Severity {
        classify_status(self.as_str())
    }
}

impl From<Option<String>> for OracleConnection {
    fn from(token: Option<String>) -> Self {
        match token.as_deref() {
            Some("connected") => Self::Connected,
            Some("disconnected") => Self::Disconnected,
            _ => Self::Unknown,
        }
    }
}

impl From<OracleConnection> for String {
    fn from(conn: OracleConnection) -> Self {
        conn.as_str().to_string()
    }
}

impl std::fmt::Display for OracleConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Backend health snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemHealth {
    #[serde(default)]
    pub oracle_connection: OracleConnection,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl SystemHealth {
    pub fn is_disconnected(&self) -> bool {
        self.oracle_connection == OracleConnection::Disconnected
    }
}

/// Accepts RFC 3339 strings; anything missing or unparseable becomes `None`.
fn lenient_timestamp<'de, D>(deserializer: D) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc)))
}

/// Oracle database description
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub log_mode: String,
    #[serde(default)]
    pub tablespaces: Vec<Value>,
    #[serde(default)]
    pub schemas: Vec<Value>,
    #[serde(default)]
    pub archivelog_enabled: bool,
    #[serde(default)]
    pub archivelog_warning: bool,
}

/// Strategy identifier. The backend uses integers, but strings are tolerated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StrategyId {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for StrategyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for StrategyId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

/// Backup strategy tracked by the scheduler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strategy {
    pub id: StrategyId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_active: bool,
    /// Scheduling metadata the console does not interpret
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl Strategy {
    pub fn new(id: i64, name: impl Into<String>, is_active: bool) -> Self {
        Self {
            id: StrategyId::Number(id),
            name: name.into(),
            is_active,
            metadata: Map::new(),
        }
    }
}

/// Scheduler run state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerStatus {
    #[serde(default)]
    pub running: bool,
    #[serde(default)]
    pub scheduled_jobs_count: u32,
}

impl SchedulerStatus {
    /// Token used for the status chip
    pub fn token(&self) -> &'static str {
        if self.running {
            "running"
        } else {
            "stopped"
        }
    }
}

/// Windowed backup statistics, computed by the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackupStatistics {
    #[serde(default)]
    pub total_backups: u64,
    #[serde(default)]
    pub completed: u64,
    #[serde(default)]
    pub failed: u64,
    /// Backend-computed percentage (0..=100). Never recomputed locally.
    #[serde(default)]
    pub success_rate: f64,
    #[serde(default)]
    pub total_size_mb: f64,
}

impl BackupStatistics {
    /// Tier used to color the success-rate bar
    pub fn rate_tier(&self) -> Severity {
        success_rate_tier(self.success_rate)
    }

    /// Success rate rendered the way the backend sent it, e.g. `95%` or `87.5%`
    pub fn success_rate_label(&self) -> String {
        format!("{}%", format_number(self.success_rate))
    }

    /// Total size with two decimals, e.g. `512.25 MB`
    pub fn size_label(&self) -> String {
        format!("{:.2} MB", self.total_size_mb)
    }
}

/// `> 90` success, `> 70` warning, anything else error.
pub fn success_rate_tier(rate: f64) -> Severity {
    if rate > 90.0 {
        Severity::Success
    } else if rate > 70.0 {
        Severity::Warning
    } else {
        Severity::Error
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
