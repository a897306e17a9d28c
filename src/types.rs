use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::db::{Database, DatabaseHealth};
use crate::errors::AppError;

pub type Result<T> = std::result::Result<T, AppError>;

/// Home page payload, standing in for a rendered view
#[derive(Debug, Serialize, Deserialize)]
pub struct IndexPayload {
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub db_health: DatabaseHealth,
}

// Shared, read-only process state
pub struct AppState {
    pub start_time: Instant,
    pub db: Database,
    pub version: String,
}
