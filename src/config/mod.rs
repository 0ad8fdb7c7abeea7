//! Configuration module for the portal backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.
//! The Airtable API key is the one required credential; without it every
//! remote-backed operation fails closed.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Airtable API key (required for live data; absent = fail closed)
    pub airtable_api_key: Option<String>,
    /// Airtable base holding the Members/Programs/Resources tables
    pub airtable_base_id: Option<String>,
    /// Path to the SQLite client-state store
    pub state_db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let airtable_api_key = env::var("AIRTABLE_API_KEY").ok();
        let airtable_base_id = env::var("AIRTABLE_BASE_ID").ok();

        let state_db_path = env::var("CRXQ_STATE_DB_PATH")
            .unwrap_or_else(|_| "./data/state.sqlite".to_string())
            .into();

        let bind_addr = env::var("CRXQ_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid CRXQ_BIND_ADDR format");

        let log_level = env::var("CRXQ_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            airtable_api_key,
            airtable_base_id,
            state_db_path,
            bind_addr,
            log_level,
        }
    }

    /// Whether the Airtable credential is present.
    pub fn is_airtable_configured(&self) -> bool {
        self.airtable_api_key.is_some()
    }
}
