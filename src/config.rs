//! Runtime configuration
//!
//! Read from environment variables; nothing is required.

use std::path::PathBuf;

use crate::db::{migrations, Database, DbResult};

/// Overrides the database location
pub const DATABASE_PATH_ENV: &str = "HEALTHTRACK_DATABASE_PATH";

/// Directive used when `RUST_LOG` does not mention this crate
pub const DEFAULT_LOG_DIRECTIVE: &str = "healthtrack=info";

const DATABASE_FILE: &str = "healthtrack.db";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_path: database_path_from(std::env::var(DATABASE_PATH_ENV).ok()),
        }
    }

    /// Open the database, creating its directory and applying migrations.
    ///
    /// SQLite cannot create missing directories; without this the pool retries
    /// until its connection timeout expires.
    pub fn open_database(&self) -> DbResult<Database> {
        if let Some(parent) = self.database_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let database = Database::new(&self.database_path)?;
        database.with_conn(migrations::run_migrations)?;
        Ok(database)
    }
}

fn database_path_from(env_value: Option<String>) -> PathBuf {
    match env_value.filter(|v| !v.trim().is_empty()) {
        Some(path) => PathBuf::from(path),
        None => default_database_path(),
    }
}

/// `<project>/data/healthtrack.db`, where the project root is found by stepping
/// out of `target/{debug,release}` when running from a cargo build
pub fn default_database_path() -> PathBuf {
    let mut path = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(grandparent) = path.parent().and_then(|p| p.parent()) {
            path = grandparent.to_path_buf();
        }
    }

    path.push("data");
    path.push(DATABASE_FILE);
    path
}
