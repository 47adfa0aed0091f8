//! Configuration for [`ReviewService`].

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use log::info;
use tokio::task;

use super::ReviewService;
use crate::{
    db::{Database, DEFAULT_BUSY_TIMEOUT},
    error::{Result, WorkflowError},
};

/// Resolves where plans are stored and prepares the schema once, so that
/// per-call connections only verify it.
#[derive(Debug, Clone)]
pub struct ReviewServiceBuilder {
    database_path: Option<PathBuf>,
    busy_timeout: Duration,
}

impl ReviewServiceBuilder {
    pub fn new() -> Self {
        Self {
            database_path: None,
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    /// Sets the plan database file. `None` keeps the default,
    /// `$XDG_DATA_HOME/appraise/appraise.db`.
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// How long a save waits for a competing writer's transaction before
    /// failing with a database error.
    pub fn with_busy_timeout(mut self, busy_timeout: Duration) -> Self {
        self.busy_timeout = busy_timeout;
        self
    }

    /// Creates the database file and its parent directories if needed and
    /// brings the schema up to date.
    ///
    /// # Errors
    ///
    /// - `WorkflowError::XdgDirectory` if no default location can be resolved
    /// - `WorkflowError::FileSystem` if the parent directory cannot be created
    /// - `WorkflowError::Configuration` if the file holds a newer schema
    pub async fn build(self) -> Result<ReviewService> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| WorkflowError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let busy_timeout = self.busy_timeout;
        let path = db_path.clone();
        let schema_version = task::spawn_blocking(move || {
            Database::open_with_timeout(&path, busy_timeout)?.schema_version()
        })
        .await
        .map_err(|e| WorkflowError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        info!(
            "Plan store ready at {} (schema version {schema_version})",
            db_path.display()
        );
        Ok(ReviewService {
            db_path,
            busy_timeout,
        })
    }

    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("appraise")
            .place_data_file("appraise.db")
            .map_err(|e| WorkflowError::XdgDirectory(e.to_string()))
    }
}

impl Default for ReviewServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
