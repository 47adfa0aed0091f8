//! Database schema initialization and migrations.

use crate::error::{DatabaseResultExt, Result, WorkflowError};

/// Schema version written to `PRAGMA user_version`.
pub const SCHEMA_VERSION: i64 = 1;

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        let current = self.schema_version()?;
        if current > SCHEMA_VERSION {
            return Err(WorkflowError::Configuration {
                message: format!(
                    "Database schema version {current} is newer than supported version {SCHEMA_VERSION}"
                ),
            });
        }

        if current < SCHEMA_VERSION {
            self.apply_migrations(current)?;
        }

        Ok(())
    }

    /// Fails unless the schema is exactly at [`SCHEMA_VERSION`].
    pub(super) fn ensure_current_schema(&self) -> Result<()> {
        let current = self.schema_version()?;
        if current == SCHEMA_VERSION {
            Ok(())
        } else {
            Err(WorkflowError::Configuration {
                message: format!(
                    "Database schema version {current} does not match expected version {SCHEMA_VERSION}"
                ),
            })
        }
    }

    /// Reads `PRAGMA user_version`.
    pub fn schema_version(&self) -> Result<i64> {
        self.connection
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .db_context("Failed to read schema version")
    }

    /// Brings a database at `from` up to [`SCHEMA_VERSION`] in one batch.
    fn apply_migrations(&self, from: i64) -> Result<()> {
        let mut batch = String::from("BEGIN;\n");
        if from < 1 {
            batch.push_str(include_str!("../../assets/schema.sql"));
        }
        batch.push_str(&format!("\nPRAGMA user_version = {SCHEMA_VERSION};\nCOMMIT;"));

        self.connection
            .execute_batch(&batch)
            .db_context("Failed to initialize database schema")
    }
}
