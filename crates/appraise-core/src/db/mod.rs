//! SQLite persistence for plans, comment ledgers and approval records.
//!
//! [`Database`] implements [`PlanStore`]. Optimistic concurrency is a
//! conditional `UPDATE ... WHERE version = ?` inside an immediate
//! transaction, so two connections racing on the same plan can never both
//! publish a change computed from the same version.

use std::{path::Path, str::FromStr, time::Duration};

use jiff::Timestamp;
use rusqlite::{types::Type, Connection, Row, TransactionBehavior};

use crate::{
    error::{DatabaseResultExt, Result},
    models::{PlanFilter, PlanSummary},
    params::CreatePlan,
    store::{PlanStore, SaveOutcome},
    workflow::PlanRecord,
};

pub mod approval_queries;
pub mod comment_queries;
pub mod migrations;
pub mod plan_queries;

/// How long a connection waits on another writer before giving up.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_timeout(path, DEFAULT_BUSY_TIMEOUT)
    }

    /// Like [`Database::new`], waiting up to `busy_timeout` for other writers.
    pub fn open_with_timeout<P: AsRef<Path>>(path: P, busy_timeout: Duration) -> Result<Self> {
        let db = Self::connect(path, busy_timeout)?;
        db.initialize_schema()?;
        Ok(db)
    }

    /// Opens a database whose schema was initialized earlier, without
    /// migrating it.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::Configuration` if the stored schema version is
    /// not the one this build writes.
    pub fn open_initialized<P: AsRef<Path>>(path: P, busy_timeout: Duration) -> Result<Self> {
        let db = Self::connect(path, busy_timeout)?;
        db.ensure_current_schema()?;
        Ok(db)
    }

    fn connect<P: AsRef<Path>>(path: P, busy_timeout: Duration) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;
        connection
            .busy_timeout(busy_timeout)
            .db_context("Failed to set busy timeout")?;
        connection
            .execute_batch("PRAGMA foreign_keys = ON")
            .db_context("Failed to enable foreign keys")?;
        Ok(Self { connection })
    }
}

/// Renders a timestamp with a fixed nine fractional digits so stored values
/// sort chronologically as text.
pub(crate) fn format_timestamp(ts: Timestamp) -> String {
    format!("{ts:.9}")
}

/// Reads a text column and parses it with `FromStr`, reporting parse failures
/// as column conversion errors.
pub(crate) fn parse_column<T>(row: &Row<'_>, index: usize) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let text: String = row.get(index)?;
    text.parse::<T>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, e.into()))
}

impl PlanStore for Database {
    fn create_plan(&mut self, params: &CreatePlan) -> Result<PlanRecord> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let plan_id = Self::insert_plan(&tx, params)?;
        Self::insert_pending_approvals(&tx, plan_id)?;
        let record = Self::read_record(&tx, plan_id)?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(record)
    }

    fn load_plan(&self, plan_id: u64) -> Result<PlanRecord> {
        // One deferred transaction so the plan row, ledger and approvals all
        // come from the same committed version
        let tx = self
            .connection
            .unchecked_transaction()
            .db_context("Failed to begin read transaction")?;
        let record = Self::read_record(&tx, plan_id)?;
        tx.commit().db_context("Failed to end read transaction")?;
        Ok(record)
    }

    fn save_plan(&mut self, record: &PlanRecord, expected_version: u64) -> Result<SaveOutcome> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        if !Self::update_plan_if_version(&tx, record.plan(), expected_version)? {
            // Dropping the transaction rolls back; nothing was written
            Self::ensure_plan_exists(&tx, record.plan().id)?;
            return Ok(SaveOutcome::Conflict);
        }
        Self::append_new_comments(&tx, record.plan().id, record.ledger())?;
        Self::write_approvals(&tx, record.plan().id, record.approvals())?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(SaveOutcome::Saved)
    }

    fn list_plans(&self, filter: &PlanFilter) -> Result<Vec<PlanSummary>> {
        Self::query_summaries(&self.connection, filter)
    }
}
