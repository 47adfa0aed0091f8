//! Persistence contract for the workflow.
//!
//! The coordinator performs no I/O of its own. It reads and writes whole
//! [`PlanRecord`]s through a [`PlanStore`], relying on the store's
//! compare-and-swap on [`Plan::version`](crate::models::Plan::version) to
//! serialize concurrent actions on the same plan.
//!
//! Two implementations ship with the crate:
//!
//! - [`crate::db::Database`]: SQLite, used by the service and the CLI
//! - [`MemoryStore`]: a shared in-process map, for embedding and tests

pub mod memory;

pub use memory::MemoryStore;

use crate::{
    error::Result,
    models::{PlanFilter, PlanSummary},
    params::CreatePlan,
    workflow::PlanRecord,
};

/// Result of a conditional save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The record was written and the stored version advanced by one
    Saved,
    /// The stored version no longer matched; nothing was written
    Conflict,
}

/// Storage for plan records with optimistic concurrency.
pub trait PlanStore {
    /// Inserts a new draft plan with an empty ledger and pending approvals.
    /// Inputs are validated by the caller.
    fn create_plan(&mut self, params: &CreatePlan) -> Result<PlanRecord>;

    /// Loads the full record of a plan.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::NotFound` when no plan has this id.
    fn load_plan(&self, plan_id: u64) -> Result<PlanRecord>;

    /// Atomically replaces the stored record if its version still equals
    /// `expected_version`. Status, round, ledger tail and approval records
    /// are written together or not at all. Ledger entries already stored are
    /// never modified.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::NotFound` when the plan vanished and
    /// `WorkflowError::LedgerRewrite` when `record` does not extend the
    /// stored history.
    fn save_plan(&mut self, record: &PlanRecord, expected_version: u64) -> Result<SaveOutcome>;

    /// Lists plan summaries matching `filter`, most recently updated first.
    fn list_plans(&self, filter: &PlanFilter) -> Result<Vec<PlanSummary>>;
}
