//! In-process plan store.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, MutexGuard},
};

use jiff::Timestamp;
use log::debug;

use super::{PlanStore, SaveOutcome};
use crate::{
    error::{Result, WorkflowError},
    models::{Plan, PlanFilter, PlanMetadata, PlanStatus, PlanSummary},
    params::CreatePlan,
    workflow::{ApprovalTracker, CommentLedger, PlanRecord},
};

#[derive(Debug, Default)]
struct State {
    last_id: u64,
    plans: BTreeMap<u64, PlanRecord>,
}

/// Plan records held in memory behind a mutex.
///
/// Clones share the same underlying map, so one clone can be handed to each
/// thread or coordinator that needs access.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>> {
        self.state.lock().map_err(|_| WorkflowError::Configuration {
            message: "Memory store lock poisoned".to_string(),
        })
    }
}

impl PlanStore for MemoryStore {
    fn create_plan(&mut self, params: &CreatePlan) -> Result<PlanRecord> {
        let mut state = self.lock()?;
        state.last_id += 1;
        let now = Timestamp::now();

        let record = PlanRecord::from_parts(
            Plan {
                id: state.last_id,
                employee_id: params.employee_id.clone(),
                supervisor_id: params.supervisor_id.clone(),
                reviewer_id: params.reviewer_id.clone(),
                status: PlanStatus::Draft,
                metadata: PlanMetadata {
                    title: params.title.clone(),
                    year: params.year,
                    period_start: params.period_start,
                    period_end: params.period_end,
                },
                round: 1,
                version: 0,
                created_at: now,
                updated_at: now,
            },
            CommentLedger::default(),
            ApprovalTracker::default(),
        );
        state.plans.insert(record.plan.id, record.clone());
        Ok(record)
    }

    fn load_plan(&self, plan_id: u64) -> Result<PlanRecord> {
        self.lock()?
            .plans
            .get(&plan_id)
            .cloned()
            .ok_or(WorkflowError::NotFound { id: plan_id })
    }

    fn save_plan(&mut self, record: &PlanRecord, expected_version: u64) -> Result<SaveOutcome> {
        let plan_id = record.plan.id;
        let mut state = self.lock()?;
        let stored = state
            .plans
            .get_mut(&plan_id)
            .ok_or(WorkflowError::NotFound { id: plan_id })?;

        if stored.plan.version != expected_version {
            debug!(
                "Plan {plan_id} is at version {}, expected {expected_version}",
                stored.plan.version
            );
            return Ok(SaveOutcome::Conflict);
        }
        if !record.ledger.extends(&stored.ledger) {
            return Err(WorkflowError::LedgerRewrite { plan_id });
        }

        stored.plan.status = record.plan.status;
        stored.plan.round = record.plan.round;
        stored.plan.updated_at = record.plan.updated_at;
        stored.plan.version = expected_version + 1;
        stored.ledger = record.ledger.clone();
        stored.approvals = record.approvals;
        Ok(SaveOutcome::Saved)
    }

    fn list_plans(&self, filter: &PlanFilter) -> Result<Vec<PlanSummary>> {
        let state = self.lock()?;
        let mut summaries: Vec<PlanSummary> = state
            .plans
            .values()
            .map(PlanRecord::summary)
            .filter(|summary| filter.matches(summary))
            .collect();
        summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));
        Ok(summaries)
    }
}
