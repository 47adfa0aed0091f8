//! Workflow coordinator: the single entry point for review actions.

use jiff::Timestamp;
use log::{debug, info, warn};

use super::{binding, machine, PlanRecord};
use crate::{
    error::{Result, WorkflowError},
    models::{CommentEntry, PlanFilter, PlanSnapshot, PlanStatus, PlanSummary},
    params::{ApplyAction, CreatePlan, SubmitPlan},
    store::{PlanStore, SaveOutcome},
};

/// How many times a version conflict is retried against fresh state.
const MAX_CONFLICT_RETRIES: usize = 1;

/// Drives review actions against plans held in a [`PlanStore`].
///
/// Every mutating operation follows the same shape: load the record, evaluate
/// the change on an owned copy, then publish it with one conditional save.
/// A failed guard or validation leaves the store untouched, and a version
/// conflict re-runs the evaluation once against the newer state.
pub struct WorkflowCoordinator<S> {
    store: S,
}

impl<S: PlanStore> WorkflowCoordinator<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Creates a plan in `draft`.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::InvalidInput` when the assignment or metadata is
    /// inconsistent.
    pub fn create_plan(&mut self, params: &CreatePlan) -> Result<PlanSnapshot> {
        params.validate()?;
        let record = self.store.create_plan(params)?;
        info!(
            "Created plan {} for employee {}",
            record.plan.id, record.plan.employee_id
        );
        Ok(record.snapshot())
    }

    /// Applies a supervisor or reviewer action and returns the new state.
    ///
    /// # Errors
    ///
    /// - `NotFound` when the plan does not exist
    /// - `Unauthorized` when the actor is not assigned to the claimed role
    /// - `InvalidTransition` when the action is illegal in the current status
    /// - `InvalidInput` when a required comment body is blank
    /// - `ConcurrentModification` when the save conflicts twice
    pub fn apply_action(&mut self, request: &ApplyAction) -> Result<PlanSnapshot> {
        self.commit(request.plan_id, |record| {
            Self::evaluate_action(record, request, Timestamp::now())
        })
    }

    /// Hands a draft or returned plan (back) to the supervisor.
    ///
    /// Resubmission starts a new review round: approval records return to
    /// pending while both ledgers are kept.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` for anyone but the plan's employee and
    /// `InvalidSubmission` outside `draft` and `revision_requested`.
    pub fn submit_plan(&mut self, request: &SubmitPlan) -> Result<PlanSnapshot> {
        self.commit(request.plan_id, |record| {
            Self::evaluate_submission(record, &request.actor_id, Timestamp::now())
        })
    }

    /// Current status, ledgers and approvals of a plan.
    pub fn get_plan_snapshot(&self, plan_id: u64) -> Result<PlanSnapshot> {
        Ok(self.store.load_plan(plan_id)?.snapshot())
    }

    pub fn list_plans(&self, filter: &PlanFilter) -> Result<Vec<PlanSummary>> {
        self.store.list_plans(filter)
    }

    /// Runs `mutate` against the latest record and saves the result
    /// conditionally, retrying once on a version conflict.
    fn commit<F>(&mut self, plan_id: u64, mut mutate: F) -> Result<PlanSnapshot>
    where
        F: FnMut(PlanRecord) -> Result<PlanRecord>,
    {
        for attempt in 0..=MAX_CONFLICT_RETRIES {
            let current = self.store.load_plan(plan_id)?;
            let expected_version = current.plan.version;
            let from = current.plan.status;

            let mut next = mutate(current).inspect_err(|e| {
                if e.is_rejection() {
                    debug!("Rejected change to plan {plan_id}: {e}");
                }
            })?;
            next.plan.version = expected_version + 1;

            match self.store.save_plan(&next, expected_version)? {
                SaveOutcome::Saved => {
                    info!(
                        "Plan {plan_id} {from} -> {} (version {})",
                        next.plan.status, next.plan.version
                    );
                    return Ok(next.snapshot());
                }
                SaveOutcome::Conflict => {
                    warn!(
                        "Version conflict on plan {plan_id} at version {expected_version} (attempt {})",
                        attempt + 1
                    );
                }
            }
        }
        Err(WorkflowError::ConcurrentModification { plan_id })
    }

    /// Validates `request` against `record` and returns the mutated record.
    /// Pure apart from the supplied clock value.
    pub(crate) fn evaluate_action(
        mut record: PlanRecord,
        request: &ApplyAction,
        now: Timestamp,
    ) -> Result<PlanRecord> {
        let role = binding::bind_reviewer_role(&record.plan, &request.actor_id, request.role)?;
        let next_status = machine::transition(
            &record.plan,
            record.approvals.is_eligible_for_reviewer_stage(),
            role,
            request.action,
        )?;

        let body = request.body.trim();
        if body.is_empty() && !request.action.allows_empty_body() {
            return Err(WorkflowError::invalid_input("body").with_reason(format!(
                "a comment is required to {}",
                request.action
            )));
        }

        record.ledger.append(CommentEntry {
            author_id: request.actor_id.clone(),
            author_name: request.author_name().to_string(),
            role,
            action: request.action,
            body: body.to_string(),
            round: record.plan.round,
            created_at: now,
        });
        record.approvals.record_approval(role, request.action, now);
        record.plan.status = next_status;
        record.plan.updated_at = now;
        Ok(record)
    }

    pub(crate) fn evaluate_submission(
        mut record: PlanRecord,
        actor_id: &str,
        now: Timestamp,
    ) -> Result<PlanRecord> {
        binding::bind_employee(&record.plan, actor_id)?;
        let from = record.plan.status;
        let to = machine::submission_target(from).ok_or(WorkflowError::InvalidSubmission {
            plan_id: record.plan.id,
            status: from,
        })?;

        if from == PlanStatus::RevisionRequested {
            record.plan.round += 1;
            record.approvals.reset_for_resubmission();
        }
        record.plan.status = to;
        record.plan.updated_at = now;
        Ok(record)
    }
}
