//! Parameter structures for workflow operations
//!
//! These structures are shared by every interface that drives the workflow.
//! They carry no framework-specific derives: the CLI defines its own clap
//! argument types and converts them into these with `From` impls, keeping
//! argument parsing concerns out of the core.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │  Core Params    │    │   Workflow      │
//! │  (clap derives) │───▶│ (minimal deps)  │───▶│  Coordinator    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, WorkflowError},
    models::{PlanFilter, PlanStatus, ReviewAction, Role},
};

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the plan to operate on
    pub id: u64,
}

/// Parameters for creating a draft plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlan {
    pub employee_id: String,
    pub supervisor_id: String,
    pub reviewer_id: Option<String>,
    pub title: String,
    pub year: i16,
    pub period_start: Date,
    pub period_end: Date,
}

impl CreatePlan {
    /// Checks assignment and metadata invariants.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::InvalidInput` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("employee_id", self.employee_id.as_str()),
            ("supervisor_id", self.supervisor_id.as_str()),
            ("title", self.title.as_str()),
        ] {
            if value.trim().is_empty() {
                return Err(WorkflowError::invalid_input(field).with_reason("must not be empty"));
            }
        }
        if self.supervisor_id == self.employee_id {
            return Err(WorkflowError::invalid_input("supervisor_id")
                .with_reason("supervisor must differ from the employee"));
        }
        if let Some(reviewer_id) = &self.reviewer_id {
            if reviewer_id.trim().is_empty() {
                return Err(WorkflowError::invalid_input("reviewer_id")
                    .with_reason("must not be empty when given"));
            }
            if *reviewer_id == self.employee_id || *reviewer_id == self.supervisor_id {
                return Err(WorkflowError::invalid_input("reviewer_id")
                    .with_reason("reviewer must differ from the employee and the supervisor"));
            }
        }
        if self.period_start > self.period_end {
            return Err(WorkflowError::invalid_input("period_end")
                .with_reason("period must not end before it starts"));
        }
        Ok(())
    }
}

/// Parameters for an employee (re)submitting a plan for review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitPlan {
    pub plan_id: u64,
    pub actor_id: String,
}

/// Parameters for a supervisor or reviewer acting on a plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyAction {
    pub plan_id: u64,
    /// Identity of the acting user
    pub actor_id: String,
    /// Display name resolved by the caller, used for attribution
    pub actor_name: String,
    /// Role the actor claims on this plan
    pub role: Role,
    pub action: ReviewAction,
    /// Comment text; may be empty only for approvals
    #[serde(default)]
    pub body: String,
}

impl ApplyAction {
    /// Name recorded on the comment entry, falling back to the actor id.
    pub fn author_name(&self) -> &str {
        let name = self.actor_name.trim();
        if name.is_empty() {
            &self.actor_id
        } else {
            name
        }
    }
}

/// Parameters for listing plans.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPlans {
    pub status: Option<PlanStatus>,
    pub employee_id: Option<String>,
    pub supervisor_id: Option<String>,
    pub reviewer_id: Option<String>,
    pub year: Option<i16>,
}

impl From<&ListPlans> for PlanFilter {
    fn from(params: &ListPlans) -> Self {
        PlanFilter {
            status: params.status,
            employee_id: params.employee_id.clone(),
            supervisor_id: params.supervisor_id.clone(),
            reviewer_id: params.reviewer_id.clone(),
            year: params.year,
        }
    }
}
