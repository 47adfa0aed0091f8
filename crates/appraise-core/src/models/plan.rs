//! Plan model definition and related functionality.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::{PlanStatus, Role};

/// Descriptive fields of a plan. The workflow never interprets these.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanMetadata {
    /// Title of the plan
    pub title: String,

    /// Appraisal year the plan belongs to
    pub year: i16,

    /// First day covered by the plan
    pub period_start: Date,

    /// Last day covered by the plan
    pub period_end: Date,
}

/// A performance plan and its review assignment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    /// Unique identifier for the plan
    pub id: u64,

    /// Employee who authored the plan
    pub employee_id: String,

    /// Supervisor assigned to review the plan
    pub supervisor_id: String,

    /// Final reviewer, if the plan needs one
    pub reviewer_id: Option<String>,

    /// Lifecycle status, only ever changed by the workflow
    #[serde(default)]
    pub status: PlanStatus,

    #[serde(flatten)]
    pub metadata: PlanMetadata,

    /// Review round, starting at 1 and bumped on every resubmission
    pub round: u32,

    /// Optimistic concurrency counter, bumped on every successful save
    pub version: u64,

    /// Timestamp when the plan was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the plan was last modified (UTC)
    pub updated_at: Timestamp,
}

impl Plan {
    /// The actor id bound to `role` on this plan, if any.
    pub fn assignee(&self, role: Role) -> Option<&str> {
        match role {
            Role::Supervisor => Some(self.supervisor_id.as_str()),
            Role::Reviewer => self.reviewer_id.as_deref(),
        }
    }

    /// Whether a final reviewer stage exists for this plan.
    pub fn has_reviewer(&self) -> bool {
        self.reviewer_id.is_some()
    }
}
