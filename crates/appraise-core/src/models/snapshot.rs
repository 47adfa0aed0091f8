//! Read-only projection of a plan's review state.

use serde::{Deserialize, Serialize};

use super::{ApprovalRecord, CommentEntry, Plan, PlanStatus, Role};

/// Everything a caller needs to render a plan's review state.
///
/// Returned by every successful workflow action and by snapshot queries.
/// Holding a snapshot grants no way to mutate the plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanSnapshot {
    pub plan: Plan,

    /// Supervisor remarks in insertion order
    pub supervisor_comments: Vec<CommentEntry>,

    /// Reviewer remarks in insertion order
    pub reviewer_comments: Vec<CommentEntry>,

    pub supervisor_approval: ApprovalRecord,

    pub reviewer_approval: ApprovalRecord,
}

impl PlanSnapshot {
    pub fn status(&self) -> PlanStatus {
        self.plan.status
    }

    /// Comments written in `role`, oldest first.
    pub fn comments(&self, role: Role) -> &[CommentEntry] {
        match role {
            Role::Supervisor => &self.supervisor_comments,
            Role::Reviewer => &self.reviewer_comments,
        }
    }

    /// Approval record for `role`.
    pub fn approval(&self, role: Role) -> &ApprovalRecord {
        match role {
            Role::Supervisor => &self.supervisor_approval,
            Role::Reviewer => &self.reviewer_approval,
        }
    }
}
