//! Status, role and action enumerations for the review workflow.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Lifecycle status of a performance plan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    /// Being authored by the employee
    #[default]
    Draft,

    /// Handed in by the employee, awaiting the supervisor
    Submitted,

    /// The supervisor has started reviewing
    SupervisorReview,

    /// Supervisor approved, awaiting the final reviewer
    ReviewerAssessment,

    /// Sent back to the employee for changes
    RevisionRequested,

    /// Fully approved (terminal)
    Approved,
}

impl PlanStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [PlanStatus; 6] = [
        PlanStatus::Draft,
        PlanStatus::Submitted,
        PlanStatus::SupervisorReview,
        PlanStatus::ReviewerAssessment,
        PlanStatus::RevisionRequested,
        PlanStatus::Approved,
    ];

    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStatus::Draft => "draft",
            PlanStatus::Submitted => "submitted",
            PlanStatus::SupervisorReview => "supervisor_review",
            PlanStatus::ReviewerAssessment => "reviewer_assessment",
            PlanStatus::RevisionRequested => "revision_requested",
            PlanStatus::Approved => "approved",
        }
    }

    /// Whether no further review action is accepted.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PlanStatus::Approved)
    }
}

impl FromStr for PlanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "draft" => Ok(PlanStatus::Draft),
            "submitted" => Ok(PlanStatus::Submitted),
            "supervisor_review" => Ok(PlanStatus::SupervisorReview),
            "reviewer_assessment" => Ok(PlanStatus::ReviewerAssessment),
            "revision_requested" => Ok(PlanStatus::RevisionRequested),
            "approved" => Ok(PlanStatus::Approved),
            _ => Err(format!("Invalid plan status: {s}")),
        }
    }
}

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Review role an actor claims when acting on a plan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Supervisor,
    Reviewer,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Supervisor, Role::Reviewer];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Supervisor => "supervisor",
            Role::Reviewer => "reviewer",
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "supervisor" => Ok(Role::Supervisor),
            "reviewer" => Ok(Role::Reviewer),
            _ => Err(format!("Invalid role: {s}")),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Action a supervisor or reviewer takes on a plan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ReviewAction {
    /// Leave a remark without changing approval state
    Comment,

    /// Supervisor sign-off
    Approve,

    /// Send the plan back to the employee (feedback required)
    RequestChanges,

    /// Reviewer sign-off that completes the plan
    FinalApprove,
}

impl ReviewAction {
    pub const ALL: [ReviewAction; 4] = [
        ReviewAction::Comment,
        ReviewAction::Approve,
        ReviewAction::RequestChanges,
        ReviewAction::FinalApprove,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewAction::Comment => "comment",
            ReviewAction::Approve => "approve",
            ReviewAction::RequestChanges => "request_changes",
            ReviewAction::FinalApprove => "final_approve",
        }
    }

    /// Whether the action may carry an empty body.
    pub fn allows_empty_body(&self) -> bool {
        matches!(self, ReviewAction::Approve | ReviewAction::FinalApprove)
    }

    /// The approval state this action writes, if any.
    pub fn approval_state(&self) -> Option<ApprovalState> {
        match self {
            ReviewAction::Comment => None,
            ReviewAction::Approve | ReviewAction::FinalApprove => Some(ApprovalState::Approved),
            ReviewAction::RequestChanges => Some(ApprovalState::ChangesRequested),
        }
    }
}

impl FromStr for ReviewAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "comment" => Ok(ReviewAction::Comment),
            "approve" => Ok(ReviewAction::Approve),
            "request_changes" => Ok(ReviewAction::RequestChanges),
            "final_approve" => Ok(ReviewAction::FinalApprove),
            _ => Err(format!("Invalid review action: {s}")),
        }
    }
}

impl fmt::Display for ReviewAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-role approval state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalState {
    #[default]
    Pending,
    Approved,
    ChangesRequested,
}

impl ApprovalState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalState::Pending => "pending",
            ApprovalState::Approved => "approved",
            ApprovalState::ChangesRequested => "changes_requested",
        }
    }
}

impl FromStr for ApprovalState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(ApprovalState::Pending),
            "approved" => Ok(ApprovalState::Approved),
            "changes_requested" => Ok(ApprovalState::ChangesRequested),
            _ => Err(format!("Invalid approval state: {s}")),
        }
    }
}

impl fmt::Display for ApprovalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
