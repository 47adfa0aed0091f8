//! Plan state machine.
//!
//! All review legality lives in [`TRANSITIONS`], a static table keyed by
//! current status, acting role and action. Nothing outside this module
//! decides whether an action is allowed or what status it leads to.

use crate::{
    error::{Result, WorkflowError},
    models::{Plan, PlanStatus, ReviewAction, Role},
};

/// Where a matched rule sends the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    /// Keep the current status
    Stay,
    /// Move to a fixed status
    Enter(PlanStatus),
    /// Reviewer assessment when a reviewer is assigned, approved otherwise
    Advance,
}

/// One row of the guard table.
#[derive(Debug, Clone, Copy)]
struct Rule {
    from: &'static [PlanStatus],
    role: Role,
    action: ReviewAction,
    requires_supervisor_approval: bool,
    outcome: Outcome,
}

use PlanStatus::*;

const TRANSITIONS: &[Rule] = &[
    // Supervisor stage
    Rule {
        from: &[Submitted, RevisionRequested],
        role: Role::Supervisor,
        action: ReviewAction::Comment,
        requires_supervisor_approval: false,
        outcome: Outcome::Enter(SupervisorReview),
    },
    Rule {
        from: &[SupervisorReview, ReviewerAssessment],
        role: Role::Supervisor,
        action: ReviewAction::Comment,
        requires_supervisor_approval: false,
        outcome: Outcome::Stay,
    },
    Rule {
        from: &[Submitted, RevisionRequested, SupervisorReview],
        role: Role::Supervisor,
        action: ReviewAction::Approve,
        requires_supervisor_approval: false,
        outcome: Outcome::Advance,
    },
    Rule {
        from: &[Submitted, SupervisorReview],
        role: Role::Supervisor,
        action: ReviewAction::RequestChanges,
        requires_supervisor_approval: false,
        outcome: Outcome::Enter(RevisionRequested),
    },
    // Reviewer stage
    Rule {
        from: &[ReviewerAssessment],
        role: Role::Reviewer,
        action: ReviewAction::Comment,
        requires_supervisor_approval: true,
        outcome: Outcome::Stay,
    },
    Rule {
        from: &[ReviewerAssessment],
        role: Role::Reviewer,
        action: ReviewAction::FinalApprove,
        requires_supervisor_approval: true,
        outcome: Outcome::Enter(Approved),
    },
    Rule {
        from: &[ReviewerAssessment],
        role: Role::Reviewer,
        action: ReviewAction::RequestChanges,
        requires_supervisor_approval: false,
        outcome: Outcome::Enter(RevisionRequested),
    },
];

/// Employee hand-in edges, driven from outside the review core.
const SUBMISSIONS: &[(PlanStatus, PlanStatus)] =
    &[(Draft, Submitted), (RevisionRequested, Submitted)];

/// The facts the guard table is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardContext {
    pub status: PlanStatus,
    pub has_reviewer: bool,
    pub supervisor_approved: bool,
}

impl GuardContext {
    pub fn new(plan: &Plan, supervisor_approved: bool) -> Self {
        Self {
            status: plan.status,
            has_reviewer: plan.has_reviewer(),
            supervisor_approved,
        }
    }
}

fn find_rule(ctx: &GuardContext, role: Role, action: ReviewAction) -> Option<&'static Rule> {
    TRANSITIONS.iter().find(|rule| {
        rule.role == role
            && rule.action == action
            && rule.from.contains(&ctx.status)
            && (!rule.requires_supervisor_approval || ctx.supervisor_approved)
    })
}

/// The status `action` by `role` leads to, or `None` when the table has no
/// matching rule.
pub fn next_status(ctx: &GuardContext, role: Role, action: ReviewAction) -> Option<PlanStatus> {
    find_rule(ctx, role, action).map(|rule| match rule.outcome {
        Outcome::Stay => ctx.status,
        Outcome::Enter(status) => status,
        Outcome::Advance if ctx.has_reviewer => ReviewerAssessment,
        Outcome::Advance => Approved,
    })
}

/// Validates a review action against `plan` and returns the resulting status.
///
/// # Errors
///
/// Returns `WorkflowError::InvalidTransition` when the action is not legal for
/// the plan's current status and the acting role.
pub fn transition(
    plan: &Plan,
    supervisor_approved: bool,
    role: Role,
    action: ReviewAction,
) -> Result<PlanStatus> {
    let ctx = GuardContext::new(plan, supervisor_approved);
    next_status(&ctx, role, action).ok_or(WorkflowError::InvalidTransition {
        plan_id: plan.id,
        status: plan.status,
        role,
        action,
    })
}

/// Actions `role` may currently take, in declaration order.
pub fn allowed_actions(ctx: &GuardContext, role: Role) -> Vec<ReviewAction> {
    ReviewAction::ALL
        .into_iter()
        .filter(|action| find_rule(ctx, role, *action).is_some())
        .collect()
}

/// Target of an employee submission from `status`, if one exists.
pub fn submission_target(status: PlanStatus) -> Option<PlanStatus> {
    SUBMISSIONS
        .iter()
        .find(|(from, _)| *from == status)
        .map(|(_, to)| *to)
}

/// Whether `from -> to` is an edge of the lifecycle graph, counting review
/// rules under any context, employee submissions and staying put.
pub fn is_defined_edge(from: PlanStatus, to: PlanStatus) -> bool {
    if from == to || submission_target(from) == Some(to) {
        return true;
    }
    TRANSITIONS
        .iter()
        .filter(|rule| rule.from.contains(&from))
        .any(|rule| match rule.outcome {
            Outcome::Stay => false,
            Outcome::Enter(status) => status == to,
            Outcome::Advance => matches!(to, ReviewerAssessment | Approved),
        })
}
