//! Actor/role binding.
//!
//! Bindings are derived from the plan's assignment fields on every request
//! and never stored.

use crate::{
    error::{Result, WorkflowError},
    models::{Plan, Role},
};

/// Confirms that `actor_id` is the plan's assignee for `role`.
///
/// # Errors
///
/// Returns `WorkflowError::Unauthorized` when the role is unassigned or
/// assigned to someone else.
pub fn bind_reviewer_role(plan: &Plan, actor_id: &str, role: Role) -> Result<Role> {
    match plan.assignee(role) {
        Some(assignee) if assignee == actor_id => Ok(role),
        _ => Err(WorkflowError::Unauthorized {
            plan_id: plan.id,
            actor_id: actor_id.to_string(),
            assignment: role.as_str().to_string(),
        }),
    }
}

/// Confirms that `actor_id` authored the plan.
///
/// # Errors
///
/// Returns `WorkflowError::Unauthorized` for anyone but the plan's employee.
pub fn bind_employee(plan: &Plan, actor_id: &str) -> Result<()> {
    if plan.employee_id == actor_id {
        Ok(())
    } else {
        Err(WorkflowError::Unauthorized {
            plan_id: plan.id,
            actor_id: actor_id.to_string(),
            assignment: "employee".to_string(),
        })
    }
}

/// Roles `actor_id` holds on `plan`.
pub fn roles_of(plan: &Plan, actor_id: &str) -> Vec<Role> {
    Role::ALL
        .into_iter()
        .filter(|role| plan.assignee(*role) == Some(actor_id))
        .collect()
}
