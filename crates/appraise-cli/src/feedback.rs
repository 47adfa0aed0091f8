//! User-facing messages for workflow failures.
//!
//! The core reports failures as [`WorkflowError`] kinds. This module turns
//! the ones a user can act on into a sentence that says what to do next.

use appraise_core::WorkflowError;

/// Message for a failed command.
///
/// Walks the `anyhow` chain for a [`WorkflowError`]; anything else is
/// reported with its full context chain.
pub fn describe(err: &anyhow::Error) -> String {
    match err.chain().find_map(|e| e.downcast_ref::<WorkflowError>()) {
        Some(workflow_err) => describe_workflow(workflow_err),
        None => format!("{err:#}"),
    }
}

fn describe_workflow(err: &WorkflowError) -> String {
    match err {
        WorkflowError::Unauthorized {
            plan_id,
            actor_id,
            assignment,
        } => format!(
            "Permission denied: '{actor_id}' is not the {assignment} assigned to plan {plan_id}."
        ),
        WorkflowError::InvalidTransition {
            plan_id,
            status,
            role,
            action,
        } => format!(
            "Plan {plan_id} is {status}; a {role} cannot {action} at this stage. \
             Run `appraise plan show {plan_id} --actor <id>` to see what you can do."
        ),
        WorkflowError::InvalidSubmission { plan_id, status } => format!(
            "Plan {plan_id} is {status} and cannot be submitted. Only drafts and plans \
             sent back for revision can be submitted."
        ),
        WorkflowError::InvalidInput { field, reason } => format!("Invalid {field}: {reason}."),
        WorkflowError::ConcurrentModification { plan_id } => {
            format!("Plan {plan_id} was updated, please retry.")
        }
        WorkflowError::NotFound { id } => format!("Plan {id} not found."),
        other => other.to_string(),
    }
}
