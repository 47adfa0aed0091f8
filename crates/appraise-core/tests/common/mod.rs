#![allow(dead_code)]

use appraise_core::{
    models::{ReviewAction, Role},
    params::{ApplyAction, CreatePlan, SubmitPlan},
    PlanStore, WorkflowCoordinator,
};
use jiff::civil::date;

pub const EMPLOYEE: &str = "emp-1";
pub const SUPERVISOR: &str = "sup-1";
pub const REVIEWER: &str = "rev-1";

/// Creation parameters for a 2025 plan assigned to the fixture identities
pub fn plan_params(reviewer: Option<&str>) -> CreatePlan {
    CreatePlan {
        employee_id: EMPLOYEE.to_string(),
        supervisor_id: SUPERVISOR.to_string(),
        reviewer_id: reviewer.map(String::from),
        title: "2025 development plan".to_string(),
        year: 2025,
        period_start: date(2025, 1, 1),
        period_end: date(2025, 12, 31),
    }
}

pub fn action(
    plan_id: u64,
    actor_id: &str,
    role: Role,
    action: ReviewAction,
    body: &str,
) -> ApplyAction {
    ApplyAction {
        plan_id,
        actor_id: actor_id.to_string(),
        actor_name: format!("{actor_id} (display)"),
        role,
        action,
        body: body.to_string(),
    }
}

pub fn supervisor(plan_id: u64, act: ReviewAction, body: &str) -> ApplyAction {
    action(plan_id, SUPERVISOR, Role::Supervisor, act, body)
}

pub fn reviewer(plan_id: u64, act: ReviewAction, body: &str) -> ApplyAction {
    action(plan_id, REVIEWER, Role::Reviewer, act, body)
}

/// Creates a plan and submits it, returning its id
pub fn submitted_plan<S: PlanStore>(
    coordinator: &mut WorkflowCoordinator<S>,
    reviewer: Option<&str>,
) -> u64 {
    let plan_id = coordinator
        .create_plan(&plan_params(reviewer))
        .expect("Failed to create plan")
        .plan
        .id;
    coordinator
        .submit_plan(&SubmitPlan {
            plan_id,
            actor_id: EMPLOYEE.to_string(),
        })
        .expect("Failed to submit plan");
    plan_id
}
