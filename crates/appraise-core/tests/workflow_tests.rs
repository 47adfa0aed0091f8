mod common;

use appraise_core::{
    models::{ApprovalState, PlanFilter, PlanStatus, ReviewAction, Role},
    params::{ApplyAction, CreatePlan, SubmitPlan},
    MemoryStore, PlanRecord, PlanStore, PlanSummary, Result, SaveOutcome, WorkflowCoordinator,
    WorkflowError,
};
use common::{reviewer, submitted_plan, supervisor, EMPLOYEE, REVIEWER, SUPERVISOR};

fn coordinator() -> WorkflowCoordinator<MemoryStore> {
    WorkflowCoordinator::new(MemoryStore::new())
}

/// Store that lets a rival coordinator commit an action right before each of
/// the first `interruptions` saves, forcing the next save to conflict.
struct InterruptedStore {
    inner: MemoryStore,
    rival: WorkflowCoordinator<MemoryStore>,
    rival_action: Option<ApplyAction>,
    interruptions: usize,
    saves: usize,
}

impl InterruptedStore {
    fn new(inner: MemoryStore, interruptions: usize) -> Self {
        Self {
            rival: WorkflowCoordinator::new(inner.clone()),
            inner,
            rival_action: None,
            interruptions,
            saves: 0,
        }
    }
}

impl PlanStore for InterruptedStore {
    fn create_plan(&mut self, params: &CreatePlan) -> Result<PlanRecord> {
        self.inner.create_plan(params)
    }

    fn load_plan(&self, plan_id: u64) -> Result<PlanRecord> {
        self.inner.load_plan(plan_id)
    }

    fn save_plan(&mut self, record: &PlanRecord, expected_version: u64) -> Result<SaveOutcome> {
        self.saves += 1;
        if self.interruptions > 0 {
            if let Some(rival_action) = &self.rival_action {
                self.interruptions -= 1;
                self.rival.apply_action(rival_action)?;
            }
        }
        self.inner.save_plan(record, expected_version)
    }

    fn list_plans(&self, filter: &PlanFilter) -> Result<Vec<PlanSummary>> {
        self.inner.list_plans(filter)
    }
}

#[test]
fn test_scenarios_a_through_c() {
    let mut coordinator = coordinator();
    let id = submitted_plan(&mut coordinator, Some(REVIEWER));

    // A: supervisor comment opens supervisor review
    let snapshot = coordinator
        .apply_action(&supervisor(id, ReviewAction::Comment, "Goal 3 needs a metric"))
        .unwrap();
    assert_eq!(snapshot.status(), PlanStatus::SupervisorReview);
    assert_eq!(snapshot.supervisor_comments.len(), 1);
    assert!(snapshot.reviewer_comments.is_empty());
    assert_eq!(snapshot.supervisor_approval.state, ApprovalState::Pending);

    // B: supervisor approval hands over to the reviewer
    let snapshot = coordinator
        .apply_action(&supervisor(id, ReviewAction::Approve, ""))
        .unwrap();
    assert_eq!(snapshot.status(), PlanStatus::ReviewerAssessment);
    assert_eq!(snapshot.supervisor_approval.state, ApprovalState::Approved);
    assert!(snapshot.supervisor_approval.approved_at.is_some());

    // C: final approval is terminal
    let snapshot = coordinator
        .apply_action(&reviewer(id, ReviewAction::FinalApprove, "Agreed"))
        .unwrap();
    assert_eq!(snapshot.status(), PlanStatus::Approved);
    assert_eq!(snapshot.reviewer_approval.state, ApprovalState::Approved);

    for (role, actor) in [(Role::Supervisor, SUPERVISOR), (Role::Reviewer, REVIEWER)] {
        for action in ReviewAction::ALL {
            let err = coordinator
                .apply_action(&common::action(id, actor, role, action, "late remark"))
                .unwrap_err();
            assert!(
                matches!(err, WorkflowError::InvalidTransition { .. }),
                "{role} {action} on an approved plan gave {err:?}"
            );
        }
    }
}

#[test]
fn test_scenario_d_reviewer_before_supervisor_approval() {
    let mut coordinator = coordinator();
    let id = submitted_plan(&mut coordinator, Some(REVIEWER));

    let err = coordinator
        .apply_action(&reviewer(id, ReviewAction::Comment, "Early thoughts"))
        .unwrap_err();
    assert!(matches!(
        err,
        WorkflowError::InvalidTransition {
            status: PlanStatus::Submitted,
            role: Role::Reviewer,
            action: ReviewAction::Comment,
            ..
        }
    ));

    let snapshot = coordinator.get_plan_snapshot(id).unwrap();
    assert!(snapshot.reviewer_comments.is_empty());
    assert_eq!(snapshot.plan.version, 1);
}

#[test]
fn test_scenario_e_conflict_then_retry_rejects_duplicate_approval() {
    let shared = MemoryStore::new();
    let mut setup = WorkflowCoordinator::new(shared.clone());
    let id = submitted_plan(&mut setup, Some(REVIEWER));

    let mut store = InterruptedStore::new(shared, 1);
    store.rival_action = Some(supervisor(id, ReviewAction::Approve, ""));
    let mut coordinator = WorkflowCoordinator::new(store);

    let err = coordinator
        .apply_action(&supervisor(id, ReviewAction::Approve, ""))
        .unwrap_err();
    assert!(matches!(
        err,
        WorkflowError::InvalidTransition {
            status: PlanStatus::ReviewerAssessment,
            ..
        }
    ));
    // The first save conflicted; the retry was rejected before saving
    assert_eq!(coordinator.store().saves, 1);

    let snapshot = coordinator.get_plan_snapshot(id).unwrap();
    assert_eq!(snapshot.status(), PlanStatus::ReviewerAssessment);
    assert_eq!(snapshot.supervisor_comments.len(), 1);
    assert_eq!(snapshot.plan.version, 2);
}

#[test]
fn test_scenario_e_second_conflict_is_concurrent_modification() {
    let shared = MemoryStore::new();
    let mut setup = WorkflowCoordinator::new(shared.clone());
    let id = submitted_plan(&mut setup, None);
    setup
        .apply_action(&supervisor(id, ReviewAction::Comment, "Opening review"))
        .unwrap();

    let mut store = InterruptedStore::new(shared, 2);
    store.rival_action = Some(supervisor(id, ReviewAction::Comment, "Rival remark"));
    let mut coordinator = WorkflowCoordinator::new(store);

    let err = coordinator
        .apply_action(&supervisor(id, ReviewAction::Comment, "Lost remark"))
        .unwrap_err();
    assert!(matches!(
        err,
        WorkflowError::ConcurrentModification { plan_id } if plan_id == id
    ));
    assert_eq!(coordinator.store().saves, 2);

    let snapshot = coordinator.get_plan_snapshot(id).unwrap();
    let bodies: Vec<&str> = snapshot
        .supervisor_comments
        .iter()
        .map(|entry| entry.body.as_str())
        .collect();
    assert_eq!(bodies, ["Opening review", "Rival remark", "Rival remark"]);
}

#[test]
fn test_retry_succeeds_when_action_still_valid() {
    let shared = MemoryStore::new();
    let mut setup = WorkflowCoordinator::new(shared.clone());
    let id = submitted_plan(&mut setup, Some(REVIEWER));

    let mut store = InterruptedStore::new(shared, 1);
    store.rival_action = Some(supervisor(id, ReviewAction::Comment, "First"));
    let mut coordinator = WorkflowCoordinator::new(store);

    let snapshot = coordinator
        .apply_action(&supervisor(id, ReviewAction::Comment, "Second"))
        .unwrap();
    assert_eq!(snapshot.status(), PlanStatus::SupervisorReview);
    assert_eq!(snapshot.supervisor_comments.len(), 2);
    assert_eq!(snapshot.supervisor_comments[1].body, "Second");
    assert_eq!(snapshot.plan.version, 3);
}

#[test]
fn test_double_final_approve_is_rejected() {
    let mut coordinator = coordinator();
    let id = submitted_plan(&mut coordinator, Some(REVIEWER));
    coordinator
        .apply_action(&supervisor(id, ReviewAction::Approve, ""))
        .unwrap();

    let request = reviewer(id, ReviewAction::FinalApprove, "");
    coordinator.apply_action(&request).unwrap();
    let err = coordinator.apply_action(&request).unwrap_err();
    assert!(matches!(err, WorkflowError::InvalidTransition { .. }));

    let snapshot = coordinator.get_plan_snapshot(id).unwrap();
    assert_eq!(snapshot.reviewer_comments.len(), 1);
}

#[test]
fn test_plan_without_reviewer_skips_assessment() {
    let mut coordinator = coordinator();
    let id = submitted_plan(&mut coordinator, None);
    coordinator
        .apply_action(&supervisor(id, ReviewAction::Comment, "Looks fine"))
        .unwrap();

    let snapshot = coordinator
        .apply_action(&supervisor(id, ReviewAction::Approve, ""))
        .unwrap();
    assert_eq!(snapshot.status(), PlanStatus::Approved);
    assert_eq!(snapshot.reviewer_approval.state, ApprovalState::Pending);

    // Nobody can act as reviewer on such a plan
    let err = coordinator
        .apply_action(&reviewer(id, ReviewAction::Comment, "hello"))
        .unwrap_err();
    assert!(matches!(err, WorkflowError::Unauthorized { .. }));
}

#[test]
fn test_empty_request_changes_leaves_plan_untouched() {
    let mut coordinator = coordinator();
    let id = submitted_plan(&mut coordinator, Some(REVIEWER));
    coordinator
        .apply_action(&supervisor(id, ReviewAction::Approve, ""))
        .unwrap();
    let before = coordinator.get_plan_snapshot(id).unwrap();

    for body in ["", "   ", "\n\t"] {
        let err = coordinator
            .apply_action(&reviewer(id, ReviewAction::RequestChanges, body))
            .unwrap_err();
        assert!(matches!(err, WorkflowError::InvalidInput { ref field, .. } if field == "body"));
    }

    assert_eq!(coordinator.get_plan_snapshot(id).unwrap(), before);
}

#[test]
fn test_each_action_appends_exactly_one_entry_in_order() {
    let mut coordinator = coordinator();
    let id = submitted_plan(&mut coordinator, Some(REVIEWER));

    let script = [
        supervisor(id, ReviewAction::Comment, "s1"),
        supervisor(id, ReviewAction::Comment, "s2"),
        supervisor(id, ReviewAction::Approve, ""),
        reviewer(id, ReviewAction::Comment, "r1"),
        supervisor(id, ReviewAction::Comment, "s3"),
        reviewer(id, ReviewAction::FinalApprove, "r2"),
    ];

    let mut previous = coordinator.get_plan_snapshot(id).unwrap();
    for request in &script {
        let next = coordinator.apply_action(request).unwrap();
        let (grown, other) = match request.role {
            Role::Supervisor => (Role::Supervisor, Role::Reviewer),
            Role::Reviewer => (Role::Reviewer, Role::Supervisor),
        };
        assert_eq!(next.comments(grown).len(), previous.comments(grown).len() + 1);
        assert_eq!(next.comments(grown)[..previous.comments(grown).len()], *previous.comments(grown));
        assert_eq!(next.comments(other), previous.comments(other));

        let appended = next.comments(grown).last().unwrap();
        assert_eq!(appended.author_id, request.actor_id);
        assert_eq!(appended.action, request.action);
        assert_eq!(appended.body, request.body);
        previous = next;
    }

    let bodies: Vec<&str> = previous
        .supervisor_comments
        .iter()
        .map(|entry| entry.body.as_str())
        .collect();
    assert_eq!(bodies, ["s1", "s2", "", "s3"]);
}

#[test]
fn test_revision_cycle_through_resubmission() {
    let mut coordinator = coordinator();
    let id = submitted_plan(&mut coordinator, Some(REVIEWER));

    let snapshot = coordinator
        .apply_action(&supervisor(id, ReviewAction::RequestChanges, "Add targets"))
        .unwrap();
    assert_eq!(snapshot.status(), PlanStatus::RevisionRequested);
    assert_eq!(snapshot.supervisor_approval.state, ApprovalState::ChangesRequested);

    let snapshot = coordinator
        .submit_plan(&SubmitPlan {
            plan_id: id,
            actor_id: EMPLOYEE.to_string(),
        })
        .unwrap();
    assert_eq!(snapshot.status(), PlanStatus::Submitted);
    assert_eq!(snapshot.plan.round, 2);
    assert_eq!(snapshot.supervisor_approval.state, ApprovalState::Pending);

    let snapshot = coordinator
        .apply_action(&supervisor(id, ReviewAction::Approve, ""))
        .unwrap();
    assert_eq!(snapshot.status(), PlanStatus::ReviewerAssessment);
    assert_eq!(snapshot.supervisor_comments[0].round, 1);
    assert_eq!(snapshot.supervisor_comments[1].round, 2);
}

#[test]
fn test_unknown_plan_is_not_found() {
    let mut coordinator = coordinator();
    let err = coordinator
        .apply_action(&supervisor(99, ReviewAction::Comment, "hi"))
        .unwrap_err();
    assert!(matches!(err, WorkflowError::NotFound { id: 99 }));
}

#[test]
fn test_wrong_identity_is_unauthorized() {
    let mut coordinator = coordinator();
    let id = submitted_plan(&mut coordinator, Some(REVIEWER));

    // The reviewer claiming the supervisor role
    let err = coordinator
        .apply_action(&common::action(
            id,
            REVIEWER,
            Role::Supervisor,
            ReviewAction::Approve,
            "",
        ))
        .unwrap_err();
    assert!(matches!(
        err,
        WorkflowError::Unauthorized { ref actor_id, ref assignment, .. }
            if actor_id == REVIEWER && assignment == "supervisor"
    ));
}

#[test]
fn test_reviewer_inbox_lists_only_assessments() {
    let mut coordinator = coordinator();
    let waiting = submitted_plan(&mut coordinator, Some(REVIEWER));
    let ready = submitted_plan(&mut coordinator, Some(REVIEWER));
    coordinator
        .apply_action(&supervisor(ready, ReviewAction::Approve, ""))
        .unwrap();

    let inbox = coordinator
        .list_plans(&PlanFilter::inbox(REVIEWER, Role::Reviewer))
        .unwrap();
    let ids: Vec<u64> = inbox.iter().map(|summary| summary.id).collect();
    assert_eq!(ids, [ready]);

    let supervised = coordinator
        .list_plans(&PlanFilter::inbox(SUPERVISOR, Role::Supervisor))
        .unwrap();
    assert_eq!(supervised.len(), 2);
    assert!(supervised.iter().any(|summary| summary.id == waiting));
}
