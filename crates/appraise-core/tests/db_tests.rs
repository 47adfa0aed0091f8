mod common;

use appraise_core::{
    models::{ApprovalState, PlanFilter, PlanStatus, ReviewAction, Role},
    params::SubmitPlan,
    workflow::CommentLedger,
    Database, PlanRecord, PlanStore, SaveOutcome, WorkflowCoordinator, WorkflowError,
};
use common::{plan_params, reviewer, submitted_plan, supervisor, EMPLOYEE, REVIEWER};
use std::{
    sync::atomic::{AtomicBool, Ordering},
    thread,
};
use tempfile::NamedTempFile;

/// Helper function to create a temporary database for testing
fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

#[test]
fn test_database_initialization() {
    let (temp_file, _db) = create_test_db();
    assert!(temp_file.path().exists());
}

#[test]
fn test_create_and_load_plan() {
    let (_temp_file, mut db) = create_test_db();

    let record = db
        .create_plan(&plan_params(Some(REVIEWER)))
        .expect("Failed to create plan");
    let plan = record.plan();
    assert!(plan.id > 0);
    assert_eq!(plan.status, PlanStatus::Draft);
    assert_eq!(plan.version, 0);
    assert_eq!(plan.round, 1);
    assert_eq!(plan.reviewer_id.as_deref(), Some(REVIEWER));
    assert!(record.ledger().is_empty());

    let loaded = db.load_plan(plan.id).expect("Failed to load plan");
    assert_eq!(loaded, record);
}

#[test]
fn test_load_missing_plan() {
    let (_temp_file, db) = create_test_db();
    let result = db.load_plan(12345);
    assert!(matches!(result, Err(WorkflowError::NotFound { id: 12345 })));
}

#[test]
fn test_save_with_stale_version_conflicts() {
    let (_temp_file, db) = create_test_db();
    let mut coordinator = WorkflowCoordinator::new(db);
    let id = submitted_plan(&mut coordinator, Some(REVIEWER));
    let mut db = coordinator.into_store();

    let stale = db.load_plan(id).expect("Failed to load plan");
    let outcome = db
        .save_plan(&stale, stale.plan().version + 3)
        .expect("Failed to save plan");
    assert_eq!(outcome, SaveOutcome::Conflict);

    let outcome = db
        .save_plan(&stale, stale.plan().version)
        .expect("Failed to save plan");
    assert_eq!(outcome, SaveOutcome::Saved);
    assert_eq!(
        db.load_plan(id).expect("Failed to load plan").plan().version,
        stale.plan().version + 1
    );
}

#[test]
fn test_save_rejects_shortened_ledger() {
    let (_temp_file, db) = create_test_db();
    let mut coordinator = WorkflowCoordinator::new(db);
    let id = submitted_plan(&mut coordinator, None);
    coordinator
        .apply_action(&supervisor(id, ReviewAction::Comment, "Keep me"))
        .expect("Failed to comment");
    let mut db = coordinator.into_store();

    let current = db.load_plan(id).expect("Failed to load plan");
    let truncated = PlanRecord::from_parts(
        current.plan().clone(),
        CommentLedger::default(),
        *current.approvals(),
    );
    let result = db.save_plan(&truncated, current.plan().version);
    assert!(matches!(result, Err(WorkflowError::LedgerRewrite { .. })));

    // The failed save rolled back, version included
    let after = db.load_plan(id).expect("Failed to load plan");
    assert_eq!(after, current);
}

#[test]
fn test_save_rejects_edited_ledger_entry() {
    let (_temp_file, db) = create_test_db();
    let mut coordinator = WorkflowCoordinator::new(db);
    let id = submitted_plan(&mut coordinator, None);
    coordinator
        .apply_action(&supervisor(id, ReviewAction::Comment, "Original remark"))
        .expect("Failed to comment");
    let mut db = coordinator.into_store();

    let current = db.load_plan(id).expect("Failed to load plan");
    let mut entries = current.ledger().entries(Role::Supervisor).to_vec();
    entries[0].body = "Edited remark".to_string();
    let edited = PlanRecord::from_parts(
        current.plan().clone(),
        CommentLedger::from_entries(entries, Vec::new()),
        *current.approvals(),
    );

    let result = db.save_plan(&edited, current.plan().version);
    assert!(matches!(
        result,
        Err(WorkflowError::LedgerRewrite { plan_id }) if plan_id == id
    ));

    let after = db.load_plan(id).expect("Failed to load plan");
    assert_eq!(after, current);
    assert_eq!(
        after.ledger().entries(Role::Supervisor)[0].body,
        "Original remark"
    );
}

#[test]
fn test_comments_table_is_append_only() {
    let (temp_file, db) = create_test_db();
    let mut coordinator = WorkflowCoordinator::new(db);
    let id = submitted_plan(&mut coordinator, None);
    coordinator
        .apply_action(&supervisor(id, ReviewAction::Comment, "Original"))
        .expect("Failed to comment");

    let raw = rusqlite::Connection::open(temp_file.path()).expect("Failed to open connection");
    let update = raw.execute("UPDATE comments SET body = 'Edited'", []);
    assert!(update.is_err());
    let delete = raw.execute("DELETE FROM comments", []);
    assert!(delete.is_err());

    let snapshot = coordinator.get_plan_snapshot(id).expect("Failed to load");
    assert_eq!(snapshot.supervisor_comments[0].body, "Original");
}

#[test]
fn test_state_survives_reopening() {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let id = {
        let db = Database::new(temp_file.path()).expect("Failed to create database");
        let mut coordinator = WorkflowCoordinator::new(db);
        let id = submitted_plan(&mut coordinator, Some(REVIEWER));
        coordinator
            .apply_action(&supervisor(id, ReviewAction::Approve, "Solid plan"))
            .expect("Failed to approve");
        coordinator
            .apply_action(&reviewer(id, ReviewAction::Comment, "One question"))
            .expect("Failed to comment");
        id
    };

    let db = Database::new(temp_file.path()).expect("Failed to reopen database");
    let coordinator = WorkflowCoordinator::new(db);
    let snapshot = coordinator.get_plan_snapshot(id).expect("Failed to load");

    assert_eq!(snapshot.status(), PlanStatus::ReviewerAssessment);
    assert_eq!(snapshot.supervisor_approval.state, ApprovalState::Approved);
    assert!(snapshot.supervisor_approval.approved_at.is_some());
    assert_eq!(snapshot.reviewer_approval.state, ApprovalState::Pending);
    assert_eq!(snapshot.supervisor_comments.len(), 1);
    assert_eq!(snapshot.supervisor_comments[0].body, "Solid plan");
    assert_eq!(snapshot.reviewer_comments.len(), 1);
    assert_eq!(snapshot.reviewer_comments[0].author_id, REVIEWER);
    assert_eq!(snapshot.plan.version, 3);
}

#[test]
fn test_two_connections_race_on_same_version() {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let mut first = Database::new(temp_file.path()).expect("Failed to open first");
    let mut second = Database::new(temp_file.path()).expect("Failed to open second");

    let id = {
        let mut coordinator = WorkflowCoordinator::new(
            Database::new(temp_file.path()).expect("Failed to open setup"),
        );
        submitted_plan(&mut coordinator, Some(REVIEWER))
    };

    let from_first = first.load_plan(id).expect("Failed to load");
    let from_second = second.load_plan(id).expect("Failed to load");
    let version = from_first.plan().version;

    assert_eq!(
        first.save_plan(&from_first, version).expect("save failed"),
        SaveOutcome::Saved
    );
    assert_eq!(
        second.save_plan(&from_second, version).expect("save failed"),
        SaveOutcome::Conflict
    );
}

#[test]
fn test_loads_never_mix_versions_during_writes() {
    const COMMENTS: u64 = 25;

    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let id = {
        let mut coordinator = WorkflowCoordinator::new(
            Database::new(temp_file.path()).expect("Failed to open setup"),
        );
        submitted_plan(&mut coordinator, None)
    };
    let writer_db = Database::new(temp_file.path()).expect("Failed to open writer");
    let reader = Database::new(temp_file.path()).expect("Failed to open reader");
    let done = AtomicBool::new(false);

    thread::scope(|scope| {
        scope.spawn(|| {
            let mut writer = WorkflowCoordinator::new(writer_db);
            for n in 0..COMMENTS {
                writer
                    .apply_action(&supervisor(id, ReviewAction::Comment, &format!("Note {n}")))
                    .expect("Failed to comment");
            }
            done.store(true, Ordering::SeqCst);
        });

        // Submission is version 1 and every comment adds one entry and one version
        loop {
            let finished = done.load(Ordering::SeqCst);
            let record = reader.load_plan(id).expect("Failed to load plan");
            assert_eq!(
                record.plan().version,
                1 + record.ledger().len(Role::Supervisor) as u64
            );
            if finished {
                assert_eq!(record.plan().version, 1 + COMMENTS);
                break;
            }
        }
    });
}

#[test]
fn test_resubmission_resets_stored_approvals() {
    let (_temp_file, db) = create_test_db();
    let mut coordinator = WorkflowCoordinator::new(db);
    let id = submitted_plan(&mut coordinator, Some(REVIEWER));
    coordinator
        .apply_action(&supervisor(id, ReviewAction::Approve, ""))
        .expect("Failed to approve");
    coordinator
        .apply_action(&reviewer(id, ReviewAction::RequestChanges, "Rework goal 1"))
        .expect("Failed to request changes");

    let snapshot = coordinator.get_plan_snapshot(id).expect("Failed to load");
    assert_eq!(snapshot.reviewer_approval.state, ApprovalState::ChangesRequested);

    coordinator
        .submit_plan(&SubmitPlan {
            plan_id: id,
            actor_id: EMPLOYEE.to_string(),
        })
        .expect("Failed to resubmit");

    let snapshot = coordinator.get_plan_snapshot(id).expect("Failed to load");
    assert_eq!(snapshot.status(), PlanStatus::Submitted);
    assert_eq!(snapshot.plan.round, 2);
    assert_eq!(snapshot.supervisor_approval.state, ApprovalState::Pending);
    assert!(snapshot.supervisor_approval.approved_at.is_none());
    assert_eq!(snapshot.reviewer_approval.state, ApprovalState::Pending);
    assert_eq!(snapshot.supervisor_comments.len(), 1);
    assert_eq!(snapshot.reviewer_comments.len(), 1);
}

#[test]
fn test_list_plans_filters_and_counts() {
    let (_temp_file, db) = create_test_db();
    let mut coordinator = WorkflowCoordinator::new(db);

    let draft = coordinator
        .create_plan(&plan_params(None))
        .expect("Failed to create plan")
        .plan
        .id;
    let mut older = plan_params(Some(REVIEWER));
    older.year = 2024;
    let old = coordinator
        .create_plan(&older)
        .expect("Failed to create plan")
        .plan
        .id;
    let active = submitted_plan(&mut coordinator, Some(REVIEWER));
    coordinator
        .apply_action(&supervisor(active, ReviewAction::Comment, "First"))
        .expect("Failed to comment");
    coordinator
        .apply_action(&supervisor(active, ReviewAction::Approve, ""))
        .expect("Failed to approve");

    let all = coordinator
        .list_plans(&PlanFilter::default())
        .expect("Failed to list");
    assert_eq!(all.len(), 3);
    // Most recently updated first
    assert_eq!(all[0].id, active);
    assert_eq!(all[0].supervisor_comments, 2);
    assert_eq!(all[0].reviewer_comments, 0);

    let by_year = coordinator
        .list_plans(&PlanFilter {
            year: Some(2024),
            ..Default::default()
        })
        .expect("Failed to list");
    assert_eq!(by_year.len(), 1);
    assert_eq!(by_year[0].id, old);

    let drafts = coordinator
        .list_plans(&PlanFilter {
            status: Some(PlanStatus::Draft),
            reviewer_id: None,
            ..Default::default()
        })
        .expect("Failed to list");
    let ids: Vec<u64> = drafts.iter().map(|summary| summary.id).collect();
    assert!(ids.contains(&draft));
    assert!(ids.contains(&old));
    assert!(!ids.contains(&active));

    let assessments = coordinator
        .list_plans(&PlanFilter {
            status: Some(PlanStatus::ReviewerAssessment),
            reviewer_id: Some(REVIEWER.to_string()),
            ..Default::default()
        })
        .expect("Failed to list");
    assert_eq!(assessments.len(), 1);
    assert_eq!(assessments[0].id, active);
}
