//! The plan review and approval workflow.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   Coordinator   │───▶│  State machine  │    │   PlanStore     │
//! │ (apply_action)  │    │  (guard table)  │    │ (load / CAS     │
//! │                 │───▶│ Ledger+Approvals│───▶│  save)          │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! - [`binding`]: checks the actor against the plan's assignment
//! - [`machine`]: the transition table and submission edges
//! - [`ledger`]: append-only, role-partitioned comment history
//! - [`approvals`]: per-role approval records
//! - [`coordinator`]: the entry point tying them together over a
//!   [`crate::store::PlanStore`]
//!
//! A [`PlanRecord`] is the unit of persistence: the plan, its ledger and its
//! approval records are loaded together and saved together.

pub mod approvals;
pub mod binding;
pub mod coordinator;
pub mod ledger;
pub mod machine;

pub use approvals::ApprovalTracker;
pub use coordinator::WorkflowCoordinator;
pub use ledger::{CommentLedger, LedgerView};
pub use machine::GuardContext;

use crate::models::{Plan, PlanSnapshot, PlanSummary, Role};

/// A plan together with its comment ledger and approval records.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRecord {
    pub(crate) plan: Plan,
    pub(crate) ledger: CommentLedger,
    pub(crate) approvals: ApprovalTracker,
}

impl PlanRecord {
    /// Assembles a record from persisted parts. Used by store
    /// implementations when loading.
    pub fn from_parts(plan: Plan, ledger: CommentLedger, approvals: ApprovalTracker) -> Self {
        Self {
            plan,
            ledger,
            approvals,
        }
    }

    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    pub fn ledger(&self) -> &CommentLedger {
        &self.ledger
    }

    pub fn approvals(&self) -> &ApprovalTracker {
        &self.approvals
    }

    /// Guard facts for the record's current state.
    pub fn guard_context(&self) -> GuardContext {
        GuardContext::new(&self.plan, self.approvals.is_eligible_for_reviewer_stage())
    }

    /// Read-only projection for callers.
    pub fn snapshot(&self) -> PlanSnapshot {
        let view = self.ledger.read_all();
        PlanSnapshot {
            plan: self.plan.clone(),
            supervisor_comments: view.supervisor().cloned().collect(),
            reviewer_comments: view.reviewer().cloned().collect(),
            supervisor_approval: self.approvals.record(Role::Supervisor),
            reviewer_approval: self.approvals.record(Role::Reviewer),
        }
    }

    pub fn summary(&self) -> PlanSummary {
        PlanSummary::from_plan(
            &self.plan,
            self.ledger.len(Role::Supervisor) as u32,
            self.ledger.len(Role::Reviewer) as u32,
        )
    }
}
