//! Core library for the Appraise performance plan review workflow.
//!
//! A plan moves from the employee's draft through supervisor review and an
//! optional reviewer assessment to final approval. Supervisor and reviewer
//! remarks are kept in an append-only, role-partitioned comment ledger, and
//! each role's approval is tracked separately so the reviewer stage only opens
//! once the supervisor has signed off.
//!
//! # Architecture
//!
//! - **Models** ([`models`]): plain domain types with no behavior of their own
//! - **Workflow** ([`workflow`]): the transition table, ledger, approval
//!   tracker and the [`WorkflowCoordinator`] that applies actions
//! - **Stores** ([`store`], [`db`]): persistence behind the [`PlanStore`]
//!   trait with an optimistic version check on every save
//! - **Service** ([`service`]): an async facade over the SQLite store
//!
//! The crate produces no presentation text; shells render
//! [`PlanSnapshot`]s and [`PlanSummary`]s however they like.
//!
//! # Quick Start
//!
//! ```rust
//! use appraise_core::{
//!     models::{PlanStatus, ReviewAction, Role},
//!     params::{ApplyAction, CreatePlan, SubmitPlan},
//!     MemoryStore, WorkflowCoordinator,
//! };
//! use jiff::civil::date;
//!
//! # fn example() -> appraise_core::Result<()> {
//! let mut coordinator = WorkflowCoordinator::new(MemoryStore::new());
//!
//! let plan = coordinator.create_plan(&CreatePlan {
//!     employee_id: "e-17".to_string(),
//!     supervisor_id: "s-4".to_string(),
//!     reviewer_id: None,
//!     title: "2025 development plan".to_string(),
//!     year: 2025,
//!     period_start: date(2025, 1, 1),
//!     period_end: date(2025, 12, 31),
//! })?;
//! let plan_id = plan.plan.id;
//!
//! coordinator.submit_plan(&SubmitPlan { plan_id, actor_id: "e-17".to_string() })?;
//!
//! let snapshot = coordinator.apply_action(&ApplyAction {
//!     plan_id,
//!     actor_id: "s-4".to_string(),
//!     actor_name: "Sam Ortiz".to_string(),
//!     role: Role::Supervisor,
//!     action: ReviewAction::Approve,
//!     body: String::new(),
//! })?;
//!
//! // No reviewer assigned, so the supervisor's approval is final
//! assert_eq!(snapshot.status(), PlanStatus::Approved);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod db;
pub mod error;
pub mod models;
pub mod params;
pub mod service;
pub mod store;
pub mod workflow;

// Re-export commonly used types
pub use db::Database;
pub use error::{Result, WorkflowError};
pub use models::{
    ApprovalRecord, ApprovalState, CommentEntry, Plan, PlanFilter, PlanMetadata, PlanSnapshot,
    PlanStatus, PlanSummary, ReviewAction, Role,
};
pub use params::{ApplyAction, CreatePlan, Id, ListPlans, SubmitPlan};
pub use service::{ReviewService, ReviewServiceBuilder};
pub use store::{MemoryStore, PlanStore, SaveOutcome};
pub use workflow::{PlanRecord, WorkflowCoordinator};
