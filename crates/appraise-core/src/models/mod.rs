//! Data models for plans, review comments and approvals.
//!
//! This module contains the plain domain types shared by the workflow core,
//! the persistence layer and the shell. None of them enforce workflow rules on
//! their own: status changes, ledger appends and approval updates all go
//! through [`crate::workflow`].
//!
//! # Model Overview
//!
//! - [`Plan`]: assignment (employee, supervisor, optional reviewer), status,
//!   descriptive [`PlanMetadata`], review round and concurrency version
//! - [`CommentEntry`]: one attributable, timestamped remark
//! - [`ApprovalRecord`]: per-role approval state
//! - [`PlanSnapshot`]: the read-only projection returned to callers
//! - [`PlanSummary`] / [`PlanFilter`]: list rows and list criteria
//!
//! # Examples
//!
//! ```rust
//! use appraise_core::models::{PlanStatus, ReviewAction, Role};
//!
//! assert_eq!("supervisor_review".parse::<PlanStatus>(), Ok(PlanStatus::SupervisorReview));
//! assert_eq!(ReviewAction::RequestChanges.as_str(), "request_changes");
//! assert_eq!(Role::Reviewer.to_string(), "reviewer");
//! ```

pub mod approval;
pub mod comment;
pub mod filters;
pub mod plan;
pub mod snapshot;
pub mod status;
pub mod summary;


pub use approval::ApprovalRecord;
pub use comment::CommentEntry;
pub use filters::PlanFilter;
pub use plan::{Plan, PlanMetadata};
pub use snapshot::PlanSnapshot;
pub use status::{ApprovalState, PlanStatus, ReviewAction, Role};
pub use summary::PlanSummary;
