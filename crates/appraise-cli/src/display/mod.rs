//! Markdown formatting for workflow results.
//!
//! The core crate returns plain data. The wrappers here give that data a
//! [`std::fmt::Display`] impl producing markdown, which the
//! [`crate::renderer::TerminalRenderer`] prints either styled or as-is.
//!
//! - [`SnapshotView`]: a plan with both ledgers and approval records
//! - [`PlanSummaries`]: list output
//! - [`OperationStatus`]: one-line confirmations
//! - [`LocalDateTime`]: timestamps in the system time zone

mod collections;
mod datetime;
mod snapshot;
mod status;

pub use collections::PlanSummaries;
pub use datetime::LocalDateTime;
pub use snapshot::SnapshotView;
pub use status::OperationStatus;
