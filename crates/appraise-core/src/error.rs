//! Error types for the review workflow.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::{PlanStatus, ReviewAction, Role};

/// Every way a workflow operation can fail.
///
/// Variants from `Unauthorized` through `NotFound` are the workflow taxonomy
/// that callers translate into user-facing messages. The rest are
/// infrastructure failures from the persistence layer or the environment.
#[derive(Error, Debug)]
pub enum WorkflowError {
    /// The acting identity is not bound to the claimed assignment on this plan
    #[error("Actor '{actor_id}' is not the assigned {assignment} for plan {plan_id}")]
    Unauthorized {
        plan_id: u64,
        actor_id: String,
        assignment: String,
    },
    /// The action is not legal for the plan's current status
    #[error("Cannot {action} as {role} while plan {plan_id} is {status}")]
    InvalidTransition {
        plan_id: u64,
        status: PlanStatus,
        role: Role,
        action: ReviewAction,
    },
    /// Submission attempted from a status that does not accept it
    #[error("Plan {plan_id} cannot be submitted while it is {status}")]
    InvalidSubmission { plan_id: u64, status: PlanStatus },
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// A store was asked to persist a ledger that drops or alters history
    #[error("Comment history of plan {plan_id} cannot be rewritten")]
    LedgerRewrite { plan_id: u64 },
    /// The plan changed underneath the action twice in a row
    #[error("Plan {plan_id} was modified concurrently")]
    ConcurrentModification { plan_id: u64 },
    /// Plan not found for the given ID
    #[error("Plan with ID {id} not found")]
    NotFound { id: u64 },
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> WorkflowError {
        WorkflowError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl WorkflowError {
    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a new database error with additional context.
    pub fn database(message: impl Into<String>, source: rusqlite::Error) -> Self {
        Self::Database {
            message: message.into(),
            source,
        }
    }

    /// Whether the error belongs to the workflow taxonomy rather than the
    /// infrastructure. Taxonomy errors are never retried by the core.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized { .. }
                | Self::InvalidTransition { .. }
                | Self::InvalidSubmission { .. }
                | Self::InvalidInput { .. }
                | Self::NotFound { .. }
        )
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| WorkflowError::database(message, e))
    }
}

/// Result type alias for workflow operations
pub type Result<T> = std::result::Result<T, WorkflowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_transition_message_names_current_status() {
        let err = WorkflowError::InvalidTransition {
            plan_id: 7,
            status: PlanStatus::SupervisorReview,
            role: Role::Reviewer,
            action: ReviewAction::FinalApprove,
        };
        let message = err.to_string();
        assert!(message.contains("supervisor_review"));
        assert!(message.contains("final_approve"));
        assert!(message.contains("reviewer"));
    }

    #[test]
    fn test_rejection_classification() {
        assert!(WorkflowError::NotFound { id: 1 }.is_rejection());
        assert!(WorkflowError::invalid_input("body")
            .with_reason("required")
            .is_rejection());
        assert!(!WorkflowError::ConcurrentModification { plan_id: 1 }.is_rejection());
        assert!(!WorkflowError::XdgDirectory("missing".to_string()).is_rejection());
    }
}
