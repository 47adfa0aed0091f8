//! Async facade over the workflow and its SQLite store.
//!
//! [`ReviewService`] is what an application shell holds on to. Each call
//! opens a connection on the blocking thread pool, runs one
//! [`WorkflowCoordinator`] operation against it and returns the result.
//! Because every call brings its own connection, concurrent calls are
//! serialized by the database's version check rather than by a lock in
//! this process.
//!
//! # Usage Examples
//!
//! ```rust,no_run
//! use appraise_core::{
//!     models::{ReviewAction, Role},
//!     params::{ApplyAction, CreatePlan, SubmitPlan},
//!     ReviewServiceBuilder,
//! };
//! use jiff::civil::date;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = ReviewServiceBuilder::new()
//!     .with_database_path(Some("/tmp/appraise.db"))
//!     .build()
//!     .await?;
//!
//! let plan = service
//!     .create_plan(&CreatePlan {
//!         employee_id: "e-17".to_string(),
//!         supervisor_id: "s-4".to_string(),
//!         reviewer_id: Some("r-2".to_string()),
//!         title: "2025 development plan".to_string(),
//!         year: 2025,
//!         period_start: date(2025, 1, 1),
//!         period_end: date(2025, 12, 31),
//!     })
//!     .await?;
//!
//! service
//!     .submit_plan(&SubmitPlan { plan_id: plan.plan.id, actor_id: "e-17".to_string() })
//!     .await?;
//!
//! let snapshot = service
//!     .apply_action(&ApplyAction {
//!         plan_id: plan.plan.id,
//!         actor_id: "s-4".to_string(),
//!         actor_name: "Sam Ortiz".to_string(),
//!         role: Role::Supervisor,
//!         action: ReviewAction::Approve,
//!         body: String::new(),
//!     })
//!     .await?;
//! println!("Plan is now {}", snapshot.status());
//! # Ok(())
//! # }
//! ```

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use tokio::task;

pub mod builder;
pub mod plan_ops;
pub mod review_ops;


pub use builder::ReviewServiceBuilder;

use crate::{
    db::Database,
    error::{Result, WorkflowError},
    workflow::WorkflowCoordinator,
};

/// Main service interface for the review workflow. Built with
/// [`ReviewServiceBuilder`].
pub struct ReviewService {
    db_path: PathBuf,
    busy_timeout: Duration,
}

impl ReviewService {
    /// The database file every call connects to.
    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    /// Runs `op` with a coordinator over a fresh connection on the blocking
    /// thread pool.
    pub(crate) async fn with_coordinator<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut WorkflowCoordinator<Database>) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        let busy_timeout = self.busy_timeout;

        task::spawn_blocking(move || {
            let db = Database::open_initialized(&db_path, busy_timeout)?;
            let mut coordinator = WorkflowCoordinator::new(db);
            op(&mut coordinator)
        })
        .await
        .map_err(|e| WorkflowError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
