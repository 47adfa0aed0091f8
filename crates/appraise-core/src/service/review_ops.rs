//! Review action operations for the ReviewService.

use super::ReviewService;
use crate::{
    error::Result,
    models::PlanSnapshot,
    params::{ApplyAction, Id},
};

impl ReviewService {
    /// Applies a supervisor or reviewer action to a plan.
    ///
    /// The action is all-or-nothing: on any error the plan, its ledgers and
    /// its approval records are exactly as they were before the call.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use appraise_core::{models::{ReviewAction, Role}, params::ApplyAction, ReviewServiceBuilder};
    /// # async {
    /// let service = ReviewServiceBuilder::new().build().await?;
    /// let snapshot = service
    ///     .apply_action(&ApplyAction {
    ///         plan_id: 1,
    ///         actor_id: "s-4".to_string(),
    ///         actor_name: "Sam Ortiz".to_string(),
    ///         role: Role::Supervisor,
    ///         action: ReviewAction::RequestChanges,
    ///         body: "Please add measurable targets".to_string(),
    ///     })
    ///     .await?;
    /// # Result::<(), appraise_core::WorkflowError>::Ok(())
    /// # };
    /// ```
    pub async fn apply_action(&self, params: &ApplyAction) -> Result<PlanSnapshot> {
        let params = params.clone();
        self.with_coordinator(move |coordinator| coordinator.apply_action(&params))
            .await
    }

    /// Current status, ledgers and approval records of a plan.
    pub async fn get_plan_snapshot(&self, params: &Id) -> Result<PlanSnapshot> {
        let plan_id = params.id;
        self.with_coordinator(move |coordinator| coordinator.get_plan_snapshot(plan_id))
            .await
    }
}
