//! Plan lifecycle operations for the ReviewService.

use super::ReviewService;
use crate::{
    error::Result,
    models::{PlanFilter, PlanSnapshot, PlanSummary},
    params::{CreatePlan, ListPlans, SubmitPlan},
};

impl ReviewService {
    /// Creates a new plan in `draft` for the given employee and assignment.
    pub async fn create_plan(&self, params: &CreatePlan) -> Result<PlanSnapshot> {
        let params = params.clone();
        self.with_coordinator(move |coordinator| coordinator.create_plan(&params))
            .await
    }

    /// Submits a draft, or resubmits a plan that was sent back, on behalf of
    /// its employee.
    pub async fn submit_plan(&self, params: &SubmitPlan) -> Result<PlanSnapshot> {
        let params = params.clone();
        self.with_coordinator(move |coordinator| coordinator.submit_plan(&params))
            .await
    }

    /// Lists plan summaries, most recently updated first.
    pub async fn list_plans(&self, params: &ListPlans) -> Result<Vec<PlanSummary>> {
        let filter = PlanFilter::from(params);
        self.with_coordinator(move |coordinator| coordinator.list_plans(&filter))
            .await
    }
}
