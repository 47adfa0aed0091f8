//! Filter types for querying plans.

use super::{PlanStatus, Role};

/// Filter options for listing plans. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanFilter {
    /// Only plans in this status
    pub status: Option<PlanStatus>,

    /// Only plans authored by this employee
    pub employee_id: Option<String>,

    /// Only plans where this actor is the assigned supervisor
    pub supervisor_id: Option<String>,

    /// Only plans where this actor is the assigned reviewer
    pub reviewer_id: Option<String>,

    /// Only plans for this appraisal year
    pub year: Option<i16>,
}

impl PlanFilter {
    /// Plans awaiting action from `actor_id` in `role`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use appraise_core::models::{PlanFilter, PlanStatus, Role};
    ///
    /// let filter = PlanFilter::inbox("r-1", Role::Reviewer);
    /// assert_eq!(filter.reviewer_id.as_deref(), Some("r-1"));
    /// assert_eq!(filter.status, Some(PlanStatus::ReviewerAssessment));
    /// ```
    pub fn inbox(actor_id: impl Into<String>, role: Role) -> Self {
        match role {
            Role::Supervisor => Self {
                supervisor_id: Some(actor_id.into()),
                ..Default::default()
            },
            Role::Reviewer => Self {
                reviewer_id: Some(actor_id.into()),
                status: Some(PlanStatus::ReviewerAssessment),
                ..Default::default()
            },
        }
    }

    /// Whether `summary` passes every set criterion.
    pub fn matches(&self, summary: &super::PlanSummary) -> bool {
        self.status.is_none_or(|s| s == summary.status)
            && self
                .employee_id
                .as_deref()
                .is_none_or(|e| e == summary.employee_id)
            && self
                .supervisor_id
                .as_deref()
                .is_none_or(|s| s == summary.supervisor_id)
            && self
                .reviewer_id
                .as_deref()
                .is_none_or(|r| summary.reviewer_id.as_deref() == Some(r))
            && self.year.is_none_or(|y| y == summary.year)
    }
}
