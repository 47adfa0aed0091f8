//! Plan summary types and functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Plan, PlanStatus};

/// Summary information about a plan with comment statistics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanSummary {
    /// Plan ID
    pub id: u64,
    /// Title of the plan
    pub title: String,
    /// Appraisal year
    pub year: i16,
    /// Employee who owns the plan
    pub employee_id: String,
    /// Assigned supervisor
    pub supervisor_id: String,
    /// Assigned final reviewer
    pub reviewer_id: Option<String>,
    /// Plan status
    pub status: PlanStatus,
    /// Current review round
    pub round: u32,
    /// Number of supervisor ledger entries
    pub supervisor_comments: u32,
    /// Number of reviewer ledger entries
    pub reviewer_comments: u32,
    /// Last update timestamp
    pub updated_at: Timestamp,
}

impl PlanSummary {
    /// Create a PlanSummary from a Plan and ledger sizes
    pub fn from_plan(plan: &Plan, supervisor_comments: u32, reviewer_comments: u32) -> Self {
        Self {
            id: plan.id,
            title: plan.metadata.title.clone(),
            year: plan.metadata.year,
            employee_id: plan.employee_id.clone(),
            supervisor_id: plan.supervisor_id.clone(),
            reviewer_id: plan.reviewer_id.clone(),
            status: plan.status,
            round: plan.round,
            supervisor_comments,
            reviewer_comments,
            updated_at: plan.updated_at,
        }
    }

    /// Total number of remarks across both ledgers.
    pub fn total_comments(&self) -> u32 {
        self.supervisor_comments + self.reviewer_comments
    }
}
