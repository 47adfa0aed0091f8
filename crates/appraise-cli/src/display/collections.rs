//! Collection wrapper types for displaying groups of plans.

use std::fmt;

use appraise_core::models::PlanSummary;

use super::LocalDateTime;

/// Newtype wrapper for displaying plan summaries, one section per plan.
/// Handles empty collections gracefully.
pub struct PlanSummaries(pub Vec<PlanSummary>);

impl fmt::Display for PlanSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No plans found.");
        }
        for plan in &self.0 {
            writeln!(
                f,
                "## {} (ID: {}) [{}]",
                plan.title, plan.id, plan.status
            )?;
            writeln!(f)?;
            writeln!(f, "- **Employee**: {}", plan.employee_id)?;
            match &plan.reviewer_id {
                Some(reviewer) => writeln!(
                    f,
                    "- **Supervisor / Reviewer**: {} / {reviewer}",
                    plan.supervisor_id
                )?,
                None => writeln!(f, "- **Supervisor**: {}", plan.supervisor_id)?,
            }
            writeln!(f, "- **Year**: {}, round {}", plan.year, plan.round)?;
            writeln!(
                f,
                "- **Comments**: {} ({} supervisor, {} reviewer)",
                plan.total_comments(),
                plan.supervisor_comments,
                plan.reviewer_comments
            )?;
            writeln!(f, "- **Updated**: {}", LocalDateTime(&plan.updated_at))?;
            writeln!(f)?;
        }
        Ok(())
    }
}
