//! Markdown view of a single plan.

use std::fmt;

use appraise_core::{
    models::{ApprovalRecord, CommentEntry, PlanSnapshot, Role},
    workflow::{machine, GuardContext},
};

use super::LocalDateTime;

/// Renders a [`PlanSnapshot`]: assignment and approval state, then each
/// role's ledger in recorded order.
///
/// When `viewer` is set, the actions that identity may currently take are
/// listed under the header.
pub struct SnapshotView<'a> {
    pub snapshot: &'a PlanSnapshot,
    pub viewer: Option<&'a str>,
}

impl<'a> SnapshotView<'a> {
    pub fn new(snapshot: &'a PlanSnapshot) -> Self {
        Self {
            snapshot,
            viewer: None,
        }
    }

    pub fn for_viewer(mut self, viewer: Option<&'a str>) -> Self {
        self.viewer = viewer;
        self
    }

    fn fmt_assignee(
        f: &mut fmt::Formatter<'_>,
        label: &str,
        assignee: &str,
        approval: &ApprovalRecord,
    ) -> fmt::Result {
        write!(f, "- **{label}**: {assignee} ({}", approval.state.as_str())?;
        if let Some(at) = &approval.approved_at {
            write!(f, " {}", LocalDateTime(at))?;
        }
        writeln!(f, ")")
    }

    fn fmt_ledger(f: &mut fmt::Formatter<'_>, title: &str, entries: &[CommentEntry]) -> fmt::Result {
        writeln!(f, "## {title}")?;
        writeln!(f)?;
        if entries.is_empty() {
            writeln!(f, "No comments yet.")?;
            return writeln!(f);
        }
        for (index, entry) in entries.iter().enumerate() {
            writeln!(
                f,
                "### {}. {} ({}), {}, round {}",
                index + 1,
                entry.author_name,
                entry.author_id,
                entry.action.as_str(),
                entry.round
            )?;
            writeln!(f)?;
            writeln!(f, "*{}*", LocalDateTime(&entry.created_at))?;
            writeln!(f)?;
            if !entry.body.is_empty() {
                writeln!(f, "{}", entry.body)?;
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for SnapshotView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plan = &self.snapshot.plan;
        writeln!(f, "# {}. {}", plan.id, plan.metadata.title)?;
        writeln!(f)?;

        writeln!(f, "- **Status**: {}", plan.status)?;
        writeln!(f, "- **Employee**: {}", plan.employee_id)?;
        Self::fmt_assignee(
            f,
            "Supervisor",
            &plan.supervisor_id,
            &self.snapshot.supervisor_approval,
        )?;
        match &plan.reviewer_id {
            Some(reviewer) => {
                Self::fmt_assignee(f, "Reviewer", reviewer, &self.snapshot.reviewer_approval)?
            }
            None => writeln!(f, "- **Reviewer**: none")?,
        }
        writeln!(
            f,
            "- **Period**: {} to {} ({})",
            plan.metadata.period_start, plan.metadata.period_end, plan.metadata.year
        )?;
        writeln!(f, "- **Round**: {}", plan.round)?;
        writeln!(f, "- **Created**: {}", LocalDateTime(&plan.created_at))?;
        writeln!(f, "- **Updated**: {}", LocalDateTime(&plan.updated_at))?;

        if let Some(viewer) = self.viewer {
            let ctx = GuardContext::new(plan, self.snapshot.supervisor_approval.is_approved());
            for role in Role::ALL {
                if plan.assignee(role) != Some(viewer) {
                    continue;
                }
                let actions: Vec<&str> = machine::allowed_actions(&ctx, role)
                    .into_iter()
                    .map(|action| action.as_str())
                    .collect();
                if actions.is_empty() {
                    writeln!(f, "- **Your actions as {role}**: none")?;
                } else {
                    writeln!(f, "- **Your actions as {role}**: {}", actions.join(", "))?;
                }
            }
        }
        writeln!(f)?;

        Self::fmt_ledger(f, "Supervisor comments", &self.snapshot.supervisor_comments)?;
        Self::fmt_ledger(f, "Reviewer comments", &self.snapshot.reviewer_comments)
    }
}
