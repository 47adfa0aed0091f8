//! Per-role approval tracking.

use jiff::Timestamp;

use crate::models::{ApprovalRecord, ApprovalState, ReviewAction, Role};

/// Supervisor and reviewer approval records of a single plan.
///
/// The tracker is the only writer of approval state. It does not check
/// whether a write is legal; the state machine guard has already done so by
/// the time the coordinator calls in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApprovalTracker {
    supervisor: ApprovalRecord,
    reviewer: ApprovalRecord,
}

impl ApprovalTracker {
    /// Rebuilds a tracker from persisted records.
    pub fn from_records(supervisor: ApprovalRecord, reviewer: ApprovalRecord) -> Self {
        Self {
            supervisor,
            reviewer,
        }
    }

    pub fn record(&self, role: Role) -> ApprovalRecord {
        match role {
            Role::Supervisor => self.supervisor,
            Role::Reviewer => self.reviewer,
        }
    }

    /// Applies the approval state implied by `action` to `role`'s record.
    /// Comments carry no approval state and leave the record untouched.
    pub fn record_approval(&mut self, role: Role, action: ReviewAction, at: Timestamp) {
        let Some(state) = action.approval_state() else {
            return;
        };
        let record = match role {
            Role::Supervisor => &mut self.supervisor,
            Role::Reviewer => &mut self.reviewer,
        };
        *record = ApprovalRecord {
            state,
            approved_at: (state == ApprovalState::Approved).then_some(at),
        };
    }

    /// True iff the supervisor has approved.
    pub fn is_eligible_for_reviewer_stage(&self) -> bool {
        self.supervisor.is_approved()
    }

    /// Puts both records back to pending for a new review round.
    pub fn reset_for_resubmission(&mut self) {
        *self = Self::default();
    }
}
