//! Approval record model.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::ApprovalState;

/// Approval status of one review role on a plan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ApprovalRecord {
    pub state: ApprovalState,

    /// Set only while `state` is approved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<Timestamp>,
}

impl ApprovalRecord {
    pub fn is_approved(&self) -> bool {
        self.state == ApprovalState::Approved
    }
}
