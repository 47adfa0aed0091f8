//! Comment entry model.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{ReviewAction, Role};

/// One immutable remark in a plan's review history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommentEntry {
    /// Identity of the author
    pub author_id: String,

    /// Name shown next to the remark, supplied by the caller
    pub author_name: String,

    /// Role the author acted in when writing
    pub role: Role,

    /// The action this entry records
    pub action: ReviewAction,

    /// Free text; may be empty only for approvals
    pub body: String,

    /// Review round the entry was written in
    pub round: u32,

    /// Timestamp when the entry was written (UTC)
    pub created_at: Timestamp,
}
