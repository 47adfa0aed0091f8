//! Append-only comment ledger.

use std::slice;

use crate::models::{CommentEntry, Role};

/// Role-partitioned review history of a single plan.
///
/// Entries are only ever appended. There is no way to edit, reorder or remove
/// an entry once it is in the ledger; a correction is a new comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentLedger {
    supervisor: Vec<CommentEntry>,
    reviewer: Vec<CommentEntry>,
}

impl CommentLedger {
    /// Rebuilds a ledger from persisted history, oldest entry first.
    pub fn from_entries(supervisor: Vec<CommentEntry>, reviewer: Vec<CommentEntry>) -> Self {
        Self {
            supervisor,
            reviewer,
        }
    }

    /// Appends `entry` to the tail of its role's sequence and returns that
    /// sequence.
    pub fn append(&mut self, entry: CommentEntry) -> &[CommentEntry] {
        let sequence = match entry.role {
            Role::Supervisor => &mut self.supervisor,
            Role::Reviewer => &mut self.reviewer,
        };
        sequence.push(entry);
        sequence
    }

    /// Both sequences, for audit display.
    pub fn read_all(&self) -> LedgerView<'_> {
        LedgerView {
            supervisor: &self.supervisor,
            reviewer: &self.reviewer,
        }
    }

    pub fn entries(&self, role: Role) -> &[CommentEntry] {
        match role {
            Role::Supervisor => &self.supervisor,
            Role::Reviewer => &self.reviewer,
        }
    }

    pub fn len(&self, role: Role) -> usize {
        self.entries(role).len()
    }

    pub fn is_empty(&self) -> bool {
        self.supervisor.is_empty() && self.reviewer.is_empty()
    }

    /// Whether this ledger is `earlier` with zero or more entries appended.
    pub fn extends(&self, earlier: &CommentLedger) -> bool {
        Role::ALL
            .into_iter()
            .all(|role| self.entries(role).starts_with(earlier.entries(role)))
    }
}

/// Borrowed view over both sequences of a ledger.
#[derive(Debug, Clone, Copy)]
pub struct LedgerView<'a> {
    supervisor: &'a [CommentEntry],
    reviewer: &'a [CommentEntry],
}

impl<'a> LedgerView<'a> {
    /// Supervisor entries in insertion order. The iterator can be cloned to
    /// walk the history again.
    pub fn supervisor(&self) -> slice::Iter<'a, CommentEntry> {
        self.supervisor.iter()
    }

    /// Reviewer entries in insertion order.
    pub fn reviewer(&self) -> slice::Iter<'a, CommentEntry> {
        self.reviewer.iter()
    }

    pub fn for_role(&self, role: Role) -> slice::Iter<'a, CommentEntry> {
        match role {
            Role::Supervisor => self.supervisor(),
            Role::Reviewer => self.reviewer(),
        }
    }
}
