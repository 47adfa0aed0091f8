//! Comment ledger persistence.
//!
//! Rows are only ever inserted. The schema's triggers abort any `UPDATE` or
//! `DELETE` on the comments table.

use rusqlite::{params, Connection, Row};

use super::{format_timestamp, parse_column};
use crate::{
    error::{DatabaseResultExt, Result, WorkflowError},
    models::{CommentEntry, Role},
    workflow::CommentLedger,
};

const SELECT_COMMENTS_SQL: &str = "SELECT author_id, author_name, role, action, body, round, created_at FROM comments WHERE plan_id = ?1 AND role = ?2 ORDER BY seq";
const INSERT_COMMENT_SQL: &str = "INSERT INTO comments (plan_id, role, seq, author_id, author_name, action, body, round, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";

impl super::Database {
    fn build_comment_from_row(row: &Row<'_>) -> rusqlite::Result<CommentEntry> {
        Ok(CommentEntry {
            author_id: row.get(0)?,
            author_name: row.get(1)?,
            role: parse_column(row, 2)?,
            action: parse_column(row, 3)?,
            body: row.get(4)?,
            round: row.get(5)?,
            created_at: parse_column(row, 6)?,
        })
    }

    fn read_role_comments(conn: &Connection, plan_id: u64, role: Role) -> Result<Vec<CommentEntry>> {
        let mut stmt = conn
            .prepare_cached(SELECT_COMMENTS_SQL)
            .db_context("Failed to prepare query")?;
        let comments: Vec<CommentEntry> = stmt
            .query_map(
                params![plan_id as i64, role.as_str()],
                Self::build_comment_from_row,
            )
            .db_context("Failed to query comments")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read comment rows")?;
        Ok(comments)
    }

    /// Loads both sequences of a plan's ledger in insertion order.
    pub(super) fn read_ledger(conn: &Connection, plan_id: u64) -> Result<CommentLedger> {
        Ok(CommentLedger::from_entries(
            Self::read_role_comments(conn, plan_id, Role::Supervisor)?,
            Self::read_role_comments(conn, plan_id, Role::Reviewer)?,
        ))
    }

    /// Inserts the entries of `ledger` that are not stored yet.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::LedgerRewrite` unless `ledger` starts with the
    /// stored history, entry for entry.
    pub(super) fn append_new_comments(
        conn: &Connection,
        plan_id: u64,
        ledger: &CommentLedger,
    ) -> Result<()> {
        let stored = Self::read_ledger(conn, plan_id)?;
        if !ledger.extends(&stored) {
            return Err(WorkflowError::LedgerRewrite { plan_id });
        }

        for role in Role::ALL {
            let entries = ledger.entries(role);
            for (seq, entry) in entries.iter().enumerate().skip(stored.len(role)) {
                conn.execute(
                    INSERT_COMMENT_SQL,
                    params![
                        plan_id as i64,
                        role.as_str(),
                        seq as i64,
                        entry.author_id,
                        entry.author_name,
                        entry.action.as_str(),
                        entry.body,
                        entry.round,
                        format_timestamp(entry.created_at),
                    ],
                )
                .db_context("Failed to insert comment")?;
            }
        }
        Ok(())
    }
}
