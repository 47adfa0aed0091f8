//! Approval record persistence.

use jiff::Timestamp;
use rusqlite::{params, Connection, OptionalExtension};

use super::format_timestamp;
use crate::{
    error::{DatabaseResultExt, Result},
    models::{ApprovalRecord, ApprovalState, Role},
    workflow::ApprovalTracker,
};

const INSERT_PENDING_APPROVAL_SQL: &str =
    "INSERT INTO approvals (plan_id, role, state, approved_at) VALUES (?1, ?2, 'pending', NULL)";
const SELECT_APPROVAL_SQL: &str =
    "SELECT state, approved_at FROM approvals WHERE plan_id = ?1 AND role = ?2";
const UPSERT_APPROVAL_SQL: &str = "INSERT INTO approvals (plan_id, role, state, approved_at) VALUES (?1, ?2, ?3, ?4) ON CONFLICT (plan_id, role) DO UPDATE SET state = excluded.state, approved_at = excluded.approved_at";

impl super::Database {
    pub(super) fn insert_pending_approvals(conn: &Connection, plan_id: u64) -> Result<()> {
        for role in Role::ALL {
            conn.execute(
                INSERT_PENDING_APPROVAL_SQL,
                params![plan_id as i64, role.as_str()],
            )
            .db_context("Failed to insert approval record")?;
        }
        Ok(())
    }

    fn read_approval(conn: &Connection, plan_id: u64, role: Role) -> Result<ApprovalRecord> {
        let record = conn
            .query_row(
                SELECT_APPROVAL_SQL,
                params![plan_id as i64, role.as_str()],
                |row| {
                    Ok(ApprovalRecord {
                        state: super::parse_column::<ApprovalState>(row, 0)?,
                        approved_at: row
                            .get::<_, Option<String>>(1)?
                            .map(|s| s.parse::<Timestamp>())
                            .transpose()
                            .map_err(|e| {
                                rusqlite::Error::FromSqlConversionFailure(
                                    1,
                                    rusqlite::types::Type::Text,
                                    Box::new(e),
                                )
                            })?,
                    })
                },
            )
            .optional()
            .db_context("Failed to query approval record")?;

        // Missing rows read as pending
        Ok(record.unwrap_or_default())
    }

    pub(super) fn read_approvals(conn: &Connection, plan_id: u64) -> Result<ApprovalTracker> {
        Ok(ApprovalTracker::from_records(
            Self::read_approval(conn, plan_id, Role::Supervisor)?,
            Self::read_approval(conn, plan_id, Role::Reviewer)?,
        ))
    }

    pub(super) fn write_approvals(
        conn: &Connection,
        plan_id: u64,
        approvals: &ApprovalTracker,
    ) -> Result<()> {
        for role in Role::ALL {
            let record = approvals.record(role);
            conn.execute(
                UPSERT_APPROVAL_SQL,
                params![
                    plan_id as i64,
                    role.as_str(),
                    record.state.as_str(),
                    record.approved_at.map(format_timestamp),
                ],
            )
            .db_context("Failed to write approval record")?;
        }
        Ok(())
    }
}
