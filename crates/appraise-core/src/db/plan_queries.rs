//! Plan row operations and queries.

use jiff::Timestamp;
use rusqlite::{params, Connection, OptionalExtension, Row, ToSql};

use super::{format_timestamp, parse_column};
use crate::{
    error::{DatabaseResultExt, Result, WorkflowError},
    models::{Plan, PlanFilter, PlanMetadata, PlanStatus, PlanSummary},
    params::CreatePlan,
    workflow::PlanRecord,
};

const INSERT_PLAN_SQL: &str = "INSERT INTO plans (employee_id, supervisor_id, reviewer_id, status, title, year, period_start, period_end, round, version, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 1, 0, ?9, ?9)";
const SELECT_PLAN_SQL: &str = "SELECT id, employee_id, supervisor_id, reviewer_id, status, title, year, period_start, period_end, round, version, created_at, updated_at FROM plans WHERE id = ?1";
const CHECK_PLAN_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM plans WHERE id = ?1)";
const UPDATE_PLAN_IF_VERSION_SQL: &str = "UPDATE plans SET status = ?1, round = ?2, updated_at = ?3, version = version + 1 WHERE id = ?4 AND version = ?5";

const PLAN_SUMMARY_COLUMNS: &str = "id, title, year, employee_id, supervisor_id, reviewer_id, status, round, updated_at, supervisor_comments, reviewer_comments";
const PLAN_SUMMARIES_VIEW: &str = "plan_summaries";

impl super::Database {
    fn build_plan_from_row(row: &Row<'_>) -> rusqlite::Result<Plan> {
        Ok(Plan {
            id: row.get::<_, i64>(0)? as u64,
            employee_id: row.get(1)?,
            supervisor_id: row.get(2)?,
            reviewer_id: row.get(3)?,
            status: parse_column::<PlanStatus>(row, 4)?,
            metadata: PlanMetadata {
                title: row.get(5)?,
                year: row.get(6)?,
                period_start: parse_column(row, 7)?,
                period_end: parse_column(row, 8)?,
            },
            round: row.get(9)?,
            version: row.get::<_, i64>(10)? as u64,
            created_at: parse_column::<Timestamp>(row, 11)?,
            updated_at: parse_column::<Timestamp>(row, 12)?,
        })
    }

    fn build_summary_from_row(row: &Row<'_>) -> rusqlite::Result<PlanSummary> {
        Ok(PlanSummary {
            id: row.get::<_, i64>(0)? as u64,
            title: row.get(1)?,
            year: row.get(2)?,
            employee_id: row.get(3)?,
            supervisor_id: row.get(4)?,
            reviewer_id: row.get(5)?,
            status: parse_column(row, 6)?,
            round: row.get(7)?,
            updated_at: parse_column(row, 8)?,
            supervisor_comments: row.get(9)?,
            reviewer_comments: row.get(10)?,
        })
    }

    /// Inserts a draft plan row and returns its ID.
    pub(super) fn insert_plan(conn: &Connection, params: &CreatePlan) -> Result<u64> {
        let now_str = format_timestamp(Timestamp::now());
        conn.execute(
            INSERT_PLAN_SQL,
            params![
                params.employee_id,
                params.supervisor_id,
                params.reviewer_id,
                PlanStatus::Draft.as_str(),
                params.title,
                params.year,
                params.period_start.to_string(),
                params.period_end.to_string(),
                &now_str,
            ],
        )
        .db_context("Failed to insert plan")?;

        Ok(conn.last_insert_rowid() as u64)
    }

    /// Loads a plan with its ledger and approval records.
    pub(super) fn read_record(conn: &Connection, plan_id: u64) -> Result<PlanRecord> {
        let plan = conn
            .query_row(
                SELECT_PLAN_SQL,
                params![plan_id as i64],
                Self::build_plan_from_row,
            )
            .optional()
            .db_context("Failed to query plan")?
            .ok_or(WorkflowError::NotFound { id: plan_id })?;

        let ledger = Self::read_ledger(conn, plan_id)?;
        let approvals = Self::read_approvals(conn, plan_id)?;
        Ok(PlanRecord::from_parts(plan, ledger, approvals))
    }

    /// Writes the mutable plan columns if the stored version still matches.
    /// Returns whether a row was updated.
    pub(super) fn update_plan_if_version(
        conn: &Connection,
        plan: &Plan,
        expected_version: u64,
    ) -> Result<bool> {
        let changed = conn
            .execute(
                UPDATE_PLAN_IF_VERSION_SQL,
                params![
                    plan.status.as_str(),
                    plan.round,
                    format_timestamp(plan.updated_at),
                    plan.id as i64,
                    expected_version as i64,
                ],
            )
            .db_context("Failed to update plan")?;
        Ok(changed == 1)
    }

    pub(super) fn ensure_plan_exists(conn: &Connection, plan_id: u64) -> Result<()> {
        let exists: bool = conn
            .query_row(CHECK_PLAN_EXISTS_SQL, params![plan_id as i64], |row| {
                row.get(0)
            })
            .db_context("Failed to check plan existence")?;
        if exists {
            Ok(())
        } else {
            Err(WorkflowError::NotFound { id: plan_id })
        }
    }

    /// Lists plan summaries matching the filter.
    pub(super) fn query_summaries(
        conn: &Connection,
        filter: &PlanFilter,
    ) -> Result<Vec<PlanSummary>> {
        let mut query = format!("SELECT {PLAN_SUMMARY_COLUMNS} FROM {PLAN_SUMMARIES_VIEW}");

        let mut conditions = Vec::new();
        let mut params_vec: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(status) = filter.status {
            conditions.push("status = ?");
            params_vec.push(Box::new(status.as_str()));
        }
        if let Some(ref employee_id) = filter.employee_id {
            conditions.push("employee_id = ?");
            params_vec.push(Box::new(employee_id.clone()));
        }
        if let Some(ref supervisor_id) = filter.supervisor_id {
            conditions.push("supervisor_id = ?");
            params_vec.push(Box::new(supervisor_id.clone()));
        }
        if let Some(ref reviewer_id) = filter.reviewer_id {
            conditions.push("reviewer_id = ?");
            params_vec.push(Box::new(reviewer_id.clone()));
        }
        if let Some(year) = filter.year {
            conditions.push("year = ?");
            params_vec.push(Box::new(year));
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }
        query.push_str(" ORDER BY updated_at DESC, id DESC");

        let mut stmt = conn.prepare(&query).db_context("Failed to prepare query")?;
        let params_refs: Vec<&dyn ToSql> = params_vec.iter().map(|b| &**b).collect();

        let summaries: Vec<PlanSummary> = stmt
            .query_map(&params_refs[..], Self::build_summary_from_row)
            .db_context("Failed to query plans")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read plan rows")?;
        Ok(summaries)
    }
}
