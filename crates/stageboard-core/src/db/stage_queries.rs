//! Stage queries and the reorder transaction.

use std::collections::{HashMap, HashSet};

use jiff::Timestamp;
use rusqlite::{params, types::Type, Connection, OptionalExtension, Params};

use crate::{
    error::{BoardError, DatabaseResultExt, Result},
    models::{Stage, StageId, StageOrder, StageType},
};

const NEXT_STAGE_SEQ_SQL: &str = "SELECT COALESCE(MAX(rowid), 0) + 1 FROM stages";
const NEXT_STAGE_ORDER_SQL: &str =
    "SELECT COALESCE(MAX(stage_order), -1) + 1 FROM stages WHERE project_id = ?1 AND stage_type = ?2";
const INSERT_STAGE_SQL: &str = "INSERT INTO stages (id, project_id, name, color, stage_type, stage_order, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";
const SELECT_STAGES_BY_PROJECT_SQL: &str = "SELECT id, project_id, name, color, stage_order, stage_type, created_at, updated_at FROM stages WHERE project_id = ?1 ORDER BY stage_type, stage_order";
const SELECT_STAGES_BY_TYPE_SQL: &str = "SELECT id, project_id, name, color, stage_order, stage_type, created_at, updated_at FROM stages WHERE project_id = ?1 AND stage_type = ?2 ORDER BY stage_order";
pub(super) const SELECT_STAGE_BY_ID_SQL: &str = "SELECT id, project_id, name, color, stage_order, stage_type, created_at, updated_at FROM stages WHERE id = ?1";
const PARK_STAGE_ORDERS_SQL: &str =
    "UPDATE stages SET stage_order = -1 - stage_order WHERE project_id = ?1 AND stage_type = ?2";
const RESTORE_STAGE_ORDER_SQL: &str = "UPDATE stages SET stage_order = ?1 WHERE id = ?2";
const UPDATE_STAGE_ORDER_SQL: &str =
    "UPDATE stages SET stage_order = ?1, updated_at = ?2 WHERE id = ?3";

impl super::Database {
    /// Helper function to construct a Stage from a database row
    pub(super) fn build_stage_from_row(row: &rusqlite::Row) -> rusqlite::Result<Stage> {
        let stage_type_str: String = row.get(5)?;
        let stage_type = stage_type_str.parse::<StageType>().map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                5,
                Type::Text,
                format!("Invalid stage type: {stage_type_str}").into(),
            )
        })?;

        Ok(Stage {
            id: StageId(row.get(0)?),
            project_id: row.get::<_, i64>(1)? as u64,
            name: row.get(2)?,
            color: row.get(3)?,
            order: row.get::<_, i64>(4)? as u32,
            stage_type,
            created_at: row.get::<_, String>(6)?.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e))
            })?,
            updated_at: row.get::<_, String>(7)?.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(7, Type::Text, Box::new(e))
            })?,
        })
    }

    /// Creates a stage at the end of its stage type.
    ///
    /// Stage ids are generated as `<stage_type>-<n>`, e.g. `task-3`.
    pub fn create_stage(
        &mut self,
        project_id: u64,
        name: &str,
        color: &str,
        stage_type: StageType,
    ) -> Result<Stage> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let seq: i64 = tx
            .query_row(NEXT_STAGE_SEQ_SQL, [], |row| row.get(0))
            .db_context("Failed to allocate stage id")?;
        let id = StageId(format!("{}-{seq}", stage_type.as_str()));

        let next_order: i64 = tx
            .query_row(
                NEXT_STAGE_ORDER_SQL,
                params![project_id as i64, stage_type.as_str()],
                |row| row.get(0),
            )
            .db_context("Failed to get next stage order")?;

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(
            INSERT_STAGE_SQL,
            params![
                id.as_str(),
                project_id as i64,
                name,
                color,
                stage_type.as_str(),
                next_order,
                &now_str,
                &now_str
            ],
        )
        .db_context("Failed to insert stage")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Stage {
            id,
            project_id,
            name: name.into(),
            color: color.into(),
            order: next_order as u32,
            stage_type,
            created_at: now,
            updated_at: now,
        })
    }

    /// Retrieves every stage of a project, grouped by type and sorted by order.
    pub fn get_stages(&self, project_id: u64) -> Result<Vec<Stage>> {
        select_stages(
            &self.connection,
            SELECT_STAGES_BY_PROJECT_SQL,
            params![project_id as i64],
        )
    }

    /// Retrieves a single stage by its ID.
    pub fn get_stage(&self, stage_id: &StageId) -> Result<Option<Stage>> {
        self.connection
            .query_row(
                SELECT_STAGE_BY_ID_SQL,
                params![stage_id.as_str()],
                Self::build_stage_from_row,
            )
            .optional()
            .db_context("Failed to get stage")
    }

    /// Applies a complete `{stage_id, order}` set for one stage type and
    /// returns every stage of the project afterwards.
    ///
    /// The set must name each stage of the type exactly once and use the
    /// orders `0..n` exactly once. Only stages whose order actually changes
    /// get a new `updated_at`.
    pub fn reorder_stages(
        &mut self,
        project_id: u64,
        stage_type: StageType,
        orders: &[StageOrder],
    ) -> Result<Vec<Stage>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let current: HashMap<StageId, u32> = select_stages(
            &tx,
            SELECT_STAGES_BY_TYPE_SQL,
            params![project_id as i64, stage_type.as_str()],
        )?
        .into_iter()
        .map(|s| (s.id, s.order))
        .collect();

        for entry in orders {
            if !current.contains_key(&entry.stage_id) {
                let other = tx
                    .query_row(
                        SELECT_STAGE_BY_ID_SQL,
                        params![entry.stage_id.as_str()],
                        Self::build_stage_from_row,
                    )
                    .optional()
                    .db_context("Failed to get stage")?;
                return Err(match other {
                    Some(stage) if stage.project_id == project_id => {
                        BoardError::StageKindMismatch {
                            stage_id: stage.id,
                            expected: stage_type,
                            found: stage.stage_type,
                        }
                    }
                    _ => BoardError::StageNotFound {
                        id: entry.stage_id.clone(),
                    },
                });
            }
        }

        validate_complete_order_set(orders, current.len())?;

        tx.execute(
            PARK_STAGE_ORDERS_SQL,
            params![project_id as i64, stage_type.as_str()],
        )
        .db_context("Failed to park stage orders")?;

        let now_str = Timestamp::now().to_string();
        for entry in orders {
            let changed = current.get(&entry.stage_id) != Some(&entry.order);
            if changed {
                tx.execute(
                    UPDATE_STAGE_ORDER_SQL,
                    params![entry.order as i64, &now_str, entry.stage_id.as_str()],
                )
                .db_context("Failed to update stage order")?;
            } else {
                tx.execute(
                    RESTORE_STAGE_ORDER_SQL,
                    params![entry.order as i64, entry.stage_id.as_str()],
                )
                .db_context("Failed to restore stage order")?;
            }
        }

        let stages = select_stages(&tx, SELECT_STAGES_BY_PROJECT_SQL, params![project_id as i64])?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(stages)
    }
}

/// Runs a stage query and collects every row.
fn select_stages<P: Params>(connection: &Connection, sql: &str, params: P) -> Result<Vec<Stage>> {
    let mut stmt = connection.prepare(sql).db_context("Failed to prepare query")?;

    let stages = stmt
        .query_map(params, super::Database::build_stage_from_row)
        .db_context("Failed to query stages")?
        .collect::<std::result::Result<Vec<_>, _>>()
        .db_context("Failed to fetch stages")?;

    Ok(stages)
}

/// Checks that `orders` covers `expected` distinct stages with the orders
/// `0..expected`.
fn validate_complete_order_set(orders: &[StageOrder], expected: usize) -> Result<()> {
    if orders.len() != expected {
        return Err(BoardError::invalid_input("orders").with_reason(format!(
            "Expected {expected} stages, got {}",
            orders.len()
        )));
    }

    let mut seen_ids = HashSet::new();
    let mut seen_orders = HashSet::new();
    for entry in orders {
        if !seen_ids.insert(&entry.stage_id) {
            return Err(BoardError::invalid_input("orders")
                .with_reason(format!("Stage {} appears more than once", entry.stage_id)));
        }
        if entry.order as usize >= expected || !seen_orders.insert(entry.order) {
            return Err(BoardError::invalid_input("orders").with_reason(format!(
                "Orders must be 0..{expected} with no gaps or repeats"
            )));
        }
    }

    Ok(())
}
