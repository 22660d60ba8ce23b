//! Item queries and the move transaction.

use jiff::{civil::Date, Timestamp};
use rusqlite::{params, types::Type, Connection, OptionalExtension};

use crate::{
    error::{BoardError, DatabaseResultExt, Result},
    models::{Item, ItemKind, Placement, Priority, StageId},
    params::ValidatedItem,
};

use super::stage_queries::SELECT_STAGE_BY_ID_SQL;

const INSERT_ITEM_SQL: &str = "INSERT INTO items (project_id, kind, title, assignees, priority, due_date, stage_id, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";
const SELECT_ITEMS_BY_KIND_SQL: &str = "SELECT id, project_id, kind, title, assignees, priority, due_date, stage_id, created_at, updated_at FROM items WHERE project_id = ?1 AND kind = ?2 ORDER BY id";
const SELECT_ITEM_BY_ID_SQL: &str = "SELECT id, project_id, kind, title, assignees, priority, due_date, stage_id, created_at, updated_at FROM items WHERE id = ?1";
const UPDATE_ITEM_STAGE_SQL: &str = "UPDATE items SET stage_id = ?1, updated_at = ?2 WHERE id = ?3";

impl super::Database {
    /// Helper function to construct an Item from a database row
    fn build_item_from_row(row: &rusqlite::Row) -> rusqlite::Result<Item> {
        let kind_str: String = row.get(2)?;
        let kind = kind_str.parse::<ItemKind>().map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                2,
                Type::Text,
                format!("Invalid item kind: {kind_str}").into(),
            )
        })?;

        // Assignees are stored as a JSON array
        let assignees = row
            .get::<_, Option<String>>(4)?
            .map(|s| {
                serde_json::from_str::<Vec<String>>(&s).map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e))
                })
            })
            .transpose()?
            .unwrap_or_default();

        let priority = row
            .get::<_, Option<String>>(5)?
            .map(|p| {
                p.parse::<Priority>().map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(5, Type::Text, e.into())
                })
            })
            .transpose()?;

        let due_date = row
            .get::<_, Option<String>>(6)?
            .map(|d| {
                d.parse::<Date>().map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e))
                })
            })
            .transpose()?;

        Ok(Item {
            id: row.get::<_, i64>(0)? as u64,
            project_id: row.get::<_, i64>(1)? as u64,
            kind,
            title: row.get(3)?,
            assignees,
            priority,
            due_date,
            placement: row.get::<_, Option<String>>(7)?.map(StageId).into(),
            created_at: row.get::<_, String>(8)?.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(8, Type::Text, Box::new(e))
            })?,
            updated_at: row.get::<_, String>(9)?.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(9, Type::Text, Box::new(e))
            })?,
        })
    }

    /// Creates an item, optionally placing it in a stage of the matching type.
    pub fn create_item(
        &mut self,
        project_id: u64,
        kind: ItemKind,
        item: &ValidatedItem,
        stage_id: Option<&StageId>,
    ) -> Result<Item> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        if let Some(stage_id) = stage_id {
            check_stage_accepts(&tx, project_id, kind, stage_id)?;
        }

        let now = Timestamp::now();
        let now_str = now.to_string();

        let assignees_str = if item.assignees.is_empty() {
            None
        } else {
            Some(serde_json::to_string(&item.assignees)?)
        };

        tx.execute(
            INSERT_ITEM_SQL,
            params![
                project_id as i64,
                kind.as_str(),
                &item.title,
                assignees_str.as_deref(),
                item.priority.map(|p| p.as_str()),
                item.due_date.map(|d| d.to_string()),
                stage_id.map(StageId::as_str),
                &now_str,
                &now_str
            ],
        )
        .db_context("Failed to insert item")?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Item {
            id,
            project_id,
            kind,
            title: item.title.clone(),
            assignees: item.assignees.clone(),
            priority: item.priority,
            due_date: item.due_date,
            placement: stage_id.cloned().into(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Retrieves all items of one kind for a project, in creation order.
    pub fn get_items(&self, project_id: u64, kind: ItemKind) -> Result<Vec<Item>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_ITEMS_BY_KIND_SQL)
            .db_context("Failed to prepare query")?;

        let items = stmt
            .query_map(
                params![project_id as i64, kind.as_str()],
                Self::build_item_from_row,
            )
            .db_context("Failed to query items")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch items")?;

        Ok(items)
    }

    /// Retrieves a single item by its ID.
    pub fn get_item(&self, item_id: u64) -> Result<Option<Item>> {
        self.connection
            .query_row(
                SELECT_ITEM_BY_ID_SQL,
                params![item_id as i64],
                Self::build_item_from_row,
            )
            .optional()
            .db_context("Failed to get item")
    }

    /// Sets an item's stage and returns the stored record.
    ///
    /// The item must exist and be of `kind`; an assigned target must be a
    /// stage of the same project whose type matches the item kind.
    pub fn move_item(&mut self, kind: ItemKind, item_id: u64, target: &Placement) -> Result<Item> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let current = tx
            .query_row(
                SELECT_ITEM_BY_ID_SQL,
                params![item_id as i64],
                Self::build_item_from_row,
            )
            .optional()
            .db_context("Failed to get item")?
            .filter(|item| item.kind == kind)
            .ok_or(BoardError::ItemNotFound { kind, id: item_id })?;

        if let Placement::Assigned(stage_id) = target {
            check_stage_accepts(&tx, current.project_id, kind, stage_id)?;
        }

        let now_str = Timestamp::now().to_string();
        tx.execute(
            UPDATE_ITEM_STAGE_SQL,
            params![
                target.stage_id().map(StageId::as_str),
                &now_str,
                item_id as i64
            ],
        )
        .db_context("Failed to update item stage")?;

        let item = tx
            .query_row(
                SELECT_ITEM_BY_ID_SQL,
                params![item_id as i64],
                Self::build_item_from_row,
            )
            .db_context("Failed to reload item")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(item)
    }
}

/// Ensures `stage_id` is a stage of `project_id` that can hold items of
/// `kind`.
fn check_stage_accepts(
    connection: &Connection,
    project_id: u64,
    kind: ItemKind,
    stage_id: &StageId,
) -> Result<()> {
    let stage = connection
        .query_row(
            SELECT_STAGE_BY_ID_SQL,
            params![stage_id.as_str()],
            super::Database::build_stage_from_row,
        )
        .optional()
        .db_context("Failed to get stage")?
        .filter(|stage| stage.project_id == project_id)
        .ok_or_else(|| BoardError::StageNotFound {
            id: stage_id.clone(),
        })?;

    if stage.stage_type != kind.stage_type() {
        return Err(BoardError::StageKindMismatch {
            stage_id: stage.id,
            expected: kind.stage_type(),
            found: stage.stage_type,
        });
    }

    Ok(())
}
