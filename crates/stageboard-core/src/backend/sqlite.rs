//! SQLite-backed implementation of [`BoardBackend`].

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::task;

use super::BoardBackend;
use crate::{
    db::Database,
    error::{join_error, Result},
    models::{Item, ItemKind, Placement, Stage, StageId, StageOrder, StageType},
    params::{CreateItem, CreateStage},
};

/// Local system of record for boards.
///
/// Each call opens its own connection on the blocking pool, so the backend is
/// cheap to clone and share.
#[derive(Debug, Clone)]
pub struct SqliteBackend {
    db_path: PathBuf,
}

impl SqliteBackend {
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    /// Path of the underlying database file.
    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    /// Creates a stage at the end of its stage type.
    pub async fn create_stage(&self, params: &CreateStage) -> Result<Stage> {
        let (name, color) = params.validate()?;
        let db_path = self.db_path.clone();
        let project_id = params.project_id;
        let stage_type = params.stage_type;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.create_stage(project_id, &name, &color, stage_type)
        })
        .await
        .map_err(join_error)?
    }

    /// Creates an item, optionally already placed in a stage.
    pub async fn create_item(&self, params: &CreateItem) -> Result<Item> {
        let validated = params.validate()?;
        let db_path = self.db_path.clone();
        let project_id = params.project_id;
        let kind = params.kind;
        let stage_id = params.stage_id.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.create_item(project_id, kind, &validated, stage_id.as_ref())
        })
        .await
        .map_err(join_error)?
    }

    /// Retrieves a single stage by its ID.
    pub async fn get_stage(&self, stage_id: &StageId) -> Result<Option<Stage>> {
        let db_path = self.db_path.clone();
        let stage_id = stage_id.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_stage(&stage_id)
        })
        .await
        .map_err(join_error)?
    }

    /// Retrieves a single item by its ID.
    pub async fn get_item(&self, item_id: u64) -> Result<Option<Item>> {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_item(item_id)
        })
        .await
        .map_err(join_error)?
    }
}

#[async_trait]
impl BoardBackend for SqliteBackend {
    async fn fetch_items(&self, project_id: u64, kind: ItemKind) -> Result<Vec<Item>> {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_items(project_id, kind)
        })
        .await
        .map_err(join_error)?
    }

    async fn fetch_stages(&self, project_id: u64) -> Result<Vec<Stage>> {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_stages(project_id)
        })
        .await
        .map_err(join_error)?
    }

    async fn move_item(&self, kind: ItemKind, item_id: u64, target: &Placement) -> Result<Item> {
        let db_path = self.db_path.clone();
        let target = target.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.move_item(kind, item_id, &target)
        })
        .await
        .map_err(join_error)?
    }

    async fn reorder_stages(
        &self,
        project_id: u64,
        stage_type: StageType,
        orders: &[StageOrder],
    ) -> Result<Vec<Stage>> {
        let db_path = self.db_path.clone();
        let orders = orders.to_vec();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.reorder_stages(project_id, stage_type, &orders)
        })
        .await
        .map_err(join_error)?
    }
}
