//! The collaborator a board talks to.
//!
//! [`BoardBackend`] is the system of record for stages and items. The board
//! controller never persists anything itself: it sends move and reorder
//! requests through this trait and adopts whatever the backend returns.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │ BoardController │───▶│  BoardBackend   │───▶│ SQLite / HTTP / │
//! │  (local copies) │◀───│    (trait)      │◀───│  test doubles   │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! [`SqliteBackend`] is the reference implementation used by the CLI.

use async_trait::async_trait;

use crate::{
    error::Result,
    models::{Item, ItemKind, Placement, Stage, StageOrder, StageType},
};

pub mod builder;
pub mod sqlite;

pub use builder::StoreBuilder;
pub use sqlite::SqliteBackend;

/// Operations a board consumes from its system of record.
#[async_trait]
pub trait BoardBackend: Send + Sync {
    /// Fetch all items of one kind for a project, in the backend's order.
    async fn fetch_items(&self, project_id: u64, kind: ItemKind) -> Result<Vec<Item>>;

    /// Fetch every stage of a project, all stage types included.
    async fn fetch_stages(&self, project_id: u64) -> Result<Vec<Stage>>;

    /// Persist a new placement for an item and return the stored item.
    async fn move_item(&self, kind: ItemKind, item_id: u64, target: &Placement) -> Result<Item>;

    /// Persist a complete order set for one stage type and return every stage
    /// of the project afterwards.
    async fn reorder_stages(
        &self,
        project_id: u64,
        stage_type: StageType,
        orders: &[StageOrder],
    ) -> Result<Vec<Stage>>;
}
