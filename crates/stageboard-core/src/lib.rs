//! Core library for stage-grouped project boards.
//!
//! A board shows the tasks, incidents or resource requests of a project
//! grouped into ordered stage columns. This crate groups items into columns,
//! turns drag gestures into move and reorder requests, and keeps the local
//! board in step with the backend's authoritative records.
//!
//! # Layout
//!
//! - [`models`]: stages, items and the [`models::Placement`] of an item
//! - [`board`]: the [`BoardController`], grouping, reordering helpers and the
//!   drag state machine
//! - [`backend`]: the [`BoardBackend`] seam and the SQLite implementation
//! - [`events`]: the [`EventBus`] boards and editors publish on
//! - [`display`]: markdown rendering for terminals
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use stageboard_core::{
//!     models::{ItemKind, StageType},
//!     params::{CreateItem, CreateStage},
//!     BoardController, StoreBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = StoreBuilder::new()
//!     .with_database_path(Some("board.db"))
//!     .build()
//!     .await?;
//!
//! let backlog = store
//!     .create_stage(&CreateStage {
//!         project_id: 1,
//!         name: "Backlog".to_string(),
//!         stage_type: StageType::Task,
//!         color: None,
//!     })
//!     .await?;
//! store
//!     .create_item(&CreateItem {
//!         project_id: 1,
//!         kind: ItemKind::Task,
//!         title: "Write release notes".to_string(),
//!         stage_id: Some(backlog.id.clone()),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! let controller = BoardController::builder(Arc::new(store)).load(1).await?;
//! println!("{}", controller.board(ItemKind::Task).await);
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod board;
pub mod db;
pub mod display;
pub mod error;
pub mod events;
pub mod models;
pub mod params;

// Re-export commonly used types
pub use backend::{BoardBackend, SqliteBackend, StoreBuilder};
pub use board::{
    Board, BoardController, BoardControllerBuilder, BucketOrder, DragSession, DropReport,
    MoveOutcome, Notification, Notifier, ReorderOutcome,
};
pub use db::Database;
pub use display::{CreateResult, LocalDateTime, MoveResult, ReorderResult, Stages};
pub use error::{BoardError, Result};
pub use events::{BoardEvent, EventBus};
pub use models::{Item, ItemKind, Placement, Priority, Stage, StageId, StageOrder, StageType};
pub use params::{CreateItem, CreateStage, MoveItem, ReorderStages};
