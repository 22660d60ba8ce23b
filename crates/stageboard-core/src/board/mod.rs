//! Board controller: grouping, moving and reordering.
//!
//! [`BoardController`] keeps working copies of a project's stages and items
//! and is the only place that changes them. It never edits them
//! optimistically: a move or reorder is sent to the [`BoardBackend`] first
//! and the local copy is replaced with whatever the backend returns. A
//! failed request leaves the board exactly as it was and raises a
//! [`Notification`].
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   DragSession   │    │ BoardController │    │  BoardBackend   │
//! │  (gesture → a   │───▶│ (validate, gate │───▶│ (authoritative  │
//! │   DropAction)   │    │  per key, adopt)│◀───│    records)     │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!                                 │
//!                                 ▼
//!                     Board snapshots, EventBus, Notifier
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: configuration and initial load
//! - [`grouping`]: [`group_by_stage`] and the [`Board`] snapshot
//! - [`reorder`]: [`move_stage`], [`renumber`] and [`InsertSide`]
//! - [`drag`]: the [`DragSession`] state machine
//! - [`inflight`]: per-key sequencing of requests
//! - [`notify`]: the [`Notifier`] seam
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use stageboard_core::{
//!     board::{BoardController, MoveOutcome},
//!     models::{ItemKind, Placement},
//!     params::MoveItem,
//!     StoreBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = StoreBuilder::new().build().await?;
//! let controller = BoardController::builder(Arc::new(backend)).load(1).await?;
//!
//! let outcome = controller
//!     .move_item(&MoveItem {
//!         kind: ItemKind::Task,
//!         item_id: 4,
//!         target: Placement::assigned("task-2"),
//!     })
//!     .await?;
//! if let MoveOutcome::Applied(item) = outcome {
//!     println!("{item}");
//! }
//! # Ok(())
//! # }
//! ```

use std::{collections::HashMap, sync::Arc};

use jiff::Timestamp;
use tokio::sync::Mutex;

use crate::{
    backend::BoardBackend,
    error::{BoardError, Result},
    events::{BoardEvent, EventBus},
    models::{Item, ItemKind, Stage, StageId, StageType},
};

pub mod builder;
pub mod drag;
pub mod grouping;
pub mod inflight;
mod item_ops;
pub mod notify;
pub mod reorder;
mod stage_ops;

pub use builder::BoardControllerBuilder;
pub use drag::{DragOutcome, DragPayload, DragSession, DropAction, DropTarget, HoverIndicator};
pub use grouping::{group_by_stage, Board, BucketOrder, Column};
pub use inflight::{InFlight, Ticket};
pub use notify::{LogNotifier, Notification, NotificationLevel, Notifier};
pub use reorder::{move_stage, renumber, InsertSide};

/// Result of a move request.
#[derive(Debug, Clone, PartialEq)]
pub enum MoveOutcome {
    /// The backend accepted the move; this is the stored item
    Applied(Item),
    /// The item was already there, nothing was sent
    Unchanged,
    /// A newer move for the same item was issued while this one waited
    Superseded,
}

/// Result of a reorder request.
#[derive(Debug, Clone, PartialEq)]
pub enum ReorderOutcome {
    /// The backend accepted the order; stages of the reordered type
    Applied(Vec<Stage>),
    /// Every stage already had its requested order, nothing was sent
    Unchanged,
    /// A newer reorder for the same stage type was issued while this one waited
    Superseded,
}

/// What happened to a drop handed to [`BoardController::apply_drop`].
#[derive(Debug, Clone, PartialEq)]
pub enum DropReport {
    Moved(Item),
    Reordered(Vec<Stage>),
    Unchanged,
    Superseded,
    /// The drop did not make sense against the current board
    Ignored,
    /// The backend refused or could not be reached; carries the message the
    /// user was shown
    Failed(String),
}

#[derive(Debug, Default)]
struct BoardState {
    stages: Vec<Stage>,
    items: HashMap<ItemKind, Vec<Item>>,
}

impl BoardState {
    fn items(&self, kind: ItemKind) -> &[Item] {
        self.items.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    fn item(&self, kind: ItemKind, item_id: u64) -> Option<&Item> {
        self.items(kind).iter().find(|item| item.id == item_id)
    }

    fn stage(&self, stage_id: &StageId) -> Option<&Stage> {
        self.stages.iter().find(|stage| &stage.id == stage_id)
    }

    fn stages_of(&self, stage_type: StageType) -> Vec<Stage> {
        let mut stages: Vec<Stage> = self
            .stages
            .iter()
            .filter(|stage| stage.stage_type == stage_type)
            .cloned()
            .collect();
        stages.sort_by_key(|stage| stage.order);
        stages
    }

    fn ordered_stage_ids(&self, stage_type: StageType) -> Vec<StageId> {
        self.stages_of(stage_type).into_iter().map(|stage| stage.id).collect()
    }

    /// Replaces the stored copy of `item` in place. Returns false when the
    /// item is not on the board.
    fn replace_item(&mut self, item: Item) -> bool {
        let slot = self
            .items
            .get_mut(&item.kind)
            .and_then(|items| items.iter_mut().find(|existing| existing.id == item.id));

        match slot {
            Some(existing) => {
                *existing = item;
                true
            }
            None => false,
        }
    }
}

/// Owner of one project's board state.
pub struct BoardController {
    project_id: u64,
    backend: Arc<dyn BoardBackend>,
    notifier: Arc<dyn Notifier>,
    events: Option<EventBus>,
    bucket_order: BucketOrder,
    state: Mutex<BoardState>,
    moves: InFlight<(ItemKind, u64)>,
    reorders: InFlight<StageType>,
}

impl BoardController {
    /// Starts configuring a controller on top of `backend`.
    pub fn builder(backend: Arc<dyn BoardBackend>) -> BoardControllerBuilder {
        BoardControllerBuilder::new(backend)
    }

    pub fn project_id(&self) -> u64 {
        self.project_id
    }

    pub fn bucket_order(&self) -> BucketOrder {
        self.bucket_order
    }

    /// Items of `kind` grouped into the current stage columns.
    pub async fn board(&self, kind: ItemKind) -> Board {
        let state = self.state.lock().await;
        group_by_stage(state.items(kind), &state.stages, kind, self.bucket_order)
    }

    /// Stages of one type in ascending order.
    pub async fn stages(&self, stage_type: StageType) -> Vec<Stage> {
        self.state.lock().await.stages_of(stage_type)
    }

    /// Items of one kind in backend order.
    pub async fn items(&self, kind: ItemKind) -> Vec<Item> {
        self.state.lock().await.items(kind).to_vec()
    }

    pub async fn item(&self, kind: ItemKind, item_id: u64) -> Option<Item> {
        self.state.lock().await.item(kind, item_id).cloned()
    }

    /// Re-fetches every stage and item and replaces the local copies.
    ///
    /// On failure the local copies are kept and the user is notified.
    pub async fn refresh(&self) -> Result<()> {
        let fetched = self.fetch_all().await;

        match fetched {
            Ok(fresh) => {
                log::debug!(
                    "Refreshed project {}: {} stage(s), {} item(s)",
                    self.project_id,
                    fresh.stages.len(),
                    fresh.items.values().map(Vec::len).sum::<usize>()
                );
                *self.state.lock().await = fresh;
                Ok(())
            }
            Err(e) => {
                self.report(&e);
                Err(e)
            }
        }
    }

    /// Re-fetches the items of one kind.
    pub async fn refresh_items(&self, kind: ItemKind) -> Result<()> {
        match self.backend.fetch_items(self.project_id, kind).await {
            Ok(items) => {
                self.state.lock().await.items.insert(kind, items);
                Ok(())
            }
            Err(e) => {
                self.report(&e);
                Err(e)
            }
        }
    }

    /// Re-fetches the stages.
    pub async fn refresh_stages(&self) -> Result<()> {
        match self.backend.fetch_stages(self.project_id).await {
            Ok(stages) => {
                self.state.lock().await.stages = stages;
                Ok(())
            }
            Err(e) => {
                self.report(&e);
                Err(e)
            }
        }
    }

    /// Reacts to an event from the bus. Returns whether the event concerned
    /// this board.
    ///
    /// Moves and reorders carry the authoritative records and are adopted
    /// when they are at least as recent as the local copy. For a reorder
    /// that means the newest stage update of the reordered type. Change
    /// notices trigger a re-fetch.
    pub async fn handle_event(&self, event: &BoardEvent) -> Result<bool> {
        if event.project_id() != self.project_id {
            return Ok(false);
        }

        match event {
            BoardEvent::ItemMoved { item, .. } => {
                let mut state = self.state.lock().await;
                let newer = state
                    .item(item.kind, item.id)
                    .is_some_and(|current| current.updated_at <= item.updated_at);
                if newer {
                    state.replace_item(item.clone());
                }
            }
            BoardEvent::StagesReordered {
                stage_type, stages, ..
            } => {
                let mut state = self.state.lock().await;
                let incoming = latest_update(stages, *stage_type);
                if incoming >= latest_update(&state.stages, *stage_type) {
                    state.stages.retain(|stage| stage.stage_type != *stage_type);
                    state.stages.extend(
                        stages
                            .iter()
                            .filter(|stage| stage.stage_type == *stage_type)
                            .cloned(),
                    );
                } else {
                    log::debug!("Ignoring stale reorder of {stage_type:?} stages");
                }
            }
            BoardEvent::ItemsChanged { kind, .. } => self.refresh_items(*kind).await?,
            BoardEvent::StagesChanged { .. } => self.refresh_stages().await?,
        }

        Ok(true)
    }

    /// Executes the action of a valid drop.
    ///
    /// A drop that does not fit the current board is ignored without a
    /// message. A backend failure has already been shown to the user and is
    /// reported as [`DropReport::Failed`].
    pub async fn apply_drop(&self, action: DropAction) -> DropReport {
        match action {
            DropAction::MoveItem(params) => {
                if let Err(e) = self
                    .check_move(params.kind, params.item_id, &params.target)
                    .await
                {
                    log::debug!("Ignoring item drop: {e}");
                    return DropReport::Ignored;
                }

                match self.move_item(&params).await {
                    Ok(MoveOutcome::Applied(item)) => DropReport::Moved(item),
                    Ok(MoveOutcome::Unchanged) => DropReport::Unchanged,
                    Ok(MoveOutcome::Superseded) => DropReport::Superseded,
                    Err(e) => DropReport::Failed(e.user_message()),
                }
            }
            DropAction::MoveStage {
                stage_type,
                stage_id,
                target,
                side,
            } => {
                let params = match self
                    .plan_stage_move(stage_type, &stage_id, &target, side)
                    .await
                {
                    Ok(params) => params,
                    Err(e) => {
                        log::debug!("Ignoring stage drop: {e}");
                        return DropReport::Ignored;
                    }
                };

                match self.reorder_stages(&params).await {
                    Ok(ReorderOutcome::Applied(stages)) => DropReport::Reordered(stages),
                    Ok(ReorderOutcome::Unchanged) => DropReport::Unchanged,
                    Ok(ReorderOutcome::Superseded) => DropReport::Superseded,
                    Err(e) => DropReport::Failed(e.user_message()),
                }
            }
        }
    }

    async fn fetch_all(&self) -> Result<BoardState> {
        let stages = self.backend.fetch_stages(self.project_id).await?;

        let mut items = HashMap::new();
        for kind in ItemKind::all() {
            items.insert(kind, self.backend.fetch_items(self.project_id, kind).await?);
        }

        Ok(BoardState { stages, items })
    }

    /// Shows a backend failure to the user.
    fn report(&self, error: &BoardError) {
        log::warn!("Board request for project {} failed: {error}", self.project_id);
        self.notifier.notify(&Notification::error(error.user_message()));
    }

    fn publish(&self, event: BoardEvent) {
        if let Some(events) = &self.events {
            events.publish(event);
        }
    }
}

/// Most recent `updated_at` among the stages of one type.
fn latest_update(stages: &[Stage], stage_type: StageType) -> Option<Timestamp> {
    stages
        .iter()
        .filter(|stage| stage.stage_type == stage_type)
        .map(|stage| stage.updated_at)
        .max()
}
