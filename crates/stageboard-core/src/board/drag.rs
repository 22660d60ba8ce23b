//! Drag-and-drop gesture state.
//!
//! A [`DragSession`] tracks one gesture from pick-up to release and turns a
//! compatible drop into a [`DropAction`] for the controller. It knows nothing
//! about pointers or widgets; hosts feed it payloads and targets.
//!
//! ```text
//!   Idle ──start──▶ Dragging ──drop(valid)────▶ DroppedValid   ─┐
//!                      │     ──drop(invalid)──▶ DroppedInvalid ─┼─▶ Idle
//!                      └─────cancel──────────▶ Cancelled      ─┘
//! ```

use serde::{Deserialize, Serialize};

use super::reorder::InsertSide;
use crate::{
    models::{ItemKind, Placement, StageId, StageType},
    params::MoveItem,
};

/// What is being dragged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DragPayload {
    /// An item card
    Item { kind: ItemKind, item_id: u64 },
    /// A stage header
    Stage {
        stage_type: StageType,
        stage_id: StageId,
    },
}

/// Where the pointer is when hovering or releasing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DropTarget {
    /// The body of a column, or the unassigned bucket
    Column {
        stage_type: StageType,
        placement: Placement,
    },
    /// A stage header, with the side the pointer is on
    Header {
        stage_type: StageType,
        stage_id: StageId,
        side: InsertSide,
    },
}

/// Transient visual hint for the current hover position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoverIndicator {
    /// Highlight the whole bucket
    Column(Placement),
    /// Show an insertion bar on one side of a header
    Header { stage_id: StageId, side: InsertSide },
}

/// A change the controller should attempt after a valid drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropAction {
    MoveItem(MoveItem),
    MoveStage {
        stage_type: StageType,
        stage_id: StageId,
        target: StageId,
        side: InsertSide,
    },
}

/// How a gesture ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    DroppedValid(DropAction),
    DroppedInvalid,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum DragState {
    #[default]
    Idle,
    Dragging(DragPayload),
}

/// State machine for a single drag gesture.
#[derive(Debug, Default)]
pub struct DragSession {
    state: DragState,
    hover: Option<HoverIndicator>,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Payload of the gesture in progress.
    pub fn payload(&self) -> Option<&DragPayload> {
        match &self.state {
            DragState::Dragging(payload) => Some(payload),
            DragState::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Current hover hint, if any.
    pub fn hover_indicator(&self) -> Option<&HoverIndicator> {
        self.hover.as_ref()
    }

    /// Picks up a payload. Starting again mid-gesture replaces the payload.
    pub fn start(&mut self, payload: DragPayload) {
        log::debug!("Drag started: {payload:?}");
        self.state = DragState::Dragging(payload);
        self.hover = None;
    }

    /// Updates the hover hint. Returns whether the target would accept the
    /// payload; incompatible targets clear the hint.
    pub fn hover(&mut self, target: &DropTarget) -> bool {
        let accepted = self
            .payload()
            .and_then(|payload| resolve(payload, target))
            .is_some();

        self.hover = if accepted {
            Some(match target {
                DropTarget::Column { placement, .. } => HoverIndicator::Column(placement.clone()),
                DropTarget::Header { stage_id, side, .. } => HoverIndicator::Header {
                    stage_id: stage_id.clone(),
                    side: *side,
                },
            })
        } else {
            None
        };

        accepted
    }

    /// Pointer left every target.
    pub fn leave(&mut self) {
        self.hover = None;
    }

    /// Releases the payload over `target`, or outside any target when `None`.
    pub fn drop(&mut self, target: Option<&DropTarget>) -> DragOutcome {
        let state = self.finish();

        let action = match (&state, target) {
            (DragState::Dragging(payload), Some(target)) => resolve(payload, target),
            _ => None,
        };

        match action {
            Some(action) => DragOutcome::DroppedValid(action),
            None => {
                log::debug!("Drop ignored: {target:?}");
                DragOutcome::DroppedInvalid
            }
        }
    }

    /// Abandons the gesture.
    pub fn cancel(&mut self) -> DragOutcome {
        self.finish();
        DragOutcome::Cancelled
    }

    fn finish(&mut self) -> DragState {
        self.hover = None;
        std::mem::take(&mut self.state)
    }
}

/// The action a payload released over a target stands for, if compatible.
fn resolve(payload: &DragPayload, target: &DropTarget) -> Option<DropAction> {
    match (payload, target) {
        (
            DragPayload::Item { kind, item_id },
            DropTarget::Column {
                stage_type,
                placement,
            },
        ) if kind.stage_type() == *stage_type => Some(DropAction::MoveItem(MoveItem {
            kind: *kind,
            item_id: *item_id,
            target: placement.clone(),
        })),
        (
            DragPayload::Stage {
                stage_type,
                stage_id,
            },
            DropTarget::Header {
                stage_type: target_type,
                stage_id: target,
                side,
            },
        ) if stage_type == target_type && stage_id != target => Some(DropAction::MoveStage {
            stage_type: *stage_type,
            stage_id: stage_id.clone(),
            target: target.clone(),
            side: *side,
        }),
        _ => None,
    }
}
