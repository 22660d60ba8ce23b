//! Publish/subscribe notifications between boards and their collaborators.
//!
//! A controller publishes after every change it applies; screens that
//! create or edit records publish `ItemsChanged` / `StagesChanged` so open
//! boards can refresh. Publishing never blocks and never fails: with no
//! subscribers the event is dropped.

use serde::Serialize;
use tokio::sync::broadcast;

use crate::models::{Item, ItemKind, Stage, StageType};

/// Default broadcast channel capacity
const DEFAULT_CAPACITY: usize = 64;

/// Something on a project board changed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BoardEvent {
    /// An item was moved and the backend returned this record
    ItemMoved { project_id: u64, item: Item },
    /// Stages of one type were reordered; `stages` is the full project list
    StagesReordered {
        project_id: u64,
        stage_type: StageType,
        stages: Vec<Stage>,
    },
    /// Items of a kind were created or edited elsewhere
    ItemsChanged { project_id: u64, kind: ItemKind },
    /// Stages were created or edited elsewhere
    StagesChanged { project_id: u64 },
}

impl BoardEvent {
    pub fn project_id(&self) -> u64 {
        match self {
            BoardEvent::ItemMoved { project_id, .. }
            | BoardEvent::StagesReordered { project_id, .. }
            | BoardEvent::ItemsChanged { project_id, .. }
            | BoardEvent::StagesChanged { project_id } => *project_id,
        }
    }
}

/// Event bus backed by `tokio::sync::broadcast`.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<BoardEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BoardEvent> {
        self.sender.subscribe()
    }

    /// Number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Sends an event to every current subscriber.
    pub fn publish(&self, event: BoardEvent) {
        let project_id = event.project_id();
        if let Ok(n) = self.sender.send(event) {
            log::debug!("Board event for project {project_id} sent to {n} subscriber(s)");
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
