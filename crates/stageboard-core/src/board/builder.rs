//! Builder for creating and configuring BoardController instances.

use std::sync::Arc;

use tokio::sync::Mutex;

use super::{BoardController, BoardState, BucketOrder, InFlight, LogNotifier, Notifier};
use crate::{backend::BoardBackend, error::Result, events::EventBus};

/// Builder for creating and configuring [`BoardController`] instances.
pub struct BoardControllerBuilder {
    backend: Arc<dyn BoardBackend>,
    notifier: Arc<dyn Notifier>,
    events: Option<EventBus>,
    bucket_order: BucketOrder,
}

impl BoardControllerBuilder {
    /// Creates a builder with insertion ordering, log notifications and no
    /// event bus.
    pub fn new(backend: Arc<dyn BoardBackend>) -> Self {
        Self {
            backend,
            notifier: Arc::new(LogNotifier),
            events: None,
            bucket_order: BucketOrder::default(),
        }
    }

    /// Sets how items are ordered inside each column.
    pub fn with_bucket_order(mut self, order: BucketOrder) -> Self {
        self.bucket_order = order;
        self
    }

    /// Sets where failure messages are shown.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Publishes applied moves and reorders on `events`.
    pub fn with_event_bus(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    /// Builds an empty controller for a project without fetching anything.
    pub fn build(self, project_id: u64) -> BoardController {
        BoardController {
            project_id,
            backend: self.backend,
            notifier: self.notifier,
            events: self.events,
            bucket_order: self.bucket_order,
            state: Mutex::new(BoardState::default()),
            moves: InFlight::new(),
            reorders: InFlight::new(),
        }
    }

    /// Builds a controller and performs the initial fetch.
    ///
    /// # Errors
    ///
    /// Returns the backend error when stages or items cannot be fetched
    pub async fn load(self, project_id: u64) -> Result<BoardController> {
        let controller = self.build(project_id);
        controller.refresh().await?;
        Ok(controller)
    }
}
