#![allow(dead_code)]

use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use jiff::Timestamp;
use stageboard_core::{
    board::{Notification, Notifier},
    BoardBackend, BoardController, BoardError, Item, ItemKind, Placement, Result, SqliteBackend,
    Stage, StageOrder, StageType, StoreBuilder,
};
use tempfile::TempDir;
use tokio::sync::{oneshot, Notify};

/// Helper function to create a SQLite backend in a throwaway directory
pub async fn create_test_store() -> (TempDir, SqliteBackend) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let store = StoreBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create store");
    (temp_dir, store)
}

pub fn stage(id: &str, order: u32, stage_type: StageType) -> Stage {
    Stage {
        id: id.into(),
        project_id: 1,
        name: format!("Stage {id}"),
        color: "#6b7280".to_string(),
        order,
        stage_type,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub fn item(id: u64, kind: ItemKind, placement: Placement) -> Item {
    Item {
        id,
        project_id: 1,
        kind,
        title: format!("Item {id}"),
        assignees: vec![],
        priority: None,
        due_date: None,
        placement,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// A request the mock backend received
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    FetchStages,
    FetchItems(ItemKind),
    Move(ItemKind, u64, Placement),
    Reorder(StageType, Vec<StageOrder>),
}

/// In-memory backend that records calls and can be told to fail or stall.
#[derive(Default)]
pub struct MockBackend {
    stages: Mutex<Vec<Stage>>,
    items: Mutex<HashMap<ItemKind, Vec<Item>>>,
    calls: Mutex<Vec<Call>>,
    failures: Mutex<VecDeque<BoardError>>,
    held_move: tokio::sync::Mutex<Option<oneshot::Receiver<()>>>,
    move_entered: Notify,
}

impl MockBackend {
    pub fn new(stages: Vec<Stage>, items: Vec<Item>) -> Arc<Self> {
        let mut by_kind: HashMap<ItemKind, Vec<Item>> = HashMap::new();
        for item in items {
            by_kind.entry(item.kind).or_default().push(item);
        }
        Arc::new(Self {
            stages: Mutex::new(stages),
            items: Mutex::new(by_kind),
            ..Default::default()
        })
    }

    /// The next request of any kind fails with `error`.
    pub fn fail_next(&self, error: BoardError) {
        self.failures.lock().unwrap().push_back(error);
    }

    /// The next move blocks until the returned sender fires or is dropped.
    pub async fn hold_next_move(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.held_move.lock().await = Some(rx);
        tx
    }

    /// Resolves once a move request has reached the backend.
    pub async fn move_started(&self) {
        self.move_entered.notified().await;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn moves(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| matches!(call, Call::Move(..)))
            .collect()
    }

    pub fn reorders(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| matches!(call, Call::Reorder(..)))
            .collect()
    }

    /// Edits the backend's copy directly, as another client would.
    pub fn insert_item(&self, item: Item) {
        self.items
            .lock()
            .unwrap()
            .entry(item.kind)
            .or_default()
            .push(item);
    }

    pub fn insert_stage(&self, stage: Stage) {
        self.stages.lock().unwrap().push(stage);
    }

    fn record(&self, call: Call) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        match self.failures.lock().unwrap().pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl BoardBackend for MockBackend {
    async fn fetch_items(&self, _project_id: u64, kind: ItemKind) -> Result<Vec<Item>> {
        self.record(Call::FetchItems(kind))?;
        Ok(self
            .items
            .lock()
            .unwrap()
            .get(&kind)
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_stages(&self, _project_id: u64) -> Result<Vec<Stage>> {
        self.record(Call::FetchStages)?;
        Ok(self.stages.lock().unwrap().clone())
    }

    async fn move_item(&self, kind: ItemKind, item_id: u64, target: &Placement) -> Result<Item> {
        let held = self.held_move.lock().await.take();
        self.move_entered.notify_one();
        if let Some(release) = held {
            let _ = release.await;
        }

        self.record(Call::Move(kind, item_id, target.clone()))?;

        let mut items = self.items.lock().unwrap();
        let stored = items
            .get_mut(&kind)
            .and_then(|items| items.iter_mut().find(|item| item.id == item_id))
            .ok_or(BoardError::ItemNotFound { kind, id: item_id })?;
        stored.placement = target.clone();
        stored.updated_at = Timestamp::now();
        Ok(stored.clone())
    }

    async fn reorder_stages(
        &self,
        _project_id: u64,
        stage_type: StageType,
        orders: &[StageOrder],
    ) -> Result<Vec<Stage>> {
        self.record(Call::Reorder(stage_type, orders.to_vec()))?;

        let mut stages = self.stages.lock().unwrap();
        for entry in orders {
            if let Some(stage) = stages.iter_mut().find(|s| s.id == entry.stage_id) {
                stage.order = entry.order;
                stage.updated_at = Timestamp::now();
            }
        }
        Ok(stages.clone())
    }
}

/// Notifier that keeps every notification for inspection.
#[derive(Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .map(|n| n.message.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: &Notification) {
        self.seen.lock().unwrap().push(notification.clone());
    }
}

/// Three task stages, one incident stage and a few items.
pub fn sample_board() -> (Vec<Stage>, Vec<Item>) {
    let stages = vec![
        stage("S1", 0, StageType::Task),
        stage("S2", 1, StageType::Task),
        stage("S3", 2, StageType::Task),
        stage("I1", 0, StageType::Incident),
    ];
    let items = vec![
        item(1, ItemKind::Task, Placement::assigned("S1")),
        item(2, ItemKind::Task, Placement::assigned("S1")),
        item(3, ItemKind::Task, Placement::Unassigned),
        item(10, ItemKind::Incident, Placement::assigned("I1")),
    ];
    (stages, items)
}

/// Controller loaded from a mock seeded with [`sample_board`].
pub async fn loaded_controller() -> (Arc<MockBackend>, Arc<RecordingNotifier>, BoardController) {
    let (stages, items) = sample_board();
    let backend = MockBackend::new(stages, items);
    let notifier = Arc::new(RecordingNotifier::default());
    let controller = BoardController::builder(backend.clone())
        .with_notifier(notifier.clone())
        .load(1)
        .await
        .expect("Failed to load board");
    (backend, notifier, controller)
}
