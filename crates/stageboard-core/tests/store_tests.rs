mod common;

use std::sync::Arc;

use common::create_test_store;
use stageboard_core::{
    board::InsertSide, params::ValidatedItem, BoardBackend, BoardController, BoardError,
    CreateItem, CreateStage, Database, ItemKind, MoveItem, MoveOutcome, Placement, Priority,
    ReorderOutcome, StageOrder, StageType,
};
use tempfile::NamedTempFile;

/// Helper function to create a temporary database for testing
fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

fn validated(title: &str) -> ValidatedItem {
    ValidatedItem {
        title: title.to_string(),
        assignees: vec![],
        priority: None,
        due_date: None,
    }
}

#[test]
fn test_database_initialization() {
    let (temp_file, _db) = create_test_db();
    assert!(temp_file.path().exists());
}

#[test]
fn test_create_stage_appends_within_its_type() {
    let (_temp_file, mut db) = create_test_db();

    let backlog = db
        .create_stage(1, "Backlog", "#6b7280", StageType::Task)
        .expect("Failed to create stage");
    let open = db
        .create_stage(1, "Open", "#ef4444", StageType::Incident)
        .expect("Failed to create stage");
    let review = db
        .create_stage(1, "Review", "#6b7280", StageType::Task)
        .expect("Failed to create stage");

    assert_eq!(backlog.id.as_str(), "task-1");
    assert_eq!(open.id.as_str(), "incident-2");
    assert_eq!(review.id.as_str(), "task-3");
    assert_eq!(backlog.order, 0);
    assert_eq!(open.order, 0);
    assert_eq!(review.order, 1);

    // Other projects number their stages independently
    let other = db
        .create_stage(2, "Backlog", "#6b7280", StageType::Task)
        .expect("Failed to create stage");
    assert_eq!(other.order, 0);

    let stages = db.get_stages(1).expect("Failed to get stages");
    assert_eq!(stages.len(), 3);
}

#[test]
fn test_create_item_checks_stage() {
    let (_temp_file, mut db) = create_test_db();
    let task_stage = db.create_stage(1, "Backlog", "#6b7280", StageType::Task).unwrap();
    let incident_stage = db.create_stage(1, "Open", "#ef4444", StageType::Incident).unwrap();

    let item = db
        .create_item(1, ItemKind::Task, &validated("Write docs"), Some(&task_stage.id))
        .expect("Failed to create item");
    assert_eq!(item.placement, Placement::Assigned(task_stage.id.clone()));

    let mismatch = db.create_item(1, ItemKind::Task, &validated("Nope"), Some(&incident_stage.id));
    assert!(matches!(mismatch, Err(BoardError::StageKindMismatch { .. })));

    let foreign = db.create_item(2, ItemKind::Task, &validated("Nope"), Some(&task_stage.id));
    assert!(matches!(foreign, Err(BoardError::StageNotFound { .. })));
}

#[test]
fn test_item_fields_round_trip_through_storage() {
    let (_temp_file, mut db) = create_test_db();

    let created = db
        .create_item(
            1,
            ItemKind::ResourceRequest,
            &ValidatedItem {
                title: "Extra GPU".to_string(),
                assignees: vec!["alice".to_string(), "bob".to_string()],
                priority: Some(Priority::High),
                due_date: Some(jiff::civil::date(2026, 12, 24)),
            },
            None,
        )
        .unwrap();

    let loaded = db.get_item(created.id).unwrap().expect("Item should exist");
    assert_eq!(loaded.kind, ItemKind::ResourceRequest);
    assert_eq!(loaded.assignees, vec!["alice".to_string(), "bob".to_string()]);
    assert_eq!(loaded.priority, Some(Priority::High));
    assert_eq!(loaded.due_date, Some(jiff::civil::date(2026, 12, 24)));
    assert!(loaded.placement.is_unassigned());

    let listed = db.get_items(1, ItemKind::ResourceRequest).unwrap();
    assert_eq!(listed.len(), 1);
    assert!(db.get_items(1, ItemKind::Task).unwrap().is_empty());
}

#[test]
fn test_assignees_with_commas_survive_storage() {
    let (_temp_file, mut db) = create_test_db();
    let backlog = db.create_stage(1, "Backlog", "#6b7280", StageType::Task).unwrap();
    let done = db.create_stage(1, "Done", "#22c55e", StageType::Task).unwrap();
    let assignees = vec!["Doe, Jane".to_string(), "bob".to_string()];

    let created = db
        .create_item(
            1,
            ItemKind::Task,
            &ValidatedItem {
                assignees: assignees.clone(),
                ..validated("Review contract")
            },
            Some(&backlog.id),
        )
        .unwrap();
    assert_eq!(created.assignees, assignees);

    let loaded = db.get_item(created.id).unwrap().expect("Item should exist");
    assert_eq!(loaded.assignees, assignees);

    // Moving returns the reloaded record, which must keep the same people
    let moved = db
        .move_item(ItemKind::Task, created.id, &Placement::Assigned(done.id.clone()))
        .unwrap();
    assert_eq!(moved.assignees, assignees);
}

#[test]
fn test_move_item_validates_kind_and_stage() {
    let (_temp_file, mut db) = create_test_db();
    let backlog = db.create_stage(1, "Backlog", "#6b7280", StageType::Task).unwrap();
    let done = db.create_stage(1, "Done", "#22c55e", StageType::Task).unwrap();
    let open = db.create_stage(1, "Open", "#ef4444", StageType::Incident).unwrap();
    let item = db
        .create_item(1, ItemKind::Task, &validated("Ship it"), Some(&backlog.id))
        .unwrap();

    let moved = db
        .move_item(ItemKind::Task, item.id, &Placement::Assigned(done.id.clone()))
        .expect("Failed to move item");
    assert_eq!(moved.placement, Placement::Assigned(done.id.clone()));
    assert!(moved.updated_at >= item.updated_at);

    let mismatch = db.move_item(ItemKind::Task, item.id, &Placement::Assigned(open.id.clone()));
    assert!(matches!(mismatch, Err(BoardError::StageKindMismatch { .. })));

    let wrong_kind = db.move_item(ItemKind::Incident, item.id, &Placement::Unassigned);
    assert!(matches!(wrong_kind, Err(BoardError::ItemNotFound { .. })));

    let unassigned = db
        .move_item(ItemKind::Task, item.id, &Placement::Unassigned)
        .unwrap();
    assert!(unassigned.placement.is_unassigned());
}

#[test]
fn test_reorder_stages_renumbers_the_type() {
    let (_temp_file, mut db) = create_test_db();
    let a = db.create_stage(1, "A", "#6b7280", StageType::Task).unwrap();
    let b = db.create_stage(1, "B", "#6b7280", StageType::Task).unwrap();
    let c = db.create_stage(1, "C", "#6b7280", StageType::Task).unwrap();
    let open = db.create_stage(1, "Open", "#ef4444", StageType::Incident).unwrap();

    let stages = db
        .reorder_stages(
            1,
            StageType::Task,
            &[
                StageOrder::new(c.id.clone(), 0),
                StageOrder::new(a.id.clone(), 1),
                StageOrder::new(b.id.clone(), 2),
            ],
        )
        .expect("Failed to reorder");

    let order_of = |id: &stageboard_core::StageId| {
        stages.iter().find(|s| &s.id == id).map(|s| s.order).unwrap()
    };
    assert_eq!(order_of(&c.id), 0);
    assert_eq!(order_of(&a.id), 1);
    assert_eq!(order_of(&b.id), 2);
    assert_eq!(order_of(&open.id), 0);

    // Sending the same order again leaves every timestamp alone
    let unchanged = db
        .reorder_stages(
            1,
            StageType::Task,
            &[
                StageOrder::new(c.id.clone(), 0),
                StageOrder::new(a.id.clone(), 1),
                StageOrder::new(b.id.clone(), 2),
            ],
        )
        .unwrap();
    let before: Vec<_> = stages.iter().map(|s| (s.id.clone(), s.updated_at)).collect();
    let after: Vec<_> = unchanged.iter().map(|s| (s.id.clone(), s.updated_at)).collect();
    assert_eq!(before, after);
}

#[test]
fn test_reorder_stages_rejects_incomplete_sets() {
    let (_temp_file, mut db) = create_test_db();
    let a = db.create_stage(1, "A", "#6b7280", StageType::Task).unwrap();
    let b = db.create_stage(1, "B", "#6b7280", StageType::Task).unwrap();
    let open = db.create_stage(1, "Open", "#ef4444", StageType::Incident).unwrap();

    let partial = db.reorder_stages(1, StageType::Task, &[StageOrder::new(a.id.clone(), 0)]);
    assert!(matches!(partial, Err(BoardError::InvalidInput { .. })));

    let gap = db.reorder_stages(
        1,
        StageType::Task,
        &[StageOrder::new(a.id.clone(), 0), StageOrder::new(b.id.clone(), 2)],
    );
    assert!(matches!(gap, Err(BoardError::InvalidInput { .. })));

    let cross = db.reorder_stages(
        1,
        StageType::Task,
        &[StageOrder::new(a.id.clone(), 0), StageOrder::new(open.id.clone(), 1)],
    );
    assert!(matches!(cross, Err(BoardError::StageKindMismatch { .. })));

    // Nothing changed
    let stages = db.get_stages(1).unwrap();
    let a_now = stages.iter().find(|s| s.id == a.id).unwrap();
    let b_now = stages.iter().find(|s| s.id == b.id).unwrap();
    assert_eq!((a_now.order, b_now.order), (0, 1));
}

#[test]
fn test_reopening_database_keeps_records() {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let stage_id = {
        let mut db = Database::new(temp_file.path()).unwrap();
        let stage = db.create_stage(1, "Backlog", "#6b7280", StageType::Task).unwrap();
        db.create_item(1, ItemKind::Task, &validated("Keep me"), Some(&stage.id))
            .unwrap();
        stage.id
    };

    let db = Database::new(temp_file.path()).expect("Existing database should open");
    let items = db.get_items(1, ItemKind::Task).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].placement, Placement::Assigned(stage_id));
}

#[tokio::test]
async fn test_store_builder_creates_database() {
    let (temp_dir, store) = create_test_store().await;
    assert!(store.database_path().exists());
    assert!(store.database_path().starts_with(temp_dir.path()));
}

#[tokio::test]
async fn test_controller_over_sqlite_store() {
    let (_temp_dir, store) = create_test_store().await;

    let mut stage_ids = Vec::new();
    for name in ["Backlog", "Doing", "Done"] {
        let stage = store
            .create_stage(&CreateStage {
                project_id: 1,
                name: name.to_string(),
                stage_type: StageType::Task,
                color: None,
            })
            .await
            .unwrap();
        stage_ids.push(stage.id);
    }
    let task = store
        .create_item(&CreateItem {
            project_id: 1,
            kind: ItemKind::Task,
            title: "Write release notes".to_string(),
            stage_id: Some(stage_ids[0].clone()),
            ..Default::default()
        })
        .await
        .unwrap();

    let store = Arc::new(store);
    let controller = BoardController::builder(store.clone()).load(1).await.unwrap();

    let outcome = controller
        .move_item(&MoveItem {
            kind: ItemKind::Task,
            item_id: task.id,
            target: Placement::Assigned(stage_ids[2].clone()),
        })
        .await
        .unwrap();
    assert!(matches!(outcome, MoveOutcome::Applied(_)));

    let outcome = controller
        .drop_stage(StageType::Task, &stage_ids[2], &stage_ids[0], InsertSide::Before)
        .await
        .unwrap();
    assert!(matches!(outcome, ReorderOutcome::Applied(_)));

    // The store agrees with the controller
    let stored = store.get_item(task.id).await.unwrap().unwrap();
    assert_eq!(stored.placement, Placement::Assigned(stage_ids[2].clone()));

    let board = controller.board(ItemKind::Task).await;
    assert_eq!(
        board.stage_ids(),
        vec![stage_ids[2].clone(), stage_ids[0].clone(), stage_ids[1].clone()]
    );
    assert_eq!(board.item_ids(&Placement::Assigned(stage_ids[2].clone())), vec![task.id]);

    let fetched = store.fetch_stages(1).await.unwrap();
    let orders: Vec<u32> = fetched.iter().map(|s| s.order).collect();
    assert_eq!(orders, vec![0, 1, 2]);
}

#[tokio::test]
async fn test_store_rejects_invalid_create_params() {
    let (_temp_dir, store) = create_test_store().await;

    let blank = store
        .create_stage(&CreateStage {
            project_id: 1,
            name: "   ".to_string(),
            ..Default::default()
        })
        .await;
    assert!(matches!(blank, Err(BoardError::InvalidInput { .. })));

    let bad_date = store
        .create_item(&CreateItem {
            project_id: 1,
            title: "Task".to_string(),
            due_date: Some("next week".to_string()),
            ..Default::default()
        })
        .await;
    assert!(matches!(bad_date, Err(BoardError::InvalidInput { .. })));
}
