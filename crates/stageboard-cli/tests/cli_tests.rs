use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Command with --no-color and a database inside `dir`
fn sb_cmd(dir: &TempDir) -> Command {
    let db_path = dir.path().join("cli_test.db");
    let mut cmd = Command::cargo_bin("sb").expect("Failed to find sb binary");
    cmd.args(["--no-color", "--database-file", db_path.to_str().unwrap()]);
    cmd
}

fn add_stage(dir: &TempDir, name: &str, stage_type: &str) {
    sb_cmd(dir)
        .args(["stage", "add", name, "--type", stage_type])
        .assert()
        .success();
}

fn add_task(dir: &TempDir, title: &str, stage: &str) {
    sb_cmd(dir)
        .args(["item", "add", title, "--stage", stage])
        .assert()
        .success();
}

#[test]
fn test_cli_empty_board_is_default_command() {
    let temp_dir = TempDir::new().unwrap();

    sb_cmd(&temp_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("# Tasks"))
        .stdout(predicate::str::contains("No task stages yet."));
}

#[test]
fn test_cli_add_and_list_stages() {
    let temp_dir = TempDir::new().unwrap();

    sb_cmd(&temp_dir)
        .args(["stage", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No stages found."));

    sb_cmd(&temp_dir)
        .args(["stage", "add", "Backlog", "--color", "#4f46e5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created task stage with ID: task-1"))
        .stdout(predicate::str::contains("#4f46e5"));
    add_stage(&temp_dir, "Open", "incident");

    sb_cmd(&temp_dir)
        .args(["stage", "list", "--type", "incident"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Open (ID: incident-2)"))
        .stdout(predicate::str::contains("Backlog").not());

    sb_cmd(&temp_dir)
        .args(["stage", "ls"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Backlog (ID: task-1)"))
        .stdout(predicate::str::contains("## Open (ID: incident-2)"));
}

#[test]
fn test_cli_add_item_and_show_board() {
    let temp_dir = TempDir::new().unwrap();
    add_stage(&temp_dir, "Backlog", "task");
    add_stage(&temp_dir, "Done", "task");

    sb_cmd(&temp_dir)
        .args([
            "item",
            "add",
            "Write docs",
            "--stage",
            "task-1",
            "--priority",
            "high",
            "--assignee",
            "alice,bob",
            "--due",
            "2026-12-24",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created task with ID: 1"))
        .stdout(predicate::str::contains("- Stage: task-1"))
        .stdout(predicate::str::contains("- Assignees: alice, bob"));

    sb_cmd(&temp_dir)
        .args(["item", "add", "Triage later"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Stage: none"));

    sb_cmd(&temp_dir)
        .args(["board"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Backlog (1)"))
        .stdout(predicate::str::contains("- **#1** Write docs"))
        .stdout(predicate::str::contains("due 2026-12-24 · @alice @bob"))
        .stdout(predicate::str::contains("## Done (0)"))
        .stdout(predicate::str::contains("No items."))
        .stdout(predicate::str::contains("## Unassigned (1)"));
}

#[test]
fn test_cli_board_json() {
    let temp_dir = TempDir::new().unwrap();
    add_stage(&temp_dir, "Backlog", "task");
    add_task(&temp_dir, "Write docs", "task-1");

    let output = sb_cmd(&temp_dir)
        .args(["board", "--json"])
        .output()
        .expect("Failed to run sb");
    assert!(output.status.success());

    let board: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Board output should be JSON");
    assert_eq!(board["kind"], "task");
    assert_eq!(board["columns"][0]["stage"]["id"], "task-1");
    assert_eq!(board["columns"][0]["items"][0]["title"], "Write docs");
    assert_eq!(board["unassigned"].as_array().map(Vec::len), Some(0));
}

#[test]
fn test_cli_move_item_between_stages() {
    let temp_dir = TempDir::new().unwrap();
    add_stage(&temp_dir, "Backlog", "task");
    add_stage(&temp_dir, "Done", "task");
    add_task(&temp_dir, "Ship it", "task-1");

    sb_cmd(&temp_dir)
        .args(["item", "move", "1", "--to", "task-2"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Moved task 1 from stage task-1 to stage task-2",
        ));

    sb_cmd(&temp_dir)
        .args(["item", "mv", "1", "--to", "task-2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("task 1 is already in stage task-2"));

    sb_cmd(&temp_dir)
        .args(["item", "move", "1", "--unassign"])
        .assert()
        .success()
        .stdout(predicate::str::contains("to unassigned"));

    sb_cmd(&temp_dir)
        .args(["board"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Done (0)"))
        .stdout(predicate::str::contains("## Unassigned (1)"));
}

#[test]
fn test_cli_move_into_other_board_fails() {
    let temp_dir = TempDir::new().unwrap();
    add_stage(&temp_dir, "Backlog", "task");
    add_stage(&temp_dir, "Open", "incident");
    add_task(&temp_dir, "Ship it", "task-1");

    sb_cmd(&temp_dir)
        .args(["item", "move", "1", "--to", "incident-2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot move task 1 to stage incident-2"));

    sb_cmd(&temp_dir)
        .args(["item", "move", "1", "--to", "task-9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Stage task-9 not found"));

    sb_cmd(&temp_dir)
        .args(["item", "move", "42", "--to", "task-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("task 42 not found"));

    // The item never left its stage
    sb_cmd(&temp_dir)
        .args(["board"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Backlog (1)"));
}

#[test]
fn test_cli_move_requires_a_destination() {
    let temp_dir = TempDir::new().unwrap();

    sb_cmd(&temp_dir)
        .args(["item", "move", "1"])
        .assert()
        .failure();

    sb_cmd(&temp_dir)
        .args(["item", "move", "1", "--to", "task-1", "--unassign"])
        .assert()
        .failure();
}

#[test]
fn test_cli_drag_stage_header() {
    let temp_dir = TempDir::new().unwrap();
    for name in ["A", "B", "C"] {
        add_stage(&temp_dir, name, "task");
    }

    sb_cmd(&temp_dir)
        .args(["stage", "drag", "task-3", "--over", "task-1", "--side", "before"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Reordered 3 task stage(s):"))
        .stdout(predicate::str::contains("0. C (`task-3`)"))
        .stdout(predicate::str::contains("1. A (`task-1`)"))
        .stdout(predicate::str::contains("2. B (`task-2`)"));

    sb_cmd(&temp_dir)
        .args(["stage", "drag", "task-3", "--over", "task-1", "--side", "before"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Stage task-3 is already before task-1"));
}

#[test]
fn test_cli_drag_stage_onto_other_type_fails() {
    let temp_dir = TempDir::new().unwrap();
    add_stage(&temp_dir, "Backlog", "task");
    add_stage(&temp_dir, "Open", "incident");

    sb_cmd(&temp_dir)
        .args(["stage", "drag", "task-1", "--over", "incident-2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot drop task stage task-1"));
}

#[test]
fn test_cli_reorder_stages() {
    let temp_dir = TempDir::new().unwrap();
    add_stage(&temp_dir, "A", "task");
    add_stage(&temp_dir, "B", "task");

    sb_cmd(&temp_dir)
        .args(["stage", "reorder", "task-2", "task-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0. B (`task-2`)"))
        .stdout(predicate::str::contains("1. A (`task-1`)"));

    sb_cmd(&temp_dir)
        .args(["stage", "reorder", "task-2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to reorder stages"));
}

#[test]
fn test_cli_rejects_invalid_item() {
    let temp_dir = TempDir::new().unwrap();

    sb_cmd(&temp_dir)
        .args(["item", "add", "Task", "--due", "next week"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to create item"));

    sb_cmd(&temp_dir)
        .args(["item", "add", "Task", "--kind", "chore"])
        .assert()
        .failure();
}

#[test]
fn test_cli_projects_are_separate() {
    let temp_dir = TempDir::new().unwrap();
    add_stage(&temp_dir, "Backlog", "task");

    sb_cmd(&temp_dir)
        .args(["--project", "2", "stage", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No stages found."));

    sb_cmd(&temp_dir)
        .args(["--project", "2", "stage", "drag", "task-1", "--over", "task-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Stage task-1 not found"));
}
