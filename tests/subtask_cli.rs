mod support;

use support::{orders, titles, TestBoard};

struct Fixture {
    board: TestBoard,
    project: String,
    a: String,
    b: String,
}

fn fixture() -> Fixture {
    let board = TestBoard::new();
    let project = board.new_project("P");
    let a = board.add_task(&project, "A");
    let b = board.add_task(&project, "B");
    Fixture {
        board,
        project,
        a,
        b,
    }
}

fn task(fx: &Fixture, index: usize) -> serde_json::Value {
    fx.board.show(&fx.project)["tasks"][index].clone()
}

#[test]
fn subtask_toggles_roll_up_to_task() {
    let fx = fixture();
    let s1 = fx.board.add_subtask(&fx.project, &fx.a, "S1");
    let s2 = fx.board.add_subtask(&fx.project, &fx.a, "S2");

    fx.board.json(&["subtask", "toggle", &fx.project, &fx.a, &s1]);
    assert_eq!(task(&fx, 0)["completed"], false);

    let toggled = fx.board.json(&["subtask", "toggle", &fx.project, &fx.a, &s2]);
    assert_eq!(toggled["completed"], true);
    assert_eq!(task(&fx, 0)["completed"], true);

    // adding an open subtask reopens the task
    fx.board.add_subtask(&fx.project, &fx.a, "S3");
    assert_eq!(task(&fx, 0)["completed"], false);
}

#[test]
fn move_between_tasks_reindexes_both() {
    let fx = fixture();
    let s1 = fx.board.add_subtask(&fx.project, &fx.a, "S1");
    fx.board.add_subtask(&fx.project, &fx.a, "S2");
    fx.board.add_subtask(&fx.project, &fx.b, "B1");

    let moved = fx.board.json(&[
        "subtask",
        "move",
        &fx.project,
        &fx.a,
        &fx.b,
        &s1,
        "--position",
        "0",
    ]);
    assert_eq!(moved["order"].as_u64(), Some(0));

    let a = task(&fx, 0);
    let b = task(&fx, 1);
    assert_eq!(titles(&a["subtasks"]), ["S2"]);
    assert_eq!(orders(&a["subtasks"]), [0]);
    assert_eq!(titles(&b["subtasks"]), ["S1", "B1"]);
    assert_eq!(orders(&b["subtasks"]), [0, 1]);
}

#[test]
fn move_last_open_subtask_completes_source() {
    let fx = fixture();
    let done = fx.board.add_subtask(&fx.project, &fx.a, "done");
    let open = fx.board.add_subtask(&fx.project, &fx.a, "open");
    fx.board.json(&["subtask", "toggle", &fx.project, &fx.a, &done]);

    fx.board
        .json(&["subtask", "move", &fx.project, &fx.a, &fx.b, &open]);

    assert_eq!(task(&fx, 0)["completed"], true);
    assert_eq!(task(&fx, 1)["completed"], false);
    assert_eq!(titles(&task(&fx, 1)["subtasks"]), ["open"]);
}

#[test]
fn reorder_and_rename_within_task() {
    let fx = fixture();
    let s1 = fx.board.add_subtask(&fx.project, &fx.a, "S1");
    fx.board.add_subtask(&fx.project, &fx.a, "S2");
    fx.board.add_subtask(&fx.project, &fx.a, "S3");

    fx.board
        .json(&["subtask", "reorder", &fx.project, &fx.a, &s1, "2"]);
    let renamed = fx.board.json(&[
        "subtask", "edit", &fx.project, &fx.a, &s1, "--title", "First",
    ]);
    assert_eq!(renamed["order"].as_u64(), Some(2));

    let a = task(&fx, 0);
    assert_eq!(titles(&a["subtasks"]), ["S2", "S3", "First"]);
    assert_eq!(orders(&a["subtasks"]), [0, 1, 2]);
}

#[test]
fn removing_subtasks_reevaluates_task() {
    let fx = fixture();
    let s1 = fx.board.add_subtask(&fx.project, &fx.a, "S1");
    fx.board.json(&["subtask", "toggle", &fx.project, &fx.a, &s1]);
    assert_eq!(task(&fx, 0)["completed"], true);

    fx.board.json(&["subtask", "rm", &fx.project, &fx.a, &s1]);
    let a = task(&fx, 0);
    assert_eq!(a["completed"], false);
    assert_eq!(a["subtasks"].as_array().map(Vec::len), Some(0));
}

#[test]
fn subtask_errors() {
    let fx = fixture();
    let s1 = fx.board.add_subtask(&fx.project, &fx.a, "S1");
    let before = fx.board.read_data();

    let error = fx
        .board
        .json_error(&["subtask", "toggle", &fx.project, &fx.a, "ghost"], 3);
    assert_eq!(error["details"]["entity"], "subtask");

    let error = fx
        .board
        .json_error(&["subtask", "move", &fx.project, &fx.a, "ghost", &s1], 3);
    assert_eq!(error["details"]["entity"], "task");

    let error = fx
        .board
        .json_error(&["subtask", "move", &fx.project, &fx.b, &fx.a, &s1], 3);
    assert_eq!(error["details"]["entity"], "subtask");

    let error = fx.board.json_error(
        &["subtask", "edit", &fx.project, &fx.a, &s1, "--title", " "],
        2,
    );
    assert_eq!(error["kind"], "user_error");

    assert_eq!(fx.board.read_data(), before);
}
