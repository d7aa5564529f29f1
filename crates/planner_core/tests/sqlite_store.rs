use chrono::NaiveDate;
use planner_core::db::migrations::latest_version;
use planner_core::db::{open_db, open_db_in_memory};
use planner_core::{
    GoalBoard, KeyValueStore, Priority, Screen, SqliteKeyValueStore, StoreError, TaskBoard,
    TODOS_KEY,
};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "kv_entries");
}

#[test]
fn set_overwrites_value_in_place() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();

    assert!(store.get("k").unwrap().is_none());
    store.set("k", b"first").unwrap();
    store.set("k", b"second").unwrap();
    assert_eq!(store.get("k").unwrap().as_deref(), Some(&b"second"[..]));

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM kv_entries;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
    assert!(store.get("other").unwrap().is_none());
}

#[test]
fn store_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteKeyValueStore::try_new(&conn) {
        Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    assert!(err.to_string().contains("newer build"));
    match err {
        StoreError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn collections_survive_reopening_the_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("planner.sqlite3");
    let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

    let (task_id, goal_id) = {
        let conn = open_db(&path).unwrap();
        let store = SqliteKeyValueStore::try_new(&conn).unwrap();
        let mut tasks = TaskBoard::open(&store, Screen::Planner).unwrap();
        let task = tasks.add_task("Solve algebra set", "수학", Priority::High, day).unwrap();
        tasks.toggle_task(&task.id).unwrap();

        let mut goals = GoalBoard::open(&store).unwrap();
        let goal = goals.add_goal("Read 20 chapters", "", 20, None).unwrap();
        goals.adjust_progress(&goal.id, 4).unwrap();
        (task.id, goal.id)
    };

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();

    let tasks = TaskBoard::open(&store, Screen::Today).unwrap();
    assert_eq!(tasks.tasks().len(), 1);
    assert_eq!(tasks.tasks()[0].id, task_id);
    assert!(tasks.tasks()[0].completed);

    let goals = GoalBoard::open(&store).unwrap();
    assert_eq!(goals.get(&goal_id).unwrap().current, 4);
}

#[test]
fn corrupt_value_in_database_loads_as_empty_board() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();
    store.set(TODOS_KEY, b"[{\"id\":").unwrap();

    let board = TaskBoard::open(&store, Screen::Today).unwrap();
    assert!(board.tasks().is_empty());
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
