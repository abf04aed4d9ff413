//! End-to-end scenarios for the todo store.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use composable_todo::{
    persistence, ColorTag, PaletteColors, RowAction, TodoEnvironment, TodoError, TodoItem,
    TodoStore, TodoView,
};
use composable_todo_testing::{
    helpers::init_test_tracing, test_time, InMemoryStorage, ManualClock, NotifierCall,
    RecordingNotifier,
};
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// Test Fixtures
// ============================================================================

const GREEN: ColorTag = ColorTag::from_rgb(0x22_aa44);

struct App {
    storage: Arc<InMemoryStorage>,
    notifier: Arc<RecordingNotifier>,
    clock: Arc<ManualClock>,
    todos: TodoStore,
}

fn open(storage: Arc<InMemoryStorage>) -> App {
    init_test_tracing();
    let notifier = Arc::new(RecordingNotifier::new());
    let clock = Arc::new(ManualClock::new(test_time()));
    let env = TodoEnvironment::new(
        storage.clone(),
        notifier.clone(),
        Arc::new(PaletteColors::new(vec![GREEN])),
    );
    let todos = TodoStore::open_with_clock(env, clock.clone());
    App {
        storage,
        notifier,
        clock,
        todos,
    }
}

fn fresh() -> App {
    open(Arc::new(InMemoryStorage::new()))
}

fn texts(todos: &TodoStore) -> Vec<String> {
    todos.snapshot().into_iter().map(|t| t.text).collect()
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn create_toggle_delete_scenario() {
    let mut app = fresh();

    app.todos.create("A").unwrap();
    app.todos.create("B").unwrap();
    app.todos.toggle_complete(0).unwrap();
    app.todos.delete(0).unwrap();

    let snapshot = app.todos.snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].text, "B");
    assert!(!snapshot[0].completed);
}

#[test]
fn empty_input_is_rejected_without_changes() {
    let mut app = fresh();
    app.todos.create("keep").unwrap();

    assert_eq!(app.todos.create(""), Err(TodoError::EmptyInput));
    assert_eq!(app.todos.create("   "), Err(TodoError::EmptyInput));
    assert_eq!(texts(&app.todos), vec!["keep"]);
    assert_eq!(
        app.notifier.shown(),
        vec!["Input is empty".to_string(), "Input is empty".to_string()]
    );
}

#[test]
fn duplicate_is_case_insensitive() {
    let mut app = fresh();
    app.todos.create("Buy milk").unwrap();

    assert_eq!(
        app.todos.create("BUY MILK"),
        Err(TodoError::DuplicateItem {
            text: "BUY MILK".to_string()
        })
    );
    assert_eq!(app.todos.create("  buy milk  ").unwrap_err().to_string(), "This already exists!");
    assert_eq!(app.todos.len(), 1);
}

#[test]
fn delete_shifts_later_items_and_cancels_edit() {
    let mut app = fresh();
    for text in ["a", "b", "c", "d"] {
        app.todos.create(text).unwrap();
    }
    app.todos.toggle_complete(3).unwrap();
    app.todos.begin_edit(3).unwrap();

    app.todos.delete(1).unwrap();

    let snapshot = app.todos.snapshot();
    assert_eq!(texts(&app.todos), vec!["a", "c", "d"]);
    assert!(snapshot[2].completed);
    assert_eq!(app.todos.edit_cursor(), None);
    assert_eq!(app.todos.commit_edit("z"), Err(TodoError::NoActiveEdit));
}

#[test]
fn edit_state_machine() {
    let mut app = fresh();
    app.todos.create("first").unwrap();
    app.todos.create("second").unwrap();

    assert_eq!(app.todos.commit_edit("x"), Err(TodoError::NoActiveEdit));

    assert_eq!(app.todos.begin_edit(0).unwrap(), "first");
    assert_eq!(app.todos.begin_edit(1).unwrap(), "second");
    assert_eq!(app.todos.edit_cursor(), Some(1));

    // rejected commit keeps the edit open
    assert_eq!(app.todos.commit_edit(""), Err(TodoError::EmptyInput));
    assert_eq!(app.todos.edit_cursor(), Some(1));

    app.todos.commit_edit("2nd").unwrap();
    assert_eq!(app.todos.edit_cursor(), None);
    assert_eq!(texts(&app.todos), vec!["first", "2nd"]);
    assert!(app.todos.snapshot().iter().all(|t| t.color_tag == GREEN));
}

#[test]
fn persisted_list_survives_reopen() {
    let storage = Arc::new(InMemoryStorage::new());
    {
        let mut app = open(storage.clone());
        app.todos.create("Buy milk").unwrap();
        app.todos.create("Walk dog").unwrap();
        app.todos.toggle_complete(1).unwrap();
    }

    let app = open(storage);
    assert_eq!(
        app.todos.snapshot(),
        vec![
            TodoItem::new("Buy milk", GREEN),
            TodoItem {
                completed: true,
                ..TodoItem::new("Walk dog", GREEN)
            },
        ]
    );
    assert_eq!(app.storage.save_count(), 3);
}

#[test]
fn legacy_stored_list_loads() {
    let storage = Arc::new(InMemoryStorage::with_value(
        "todos",
        r##"[{"value":"x","checked":true,"color":"#abc"}]"##,
    ));
    let app = open(storage);
    assert_eq!(
        app.todos.snapshot(),
        vec![TodoItem {
            text: "x".to_string(),
            completed: true,
            color_tag: ColorTag::parse("#000abc").unwrap(),
        }]
    );
}

#[test]
fn corrupt_stored_list_starts_empty() {
    let app = open(Arc::new(InMemoryStorage::with_value("todos", "]]")));
    assert!(app.todos.is_empty());
    assert_eq!(app.todos.view(), TodoView::Empty);
}

#[test]
fn row_activations_drive_the_store() {
    let mut app = fresh();
    app.todos.submit("Read book").unwrap();

    let view = app.todos.view();
    let row = &view.rows()[0];
    assert_eq!((row.index, row.text.as_str(), row.completed), (0, "Read book", false));

    app.todos.dispatch("check".parse().unwrap(), row.index).unwrap();
    assert!(app.todos.view().rows()[0].completed);

    let prefill = app.todos.dispatch(RowAction::Edit, 0).unwrap();
    assert_eq!(prefill.as_deref(), Some("Read book"));
    app.todos.submit("Read two books").unwrap();
    assert_eq!(app.todos.view().to_string(), "[x] Read two books (#22aa44)");

    assert_eq!(
        app.todos.dispatch(RowAction::Delete, 7),
        Err(TodoError::IndexOutOfRange { index: 7, len: 1 })
    );
    app.todos.dispatch(RowAction::Delete, 0).unwrap();
    assert_eq!(app.todos.view().to_string(), "Nothing");
}

#[test]
fn notifications_replace_and_expire() {
    let mut app = fresh();
    app.todos.create("x").unwrap();

    assert!(app.todos.create("").is_err());
    app.clock.advance(Duration::from_millis(1500));
    assert!(app.todos.create("X").is_err());

    app.clock.advance(Duration::from_millis(1500));
    app.todos.tick().unwrap();
    assert_eq!(app.todos.notification().as_deref(), Some("This already exists!"));

    app.clock.advance(Duration::from_millis(500));
    app.todos.tick().unwrap();
    assert_eq!(app.todos.notification(), None);

    assert_eq!(
        app.notifier.calls(),
        vec![
            NotifierCall::Show("Input is empty".to_string()),
            NotifierCall::Show("This already exists!".to_string()),
            NotifierCall::Dismiss,
        ]
    );
}

#[test]
fn persisted_payload_matches_snapshot() {
    let mut app = fresh();
    app.todos.create("one").unwrap();
    app.todos.create("two").unwrap();

    let raw = app.storage.get("todos").unwrap();
    assert_eq!(persistence::decode(&raw).unwrap(), app.todos.snapshot());
}
