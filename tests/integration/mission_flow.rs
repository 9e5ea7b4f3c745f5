//! End-to-end mission lifecycle through the task store and app shell,
//! backed by the in-memory key-value store.

use nexus::app::App;
use nexus::config::{AppConfig, Command};
use nexus::storage::{InMemoryStore, KeyValueStore, KvPersistence, Persistence, STORAGE_KEY};
use nexus::tasks::{TaskError, TaskStore};
use nexus_core::{NewTask, Priority, Rank, StatusFilter, TaskPatch};

type MemPersistence = KvPersistence<InMemoryStore>;

fn open_store() -> TaskStore<MemPersistence> {
    TaskStore::open(KvPersistence::new(InMemoryStore::new())).unwrap()
}

fn stored_value(store: &TaskStore<MemPersistence>) -> Option<String> {
    store.persistence().store().get(STORAGE_KEY).unwrap()
}

#[test]
fn scout_perimeter_scenario() {
    let mut store = open_store();

    let id = store
        .add(NewTask::new("Scout perimeter").with_priority(Priority::High))
        .unwrap()
        .id()
        .clone();

    let task = store.toggle(&id).unwrap();
    assert!(task.is_completed());
    let completed_at = task.completed_at().unwrap();
    assert!(completed_at >= task.created_at());

    store.delete(&id).unwrap();
    assert!(store.tasks().is_empty());
    assert_eq!(stored_value(&store).as_deref(), Some("[]"));
}

#[test]
fn add_save_load_round_trip_preserves_fields() {
    let mut store = open_store();
    store
        .add(
            NewTask::new("Calibrate sensors")
                .with_priority(Priority::Low)
                .with_description("deck 3"),
        )
        .unwrap();
    let id = store
        .add(NewTask::new("Dock at station"))
        .unwrap()
        .id()
        .clone();
    store.toggle(&id).unwrap();
    let before = store.tasks().to_vec();

    let raw = stored_value(&store).unwrap();
    let mut kv = InMemoryStore::new();
    kv.set(STORAGE_KEY, &raw).unwrap();
    let reopened = TaskStore::open(KvPersistence::new(kv)).unwrap();

    assert_eq!(reopened.tasks(), before.as_slice());
    assert_eq!(reopened.tasks()[0].title(), "Dock at station");
    assert!(reopened.tasks()[0].is_completed());
    assert_eq!(reopened.tasks()[1].priority(), Priority::Low);
    assert_eq!(reopened.tasks()[1].description(), Some("deck 3"));
}

#[test]
fn delete_all_then_reload_is_empty() {
    let mut store = open_store();
    for title in ["A", "B", "C"] {
        store.add(NewTask::new(title)).unwrap();
    }
    let ids: Vec<_> = store.tasks().iter().map(|t| t.id().clone()).collect();
    for id in &ids {
        store.delete(id).unwrap();
    }
    assert_eq!(store.load_all().unwrap(), 0);
    assert!(store.tasks().is_empty());
}

#[test]
fn missing_ids_leave_store_untouched() {
    let mut store = open_store();
    let id = store.add(NewTask::new("Keep")).unwrap().id().clone();
    let before = stored_value(&store);
    let ghost = nexus_core::TaskId::new();

    assert!(matches!(store.toggle(&ghost), Err(TaskError::TaskNotFound(_))));
    assert!(matches!(
        store.update(&ghost, TaskPatch::default()),
        Err(TaskError::TaskNotFound(_))
    ));
    assert!(matches!(store.delete(&ghost), Err(TaskError::TaskNotFound(_))));

    assert_eq!(stored_value(&store), before);
    assert!(store.get(&id).is_some());
}

#[test]
fn corrupt_saved_data_starts_empty_and_is_replaced() {
    let mut kv = InMemoryStore::new();
    kv.set(STORAGE_KEY, "definitely not json").unwrap();
    let persistence = KvPersistence::new(kv);
    assert!(persistence.load().unwrap().is_none());

    let mut store = TaskStore::open(persistence).unwrap();
    assert!(store.tasks().is_empty());
    store.add(NewTask::new("Fresh start")).unwrap();
    assert!(stored_value(&store).unwrap().contains("Fresh start"));
}

#[test]
fn deleting_completed_missions_demotes_rank() {
    let mut store = open_store();
    let ids: Vec<_> = (0..15)
        .map(|i| store.add(NewTask::new(format!("m{i}"))).unwrap().id().clone())
        .collect();
    for id in &ids {
        store.toggle(id).unwrap();
    }
    assert_eq!(store.rank().rank, Rank::Gold);
    assert_eq!(store.rank().level, 4);

    store.delete(&ids[0]).unwrap();
    let state = store.rank();
    assert_eq!(state.rank, Rank::Silver);
    assert_eq!(state.level, 3);
    assert_eq!(state.xp_current, 4);
}

#[test]
fn app_session_add_filter_toggle() {
    let store = open_store();
    let mut app = App::new(store, AppConfig::default());

    app.execute(Command::Add {
        title: "Scout perimeter".to_string(),
        description: None,
        priority: Some(Priority::High),
    })
    .unwrap();
    app.execute(Command::Add {
        title: "Refuel shuttle".to_string(),
        description: None,
        priority: None,
    })
    .unwrap();

    let scout = app
        .store()
        .tasks()
        .iter()
        .find(|t| t.title() == "Scout perimeter")
        .unwrap()
        .id()
        .to_string();
    app.execute(Command::Toggle { id: scout }).unwrap();

    let active = app
        .execute(Command::List {
            query: String::new(),
            filter: StatusFilter::Active,
        })
        .unwrap();
    assert!(active.contains("Refuel shuttle"));
    assert!(!active.contains("Scout perimeter"));
    assert!(active.contains("1 of 2 missions completed"));

    let completed = app
        .execute(Command::List {
            query: "SCOUT".to_string(),
            filter: StatusFilter::Completed,
        })
        .unwrap();
    assert!(completed.contains("Scout perimeter"));
    assert!(completed.contains("Success rate: 50%"));
}
