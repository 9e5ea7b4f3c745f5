//! Task store over the directory-backed key-value store.
//!
//! Each test works in its own scratch directory under the system temp dir.

use std::path::PathBuf;

use nexus::storage::{FileStore, KeyValueStore, KvPersistence, STORAGE_KEY};
use nexus::tasks::TaskStore;
use nexus_core::{NewTask, Priority};

struct ScratchDir(PathBuf);

impl ScratchDir {
    fn new(name: &str) -> Self {
        Self(std::env::temp_dir().join(format!("nexus-it-{name}-{}", uuid::Uuid::now_v7())))
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

fn open(dir: &ScratchDir) -> TaskStore<KvPersistence<FileStore>> {
    TaskStore::open(KvPersistence::new(FileStore::new(&dir.0))).unwrap()
}

#[test]
fn fresh_directory_opens_empty() {
    let dir = ScratchDir::new("fresh");
    let store = open(&dir);
    assert!(store.tasks().is_empty());
    assert!(!dir.0.exists());
}

#[test]
fn missions_survive_reopen() {
    let dir = ScratchDir::new("reopen");
    let id = {
        let mut store = open(&dir);
        store
            .add(NewTask::new("Scout perimeter").with_priority(Priority::High))
            .unwrap();
        let id = store.add(NewTask::new("Refuel")).unwrap().id().clone();
        store.toggle(&id).unwrap();
        id
    };

    let store = open(&dir);
    assert_eq!(store.tasks().len(), 2);
    let refuel = store.get(&id).unwrap();
    assert!(refuel.is_completed());
    assert!(refuel.completed_at().unwrap() >= refuel.created_at());
    assert_eq!(store.tasks()[1].priority(), Priority::High);
}

#[test]
fn stored_file_is_camel_case_json() {
    let dir = ScratchDir::new("format");
    let mut store = open(&dir);
    let id = store.add(NewTask::new("Scan")).unwrap().id().clone();
    store.toggle(&id).unwrap();

    let raw = std::fs::read_to_string(dir.0.join(format!("{STORAGE_KEY}.json"))).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let record = &value[0];
    assert_eq!(record["id"], id.to_string());
    assert_eq!(record["title"], "Scan");
    assert_eq!(record["completed"], true);
    assert_eq!(record["priority"], "medium");
    let created = record["createdAt"].as_str().unwrap();
    assert!(created.ends_with('Z'));
    assert_eq!(created.len(), "2024-05-01T09:30:00.125Z".len());
    assert!(record["completedAt"].is_string());
}

#[test]
fn corrupt_file_opens_empty_then_recovers() {
    let dir = ScratchDir::new("corrupt");
    let mut kv = FileStore::new(&dir.0);
    kv.set(STORAGE_KEY, "[{\"id\":").unwrap();

    let mut store = open(&dir);
    assert!(store.tasks().is_empty());
    store.add(NewTask::new("Rebuild")).unwrap();

    let reopened = open(&dir);
    assert_eq!(reopened.tasks().len(), 1);
    assert_eq!(reopened.tasks()[0].title(), "Rebuild");
}

#[test]
fn delete_everything_leaves_empty_array() {
    let dir = ScratchDir::new("delete-all");
    let mut store = open(&dir);
    let id = store.add(NewTask::new("Temporary")).unwrap().id().clone();
    store.delete(&id).unwrap();

    let kv = FileStore::new(&dir.0);
    assert_eq!(kv.get(STORAGE_KEY).unwrap().as_deref(), Some("[]"));
    assert!(open(&dir).tasks().is_empty());
}
