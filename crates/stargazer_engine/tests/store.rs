use std::fs;

use pretty_assertions::assert_eq;
use stargazer_core::{Repo, StarredSet};
use stargazer_engine::{FileStorage, MemoryStorage, StarredStorage, StarredStore, StorageError};
use tempfile::TempDir;

fn repo(id: u64, stars: u64) -> Repo {
    Repo {
        id,
        full_name: format!("owner/repo-{id}"),
        html_url: format!("https://github.com/owner/repo-{id}"),
        description: Some("desc".into()),
        language: Some("Rust".into()),
        stargazers_count: stars,
    }
}

struct BrokenStorage;

impl StarredStorage for BrokenStorage {
    fn read(&self) -> Result<Option<String>, StorageError> {
        Err(StorageError::Read(std::io::Error::other("boom")))
    }

    fn write(&self, _contents: &str) -> Result<(), StorageError> {
        Err(StorageError::Write(std::io::Error::other("boom")))
    }
}

#[test]
fn empty_storage_loads_empty_set() {
    stargazer_logging::initialize_for_tests();
    let store = StarredStore::new(MemoryStorage::new());
    assert!(store.load().is_empty());
}

#[test]
fn corrupt_storage_loads_empty_set() {
    let store = StarredStore::new(MemoryStorage::with_contents("{not: \"json\""));
    assert!(store.load().is_empty());

    let store = StarredStore::new(MemoryStorage::with_contents("{\"id\": 1}"));
    assert!(store.load().is_empty());
}

#[test]
fn unreadable_storage_loads_empty_set() {
    let store = StarredStore::new(BrokenStorage);
    assert!(store.load().is_empty());
    assert!(store.save(&StarredSet::new()).is_err());
}

#[test]
fn save_writes_compact_array_in_insertion_order() {
    let store = StarredStore::new(MemoryStorage::new());
    let set = StarredSet::from_repos(vec![repo(2, 1), repo(1, 50)]);
    store.save(&set).unwrap();

    let stored = store.storage().contents().unwrap();
    assert_eq!(stored, serde_json::to_string(&vec![repo(2, 1), repo(1, 50)]).unwrap());
    assert!(stored.starts_with("[{\"id\":2,"));
    assert_eq!(store.load(), set);
}

#[test]
fn star_then_unstar_restores_persisted_form() {
    let original = StarredSet::from_repos(vec![repo(1, 5), repo(2, 7)]);
    let store = StarredStore::new(MemoryStorage::new());
    store.save(&original).unwrap();
    let before = store.storage().contents().unwrap();

    let starred = store.toggle(&original, &repo(3, 9)).unwrap();
    assert!(starred.contains(3));
    assert_ne!(store.storage().contents().unwrap(), before);

    let restored = store.toggle(&starred, &repo(3, 9)).unwrap();
    assert_eq!(restored, original);
    assert_eq!(store.storage().contents().unwrap(), before);
}

#[test]
fn instances_do_not_share_state() {
    let first = StarredStore::new(MemoryStorage::new());
    let second = StarredStore::new(MemoryStorage::new());
    first.save(&StarredSet::from_repos(vec![repo(1, 1)])).unwrap();
    assert!(second.load().is_empty());
}

#[test]
fn file_storage_round_trips_through_disk() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("data");
    let store = StarredStore::new(FileStorage::new(&dir));
    assert!(store.load().is_empty());

    let set = StarredSet::from_repos(vec![repo(4, 40)]);
    store.save(&set).unwrap();
    assert!(dir.join("starred_repos.json").is_file());

    let reopened = StarredStore::new(FileStorage::new(&dir));
    assert_eq!(reopened.load(), set);
}

#[test]
fn file_storage_overwrites_whole_file() {
    let temp = TempDir::new().unwrap();
    let storage = FileStorage::new(temp.path());
    let store = StarredStore::new(storage.clone());
    store
        .save(&StarredSet::from_repos(vec![repo(1, 1), repo(2, 2)]))
        .unwrap();
    store.save(&StarredSet::new()).unwrap();
    assert_eq!(fs::read_to_string(storage.path()).unwrap(), "[]");
}

#[test]
fn corrupt_file_recovers_to_empty() {
    let temp = TempDir::new().unwrap();
    let storage = FileStorage::new(temp.path());
    fs::write(storage.path(), "\u{0}garbage").unwrap();
    assert!(StarredStore::new(storage).load().is_empty());
}

#[test]
fn write_fails_when_parent_is_a_file() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("not_a_dir");
    fs::write(&blocker, "x").unwrap();

    let store = StarredStore::new(FileStorage::new(&blocker));
    let err = store.save(&StarredSet::new()).unwrap_err();
    assert!(matches!(err, StorageError::Write(_)));
}
