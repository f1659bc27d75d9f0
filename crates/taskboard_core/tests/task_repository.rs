use taskboard_core::{
    MemorySlotStore, RepoError, SqliteSlotStore, TaskId, TaskRepository, TaskStorage,
    TaskValidationError,
};

fn memory_repo() -> TaskRepository<MemorySlotStore> {
    TaskRepository::open(TaskStorage::with_default_key(MemorySlotStore::new()))
}

#[test]
fn create_then_find_returns_equal_task() {
    let mut repo = memory_repo();
    let created = repo.create("Buy milk", "2%", true).unwrap();

    let found = repo.find(&created.id).unwrap();
    assert_eq!(found, &created);
    assert_eq!(found.title, "Buy milk");
    assert_eq!(found.description, "2%");
    assert!(found.completed);
}

#[test]
fn scenario_create_prepends_most_recent_first() {
    let mut repo = memory_repo();
    repo.create("Buy milk", "2%", false).unwrap();
    assert_eq!(repo.len(), 1);
    assert_eq!(repo.list()[0].title, "Buy milk");
    assert_eq!(repo.list()[0].description, "2%");
    assert!(!repo.list()[0].completed);

    repo.create("Pay rent", "", false).unwrap();
    let titles: Vec<&str> = repo.list().iter().map(|task| task.title.as_str()).collect();
    assert_eq!(titles, vec!["Pay rent", "Buy milk"]);
}

#[test]
fn create_blank_title_is_validation_error_and_sequence_unchanged() {
    let mut repo = memory_repo();
    repo.create("existing", "", false).unwrap();
    let before = repo.list().to_vec();

    let err = repo.create("", "desc", false).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(TaskValidationError::EmptyTitle)
    ));
    let err = repo.create("   ", "desc", false).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    assert_eq!(repo.list(), before.as_slice());
    assert_eq!(repo.storage().load(), before);
}

#[test]
fn remove_then_find_is_absent() {
    let mut repo = memory_repo();
    let keep = repo.create("keep", "", false).unwrap();
    let gone = repo.create("gone", "", false).unwrap();

    assert!(repo.remove(&gone.id).unwrap());
    assert!(repo.find(&gone.id).is_none());
    assert_eq!(repo.list(), &[keep.clone()]);
    assert_eq!(repo.storage().load(), vec![keep]);
    assert!(!repo.remove(&gone.id).unwrap());
}

#[test]
fn toggle_twice_restores_original() {
    let mut repo = memory_repo();
    let original = repo.create("flip", "me", false).unwrap();

    let once = repo.toggle_completion(&original.id).unwrap();
    assert!(once.completed);
    assert_eq!(once.title, original.title);
    assert_eq!(once.created_at, original.created_at);

    let twice = repo.toggle_completion(&original.id).unwrap();
    assert_eq!(twice, original);
}

#[test]
fn toggle_unknown_id_is_not_found_and_sequence_unchanged() {
    let mut repo = memory_repo();
    repo.create("a", "", false).unwrap();
    let before = repo.list().to_vec();

    let unknown = TaskId::parse("task_0_unknown").unwrap();
    let err = repo.toggle_completion(&unknown).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == unknown));
    assert_eq!(repo.list(), before.as_slice());
}

#[test]
fn update_keeps_identity_order_and_trims() {
    let mut repo = memory_repo();
    let first = repo.create("first", "", false).unwrap();
    let second = repo.create("second", "", false).unwrap();

    let updated = repo
        .update(&first.id, "  renamed  ", "  notes ", true)
        .unwrap();
    assert_eq!(updated.id, first.id);
    assert_eq!(updated.created_at, first.created_at);
    assert_eq!(updated.title, "renamed");
    assert_eq!(updated.description, "notes");
    assert!(updated.completed);

    let ids: Vec<&TaskId> = repo.list().iter().map(|task| &task.id).collect();
    assert_eq!(ids, vec![&second.id, &first.id]);
}

#[test]
fn save_list_then_load_roundtrips() {
    let mut repo = memory_repo();
    repo.create("one", "a", false).unwrap();
    repo.create("two", "b", true).unwrap();

    let snapshot = repo.list().to_vec();
    repo.storage_mut().save(&snapshot).unwrap();
    assert_eq!(repo.storage().load(), snapshot);
}

#[test]
fn ids_are_unique_across_many_creates() {
    let mut repo = memory_repo();
    for index in 0..200 {
        repo.create(&format!("task {index}"), "", false).unwrap();
    }
    let mut ids: Vec<&str> = repo.list().iter().map(|task| task.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 200);
}

#[test]
fn failed_save_surfaces_persistence_error_without_divergence() {
    let mut repo = memory_repo();
    let existing = repo.create("existing", "", false).unwrap();

    repo.storage_mut().store_mut().fail_next_write("quota exceeded");
    let err = repo.create("lost", "", false).unwrap_err();
    assert!(matches!(err, RepoError::Persistence(_)));

    assert_eq!(repo.list(), &[existing.clone()]);
    assert_eq!(repo.storage().load(), vec![existing]);
}

#[test]
fn quota_exceeded_is_reported_as_persistence_error() {
    let mut repo = TaskRepository::open(TaskStorage::with_default_key(
        MemorySlotStore::with_quota(200),
    ));
    repo.create("fits", "", false).unwrap();

    let err = repo.create("overflow", &"x".repeat(500), false).unwrap_err();
    assert!(matches!(err, RepoError::Persistence(_)));
    assert_eq!(repo.len(), 1);
}

#[test]
fn sqlite_backed_repository_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.sqlite3");

    let (first, second) = {
        let store = SqliteSlotStore::open(&path).unwrap();
        let mut repo = TaskRepository::open(TaskStorage::with_default_key(store));
        let first = repo.create("first", "", false).unwrap();
        let second = repo.create("second", "details", true).unwrap();
        (first, second)
    };

    let store = SqliteSlotStore::open(&path).unwrap();
    let repo = TaskRepository::open(TaskStorage::with_default_key(store));
    assert_eq!(repo.list(), &[second, first]);
}
