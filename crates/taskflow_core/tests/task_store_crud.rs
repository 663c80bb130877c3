use chrono::{NaiveDate, TimeZone, Utc};
use std::collections::HashSet;
use taskflow_core::{
    FixedClock, KeyValueStorage, KvTaskRepository, MemoryKvStorage, NewTask, Priority,
    RepoError, SqliteKvStorage, StorageError, StoreError, TaskId, TaskPatch, TaskStatus,
    TaskStore, TASKS_STORAGE_KEY,
};

fn memory_store() -> TaskStore<KvTaskRepository<MemoryKvStorage>> {
    TaskStore::new(KvTaskRepository::new(MemoryKvStorage::new()))
}

#[test]
fn add_assigns_id_and_timestamp_and_appends() {
    let now = Utc.with_ymd_and_hms(2026, 10, 17, 8, 0, 0).unwrap();
    let store = TaskStore::with_clock(
        KvTaskRepository::new(MemoryKvStorage::new()),
        FixedClock::new(now),
    );

    let first = store.add(NewTask::new("first")).unwrap();
    let second = store
        .add(NewTask::new("second").priority(Priority::High))
        .unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(first.created_at, now);
    let titles = store
        .list()
        .unwrap()
        .into_iter()
        .map(|task| task.title)
        .collect::<Vec<_>>();
    assert_eq!(titles, vec!["first", "second"]);
}

#[test]
fn add_never_reuses_existing_ids() {
    let store = memory_store();
    for i in 0..50 {
        store.add(NewTask::new(format!("task {i}"))).unwrap();
    }
    let ids = store
        .list()
        .unwrap()
        .into_iter()
        .map(|task| task.id)
        .collect::<HashSet<_>>();
    assert_eq!(ids.len(), 50);
}

#[test]
fn add_rejects_blank_title_without_writing() {
    let storage = MemoryKvStorage::new();
    let store = TaskStore::new(KvTaskRepository::new(&storage));

    let err = store.add(NewTask::new("   ")).unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
    assert_eq!(storage.get_item(TASKS_STORAGE_KEY).unwrap(), None);
}

#[test]
fn status_update_changes_only_status() {
    let store = memory_store();
    let created = store
        .add(
            NewTask::new("Implement Authentication")
                .description("Add user login")
                .priority(Priority::High)
                .due_date(NaiveDate::from_ymd_opt(2026, 11, 1).unwrap())
                .tags(["backend", "security"]),
        )
        .unwrap();

    let updated = store
        .update(&created.id, &TaskPatch::status(TaskStatus::Review))
        .unwrap()
        .unwrap();

    let mut expected = created.clone();
    expected.status = TaskStatus::Review;
    assert_eq!(updated, expected);
    assert_eq!(store.get_by_id(&created.id).unwrap(), Some(expected));
}

#[test]
fn update_merges_supplied_fields_only() {
    let store = memory_store();
    let created = store
        .add(NewTask::new("draft").description("keep me").tags(["a"]))
        .unwrap();

    let patch = TaskPatch {
        title: Some("final".to_string()),
        tags: Some(vec!["b".to_string(), "c".to_string()]),
        ..TaskPatch::default()
    };
    let updated = store.update(&created.id, &patch).unwrap().unwrap();

    assert_eq!(updated.title, "final");
    assert_eq!(updated.tags, vec!["b", "c"]);
    assert_eq!(updated.description.as_deref(), Some("keep me"));
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(updated.id, created.id);
}

#[test]
fn update_unknown_id_returns_none_and_keeps_collection() {
    let store = memory_store();
    store.add(NewTask::new("only")).unwrap();
    let before = store.list().unwrap();

    let result = store
        .update(&TaskId::from("missing"), &TaskPatch::status(TaskStatus::Completed))
        .unwrap();
    assert_eq!(result, None);
    assert_eq!(store.list().unwrap(), before);
}

#[test]
fn update_rejects_blanking_the_title() {
    let store = memory_store();
    let created = store.add(NewTask::new("named")).unwrap();
    let patch = TaskPatch {
        title: Some(" ".to_string()),
        ..TaskPatch::default()
    };

    assert!(matches!(
        store.update(&created.id, &patch),
        Err(StoreError::Validation(_))
    ));
    assert_eq!(store.get_by_id(&created.id).unwrap().unwrap().title, "named");
}

#[test]
fn delete_then_get_is_not_found_and_unknown_delete_is_noop() {
    let store = memory_store();
    let keep = store.add(NewTask::new("keep")).unwrap();
    let dropped = store.add(NewTask::new("drop")).unwrap();

    store.delete(&dropped.id).unwrap();
    assert_eq!(store.get_by_id(&dropped.id).unwrap(), None);

    let before = store.list().unwrap();
    store.delete(&TaskId::from("never-existed")).unwrap();
    assert_eq!(store.list().unwrap(), before);
    assert_eq!(before.len(), 1);
    assert_eq!(before[0].id, keep.id);
}

#[test]
fn mixed_sequence_reflects_net_effect_in_order() {
    let store = memory_store();
    let a = store.add(NewTask::new("a")).unwrap();
    let b = store.add(NewTask::new("b")).unwrap();
    let c = store.add(NewTask::new("c")).unwrap();

    store
        .update(&b.id, &TaskPatch::status(TaskStatus::Progress))
        .unwrap();
    store.delete(&a.id).unwrap();
    let d = store.add(NewTask::new("d")).unwrap();
    store
        .update(
            &c.id,
            &TaskPatch {
                title: Some("c2".to_string()),
                ..TaskPatch::default()
            },
        )
        .unwrap();

    let listed = store.list().unwrap();
    let summary = listed
        .iter()
        .map(|task| (task.id.clone(), task.title.as_str(), task.status))
        .collect::<Vec<_>>();
    assert_eq!(
        summary,
        vec![
            (b.id, "b", TaskStatus::Progress),
            (c.id, "c2", TaskStatus::Todo),
            (d.id, "d", TaskStatus::Todo),
        ]
    );
}

#[test]
fn counts_sum_to_total_and_match_list_length() {
    let store = memory_store();
    store.seed_if_empty().unwrap();
    store
        .add(NewTask::new("extra").status(TaskStatus::Review).priority(Priority::Low))
        .unwrap();

    let counts = store.counts_by_status().unwrap();
    assert_eq!(
        counts.todo + counts.progress + counts.review + counts.completed,
        counts.total
    );
    assert_eq!(counts.total, store.list().unwrap().len());
    assert_eq!(counts.todo, 2);
    assert_eq!(counts.review, 2);

    let priorities = store.counts_by_priority().unwrap();
    assert_eq!(priorities.low, 2);
    assert_eq!(priorities.medium, 2);
    assert_eq!(priorities.high, 2);
}

#[test]
fn query_by_status_preserves_storage_order() {
    let store = memory_store();
    store.add(NewTask::new("one")).unwrap();
    store
        .add(NewTask::new("skip").status(TaskStatus::Completed))
        .unwrap();
    store.add(NewTask::new("two")).unwrap();

    let todo = store
        .query_by_status(TaskStatus::Todo)
        .unwrap()
        .into_iter()
        .map(|task| task.title)
        .collect::<Vec<_>>();
    assert_eq!(todo, vec!["one", "two"]);
}

#[test]
fn storage_quota_failure_propagates_from_add() {
    let store = TaskStore::new(KvTaskRepository::new(MemoryKvStorage::with_quota(64)));

    let err = store
        .add(NewTask::new("this task will not fit into a tiny quota"))
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Repo(RepoError::Storage(StorageError::QuotaExceeded { .. }))
    ));
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn collection_survives_reopening_the_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.sqlite3");

    let id = {
        let store = TaskStore::new(KvTaskRepository::new(SqliteKvStorage::open(&path).unwrap()));
        store
            .add(NewTask::new("persisted").tags(["disk"]))
            .unwrap()
            .id
    };

    let reopened = TaskStore::new(KvTaskRepository::new(SqliteKvStorage::open(&path).unwrap()));
    let task = reopened.get_by_id(&id).unwrap().unwrap();
    assert_eq!(task.title, "persisted");
    assert_eq!(task.tags, vec!["disk"]);
}

#[test]
fn malformed_persisted_collection_is_reported() {
    let storage = MemoryKvStorage::new();
    storage
        .set_item(TASKS_STORAGE_KEY, r#"[{"id": 1}]"#)
        .unwrap();
    let store = TaskStore::new(KvTaskRepository::new(&storage));

    assert!(matches!(
        store.list(),
        Err(StoreError::Repo(RepoError::InvalidData(_)))
    ));
}

#[test]
fn reads_collection_written_by_the_browser_app() {
    let storage = MemoryKvStorage::new();
    storage
        .set_item(
            TASKS_STORAGE_KEY,
            r#"[{"id":"lq2x9k3ab","title":"Legacy","description":"","priority":"medium",
                "status":"progress","dueDate":"2026-01-09","tags":["old"],
                "createdAt":"2026-01-01T10:00:00.000Z"}]"#,
        )
        .unwrap();
    let store = TaskStore::new(KvTaskRepository::new(&storage));

    let task = store.get_by_id(&TaskId::from("lq2x9k3ab")).unwrap().unwrap();
    assert_eq!(task.status, TaskStatus::Progress);
    assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2026, 1, 9));
}
