use rusqlite::Connection;
use taskflow_core::db::migrations::{latest_version, schema_version};
use taskflow_core::db::{open_db, open_db_in_memory, DbError};
use taskflow_core::{KeyValueStorage, SqliteKvStorage, StorageError};

fn kv_columns(conn: &Connection) -> Vec<String> {
    let mut stmt = conn.prepare("PRAGMA table_info(kv_entries);").unwrap();
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    columns
}

#[test]
fn fresh_memory_database_is_at_latest_version_with_kv_table() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn).unwrap(), latest_version());
    assert_eq!(kv_columns(&conn), vec!["key", "value", "updated_at"]);
}

#[test]
fn reopening_a_file_keeps_rows_and_applies_nothing_twice() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kv.sqlite3");

    {
        let storage = SqliteKvStorage::try_new(open_db(&path).unwrap()).unwrap();
        storage.set_item("probe", "first").unwrap();
        storage.set_item("probe", "second").unwrap();
    }

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn).unwrap(), latest_version());
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM kv_entries;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);

    let storage = SqliteKvStorage::try_new(conn).unwrap();
    assert_eq!(storage.get_item("probe").unwrap().as_deref(), Some("second"));
}

#[test]
fn database_from_a_newer_build_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("newer.sqlite3");
    Connection::open(&path)
        .unwrap()
        .pragma_update(None, "user_version", 999)
        .unwrap();

    let err = open_db(&path).unwrap_err();
    assert!(
        matches!(
            err,
            DbError::UnsupportedSchemaVersion {
                db_version: 999,
                ..
            }
        ),
        "unexpected error: {err}"
    );
}

#[test]
fn storage_refuses_an_unmigrated_connection() {
    let raw = Connection::open_in_memory().unwrap();

    match SqliteKvStorage::try_new(raw) {
        Err(StorageError::SchemaNotReady { found, expected }) => {
            assert_eq!(found, 0);
            assert_eq!(expected, latest_version());
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("unmigrated connection was accepted"),
    }
}
