use admission_core::db::{open_db, open_db_in_memory};
use admission_core::{AdmissionStore, StorageError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_creates_students_table() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(table_count(&conn, "students"), 1);
}

#[test]
fn initialize_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let store = AdmissionStore::new(dir.path().join("admissions.db"));

    store.initialize().unwrap();
    store.initialize().unwrap();

    let conn = Connection::open(store.db_path()).unwrap();
    assert_eq!(table_count(&conn, "students"), 1);
}

#[test]
fn initialize_adopts_table_created_by_older_deployments() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE students (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            guardian_name TEXT NOT NULL,
            guardian_phone TEXT NOT NULL,
            student_phone TEXT,
            dob TEXT NOT NULL,
            address TEXT NOT NULL,
            class TEXT NOT NULL,
            subjects TEXT,
            photo_path TEXT,
            fees REAL NOT NULL
        );
        INSERT INTO students (name, guardian_name, guardian_phone, student_phone, dob, address, class, subjects, photo_path, fees)
        VALUES ('Old', 'Parent', '1', NULL, '2010', 'Here', 'V', NULL, NULL, 400);",
    )
    .unwrap();
    drop(conn);

    let store = AdmissionStore::new(&path);
    store.initialize().unwrap();

    let records = store.list_all().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "Old");
    assert_eq!(records[0].student_phone, None);
    assert!(records[0].subjects.is_empty());
    assert_eq!(records[0].fees, 400);
}

#[test]
fn reopening_keeps_rows_written_earlier() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("admissions.db");

    let conn = open_db(&path).unwrap();
    conn.execute(
        "INSERT INTO students (name, guardian_name, guardian_phone, dob, address, class, fees)
         VALUES ('Kept', 'Parent', '1', '2011', 'There', 'VI', 350);",
        [],
    )
    .unwrap();
    drop(conn);

    let conn = open_db(&path).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM students;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
    assert_eq!(table_count(&conn, "students"), 1);
}

#[test]
fn negative_fees_are_rejected_by_the_schema() {
    let conn = open_db_in_memory().unwrap();

    let result = conn.execute(
        "INSERT INTO students (name, guardian_name, guardian_phone, dob, address, class, fees)
         VALUES ('Neg', 'Parent', '1', '2011', 'There', 'VI', -1);",
        [],
    );
    assert!(result.is_err());
}

#[test]
fn unreachable_database_path_is_a_storage_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = AdmissionStore::new(dir.path().join("missing").join("admissions.db"));

    let err = store.initialize().unwrap_err();
    assert!(matches!(err, StorageError::Db(_)));
    assert!(err.to_string().contains("unable to open database"));
    assert!(matches!(store.list_all().unwrap_err(), StorageError::Db(_)));
}

fn table_count(conn: &Connection, table_name: &str) -> i64 {
    conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1;",
        [table_name],
        |row| row.get(0),
    )
    .unwrap()
}
