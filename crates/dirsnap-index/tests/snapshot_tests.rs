//! Snapshot replacement and garbage collection against on-disk databases.

use dirsnap_index::{Database, SCHEMA_VERSION};
use dirsnap_testing::fixtures::{leaf, leaves};
use rusqlite::Connection;
use tempfile::TempDir;

fn paths(db: &Database, site: &str) -> Vec<String> {
    db.list_directories(site)
        .unwrap()
        .into_iter()
        .map(|d| d.path)
        .collect()
}

#[test]
fn test_second_snapshot_replaces_first() {
    let db = Database::open_in_memory().unwrap();

    db.replace_directories("site1", &leaves(&["/d1", "/d2"]))
        .unwrap();
    db.replace_directories("site1", &leaves(&["/d3"])).unwrap();

    assert_eq!(paths(&db, "site1"), ["/d3"]);
}

#[test]
fn test_replace_leaves_other_sites_alone() {
    let db = Database::open_in_memory().unwrap();

    db.replace_directories("site1", &leaves(&["/a"])).unwrap();
    db.replace_directories("site2", &leaves(&["/b"])).unwrap();
    db.replace_directories("site1", &leaves(&["/c"])).unwrap();

    assert_eq!(paths(&db, "site1"), ["/c"]);
    assert_eq!(paths(&db, "site2"), ["/b"]);
}

#[test]
fn test_same_path_allowed_on_different_sites() {
    let db = Database::open_in_memory().unwrap();

    db.replace_directories("site1", &leaves(&["/pub"])).unwrap();
    db.replace_directories("site2", &leaves(&["/pub"])).unwrap();

    assert_eq!(db.count_directories("site1").unwrap(), 1);
    assert_eq!(db.count_directories("site2").unwrap(), 1);
}

#[test]
fn test_failed_replace_keeps_previous_snapshot() {
    let db = Database::open_in_memory().unwrap();
    db.replace_directories("site1", &leaves(&["/old"])).unwrap();

    let duplicate = vec![leaf("/new"), leaf("/dup"), leaf("/dup")];
    let err = db.replace_directories("site1", &duplicate).unwrap_err();

    assert!(err.to_string().contains("Duplicate directory path"));
    assert_eq!(paths(&db, "site1"), ["/old"]);
}

#[test]
fn test_failed_first_replace_creates_no_site() {
    let db = Database::open_in_memory().unwrap();

    let duplicate = vec![leaf("/dup"), leaf("/dup")];
    assert!(db.replace_directories("fresh", &duplicate).is_err());

    assert!(db.get_site("fresh").unwrap().is_none());
}

#[test]
fn test_gc_removes_unconfigured_site_and_its_rows() {
    let db = Database::open_in_memory().unwrap();
    for site in ["A", "B", "C"] {
        db.replace_directories(site, &leaves(&["/x", "/y"])).unwrap();
    }

    let removed = db.garbage_collect_sites(&["A", "B"], false).unwrap();

    let names: Vec<&str> = removed.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["C"]);

    let remaining: Vec<String> = db.list_sites().unwrap().into_iter().map(|s| s.name).collect();
    assert_eq!(remaining, ["A", "B"]);
    assert_eq!(db.count_directories("C").unwrap(), 0);
    assert_eq!(db.count_directories("A").unwrap(), 2);
}

#[test]
fn test_gc_cascade_removes_rows_physically() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("dirsnap.db");

    let db = Database::open(&db_path).unwrap();
    db.replace_directories("A", &leaves(&["/x"])).unwrap();
    db.replace_directories("C", &leaves(&["/x", "/y", "/z"]))
        .unwrap();
    db.garbage_collect_sites(&["A"], false).unwrap();
    db.vacuum().unwrap();
    drop(db);

    let conn = Connection::open(&db_path).unwrap();
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM entry", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn test_gc_dry_run_reports_without_deleting() {
    let db = Database::open_in_memory().unwrap();
    for site in ["A", "B", "C"] {
        db.replace_directories(site, &leaves(&["/x"])).unwrap();
    }

    let reported = db.garbage_collect_sites(&["A", "B"], true).unwrap();

    let names: Vec<&str> = reported.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["C"]);
    assert_eq!(db.list_sites().unwrap().len(), 3);
    assert_eq!(db.count_directories("C").unwrap(), 1);
}

#[test]
fn test_gc_with_everything_configured_is_a_no_op() {
    let db = Database::open_in_memory().unwrap();
    db.replace_directories("A", &leaves(&["/x"])).unwrap();

    let removed = db
        .garbage_collect_sites(&["A".to_string(), "Z".to_string()], false)
        .unwrap();

    assert!(removed.is_empty());
    assert_eq!(db.list_sites().unwrap().len(), 1);
}

#[test]
fn test_snapshot_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("nested/dir/dirsnap.db");

    {
        let db = Database::open(&db_path).unwrap();
        db.replace_directories("A", &leaves(&["/pub/a", "/pub/b"]))
            .unwrap();
    }

    let db = Database::open(&db_path).unwrap();
    assert_eq!(paths(&db, "A"), ["/pub/a", "/pub/b"]);
}

#[test]
fn test_schema_version_mismatch_rebuilds_tables() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("old.db");

    {
        let conn = Connection::open(&db_path).unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE site (id INTEGER PRIMARY KEY, name TEXT);
            CREATE TABLE entry (id INTEGER PRIMARY KEY, site_id INTEGER, path TEXT, name TEXT);
            INSERT INTO site (name) VALUES ('legacy');
            PRAGMA user_version = 0;
            "#,
        )
        .unwrap();
    }

    let db = Database::open(&db_path).expect("open should rebuild the schema");
    assert!(db.list_sites().unwrap().is_empty());

    db.replace_directories("A", &leaves(&["/x"])).unwrap();
    assert_eq!(db.count_directories("A").unwrap(), 1);

    let conn = Connection::open(&db_path).unwrap();
    let version: i32 = conn
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, SCHEMA_VERSION);
}

#[test]
fn test_concurrent_replacements_are_serialized() {
    let db = Database::open_in_memory().unwrap();

    std::thread::scope(|scope| {
        for i in 0..8 {
            let db = &db;
            scope.spawn(move || {
                let site = format!("site{}", i);
                for round in 0..5 {
                    let rows: Vec<String> =
                        (0..20).map(|n| format!("/r{}/d{}", round, n)).collect();
                    let refs: Vec<&str> = rows.iter().map(String::as_str).collect();
                    db.replace_directories(&site, &leaves(&refs)).unwrap();
                }
            });
        }
    });

    for i in 0..8 {
        let site = format!("site{}", i);
        let stored = paths(&db, &site);
        assert_eq!(stored.len(), 20);
        assert!(stored.iter().all(|p| p.starts_with("/r4/")));
    }
}
