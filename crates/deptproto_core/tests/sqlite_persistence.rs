use deptproto_core::db::open_db;
use deptproto_core::{
    default_seed, open_connection, open_store, DepartmentPatch, KeyValueStore, NewProtocol,
    SqliteKeyValueStore, StoreConfig,
};

#[test]
fn committed_changes_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::in_dir(dir.path());

    let (legal_id, protocol_id) = {
        let conn = open_connection(&config).unwrap();
        let mut store = open_store(&conn, &config, &default_seed()).unwrap();
        let legal = store.create_department("Legal").unwrap();
        store.toggle_edge(legal.id, 1).unwrap();
        let protocol = store
            .create_protocol(NewProtocol {
                title: "Contract Review".to_string(),
                summary: "Review vendor contracts".to_string(),
                steps: "Receive draft, Redline, Sign off".to_string(),
                tags: "contracts, vendors".to_string(),
                department_id: legal.id,
            })
            .unwrap();
        (legal.id, protocol.id)
    };

    let conn = open_connection(&config).unwrap();
    let mut store = open_store(&conn, &config, &default_seed()).unwrap();
    assert_eq!(store.department(legal_id).unwrap().connections, vec![1]);
    assert!(store.department(1).unwrap().connections.contains(&legal_id));
    let protocol = store.protocol(protocol_id).unwrap();
    assert_eq!(protocol.steps, vec!["Receive draft", "Redline", "Sign off"]);

    let next = store.create_department("Finance").unwrap();
    assert!(next.id > legal_id);
}

#[test]
fn reopen_returns_connections_exactly_as_saved() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::in_dir(dir.path());

    let saved = {
        let conn = open_connection(&config).unwrap();
        let mut store = open_store(&conn, &config, &default_seed()).unwrap();
        store
            .update_department(
                1,
                DepartmentPatch {
                    name: None,
                    connections: Some(vec![2, 404]),
                },
            )
            .unwrap();
        store.snapshot().clone()
    };

    let conn = open_connection(&config).unwrap();
    let store = open_store(&conn, &config, &default_seed()).unwrap();
    assert_eq!(store.snapshot(), &saved);
    assert_eq!(store.department(1).unwrap().connections, vec![2, 404]);
}

#[test]
fn corrupt_sqlite_record_is_replaced_by_seed() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::in_dir(dir.path()).with_record_key("catalog");

    {
        let conn = open_db(&config.db_path).unwrap();
        let mut backend = SqliteKeyValueStore::try_new(&conn).unwrap();
        backend.set("catalog", "not json at all").unwrap();
    }

    let conn = open_connection(&config).unwrap();
    let store = open_store(&conn, &config, &default_seed()).unwrap();
    assert_eq!(store.snapshot(), &default_seed());

    let backend = SqliteKeyValueStore::try_new(&conn).unwrap();
    let raw = backend.get("catalog").unwrap().unwrap();
    let reparsed: deptproto_core::Snapshot = serde_json::from_str(&raw).unwrap();
    assert_eq!(reparsed, default_seed());
}

#[test]
fn reset_overwrites_persisted_state() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::in_dir(dir.path());
    let conn = open_connection(&config).unwrap();
    let mut store = open_store(&conn, &config, &default_seed()).unwrap();

    store.delete_department(1).unwrap();
    store.reset(&default_seed()).unwrap();
    drop(store);

    let reopened = open_store(&conn, &config, &default_seed()).unwrap();
    assert_eq!(reopened.snapshot(), &default_seed());
}
