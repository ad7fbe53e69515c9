use lumio_core::{KeyValueStore, KvError, SqliteKvStore};

#[test]
fn sqlite_store_set_get_remove() {
    let store = SqliteKvStore::open_in_memory().unwrap();

    assert_eq!(store.get_item("missing").unwrap(), None);
    store.set_items(&[("a", "1"), ("b", "2")]).unwrap();
    store.set_item("a", "3").unwrap();
    assert_eq!(store.get_item("a").unwrap().as_deref(), Some("3"));
    assert_eq!(store.get_item("b").unwrap().as_deref(), Some("2"));

    store.remove_items(&["a", "never-set"]).unwrap();
    assert_eq!(store.get_item("a").unwrap(), None);
    assert_eq!(store.get_item("b").unwrap().as_deref(), Some("2"));
}

#[test]
fn sqlite_update_item_skips_write_on_none_and_rolls_back_on_error() {
    let store = SqliteKvStore::open_in_memory().unwrap();
    store.set_item("k", "before").unwrap();

    store
        .update_item::<KvError, _>("k", |current| {
            assert_eq!(current.as_deref(), Some("before"));
            Ok(None)
        })
        .unwrap();
    assert_eq!(store.get_item("k").unwrap().as_deref(), Some("before"));

    let err = store
        .update_item::<KvError, _>("k", |_| Err(KvError::Unavailable("abort".to_string())))
        .unwrap_err();
    assert!(matches!(err, KvError::Unavailable(_)));
    assert_eq!(store.get_item("k").unwrap().as_deref(), Some("before"));

    store
        .update_item::<KvError, _>("k", |current| Ok(current.map(|v| format!("{v}+after"))))
        .unwrap();
    assert_eq!(store.get_item("k").unwrap().as_deref(), Some("before+after"));
}

#[test]
fn concurrent_updates_on_one_file_do_not_lose_writes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("counter.db");
    SqliteKvStore::open(&path).unwrap();

    let workers: Vec<_> = (0..4)
        .map(|_| {
            let path = path.clone();
            std::thread::spawn(move || {
                let store = SqliteKvStore::open(&path).unwrap();
                for _ in 0..25 {
                    store
                        .update_item::<KvError, _>("counter", |current| {
                            let value: u32 = current.and_then(|v| v.parse().ok()).unwrap_or(0);
                            Ok(Some((value + 1).to_string()))
                        })
                        .unwrap();
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    let store = SqliteKvStore::open(&path).unwrap();
    assert_eq!(store.get_item("counter").unwrap().as_deref(), Some("100"));
}
