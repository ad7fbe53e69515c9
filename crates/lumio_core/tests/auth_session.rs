use lumio_core::kv::keys;
use lumio_core::{
    AuthSession, AuthSessionStore, KeyValueStore, KvSessionRepository, MemoryKvStore,
    SqliteKvStore,
};

#[test]
fn save_and_clear_auth_roundtrip() {
    let kv = MemoryKvStore::new();
    let store = AuthSessionStore::new(KvSessionRepository::new(&kv));
    assert!(!store.is_logged_in());
    assert_eq!(store.session(), AuthSession::default());

    store.save_auth("tok_123", "sam@example.com", true);
    assert!(store.is_logged_in());
    assert_eq!(store.get_token().as_deref(), Some("tok_123"));
    assert_eq!(store.get_user_email().as_deref(), Some("sam@example.com"));
    assert!(store.is_new_user());
    assert_eq!(kv.get_item(keys::IS_NEW_USER).unwrap().as_deref(), Some("true"));

    store.save_auth("tok_456", "sam@example.com", false);
    assert!(!store.is_new_user());
    assert_eq!(store.session().token.as_deref(), Some("tok_456"));

    store.clear_auth();
    assert!(!store.is_logged_in());
    assert_eq!(store.get_user_email(), None);
    assert!(!store.is_new_user());
    assert!(kv.is_empty());
}

#[test]
fn empty_token_is_not_a_session() {
    let store = AuthSessionStore::new(KvSessionRepository::new(MemoryKvStore::new()));
    store.save_auth("", "sam@example.com", false);
    assert!(!store.is_logged_in());
    assert!(!store.session().is_signed_in());
}

#[test]
fn new_user_flag_only_accepts_literal_true() {
    let kv = MemoryKvStore::new();
    let store = AuthSessionStore::new(KvSessionRepository::new(&kv));
    for (raw, expected) in [("true", true), ("TRUE", false), ("1", false), ("false", false)] {
        kv.set_item(keys::IS_NEW_USER, raw).unwrap();
        assert_eq!(store.is_new_user(), expected, "raw flag {raw}");
    }
}

#[test]
fn session_survives_reopen_of_sqlite_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("auth.db");
    {
        let store = AuthSessionStore::new(KvSessionRepository::new(
            SqliteKvStore::open(&path).unwrap(),
        ));
        store.save_auth("tok", "a@b.co", false);
    }

    let store =
        AuthSessionStore::new(KvSessionRepository::new(SqliteKvStore::open(&path).unwrap()));
    assert!(store.is_logged_in());
    assert_eq!(store.get_user_email().as_deref(), Some("a@b.co"));
}
