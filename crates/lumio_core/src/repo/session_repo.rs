//! Auth session flags repository.
//!
//! # Invariants
//! - Token, email and new-user flag are written and removed together.
//! - The flag is persisted as the strings `"true"` / `"false"`.

use crate::kv::{keys, KeyValueStore};
use crate::model::session::{parse_new_user_flag, AuthSession};
use crate::repo::RepoResult;

const SESSION_KEYS: [&str; 3] = [keys::AUTH_TOKEN, keys::USER_EMAIL, keys::IS_NEW_USER];

/// Repository interface for the local session cache.
pub trait SessionRepository {
    fn save_auth(&self, token: &str, email: &str, is_new_user: bool) -> RepoResult<()>;
    fn get_token(&self) -> RepoResult<Option<String>>;
    fn get_user_email(&self) -> RepoResult<Option<String>>;
    fn get_new_user_flag(&self) -> RepoResult<bool>;
    fn clear_auth(&self) -> RepoResult<()>;

    /// Reads all three slots.
    fn load_session(&self) -> RepoResult<AuthSession> {
        Ok(AuthSession {
            token: self.get_token()?,
            email: self.get_user_email()?,
            is_new_user: self.get_new_user_flag()?,
        })
    }
}

/// Session repository backed by any `KeyValueStore`.
pub struct KvSessionRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> KvSessionRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: KeyValueStore> SessionRepository for KvSessionRepository<S> {
    fn save_auth(&self, token: &str, email: &str, is_new_user: bool) -> RepoResult<()> {
        let flag = if is_new_user { "true" } else { "false" };
        self.store.set_items(&[
            (keys::AUTH_TOKEN, token),
            (keys::USER_EMAIL, email),
            (keys::IS_NEW_USER, flag),
        ])?;
        Ok(())
    }

    fn get_token(&self) -> RepoResult<Option<String>> {
        Ok(self.store.get_item(keys::AUTH_TOKEN)?)
    }

    fn get_user_email(&self) -> RepoResult<Option<String>> {
        Ok(self.store.get_item(keys::USER_EMAIL)?)
    }

    fn get_new_user_flag(&self) -> RepoResult<bool> {
        let raw = self.store.get_item(keys::IS_NEW_USER)?;
        Ok(parse_new_user_flag(raw.as_deref()))
    }

    fn clear_auth(&self) -> RepoResult<()> {
        self.store.remove_items(&SESSION_KEYS)?;
        Ok(())
    }
}
