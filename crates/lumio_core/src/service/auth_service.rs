//! Local session cache facade.
//!
//! No validation, expiry or refresh: the identity provider is the source of
//! truth and these flags only mirror it.

use crate::model::session::AuthSession;
use crate::repo::session_repo::SessionRepository;
use log::{error, info};

/// Session flags facade over a repository implementation.
pub struct AuthSessionStore<R: SessionRepository> {
    repo: R,
}

impl<R: SessionRepository> AuthSessionStore<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Presence of a non-empty token.
    pub fn is_logged_in(&self) -> bool {
        self.get_token().is_some_and(|token| !token.is_empty())
    }

    pub fn get_token(&self) -> Option<String> {
        self.repo.get_token().unwrap_or_else(|err| {
            error!("event=auth_token_load module=auth status=error error={err}");
            None
        })
    }

    /// Overwrites token, email and new-user flag together.
    pub fn save_auth(&self, token: &str, email: &str, is_new_user: bool) {
        match self.repo.save_auth(token, email, is_new_user) {
            Ok(()) => info!("event=auth_save module=auth status=ok is_new_user={is_new_user}"),
            Err(err) => error!("event=auth_save module=auth status=error error={err}"),
        }
    }

    pub fn get_user_email(&self) -> Option<String> {
        self.repo.get_user_email().unwrap_or_else(|err| {
            error!("event=auth_email_load module=auth status=error error={err}");
            None
        })
    }

    pub fn is_new_user(&self) -> bool {
        self.repo.get_new_user_flag().unwrap_or_else(|err| {
            error!("event=auth_flag_load module=auth status=error error={err}");
            false
        })
    }

    /// Snapshot of all three flags; empty session on failure.
    pub fn session(&self) -> AuthSession {
        self.repo.load_session().unwrap_or_else(|err| {
            error!("event=auth_load module=auth status=error error={err}");
            AuthSession::default()
        })
    }

    /// Removes token, email and new-user flag together.
    pub fn clear_auth(&self) {
        match self.repo.clear_auth() {
            Ok(()) => info!("event=auth_clear module=auth status=ok"),
            Err(err) => error!("event=auth_clear module=auth status=error error={err}"),
        }
    }
}
