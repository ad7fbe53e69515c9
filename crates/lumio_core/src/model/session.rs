//! Local session flags.
//!
//! The identity provider owns the real session; these flags are a cache the
//! app reads when it does not defer to the provider.

use serde::{Deserialize, Serialize};

/// Snapshot of the three auth slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub token: Option<String>,
    pub email: Option<String>,
    pub is_new_user: bool,
}

impl AuthSession {
    /// Presence of a non-empty token is the only local signed-in signal.
    pub fn is_signed_in(&self) -> bool {
        self.token.as_deref().is_some_and(|token| !token.is_empty())
    }
}

/// Decodes the persisted new-user flag. Only the literal `"true"` counts.
pub fn parse_new_user_flag(value: Option<&str>) -> bool {
    value == Some("true")
}
