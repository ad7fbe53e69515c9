//! Core domain logic for Lumio.
//! This crate is the single source of truth for journal, session and
//! companion rules; the mobile shell only renders what it returns.

pub mod companion;
pub mod db;
pub mod flow;
pub mod journal;
pub mod kv;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use companion::conversation::{ChatMessage, ChatRole, Conversation, PROMPT_CHIPS};
pub use companion::novi::{
    contains_self_harm_keywords, detect_intent, generate_novi_response,
    generate_novi_response_with, response_pool, Intent, SAFE_SUPPORT_MESSAGE,
};
pub use flow::auth_flow::{AuthEvent, AuthFlow, AuthFlowError, AuthStep, UserKind};
pub use flow::write_session::{
    WriteEffect, WriteEvent, WritePhase, WriteSession, AUTOSAVE_DEBOUNCE_MS,
};
pub use journal::calendar::{
    calendar_grid, calendar_grid_today, days_in_month, first_day_offset, tap_day, CalendarCell,
    CalendarDay, CalendarMonth, CalendarTap, MonthCursor, WEEKDAY_LABELS,
};
pub use journal::grouping::{get_marked_dates, group_entries_by_local_date, GroupedEntry};
pub use kv::{KeyValueStore, KvError, KvResult, MemoryKvStore, SqliteKvStore};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::date_key::{
    date_key_for, date_key_for_millis, format_date_key, now_millis, parse_date_key,
    today_date_key,
};
pub use model::entry::{EntryId, EntryValidationError, JournalEntry};
pub use model::session::AuthSession;
pub use repo::journal_repo::{JournalRepository, KvJournalRepository};
pub use repo::session_repo::{KvSessionRepository, SessionRepository};
pub use repo::{RepoError, RepoResult};
pub use service::auth_service::AuthSessionStore;
pub use service::journal_service::JournalStore;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
