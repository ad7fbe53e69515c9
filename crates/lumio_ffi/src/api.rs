//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Keep error semantics simple for UI integration: envelopes carry `ok`
//!   plus a human-readable message instead of typed errors.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every call opens its own connection; SQLite serializes writers.
//! - Journal content and auth tokens are never written to logs.

use lumio_core::journal::format::format_day_header;
use lumio_core::{
    calendar_grid_today, core_version as core_version_inner, generate_novi_response,
    init_logging as init_logging_inner, ping as ping_inner, AuthSessionStore, CalendarCell,
    JournalEntry, JournalRepository, JournalStore, KvJournalRepository, KvSessionRepository,
    MonthCursor, SqliteKvStore,
};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

const DB_FILE_NAME: &str = "lumio_core.sqlite3";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Reconfiguration attempts with different level or directory return error.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Journal entry as seen by the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalEntryItem {
    pub id: String,
    pub content: String,
    /// Local date key `YYYY-MM-DD`.
    pub date: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<JournalEntry> for JournalEntryItem {
    fn from(entry: JournalEntry) -> Self {
        Self {
            id: entry.id,
            content: entry.content,
            date: entry.date,
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        }
    }
}

/// Action envelope for journal writes and deletes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Saved entry, when the action produced one.
    pub entry: Option<JournalEntryItem>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl JournalActionResponse {
    fn success(message: impl Into<String>, entry: Option<JournalEntryItem>) -> Self {
        Self {
            ok: true,
            entry,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            entry: None,
            message: message.into(),
        }
    }
}

/// One day section of the history list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalDayGroup {
    pub date: String,
    /// Display header such as `Wed, Jan 10`.
    pub header: String,
    pub entries: Vec<JournalEntryItem>,
}

/// History list envelope; empty on failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalListResponse {
    pub groups: Vec<JournalDayGroup>,
    pub message: String,
}

/// One real day cell of the month grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDayItem {
    pub day: u32,
    pub date_key: String,
    pub has_entry: bool,
    pub is_today: bool,
    pub is_selected: bool,
}

/// Month grid envelope. `days` holds only real days; the shell pads
/// `first_day_offset` blank cells before day 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarMonthResponse {
    pub year: i32,
    pub month0: u32,
    /// Header such as `January 2024`.
    pub label: String,
    pub first_day_offset: u32,
    pub days_in_month: u32,
    pub days: Vec<CalendarDayItem>,
    pub message: String,
}

/// Local session flags snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthStatusResponse {
    pub logged_in: bool,
    pub email: Option<String>,
    pub is_new_user: bool,
}

/// Saves `content` as today's entry, updating it when one already exists.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Blank content is rejected without touching storage.
#[flutter_rust_bridge::frb(sync)]
pub fn journal_save_today(content: String) -> JournalActionResponse {
    save_today_at(&resolve_db_path(), content)
}

/// Lists every entry grouped by local date, newest day first.
#[flutter_rust_bridge::frb(sync)]
pub fn journal_list_grouped() -> JournalListResponse {
    list_grouped_at(&resolve_db_path())
}

/// Looks up the entry written on `date_key` (`YYYY-MM-DD`).
#[flutter_rust_bridge::frb(sync)]
pub fn journal_get_by_date(date_key: String) -> Option<JournalEntryItem> {
    let store = open_journal(&resolve_db_path()).ok()?;
    store
        .get_entry_by_date(date_key.trim())
        .map(JournalEntryItem::from)
}

/// Deletes an entry by id. Unknown ids succeed with a "not found" message.
#[flutter_rust_bridge::frb(sync)]
pub fn journal_delete(id: String) -> JournalActionResponse {
    delete_at(&resolve_db_path(), id)
}

/// Computes the month grid for `year`/`month0` with entry markers.
///
/// `month0` outside `0..=11` rolls over into neighbouring years.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_month(year: i32, month0: u32, selected: Option<String>) -> CalendarMonthResponse {
    calendar_month_at(&resolve_db_path(), year, month0, selected)
}

/// Produces the companion's reply to one user message.
#[flutter_rust_bridge::frb(sync)]
pub fn novi_reply(text: String) -> String {
    generate_novi_response(&text)
}

/// Caches the identity provider's session locally.
#[flutter_rust_bridge::frb(sync)]
pub fn auth_save(token: String, email: String, is_new_user: bool) -> String {
    match open_session(&resolve_db_path()) {
        Ok(store) => {
            store.save_auth(token.as_str(), email.trim(), is_new_user);
            String::new()
        }
        Err(err) => err,
    }
}

/// Reads the cached session flags; signed-out on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn auth_status() -> AuthStatusResponse {
    auth_status_at(&resolve_db_path())
}

/// Clears the cached session. Returns empty string on success.
#[flutter_rust_bridge::frb(sync)]
pub fn auth_clear() -> String {
    match open_session(&resolve_db_path()) {
        Ok(store) => {
            store.clear_auth();
            String::new()
        }
        Err(err) => err,
    }
}

fn save_today_at(db_path: &Path, content: String) -> JournalActionResponse {
    if content.trim().is_empty() {
        return JournalActionResponse::failure("Nothing to save yet.");
    }
    let store = match open_journal(db_path) {
        Ok(store) => store,
        Err(err) => return JournalActionResponse::failure(err),
    };

    let entry = match store.get_today_entry() {
        Some(mut existing) => {
            existing.touch(content, lumio_core::now_millis());
            existing
        }
        None => JournalEntry::new(content),
    };

    match store.repository().save_entry(&entry) {
        Ok(()) => JournalActionResponse::success("Saved.", Some(entry.into())),
        Err(err) => JournalActionResponse::failure(format!("journal_save_today failed: {err}")),
    }
}

fn list_grouped_at(db_path: &Path) -> JournalListResponse {
    let store = match open_journal(db_path) {
        Ok(store) => store,
        Err(err) => {
            return JournalListResponse {
                groups: Vec::new(),
                message: err,
            }
        }
    };

    let groups = store
        .grouped_entries()
        .into_iter()
        .map(|group| JournalDayGroup {
            header: format_day_header(&group.date),
            date: group.date,
            entries: group
                .entries
                .into_iter()
                .map(JournalEntryItem::from)
                .collect(),
        })
        .collect::<Vec<_>>();
    let message = if groups.is_empty() {
        "No entries yet.".to_string()
    } else {
        format!("{} day(s) with entries.", groups.len())
    };
    JournalListResponse { groups, message }
}

fn delete_at(db_path: &Path, id: String) -> JournalActionResponse {
    let store = match open_journal(db_path) {
        Ok(store) => store,
        Err(err) => return JournalActionResponse::failure(err),
    };
    match store.repository().delete_entry(id.trim()) {
        Ok(true) => JournalActionResponse::success("Deleted.", None),
        Ok(false) => JournalActionResponse::success("Entry not found.", None),
        Err(err) => JournalActionResponse::failure(format!("journal_delete failed: {err}")),
    }
}

fn calendar_month_at(
    db_path: &Path,
    year: i32,
    month0: u32,
    selected: Option<String>,
) -> CalendarMonthResponse {
    let cursor = MonthCursor::new(year, month0);
    let (marked, message) = match open_journal(db_path) {
        Ok(store) => (store.marked_dates(), String::new()),
        Err(err) => (Default::default(), err),
    };

    let month = calendar_grid_today(cursor, &marked, selected.as_deref());
    let days = month
        .cells
        .iter()
        .filter_map(CalendarCell::as_day)
        .map(|day| CalendarDayItem {
            day: day.day,
            date_key: day.date_key.clone(),
            has_entry: day.has_entry,
            is_today: day.is_today,
            is_selected: day.is_selected,
        })
        .collect();

    CalendarMonthResponse {
        year: month.cursor.year,
        month0: month.cursor.month0,
        label: month.cursor.label(),
        first_day_offset: month.first_day_offset,
        days_in_month: month.days_in_month,
        days,
        message,
    }
}

fn auth_status_at(db_path: &Path) -> AuthStatusResponse {
    match open_session(db_path) {
        Ok(store) => {
            let session = store.session();
            AuthStatusResponse {
                logged_in: session.is_signed_in(),
                email: session.email,
                is_new_user: session.is_new_user,
            }
        }
        Err(_) => AuthStatusResponse {
            logged_in: false,
            email: None,
            is_new_user: false,
        },
    }
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("LUMIO_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn open_store(db_path: &Path) -> Result<SqliteKvStore, String> {
    SqliteKvStore::open(db_path).map_err(|err| {
        log::error!("event=ffi_db_open module=ffi status=error error={err}");
        format!("journal DB open failed: {err}")
    })
}

type SqliteJournal = JournalStore<KvJournalRepository<SqliteKvStore>>;
type SqliteSession = AuthSessionStore<KvSessionRepository<SqliteKvStore>>;

fn open_journal(db_path: &Path) -> Result<SqliteJournal, String> {
    Ok(JournalStore::new(KvJournalRepository::new(open_store(db_path)?)))
}

fn open_session(db_path: &Path) -> Result<SqliteSession, String> {
    Ok(AuthSessionStore::new(KvSessionRepository::new(open_store(db_path)?)))
}
