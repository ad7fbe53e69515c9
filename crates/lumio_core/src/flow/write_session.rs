//! Journal write screen reducer with debounced autosave.
//!
//! # Invariants
//! - A save is emitted `AUTOSAVE_DEBOUNCE_MS` after the last edit, never
//!   earlier, and at most once per quiet period.
//! - Leaving the screen flushes a pending save immediately when the trimmed
//!   content is non-empty.
//! - Every save of one session reuses the same entry id and `created_at`.
//! - Autosave waits for `Loaded`; a stored entry found by the lookup is the
//!   identity every save uses, even when typing started first.

use crate::model::entry::JournalEntry;

/// Quiet period after the last keystroke before autosave fires.
pub const AUTOSAVE_DEBOUNCE_MS: i64 = 1_500;

/// How long the "Saved" badge stays visible after a save.
pub const SAVED_BADGE_MS: i64 = 1_500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePhase {
    /// Waiting for today's entry to be looked up.
    Loading,
    Editing,
    /// User navigated away; further events are ignored.
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteEvent {
    /// Result of looking up today's entry.
    Loaded(Option<JournalEntry>),
    Edited { text: String, now_ms: i64 },
    /// Timer tick; fires the debounced save when due.
    Tick { now_ms: i64 },
    /// Back navigation.
    Leave { now_ms: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteEffect {
    /// Persist this entry through `JournalStore::save_entry`.
    Save(JournalEntry),
}

#[derive(Debug, Clone)]
pub struct WriteSession {
    phase: WritePhase,
    content: String,
    entry: Option<JournalEntry>,
    loaded: bool,
    save_due_at: Option<i64>,
    last_saved_at: Option<i64>,
}

impl Default for WriteSession {
    fn default() -> Self {
        Self::new()
    }
}

impl WriteSession {
    pub fn new() -> Self {
        Self {
            phase: WritePhase::Loading,
            content: String::new(),
            entry: None,
            loaded: false,
            save_due_at: None,
            last_saved_at: None,
        }
    }

    pub fn phase(&self) -> WritePhase {
        self.phase
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Whether the user has typed anything (drives the prompt card fade).
    pub fn has_started_typing(&self) -> bool {
        !self.content.is_empty()
    }

    /// Whether an autosave is scheduled.
    pub fn has_pending_save(&self) -> bool {
        self.save_due_at.is_some()
    }

    /// Whether the "Saved" badge should be visible at `now_ms`.
    pub fn shows_saved_badge(&self, now_ms: i64) -> bool {
        self.last_saved_at
            .is_some_and(|saved_at| now_ms >= saved_at && now_ms - saved_at < SAVED_BADGE_MS)
    }

    /// Applies one event and returns the effect to run, if any.
    pub fn apply(&mut self, event: WriteEvent) -> Option<WriteEffect> {
        if self.phase == WritePhase::Closed {
            return None;
        }

        match event {
            WriteEvent::Loaded(found) => {
                self.loaded = true;
                if let Some(entry) = found {
                    // Typing may have started before the lookup finished:
                    // keep the typed text but adopt the stored identity.
                    if self.phase == WritePhase::Loading {
                        self.content = entry.content.clone();
                    }
                    self.entry = Some(entry);
                }
                self.phase = WritePhase::Editing;
                None
            }
            WriteEvent::Edited { text, now_ms } => {
                self.phase = WritePhase::Editing;
                self.content = text;
                self.save_due_at = Some(now_ms + AUTOSAVE_DEBOUNCE_MS);
                None
            }
            WriteEvent::Tick { now_ms } => match self.save_due_at {
                Some(due_at) if self.loaded && now_ms >= due_at => Some(self.emit_save(now_ms)),
                _ => None,
            },
            WriteEvent::Leave { now_ms } => {
                self.phase = WritePhase::Closed;
                if self.content.trim().is_empty() {
                    self.save_due_at = None;
                    return None;
                }
                Some(self.emit_save(now_ms))
            }
        }
    }

    fn emit_save(&mut self, now_ms: i64) -> WriteEffect {
        self.save_due_at = None;
        self.last_saved_at = Some(now_ms);
        let entry = match self.entry.as_mut() {
            Some(entry) => {
                entry.touch(self.content.clone(), now_ms);
                entry.clone()
            }
            None => {
                let entry = JournalEntry::new_at(self.content.clone(), now_ms);
                self.entry = Some(entry.clone());
                entry
            }
        };
        WriteEffect::Save(entry)
    }
}
