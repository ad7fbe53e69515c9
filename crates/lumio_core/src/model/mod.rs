//! Domain model for journal entries and local session flags.
//!
//! # Responsibility
//! - Define the records persisted in key-value slots.
//! - Own the canonical `YYYY-MM-DD` date key format.
//!
//! # Invariants
//! - An entry's `date` is the local calendar day of its `created_at`.
//! - Date keys are zero-padded, so lexicographic order is chronological.

pub mod date_key;
pub mod entry;
pub mod session;
