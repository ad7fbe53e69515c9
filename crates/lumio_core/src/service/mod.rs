//! Use-case facades consumed by screens.
//!
//! # Responsibility
//! - Expose the journal and session operations with UI-facing semantics.
//! - Catch storage failures at this boundary, log them, and hand back safe
//!   defaults so a broken slot never takes a screen down.
//!
//! # Invariants
//! - Facades never log journal content or tokens; only ids, keys and counts.

pub mod auth_service;
pub mod journal_service;
