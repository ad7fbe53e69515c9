//! Novi, the scripted chat companion.
//!
//! # Responsibility
//! - Classify a message into a coarse intent and pick a canned reply.
//! - Model the chat transcript and the companion's "typing" delay.
//!
//! # Invariants
//! - The self-harm safety message overrides every other rule.
//! - Classification only looks at the current message, never history.

pub mod conversation;
pub mod novi;
