//! Screen flows expressed as explicit state machines.
//!
//! # Responsibility
//! - Hold the per-screen state that the UI would otherwise scatter across
//!   component callbacks.
//! - Emit persistence effects at well-defined transitions; the caller runs
//!   them against `crate::service`.
//!
//! # Invariants
//! - Reducers never perform I/O and take "now" as an argument.

pub mod auth_flow;
pub mod write_session;
