//! Pure journal view helpers.
//!
//! # Responsibility
//! - Turn the flat entry list into date buckets and calendar markers.
//! - Lay out month grids and format dates/snippets for display.
//!
//! # Invariants
//! - Every function here is total and side-effect free; "now" is always a
//!   parameter, with `Local` only used by thin convenience wrappers.

pub mod calendar;
pub mod format;
pub mod grouping;
