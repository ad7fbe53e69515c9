//! Flutter-facing bindings for `lumio_core`.

pub mod api;
