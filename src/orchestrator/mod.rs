//! Service-call orchestration.
//!
//! Owns the API client and the session lifecycle, consumes commands from
//! presentation layers, and emits events back. One request is in flight per
//! user action; there is no retry, de-duplication, or cancellation.

mod controller;

pub(crate) use controller::{run_controller, UiCommand};
