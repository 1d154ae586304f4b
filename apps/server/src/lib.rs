//! ipdesk HTTP server library.
//!
//! The binary in `main.rs` is a thin wrapper; everything lives here so the
//! integration tests can build the router against a scratch database.

pub mod api;
pub mod config;
pub mod error;
pub mod main_lib;

pub use main_lib::{build_state, init_tracing, AppState};
