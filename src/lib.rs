// Library target for integration tests and criterion benchmarks.
// The binary entry point is main.rs; this file re-declares the module tree so
// that tests can import types via `sortviz::engine::*` / `sortviz::session::*`.
#![allow(dead_code)]

rust_i18n::i18n!("locales", fallback = "en");

pub mod config;
pub mod engine;
pub mod session;

// Private: only reachable through the binary
mod app;
mod event;
mod ui;
