//! Structured logging via `tracing`.
//!
//! The engine emits a `debug` span per refresh (master size, filter count) and
//! `debug`/`trace` events for filter registration, master replacement and each
//! applied rule. Library callers are free to install their own subscriber; the
//! CLI uses [`init_tracing`].
//!
//! # Configuration
//!
//! Level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` in [`Config`](crate::Config)
//! 3. Default: `"info"`

mod init;

pub use init::init_tracing;
