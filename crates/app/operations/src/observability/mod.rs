//! Observability infrastructure for the authentication pipeline.
//!
//! - **Logging**: structured JSON or pretty `tracing` output with `RUST_LOG` override

pub mod logging;

pub use logging::{init_tracing, init_tracing_from_config, parse_level, LogFormat};
