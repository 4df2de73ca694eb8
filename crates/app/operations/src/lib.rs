//! Operations infrastructure for chains running the contract-account pipeline.
//!
//! - **Config**: YAML-based configuration with fail-fast validation
//! - **Observability**: `tracing` subscriber setup
//!
//! # Example
//!
//! ```no_run
//! use evolve_operations::{init_tracing_from_config, load_config};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("config.yaml")?;
//!     init_tracing_from_config(&config.observability)?;
//!
//!     let chain_id = &config.chain.chain_id;
//!     let params = config.abstract_account;
//!     println!("{chain_id}: {params:?}");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod errors;
pub mod observability;

pub use config::{load_config, load_config_from_str, ObservabilityConfig, PipelineConfig};
pub use errors::{ConfigError, LoggingError};
pub use observability::{init_tracing, init_tracing_from_config, parse_level, LogFormat};
