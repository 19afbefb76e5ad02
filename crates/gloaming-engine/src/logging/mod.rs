//! Logging setup.
//!
//! Everything logs through the `log` facade; this module installs
//! `env_logger` as the backend exactly once per process.

mod init;

pub use init::{default_filter, init_logging, LoggingConfig};
