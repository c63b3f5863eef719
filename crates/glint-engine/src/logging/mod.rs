//! Logging utilities.
//!
//! Centralizes logger initialization. Everything else in the crate logs
//! through the standard `log` facade.

mod init;

pub use init::{LoggingConfig, init_logging};
