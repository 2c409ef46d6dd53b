//! Logger initialization.
//!
//! The crate logs through the `log` facade; `init_logging` installs the
//! `env_logger` backend for binaries that do not bring their own.

mod init;

pub use init::{init_logging, LoggingConfig};
