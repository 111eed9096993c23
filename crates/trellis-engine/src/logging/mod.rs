//! Logger initialization.
//!
//! Library code only talks to the `log` facade; hosts pick the backend by
//! calling [`init_logging`] early in `main`.

mod init;

pub use init::{init_logging, LoggingConfig};
