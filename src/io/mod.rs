//! Input/Output handling for the CLI.
//!
//! This module provides:
//! - Unified output formatting (text, JSON)
//! - Consistent exit codes

pub mod envelope;
pub mod exit_code;
pub mod format;
pub mod output;

pub use envelope::{
    EntityType, Envelope, ErrorDetails, MessageType, Meta, ResultCode, SCHEMA_VERSION, Status,
};
pub use exit_code::ExitCode;
pub use format::OutputFormat;
