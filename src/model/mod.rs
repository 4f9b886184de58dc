//! Domain types: errors, wire payloads, and structured log records.

pub mod error;
pub mod invocation;
pub mod record;

pub use error::AppError;
pub use invocation::{join_command, CommandEnvelope, InvokeOutcome, LogLocation};
pub use record::{parse_line, LogLine, LogRecord, Severity};
