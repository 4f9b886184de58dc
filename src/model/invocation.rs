//! Wire types for the command invocation exchange.
//!
//! The request side is a single-field JSON envelope; the reply side is a
//! tagged union decoded strictly with serde rather than sifted out of a loose
//! key/value map, so a type mismatch surfaces as a decode error instead of a
//! silent zero value.

use crate::model::error::AppError;
use serde::{Deserialize, Serialize};

/// Join command-line words into the command string sent to the remote target.
///
/// Tokens are rejoined with exactly one space between them, in order. The
/// original shell quoting is not reconstructed - the remote handler sees
/// `restart service x`, never `restart "service x"`.
pub fn join_command<S: AsRef<str>>(words: &[S]) -> String {
    words
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ")
}

/// The JSON payload sent to the command function: `{"cmd": "..."}`.
///
/// Created per invocation and discarded after send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandEnvelope {
    /// The space-joined command string.
    pub cmd: String,
}

impl CommandEnvelope {
    /// Build the envelope from an already-joined command string.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            cmd: command.into(),
        }
    }
}

/// Where the remote handler wrote the command's log output.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LogLocation {
    /// CloudWatch log group name.
    #[serde(rename = "logGroupName")]
    pub log_group_name: String,
    /// CloudWatch log stream name within the group.
    #[serde(rename = "logStreamName")]
    pub log_stream_name: String,
}

/// Decoded invocation reply: exactly one variant per response, never both.
///
/// `Failure` is listed first so a reply carrying an `error` key takes the
/// error path even if log fields are also present.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum InvokeOutcome {
    /// The handler reported an application-level error for the command.
    Failure {
        /// Operator-facing error message.
        error: String,
    },
    /// The command ran; logs are at the named location.
    Logs(LogLocation),
}

impl InvokeOutcome {
    /// Decode a raw reply payload.
    ///
    /// A payload that is not JSON, or that matches neither variant (no
    /// `error`, and not both `logGroupName`/`logStreamName`), is a protocol
    /// violation.
    pub fn decode(payload: &[u8]) -> Result<Self, AppError> {
        serde_json::from_slice(payload).map_err(|err| AppError::Protocol {
            message: format!(
                "reply named neither an error nor a log location: {err}"
            ),
        })
    }
}
