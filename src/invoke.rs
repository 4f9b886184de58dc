//! Synchronous command invocation.
//!
//! Builds the `{"cmd": ...}` envelope, submits it through the
//! [`CommandRunner`] seam, blocks until the remote command completes (this
//! may take minutes), and interprets the reply: an application-level error,
//! or the location of the command's logs.

use crate::model::{AppError, CommandEnvelope, InvokeOutcome, LogLocation};
use async_trait::async_trait;

/// HTTP status expected from a successful invocation.
pub const SUCCESS_STATUS: i32 = 200;

/// Raw reply from the invocation transport.
#[derive(Debug, Clone)]
pub struct InvokeReply {
    /// Transport-level status code.
    pub status_code: i32,
    /// Raw JSON reply body.
    pub payload: Vec<u8>,
}

/// Request/response invocation of a remote function.
#[async_trait]
pub trait CommandRunner {
    /// Invoke `target` with the given JSON payload and wait for its reply.
    async fn invoke(&self, target: &str, payload: Vec<u8>) -> Result<InvokeReply, AppError>;
}

/// Run one admin command against the resolved target.
///
/// A non-success status or undecodable reply is fatal; a reply carrying an
/// `error` key becomes [`AppError::CommandFailed`] without the log fields
/// ever being consulted.
pub async fn run_command<R>(
    runner: &R,
    target: &str,
    command: &str,
) -> Result<LogLocation, AppError>
where
    R: CommandRunner + Sync,
{
    let envelope = CommandEnvelope::new(command);
    let payload = serde_json::to_vec(&envelope).map_err(|err| AppError::Protocol {
        message: format!("failed to encode command envelope: {err}"),
    })?;

    let reply = runner.invoke(target, payload).await?;

    if reply.status_code != SUCCESS_STATUS {
        return Err(AppError::Transport {
            message: format!("command function returned status {}", reply.status_code),
        });
    }

    match InvokeOutcome::decode(&reply.payload)? {
        InvokeOutcome::Failure { error } => Err(AppError::CommandFailed { error }),
        InvokeOutcome::Logs(location) => Ok(location),
    }
}
