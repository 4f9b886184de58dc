//! Error types for the Elsa Data administration CLI.
//!
//! The taxonomy mirrors the tool's failure classes:
//!
//! - [`AppError::Discovery`] / [`AppError::InstanceCount`] /
//!   [`AppError::MissingTargetAttribute`] - configuration/discovery failures
//! - [`AppError::Transport`] - the invocation call itself failed or returned a
//!   non-success status
//! - [`AppError::Protocol`] - the invocation reply could not be decoded, or
//!   was missing the fields we require
//! - [`AppError::CommandFailed`] - the remote instance explicitly reported an
//!   error for the command; the message is meaningful to the operator, not a
//!   tool-internal failure
//!
//! Every variant is fatal and maps to exit code 1. Log pagination errors are
//! deliberately *not* represented here: they are logged and swallowed inside
//! the fetch loop, because the command outcome is already known by then.

use thiserror::Error;

/// Top-level application error. All variants terminate the run.
///
/// AWS SDK error detail is captured as `String` at the shell boundary rather
/// than carrying SDK error state through the application.
#[derive(Debug, Error)]
pub enum AppError {
    /// The service discovery query itself failed.
    #[error("failed to discover instances: {message}")]
    Discovery {
        /// Error text from the discovery call.
        message: String,
    },

    /// Discovery returned something other than exactly one instance.
    ///
    /// Zero instances means the deployment is not registered; more than one
    /// means the tool cannot know which command function to invoke. Either
    /// way we abort rather than guess.
    #[error(
        "discovered {count} instances in the service registry - exactly one is required\n  \
         Hint: check the --namespace and --service values match the deployment"
    )]
    InstanceCount {
        /// Number of instances the registry returned.
        count: usize,
    },

    /// The single discovered instance carried no invocation target attribute.
    #[error("the discovered service instance has no lambdaArn attribute")]
    MissingTargetAttribute,

    /// The invocation transport failed or returned a non-success status.
    #[error("failed to invoke the command function: {message}")]
    Transport {
        /// Error text from the invocation call or status description.
        message: String,
    },

    /// The invocation reply violated the expected wire contract.
    ///
    /// Covers both undecodable JSON and a "successful" reply that names
    /// neither an error nor a log location - there is no fallback path for
    /// "the command apparently ran but we don't know where the logs are".
    #[error("unexpected reply from the command function: {message}")]
    Protocol {
        /// Description of the contract violation.
        message: String,
    },

    /// The remote instance reported an application-level error.
    ///
    /// Printed verbatim: the text is addressed to whoever ran the command.
    #[error("{error}")]
    CommandFailed {
        /// The error message returned by the remote command handler.
        error: String,
    },
}
