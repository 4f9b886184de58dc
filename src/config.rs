//! Runtime configuration.
//!
//! Resolution precedence: built-in defaults, then `ELSA_DATA_*` environment
//! variables, then explicit CLI flags. The result is a single immutable
//! [`Config`] constructed once at startup and passed into the pipeline - no
//! process-wide mutable flag state.

use crate::model::join_command;

/// Default Cloud Map namespace for an Elsa Data deployment.
pub const DEFAULT_NAMESPACE: &str = "elsa-data";

/// Default Cloud Map service publishing the command function.
pub const DEFAULT_SERVICE: &str = "Command";

/// Environment override for the namespace.
pub const ENV_NAMESPACE: &str = "ELSA_DATA_NAMESPACE";

/// Environment override for the service name.
pub const ENV_SERVICE: &str = "ELSA_DATA_SERVICE";

/// Fully resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Cloud Map namespace to query.
    pub namespace: String,
    /// Cloud Map service name to query.
    pub service: String,
    /// The space-joined command string to send.
    pub command: String,
}

impl Config {
    /// Resolve configuration from optional CLI flags and the trailing command
    /// words.
    pub fn resolve(
        namespace_flag: Option<String>,
        service_flag: Option<String>,
        command_words: &[String],
    ) -> Self {
        Self {
            namespace: resolve_value(namespace_flag, ENV_NAMESPACE, DEFAULT_NAMESPACE),
            service: resolve_value(service_flag, ENV_SERVICE, DEFAULT_SERVICE),
            command: join_command(command_words),
        }
    }
}

/// Apply defaults -> env -> CLI for one value. Empty env vars are ignored.
fn resolve_value(flag: Option<String>, env_key: &str, default: &str) -> String {
    if let Some(value) = flag {
        return value;
    }
    if let Ok(value) = std::env::var(env_key) {
        if !value.is_empty() {
            return value;
        }
    }
    default.to_string()
}
