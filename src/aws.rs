//! AWS-backed implementations of the pipeline seams.
//!
//! This is the impure shell: one thin adapter per collaborator, mapping SDK
//! inputs/outputs to the domain types and SDK errors to error text. All
//! decision logic lives in the stage modules.
//!
//! Credentials and region come from the ambient AWS environment via the
//! standard provider chain.

use crate::discover::{InstanceAttributes, InstanceDirectory};
use crate::fetch::{LogEvent, LogPage, LogPages, PAGE_SIZE};
use crate::invoke::{CommandRunner, InvokeReply};
use crate::model::{AppError, LogLocation};
use async_trait::async_trait;
use aws_config::timeout::TimeoutConfig;
use aws_config::BehaviorVersion;
use aws_sdk_lambda::primitives::Blob;
use aws_sdk_lambda::types::InvocationType;
use std::time::Duration;

/// How long the invocation call may block while the remote command runs.
///
/// Admin commands can legitimately take minutes; if this elapses the
/// invocation fails and the tool terminates - there is no way to re-attach
/// to an in-flight command.
pub const INVOKE_TIMEOUT: Duration = Duration::from_secs(600);

/// Clients for the three AWS collaborators.
#[derive(Debug, Clone)]
pub struct AwsBackend {
    discovery: aws_sdk_servicediscovery::Client,
    lambda: aws_sdk_lambda::Client,
    logs: aws_sdk_cloudwatchlogs::Client,
}

impl AwsBackend {
    /// Build clients from the ambient AWS configuration.
    ///
    /// Only the Lambda client gets the long operation timeout; discovery and
    /// log retrieval keep the SDK defaults.
    pub async fn connect() -> Self {
        let base = aws_config::load_defaults(BehaviorVersion::latest()).await;

        let lambda_config = aws_sdk_lambda::config::Builder::from(&base)
            .timeout_config(
                TimeoutConfig::builder()
                    .operation_timeout(INVOKE_TIMEOUT)
                    .operation_attempt_timeout(INVOKE_TIMEOUT)
                    .read_timeout(INVOKE_TIMEOUT)
                    .build(),
            )
            .build();

        Self {
            discovery: aws_sdk_servicediscovery::Client::new(&base),
            lambda: aws_sdk_lambda::Client::from_conf(lambda_config),
            logs: aws_sdk_cloudwatchlogs::Client::new(&base),
        }
    }
}

#[async_trait]
impl InstanceDirectory for AwsBackend {
    async fn discover(
        &self,
        namespace: &str,
        service: &str,
    ) -> Result<Vec<InstanceAttributes>, AppError> {
        let output = self
            .discovery
            .discover_instances()
            .namespace_name(namespace)
            .service_name(service)
            .send()
            .await
            .map_err(|err| AppError::Discovery {
                message: error_chain(&err),
            })?;

        Ok(output
            .instances()
            .iter()
            .map(|instance| instance.attributes().cloned().unwrap_or_default())
            .collect())
    }
}

#[async_trait]
impl CommandRunner for AwsBackend {
    async fn invoke(&self, target: &str, payload: Vec<u8>) -> Result<InvokeReply, AppError> {
        let output = self
            .lambda
            .invoke()
            .function_name(target)
            .invocation_type(InvocationType::RequestResponse)
            .payload(Blob::new(payload))
            .send()
            .await
            .map_err(|err| AppError::Transport {
                message: error_chain(&err),
            })?;

        Ok(InvokeReply {
            status_code: output.status_code(),
            payload: output
                .payload()
                .map(|blob| blob.as_ref().to_vec())
                .unwrap_or_default(),
        })
    }
}

#[async_trait]
impl LogPages for AwsBackend {
    async fn next_page(
        &self,
        location: &LogLocation,
        token: Option<&str>,
    ) -> Result<LogPage, AppError> {
        let output = self
            .logs
            .get_log_events()
            .log_group_name(&location.log_group_name)
            .log_stream_name(&location.log_stream_name)
            .start_from_head(true)
            .limit(PAGE_SIZE)
            .set_next_token(token.map(str::to_owned))
            .send()
            .await
            .map_err(|err| AppError::Transport {
                message: error_chain(&err),
            })?;

        let events = output
            .events()
            .iter()
            .map(|event| LogEvent {
                message: event.message().unwrap_or_default().to_owned(),
                timestamp: event.timestamp(),
            })
            .collect();

        Ok(LogPage {
            events,
            next_token: output.next_forward_token().map(str::to_owned),
        })
    }
}

/// Flatten an error and its sources into one line of text.
///
/// SDK errors keep the interesting detail (service error code, message) in
/// the source chain; `to_string` alone would just say "service error".
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
