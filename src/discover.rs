//! Endpoint resolution via service discovery.
//!
//! The registry is consumed through the [`InstanceDirectory`] seam; the
//! exactly-one-instance rule and attribute extraction live in
//! [`select_target`], which is pure and tested directly.

use crate::config::Config;
use crate::model::AppError;
use async_trait::async_trait;
use std::collections::HashMap;

/// Attribute map exposed by one discovered service instance.
pub type InstanceAttributes = HashMap<String, String>;

/// The instance attribute naming the function to invoke.
pub const TARGET_ATTRIBUTE: &str = "lambdaArn";

/// A directory of live service instances, queryable by (namespace, service).
#[async_trait]
pub trait InstanceDirectory {
    /// List the live instances registered under the given pair.
    async fn discover(
        &self,
        namespace: &str,
        service: &str,
    ) -> Result<Vec<InstanceAttributes>, AppError>;
}

/// Resolve the invocation target for the configured (namespace, service).
///
/// No retry: any discovery failure is immediately terminal.
pub async fn resolve_target<D>(directory: &D, config: &Config) -> Result<String, AppError>
where
    D: InstanceDirectory + Sync,
{
    let instances = directory
        .discover(&config.namespace, &config.service)
        .await?;
    select_target(&instances)
}

/// Pick the invocation target out of a discovery response.
///
/// Succeeds only for exactly one instance carrying [`TARGET_ATTRIBUTE`];
/// the attribute value is returned unchanged.
pub fn select_target(instances: &[InstanceAttributes]) -> Result<String, AppError> {
    if instances.len() != 1 {
        return Err(AppError::InstanceCount {
            count: instances.len(),
        });
    }
    instances[0]
        .get(TARGET_ATTRIBUTE)
        .cloned()
        .ok_or(AppError::MissingTargetAttribute)
}
