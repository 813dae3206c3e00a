use async_trait::async_trait;
use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_dynamodb::config::retry::RetryConfig;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use tracing::debug;

use super::CredentialStore;
use crate::config::AuthorizerConfig;
use crate::error::{AuthorizerError, AuthorizerResult};

/// DynamoDB table keyed by token (`GetItem` per lookup).
#[derive(Debug, Clone)]
pub struct DynamoStore {
    client: Client,
    table_name: String,
    key_attribute: String,
}

impl DynamoStore {
    pub fn new(client: Client, config: &AuthorizerConfig) -> Self {
        Self {
            client,
            table_name: config.table_name.clone(),
            key_attribute: config.key_attribute.clone(),
        }
    }

    /// Build from a loaded SDK config with SDK-level retries disabled, so
    /// every invocation makes exactly one lookup attempt.
    pub fn from_sdk_config(sdk_config: &SdkConfig, config: &AuthorizerConfig) -> Self {
        let dynamo_config = aws_sdk_dynamodb::config::Builder::from(sdk_config)
            .retry_config(RetryConfig::disabled())
            .build();

        Self::new(Client::from_conf(dynamo_config), config)
    }

    /// Load credentials and region from the standard AWS environment chain.
    pub async fn from_env(config: &AuthorizerConfig) -> Self {
        let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        Self::from_sdk_config(&sdk_config, config)
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

#[async_trait]
impl CredentialStore for DynamoStore {
    async fn contains(&self, key: &str) -> AuthorizerResult<bool> {
        debug!(table = %self.table_name, "querying credential table");

        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(&self.key_attribute, AttributeValue::S(key.to_string()))
            .send()
            .await
            .map_err(|e| AuthorizerError::StoreUnavailable {
                message: format!(
                    "GetItem on table '{}' failed: {}",
                    self.table_name,
                    DisplayErrorContext(&e)
                ),
            })?;

        Ok(output.item().is_some())
    }

    fn name(&self) -> &str {
        "dynamodb"
    }
}
