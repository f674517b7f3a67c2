use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region, SdkConfig};

use crate::{
    config::Config,
    models::{dedupe::DedupeRecord, email::EmailMessage, error::RelayError, status::InsertStatus},
};

pub mod dynamodb;
pub mod memory;
pub mod ses;

/// Key-value store holding one marker per processed (email, token) pair.
#[async_trait]
pub trait DedupeStore: Send + Sync {
    /// Writes `record` only if its `message_key` is absent. An existing key
    /// yields `InsertStatus::Duplicate`; the stored row is never overwritten.
    async fn insert_if_absent(
        &self,
        table_name: &str,
        record: &DedupeRecord,
    ) -> Result<InsertStatus, RelayError>;
}

/// Transactional mail provider.
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Returns the provider's message id when it reports one.
    async fn send_email(&self, email: &EmailMessage) -> Result<Option<String>, RelayError>;
}

/// Shared AWS configuration for the DynamoDB and SES clients.
///
/// `AWS_ENDPOINT_URL` points both clients at a local emulator.
pub async fn load_aws_config(config: &Config) -> SdkConfig {
    let mut loader =
        aws_config::defaults(BehaviorVersion::latest()).region(Region::new(config.region()));

    if let Some(endpoint) = config.aws_endpoint_url.as_deref().filter(|e| !e.is_empty()) {
        loader = loader.endpoint_url(endpoint);
    }

    loader.load().await
}
