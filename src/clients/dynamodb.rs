use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::{Client, error::DisplayErrorContext, types::AttributeValue};
use tracing::{debug, info};

use crate::{
    clients::DedupeStore,
    models::{dedupe::DedupeRecord, error::RelayError, status::InsertStatus},
};

pub const MESSAGE_KEY: &str = "message_key";
const KEY_ABSENT: &str = "attribute_not_exists(message_key)";

/// Dedupe markers in a DynamoDB table whose partition key is `message_key`.
pub struct DynamoDbDedupeStore {
    client: Client,
}

impl DynamoDbDedupeStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DedupeStore for DynamoDbDedupeStore {
    async fn insert_if_absent(
        &self,
        table_name: &str,
        record: &DedupeRecord,
    ) -> Result<InsertStatus, RelayError> {
        let item: HashMap<String, AttributeValue> = serde_dynamo::to_item(record)
            .map_err(|e| RelayError::Build(format!("Failed to encode dedupe record: {}", e)))?;

        debug!(table_name, message_key = %record.message_key, "Writing dedupe record");

        let result = self
            .client
            .put_item()
            .table_name(table_name)
            .set_item(Some(item))
            .condition_expression(KEY_ABSENT)
            .send()
            .await;

        match result {
            Ok(_) => {
                info!(message_key = %record.message_key, "Recorded message key");
                Ok(InsertStatus::Inserted)
            }
            Err(err) => {
                let duplicate = err
                    .as_service_error()
                    .map(|e| e.is_conditional_check_failed_exception())
                    .unwrap_or(false);

                if duplicate {
                    return Ok(InsertStatus::Duplicate);
                }

                Err(RelayError::Store(DisplayErrorContext(&err).to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use aws_sdk_dynamodb::{
        operation::put_item::{PutItemError, PutItemOutput},
        types::error::{ConditionalCheckFailedException, ResourceNotFoundException},
    };
    use aws_smithy_mocks::{mock, mock_client};

    use super::*;

    fn record() -> DedupeRecord {
        DedupeRecord {
            message_key: "user@example.com#tok".to_string(),
            created_at: "2025-11-13T01:23:45.000Z".to_string(),
        }
    }

    #[tokio::test]
    async fn test_put_is_conditional_on_key_absence() {
        let rule = mock!(aws_sdk_dynamodb::Client::put_item)
            .match_requests(|req| {
                let key = req
                    .item()
                    .and_then(|item| item.get(MESSAGE_KEY))
                    .and_then(|value| value.as_s().ok());

                req.table_name() == Some("dedupe")
                    && req.condition_expression() == Some(KEY_ABSENT)
                    && key.map(String::as_str) == Some("user@example.com#tok")
            })
            .then_output(|| PutItemOutput::builder().build());

        let store = DynamoDbDedupeStore::new(mock_client!(aws_sdk_dynamodb, [&rule]));

        let status = store.insert_if_absent("dedupe", &record()).await.unwrap();

        assert_eq!(status, InsertStatus::Inserted);
        assert_eq!(rule.num_calls(), 1);
    }

    #[tokio::test]
    async fn test_conditional_failure_is_duplicate() {
        let rule = mock!(aws_sdk_dynamodb::Client::put_item).then_error(|| {
            PutItemError::ConditionalCheckFailedException(
                ConditionalCheckFailedException::builder()
                    .message("The conditional request failed")
                    .build(),
            )
        });

        let store = DynamoDbDedupeStore::new(mock_client!(aws_sdk_dynamodb, [&rule]));

        let status = store.insert_if_absent("dedupe", &record()).await.unwrap();

        assert_eq!(status, InsertStatus::Duplicate);
    }

    #[tokio::test]
    async fn test_other_failures_are_store_errors() {
        let rule = mock!(aws_sdk_dynamodb::Client::put_item).then_error(|| {
            PutItemError::ResourceNotFoundException(
                ResourceNotFoundException::builder()
                    .message("Requested resource not found")
                    .build(),
            )
        });

        let store = DynamoDbDedupeStore::new(mock_client!(aws_sdk_dynamodb, [&rule]));

        let err = store
            .insert_if_absent("dedupe", &record())
            .await
            .unwrap_err();

        assert!(matches!(err, RelayError::Store(_)));
        assert!(err.to_string().contains("Requested resource not found"));
    }
}
