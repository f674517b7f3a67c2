use std::sync::Arc;

use anyhow::{Error, Result, anyhow};
use notification_relay::{
    api::run_handler,
    clients::{dynamodb::DynamoDbDedupeStore, load_aws_config, ses::SesEmailSender},
    config::Config,
    dispatcher::Dispatcher,
    observability::init_tracing,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    let config = Config::load()?;
    let aws_config = load_aws_config(&config).await;

    let store = Arc::new(DynamoDbDedupeStore::new(aws_sdk_dynamodb::Client::new(
        &aws_config,
    )));
    let sender = Arc::new(SesEmailSender::new(aws_sdk_sesv2::Client::new(&aws_config)));

    info!(region = %config.region(), "Notification relay initialized");

    run_handler(Dispatcher::new(config, store, sender))
        .await
        .map_err(|e| anyhow!("Lambda runtime exited: {}", e))
}
