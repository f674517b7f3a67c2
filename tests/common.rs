use std::sync::Arc;

use notification_relay::{
    clients::memory::{InMemoryDedupeStore, RecordingEmailSender},
    config::Config,
    dispatcher::Dispatcher,
    models::message::{SnsEvent, SnsRecord},
};
use serde_json::json;

pub const FROM_EMAIL: &str = "no-reply@example.com";
pub const BASE_URL: &str = "https://api.example.com/validateEmail";
pub const TABLE: &str = "notification-dedupe";

pub fn test_config() -> Config {
    Config {
        from_email: Some(FROM_EMAIL.to_string()),
        verification_base_url: Some(BASE_URL.to_string()),
        dedupe_table_name: Some(TABLE.to_string()),
        ..Default::default()
    }
}

pub struct Harness {
    pub dispatcher: Dispatcher,
    pub store: Arc<InMemoryDedupeStore>,
    pub sender: Arc<RecordingEmailSender>,
}

pub fn harness_with(
    config: Config,
    store: Arc<InMemoryDedupeStore>,
    sender: Arc<RecordingEmailSender>,
) -> Harness {
    Harness {
        dispatcher: Dispatcher::new(config, store.clone(), sender.clone()),
        store,
        sender,
    }
}

pub fn harness() -> Harness {
    harness_with(
        test_config(),
        Arc::new(InMemoryDedupeStore::new()),
        Arc::new(RecordingEmailSender::new()),
    )
}

pub fn new_token() -> String {
    uuid::Uuid::new_v4().to_string()
}

pub fn notification(email: &str, token: &str) -> SnsRecord {
    SnsRecord::with_message(
        json!({
            "email": email,
            "token": token,
            "timestamp": "2025-11-13T01:23:45.000Z"
        })
        .to_string(),
    )
}

pub fn batch(records: Vec<SnsRecord>) -> SnsEvent {
    SnsEvent { records }
}
