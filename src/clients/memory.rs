//! In-process collaborators for tests and local runs.

use std::{
    collections::HashMap,
    sync::{
        Mutex, PoisonError,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;

use crate::{
    clients::{DedupeStore, EmailSender},
    models::{
        dedupe::DedupeRecord, email::EmailMessage, error::RelayError, status::InsertStatus,
    },
};

/// Dedupe markers keyed by `(table, message_key)`.
#[derive(Debug, Default)]
pub struct InMemoryDedupeStore {
    records: Mutex<HashMap<(String, String), DedupeRecord>>,
    put_attempts: AtomicUsize,
    failure: Option<String>,
}

impl InMemoryDedupeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every write fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn put_attempts(&self) -> usize {
        self.put_attempts.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, table_name: &str, message_key: &str) -> Option<DedupeRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(table_name.to_string(), message_key.to_string()))
            .cloned()
    }
}

#[async_trait]
impl DedupeStore for InMemoryDedupeStore {
    async fn insert_if_absent(
        &self,
        table_name: &str,
        record: &DedupeRecord,
    ) -> Result<InsertStatus, RelayError> {
        self.put_attempts.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = &self.failure {
            return Err(RelayError::Store(message.clone()));
        }

        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        let key = (table_name.to_string(), record.message_key.clone());

        if records.contains_key(&key) {
            return Ok(InsertStatus::Duplicate);
        }

        records.insert(key, record.clone());
        Ok(InsertStatus::Inserted)
    }
}

/// Keeps every email it is asked to send.
#[derive(Debug, Default)]
pub struct RecordingEmailSender {
    sent: Mutex<Vec<EmailMessage>>,
    send_attempts: AtomicUsize,
    failure: Option<String>,
}

impl RecordingEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sender whose every call fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn send_attempts(&self) -> usize {
        self.send_attempts.load(Ordering::SeqCst)
    }

    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl EmailSender for RecordingEmailSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<Option<String>, RelayError> {
        let attempt = self.send_attempts.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = &self.failure {
            return Err(RelayError::Send(message.clone()));
        }

        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(email.clone());

        Ok(Some(format!("local-{}", attempt)))
    }
}
