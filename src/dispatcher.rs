use std::sync::Arc;

use futures_util::future::join_all;
use tracing::{Instrument, debug, error, info, info_span, warn};

use crate::{
    clients::{DedupeStore, EmailSender},
    config::{Config, RelaySettings},
    models::{
        dedupe::DedupeRecord,
        email::EmailMessage,
        error::{ConfigError, RelayError},
        message::{NotificationMessage, SnsEvent, SnsRecord},
        response::{BatchResults, RecordOutcome},
        status::{InsertStatus, RecordState},
    },
};

/// Turns each notification record into at most one verification email.
///
/// The store and sender are built once per process and shared across
/// invocations; nothing else outlives a call to [`Dispatcher::process`].
pub struct Dispatcher {
    config: Config,
    store: Arc<dyn DedupeStore>,
    sender: Arc<dyn EmailSender>,
}

impl Dispatcher {
    pub fn new(config: Config, store: Arc<dyn DedupeStore>, sender: Arc<dyn EmailSender>) -> Self {
        Self {
            config,
            store,
            sender,
        }
    }

    /// Processes every record of the batch independently.
    ///
    /// Fails before touching any record when required configuration is
    /// missing. Otherwise returns one outcome per sent or failed record, in
    /// batch order; skipped records contribute nothing.
    pub async fn process(&self, event: SnsEvent) -> Result<BatchResults, ConfigError> {
        let settings = self.config.relay_settings().inspect_err(|e| {
            error!(error = %e, "Missing required configuration, aborting batch");
        })?;

        info!(records = event.records.len(), "Processing notification batch");

        let tasks = event.records.into_iter().map(|record| {
            let span = info_span!(
                "record",
                message_id = %record.message_id(),
                topic_arn = %record.topic_arn()
            );
            let settings = &settings;

            async move {
                match self.process_record(settings, &record).await {
                    Ok(state) => {
                        debug!(state = %state, "Record finished");
                        match state {
                            RecordState::Sent { email } => Some(RecordOutcome::Sent { email }),
                            _ => None,
                        }
                    }
                    Err(e) => {
                        error!(error = %e, "Failed to process record");
                        Some(RecordOutcome::Error {
                            error: e.to_string(),
                        })
                    }
                }
            }
            .instrument(span)
        });

        let results = join_all(tasks).await.into_iter().flatten().collect();

        Ok(BatchResults { results })
    }

    pub async fn process_record(
        &self,
        settings: &RelaySettings,
        record: &SnsRecord,
    ) -> Result<RecordState, RelayError> {
        let Some(body) = record.body() else {
            warn!("Record without SNS message, skipping");
            return Ok(RecordState::SkippedNoMessage);
        };

        let message: NotificationMessage = serde_json::from_str(body)?;

        let Some(payload) = message.into_payload() else {
            warn!(body, "Message missing email or token, skipping");
            return Ok(RecordState::SkippedInvalidPayload);
        };

        debug!(
            email = %payload.email,
            timestamp = ?payload.timestamp,
            "Parsed notification payload"
        );

        let dedupe_record = DedupeRecord::for_payload(&payload, settings.dedupe_key_strategy);

        match self
            .store
            .insert_if_absent(&settings.dedupe_table_name, &dedupe_record)
            .await?
        {
            InsertStatus::Inserted => {}
            InsertStatus::Duplicate => {
                info!(
                    message_key = %dedupe_record.message_key,
                    "Duplicate message detected, skipping email"
                );
                return Ok(RecordState::SkippedDuplicate);
            }
        }

        let email = EmailMessage::verification(
            &settings.from_email,
            &settings.verification_base_url,
            &payload,
        );

        let message_id = self.sender.send_email(&email).await?;

        info!(email = %payload.email, message_id = ?message_id, "Verification email sent");

        Ok(RecordState::Sent {
            email: payload.email,
        })
    }
}
