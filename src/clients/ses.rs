use async_trait::async_trait;
use aws_sdk_sesv2::{
    Client,
    error::DisplayErrorContext,
    types::{Body, Content, Destination, EmailContent, Message},
};
use tracing::{debug, info};

use crate::{
    clients::EmailSender,
    models::{email::EmailMessage, error::RelayError},
};

/// Plaintext mail through the SES v2 `SendEmail` API.
pub struct SesEmailSender {
    client: Client,
}

impl SesEmailSender {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

fn content(data: &str, part: &str) -> Result<Content, RelayError> {
    Content::builder()
        .data(data)
        .build()
        .map_err(|e| RelayError::Build(format!("Invalid email {}: {}", part, e)))
}

#[async_trait]
impl EmailSender for SesEmailSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<Option<String>, RelayError> {
        debug!(to = ?email.to, subject = %email.subject, "Sending email through SES");

        let destination = Destination::builder()
            .set_to_addresses(Some(email.to.clone()))
            .build();

        let message = Message::builder()
            .subject(content(&email.subject, "subject")?)
            .body(
                Body::builder()
                    .text(content(&email.text_body, "body")?)
                    .build(),
            )
            .build();

        let output = self
            .client
            .send_email()
            .from_email_address(&email.from)
            .destination(destination)
            .content(EmailContent::builder().simple(message).build())
            .send()
            .await
            .map_err(|e| RelayError::Send(DisplayErrorContext(&e).to_string()))?;

        info!(message_id = ?output.message_id(), "SES accepted email");

        Ok(output.message_id().map(str::to_string))
    }
}
