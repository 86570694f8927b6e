//! AWS SES transport.

use async_trait::async_trait;
use aws_sdk_sesv2::Client;
use aws_sdk_sesv2::error::DisplayErrorContext;
use aws_sdk_sesv2::types::{Body, Content, Destination, EmailContent, Message};
use tracing::debug;

use crate::{Email, MailError, Result, Transport};

/// [`Transport`] over AWS SES.
pub struct SesTransport {
    client: Client,
}

impl SesTransport {
    /// Create from an existing SES client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

fn content(data: &str) -> Result<Content> {
    Content::builder()
        .data(data)
        .charset("UTF-8")
        .build()
        .map_err(|e| MailError::Provider(e.to_string()))
}

#[async_trait]
impl Transport for SesTransport {
    async fn send(&self, email: &Email) -> Result<()> {
        email.validate()?;

        let from = email.from.as_ref().ok_or(MailError::MissingField("from"))?;

        debug!(to = ?email.to, subject = ?email.subject, "sending email via SES");

        let mut destination = Destination::builder();
        for addr in &email.to {
            destination = destination.to_addresses(addr);
        }

        let mut body = Body::builder();
        if let Some(html) = &email.html {
            body = body.html(content(html)?);
        }
        if let Some(text) = &email.text {
            body = body.text(content(text)?);
        }

        let message = Message::builder()
            .subject(content(email.subject.as_deref().unwrap_or_default())?)
            .body(body.build())
            .build();

        self.client
            .send_email()
            .from_email_address(from)
            .destination(destination.build())
            .content(EmailContent::builder().simple(message).build())
            .send()
            .await
            .map_err(|e| MailError::Provider(DisplayErrorContext(&e).to_string()))?;

        debug!("email sent via SES");
        Ok(())
    }
}
