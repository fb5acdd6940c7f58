//! Mail transport for outgoing request notifications

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox, Message},
    transport::smtp::authentication::Credentials,
    Address, SmtpTransport, Transport,
};
use thiserror::Error;

use crate::{
    config::EmailConfig,
    error::{AppError, AppResult},
};

/// A fault raised by the mail transport itself
#[derive(Error, Debug)]
#[error("mail transport failure: {0}")]
pub struct TransportError(pub String);

/// Name and address of a message participant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub name: Option<String>,
    pub address: String,
}

impl Contact {
    pub fn new(name: Option<String>, address: impl Into<String>) -> Self {
        Self {
            name,
            address: address.into(),
        }
    }

    fn to_mailbox(&self) -> Result<Mailbox, TransportError> {
        let address: Address = self
            .address
            .trim()
            .parse()
            .map_err(|e| TransportError(format!("Invalid address {}: {}", self.address, e)))?;
        Ok(Mailbox::new(self.name.clone(), address))
    }
}

/// A fully formatted HTML message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub subject: String,
    pub from: Contact,
    pub to: Contact,
    pub cc: Vec<Contact>,
    pub html_body: String,
}

impl OutgoingEmail {
    fn to_message(&self) -> Result<Message, TransportError> {
        let mut builder = Message::builder()
            .from(self.from.to_mailbox()?)
            .to(self.to.to_mailbox()?)
            .subject(self.subject.clone())
            .header(ContentType::TEXT_HTML);

        for cc in &self.cc {
            builder = builder.cc(cc.to_mailbox()?);
        }

        builder
            .body(self.html_body.clone())
            .map_err(|e| TransportError(format!("Failed to build email: {}", e)))
    }
}

/// Delivers messages.
///
/// `Ok(false)` means the server was reached but refused the message;
/// `Err` is reserved for connection, TLS and I/O faults.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<bool, TransportError>;
}

/// SMTP delivery through lettre
#[derive(Clone)]
pub struct SmtpMailer {
    transport: SmtpTransport,
}

impl SmtpMailer {
    pub fn new(config: &EmailConfig) -> AppResult<Self> {
        let builder = if config.smtp_use_tls {
            // Use STARTTLS for secure connection
            SmtpTransport::starttls_relay(&config.smtp_host)
                .map_err(|e| AppError::Config(format!("Failed to create SMTP transport: {}", e)))?
        } else {
            SmtpTransport::builder_dangerous(&config.smtp_host)
        }
        .port(config.smtp_port);

        let builder = if let (Some(username), Some(password)) =
            (&config.smtp_username, &config.smtp_password)
        {
            builder.credentials(Credentials::new(username.clone(), password.clone()))
        } else {
            builder
        };

        Ok(Self {
            transport: builder.build(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<bool, TransportError> {
        let message = email.to_message()?;
        let transport = self.transport.clone();

        // lettre's SMTP transport blocks, keep it off the async workers
        let result = tokio::task::spawn_blocking(move || transport.send(&message))
            .await
            .map_err(|e| TransportError(format!("Mail task failed: {}", e)))?;

        match result {
            Ok(response) => Ok(response.is_positive()),
            // The server answered with a 4xx or 5xx reply
            Err(e) if e.is_permanent() || e.is_transient() => {
                tracing::warn!("SMTP server rejected message: {}", e);
                Ok(false)
            }
            Err(e) => Err(TransportError(e.to_string())),
        }
    }
}
