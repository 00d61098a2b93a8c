// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Best-effort delivery.
//!
//! Sending never fails the caller and never retries: the outcome is a
//! [`Delivery`] carrying a flag and a diagnostic message.

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

use crate::config::EmailConfig;
use crate::error::NotifyError;
use crate::message::Message;

/// The outcome of one send attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub delivered: bool,
    pub message: String,
}

impl Delivery {
    fn sent(recipients: usize) -> Self {
        Self {
            delivered: true,
            message: format!("sent to {recipients} recipient(s)"),
        }
    }

    fn failed(error: &NotifyError) -> Self {
        Self {
            delivered: false,
            message: error.to_string(),
        }
    }
}

/// Shared record of messages "sent" by a [`Notifier::Memory`].
pub type Outbox = Arc<Mutex<Vec<Message>>>;

/// An SMTP relay with its envelope addresses.
#[derive(Clone)]
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Vec<Mailbox>,
}

impl std::fmt::Debug for SmtpNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpNotifier")
            .field("from", &self.from)
            .field("to", &self.to)
            .finish_non_exhaustive()
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, NotifyError> {
    address
        .trim()
        .parse::<Mailbox>()
        .map_err(|e| NotifyError::InvalidAddress {
            address: address.to_string(),
            reason: e.to_string(),
        })
}

impl SmtpNotifier {
    /// Builds a STARTTLS relay from the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is incomplete, an address does
    /// not parse, or the relay cannot be set up.
    pub fn new(config: &EmailConfig) -> Result<Self, NotifyError> {
        if !config.is_complete() {
            return Err(NotifyError::NotConfigured);
        }

        let from: Mailbox = parse_mailbox(&config.from)?;
        let to: Vec<Mailbox> = config
            .to
            .iter()
            .map(|address| parse_mailbox(address))
            .collect::<Result<_, _>>()?;

        let transport: AsyncSmtpTransport<Tokio1Executor> =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(config.smtp_host.trim())
                .map_err(|e| NotifyError::Transport(e.to_string()))?
                .port(config.smtp_port)
                .credentials(Credentials::new(
                    config.smtp_user.trim().to_string(),
                    config.smtp_pass.clone(),
                ))
                .build();

        Ok(Self {
            transport,
            from,
            to,
        })
    }

    async fn send(&self, message: &Message) -> Result<usize, NotifyError> {
        let mut builder = lettre::Message::builder()
            .from(self.from.clone())
            .subject(message.subject.as_str())
            .header(ContentType::TEXT_PLAIN);
        for recipient in &self.to {
            builder = builder.to(recipient.clone());
        }
        let email: lettre::Message = builder
            .body(message.body.clone())
            .map_err(|e| NotifyError::Message(e.to_string()))?;

        self.transport
            .send(email)
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;
        Ok(self.to.len())
    }
}

/// Where notifications go.
#[derive(Debug, Clone)]
pub enum Notifier {
    /// Email is not configured; every send reports that.
    Disabled,
    Smtp(SmtpNotifier),
    /// Records messages instead of sending them.
    Memory(Outbox),
}

impl Notifier {
    /// Builds a notifier from configuration.
    ///
    /// An incomplete configuration yields [`Notifier::Disabled`], as does a
    /// configuration the relay rejects (logged at warn level).
    #[must_use]
    pub fn from_config(config: &EmailConfig) -> Self {
        if !config.is_complete() {
            info!("Email notifications disabled: configuration incomplete");
            return Self::Disabled;
        }
        match SmtpNotifier::new(config) {
            Ok(smtp) => {
                info!(
                    host = %config.smtp_host,
                    port = config.smtp_port,
                    recipients = config.to.len(),
                    "Email notifications enabled"
                );
                Self::Smtp(smtp)
            }
            Err(e) => {
                warn!(error = %e, "Email notifications disabled");
                Self::Disabled
            }
        }
    }

    /// Creates an in-memory notifier and returns it with its outbox.
    #[must_use]
    pub fn memory() -> (Self, Outbox) {
        let outbox: Outbox = Arc::default();
        (Self::Memory(Arc::clone(&outbox)), outbox)
    }

    /// Attempts delivery once.
    pub async fn send(&self, message: &Message) -> Delivery {
        let outcome: Result<usize, NotifyError> = match self {
            Self::Disabled => Err(NotifyError::NotConfigured),
            Self::Smtp(smtp) => smtp.send(message).await,
            Self::Memory(outbox) => match outbox.lock() {
                Ok(mut sent) => {
                    sent.push(message.clone());
                    Ok(1)
                }
                Err(_) => Err(NotifyError::Transport(String::from("outbox poisoned"))),
            },
        };

        match outcome {
            Ok(recipients) => {
                info!(subject = %message.subject, recipients, "Notification sent");
                Delivery::sent(recipients)
            }
            Err(e) => {
                warn!(subject = %message.subject, error = %e, "Notification not delivered");
                Delivery::failed(&e)
            }
        }
    }
}
