use crate::config::{ContactConfig, SmtpConfig};
use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Send error: {0}")]
    SendFailed(String),
}

/// One outbound contact-form email. The submitter's address goes into
/// reply-to; from and to are fixed by configuration.
#[derive(Debug, Clone)]
pub struct ContactEmail {
    pub reply_to: String,
    pub subject: String,
    pub body_html: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &ContactEmail) -> Result<(), MailerError>;
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpMailer {
    pub fn new(smtp: SmtpConfig, contact: ContactConfig) -> Result<Self, MailerError> {
        let creds = Credentials::new(smtp.user.clone(), smtp.password.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&smtp.host)
            .map_err(|e| {
                MailerError::Configuration(format!("Failed to create SMTP relay: {}", e))
            })?
            .port(smtp.port)
            .credentials(creds)
            .build();

        let from: Mailbox = format!("{} <{}>", contact.from_name, smtp.from_email)
            .parse()
            .map_err(|e| MailerError::Configuration(format!("Invalid from address: {}", e)))?;

        let to: Mailbox = contact
            .receiver
            .parse()
            .map_err(|e| MailerError::Configuration(format!("Invalid receiver address: {}", e)))?;

        Ok(Self {
            transport,
            from,
            to,
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &ContactEmail) -> Result<(), MailerError> {
        let reply_to: Mailbox = email
            .reply_to
            .parse()
            .map_err(|e| MailerError::Configuration(format!("Invalid reply-to address: {}", e)))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .reply_to(reply_to)
            .subject(&email.subject)
            .header(ContentType::TEXT_HTML)
            .body(email.body_html.clone())
            .map_err(|e| MailerError::SendFailed(format!("Failed to build message: {}", e)))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| MailerError::SendFailed(format!("Failed to send email: {}", e)))?;

        tracing::info!(
            reply_to = %email.reply_to,
            subject = %email.subject,
            "Contact email sent"
        );

        Ok(())
    }
}

/// Mock mailer used when SMTP is disabled and by the test suite.
pub struct MockMailer {
    send_count: AtomicU64,
    sent: Mutex<Vec<ContactEmail>>,
}

impl MockMailer {
    pub fn new() -> Self {
        Self {
            send_count: AtomicU64::new(0),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn send_count(&self) -> u64 {
        self.send_count.load(Ordering::SeqCst)
    }

    pub fn sent(&self) -> Vec<ContactEmail> {
        self.sent
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl Default for MockMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send(&self, email: &ContactEmail) -> Result<(), MailerError> {
        self.send_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(email.clone());
        }

        tracing::info!(
            reply_to = %email.reply_to,
            subject = %email.subject,
            "[MOCK] Contact email would be sent"
        );

        Ok(())
    }
}
