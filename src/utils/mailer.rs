use std::sync::Arc;

use futures::future::BoxFuture;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

use crate::config::{RetryPolicy, SmtpConfig};

#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("failed to build message: {0}")]
    Build(#[from] lettre::error::Error),
    #[error("smtp transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// A plain-text notification for the site inbox. Sender and recipient are fixed
/// by configuration, so only the subject and body vary per submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutgoingMail {
    pub subject: String,
    pub text: String,
}

impl OutgoingMail {
    pub fn new(subject: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            text: text.into(),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait Mailer: Send + Sync {
    fn send(&self, mail: OutgoingMail) -> BoxFuture<'static, Result<(), MailError>>;
}

pub struct SmtpMailer {
    transport: Arc<AsyncSmtpTransport<Tokio1Executor>>,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, MailError> {
        let from_address: Address = config.user.parse()?;
        let to_address: Address = config.to_email.parse()?;
        let creds = Credentials::new(config.user.clone(), config.pass.clone());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
            .port(config.port)
            .credentials(creds)
            .build();
        tracing::debug!("SMTP Configuration - Server: {}, Port: {}", config.host, config.port);
        Ok(Self {
            transport: Arc::new(transport),
            from: Mailbox::new(Some(config.from_name.clone()), from_address),
            to: Mailbox::new(None, to_address),
        })
    }

    fn build_message(&self, mail: &OutgoingMail) -> Result<Message, MailError> {
        Ok(Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(mail.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(mail.text.clone())?)
    }
}

impl Mailer for SmtpMailer {
    fn send(&self, mail: OutgoingMail) -> BoxFuture<'static, Result<(), MailError>> {
        let message = self.build_message(&mail);
        let transport = self.transport.clone();
        Box::pin(async move {
            let message = message?;
            tracing::debug!("Attempting to send email via SMTP: {}", mail.subject);
            transport.send(message).await?;
            Ok(())
        })
    }
}

/// Wraps another mailer with a bounded number of extra attempts. With zero
/// retries every send is attempted exactly once.
pub struct RetryingMailer<M> {
    inner: Arc<M>,
    policy: RetryPolicy,
}

impl<M: Mailer + 'static> RetryingMailer<M> {
    pub fn new(inner: M, policy: RetryPolicy) -> Self {
        Self {
            inner: Arc::new(inner),
            policy,
        }
    }
}

impl<M: Mailer + 'static> Mailer for RetryingMailer<M> {
    fn send(&self, mail: OutgoingMail) -> BoxFuture<'static, Result<(), MailError>> {
        let inner = self.inner.clone();
        let policy = self.policy.clone();
        Box::pin(async move {
            let mut attempt = 0;
            loop {
                match inner.send(mail.clone()).await {
                    Ok(()) => return Ok(()),
                    Err(e) if attempt < policy.retries => {
                        let delay = policy.backoff * 2u32.saturating_pow(attempt);
                        attempt += 1;
                        tracing::warn!(
                            attempt,
                            retries = policy.retries,
                            "Mail send failed, retrying in {:?}: {}",
                            delay,
                            e
                        );
                        tokio::time::sleep(delay).await;
                    }
                    Err(e) => return Err(e),
                }
            }
        })
    }
}
