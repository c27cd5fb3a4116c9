use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tokio::sync::Mutex;
use tracing::debug;

use crate::config::constants::VERIFICATION_MAIL_SUBJECT;
use crate::config::settings::SmtpConfig;
use crate::error::Result;

/// Delivery collaborator for verification mail
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_verification(&self, to: &str, code: &str) -> Result<()>;
}

fn verification_body(code: &str) -> String {
    format!(
        "<h1>Verify Your Email</h1>\
         <p>Enter this code to verify your email: <strong>{}</strong></p>\
         <p>This code will expire in 10 minutes.</p>",
        code
    )
}

/// Sends verification mail over SMTP with TLS
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: String,
}

impl SmtpMailer {
    pub fn from_config(config: &SmtpConfig) -> Result<Self> {
        let credentials = Credentials::new(config.username.clone(), config.password.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
            .port(config.port)
            .credentials(credentials)
            .build();

        Ok(Self {
            transport,
            sender: config.sender().to_string(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_verification(&self, to: &str, code: &str) -> Result<()> {
        let message = Message::builder()
            .from(self.sender.parse()?)
            .to(to.parse()?)
            .subject(VERIFICATION_MAIL_SUBJECT)
            .header(ContentType::TEXT_HTML)
            .body(verification_body(code))?;

        self.transport.send(message).await?;
        debug!("Verification mail sent to {}", to);

        Ok(())
    }
}

/// Test double that records messages instead of sending them
#[derive(Default)]
pub struct MemoryMailer {
    sent: Mutex<Vec<(String, String)>>,
}

impl MemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded (recipient, code) pairs in send order
    pub async fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl Mailer for MemoryMailer {
    async fn send_verification(&self, to: &str, code: &str) -> Result<()> {
        self.sent
            .lock()
            .await
            .push((to.to_string(), code.to_string()));
        Ok(())
    }
}
