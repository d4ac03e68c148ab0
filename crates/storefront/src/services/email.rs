//! Email service for forwarding form submissions.
//!
//! Uses SMTP via lettre for delivery with Askama HTML templates. Every message
//! goes from the configured sender to the configured recipient through a fixed
//! relay, one attempt per call.
//!
//! Templates are rendered without HTML escaping: submitted text appears in the
//! message exactly as the client sent it.

use askama::Template;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::{
        smtp::{Error as SmtpError, authentication::Credentials},
        stub::{AsyncStubTransport, Error as StubError},
    },
};
use loopcart_core::{AccessRequest, ConciergeRequest, Email};
use secrecy::ExposeSecret;
use thiserror::Error;

use crate::config::EmailConfig;

/// Mail relay host. Not configurable.
pub const SMTP_RELAY_HOST: &str = "smtp.gmail.com";

/// Mail relay port (SMTP over implicit TLS).
pub const SMTP_RELAY_PORT: u16 = 465;

/// HTML template for an exclusive-collection access request.
#[derive(Template)]
#[template(path = "email/access_request.html", escape = "none")]
struct AccessRequestEmailHtml<'a> {
    full_name: &'a str,
    email: &'a str,
    phone: &'a str,
    boutique: &'a str,
    preferred_date: &'a str,
    preferred_time: &'a str,
    categories: &'a str,
    notes: &'a str,
}

/// HTML template for a personal-concierge request.
#[derive(Template)]
#[template(path = "email/concierge_request.html", escape = "none")]
struct ConciergeRequestEmailHtml<'a> {
    name: &'a str,
    email: &'a str,
    subject: &'a str,
    message: &'a str,
}

/// Errors that can occur when sending email.
///
/// Transport errors display the underlying error text unchanged.
#[derive(Debug, Error)]
pub enum MailError {
    /// SMTP transport error (connection, TLS, authentication, rejection).
    #[error(transparent)]
    Smtp(#[from] SmtpError),

    /// Error reported by a stub transport.
    #[error(transparent)]
    Stub(#[from] StubError),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

#[derive(Clone)]
enum MailTransport {
    Smtp(AsyncSmtpTransport<Tokio1Executor>),
    Stub(AsyncStubTransport),
}

impl MailTransport {
    async fn send(&self, message: Message) -> Result<(), MailError> {
        match self {
            Self::Smtp(transport) => {
                transport.send(message).await?;
            }
            Self::Stub(transport) => transport.send(message).await?,
        }
        Ok(())
    }
}

/// Email service for forwarding requests to the configured recipient.
#[derive(Clone)]
pub struct EmailService {
    transport: MailTransport,
    from_address: String,
    to_address: String,
}

impl std::fmt::Debug for EmailService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let transport = match self.transport {
            MailTransport::Smtp(_) => "smtp",
            MailTransport::Stub(_) => "stub",
        };
        f.debug_struct("EmailService")
            .field("transport", &transport)
            .field("from_address", &self.from_address)
            .field("to_address", &self.to_address)
            .finish()
    }
}

impl EmailService {
    /// Create an email service that delivers through the SMTP relay.
    ///
    /// No connection is opened until the first message is sent.
    ///
    /// # Errors
    ///
    /// Returns error if the TLS parameters for the relay cannot be built.
    pub fn new(config: &EmailConfig) -> Result<Self, MailError> {
        let credentials = Credentials::new(
            config.from_address.clone(),
            config.password.expose_secret().to_string(),
        );

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(SMTP_RELAY_HOST)?
            .port(SMTP_RELAY_PORT)
            .credentials(credentials)
            .build();

        Ok(Self {
            transport: MailTransport::Smtp(mailer),
            from_address: config.from_address.clone(),
            to_address: config.to_address.clone(),
        })
    }

    /// Create an email service that records messages in `transport` instead
    /// of delivering them.
    #[must_use]
    pub fn with_stub_transport(config: &EmailConfig, transport: AsyncStubTransport) -> Self {
        Self {
            transport: MailTransport::Stub(transport),
            from_address: config.from_address.clone(),
            to_address: config.to_address.clone(),
        }
    }

    /// Forward an exclusive-collection access request.
    ///
    /// # Errors
    ///
    /// Returns error if the message cannot be built or the relay rejects it.
    pub async fn send_access_request(&self, request: &AccessRequest) -> Result<(), MailError> {
        let html = render_access_request(request)?;
        self.send_html_email(&request.subject(), html, None).await
    }

    /// Forward a personal-concierge request, with `Reply-To` set to the
    /// submitter.
    ///
    /// # Errors
    ///
    /// Returns error if the message cannot be built or the relay rejects it.
    pub async fn send_concierge_request(
        &self,
        request: &ConciergeRequest,
    ) -> Result<(), MailError> {
        let html = render_concierge_request(request)?;
        self.send_html_email(&request.email_subject(), html, Some(&request.email))
            .await
    }

    /// Send an HTML email from the sender to the recipient.
    async fn send_html_email(
        &self,
        subject: &str,
        html_body: String,
        reply_to: Option<&Email>,
    ) -> Result<(), MailError> {
        let mut builder = Message::builder()
            .from(parse_mailbox(&self.from_address)?)
            .to(parse_mailbox(&self.to_address)?)
            .subject(subject);

        if let Some(reply_to) = reply_to {
            builder = builder.reply_to(parse_mailbox(reply_to.as_str())?);
        }

        let email = builder.header(ContentType::TEXT_HTML).body(html_body)?;

        self.transport.send(email).await?;

        tracing::info!(to = %self.to_address, subject = %subject, "Email sent successfully");
        Ok(())
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
    address
        .parse()
        .map_err(|_| MailError::InvalidAddress(address.to_string()))
}

/// Render the HTML body for an access request.
///
/// Absent optional fields render as empty strings; see
/// [`AccessRequest::categories_text`] for the categories line.
///
/// # Errors
///
/// Returns error if the template fails to render.
pub fn render_access_request(request: &AccessRequest) -> Result<String, MailError> {
    let categories = request.categories_text();
    let html = AccessRequestEmailHtml {
        full_name: &request.full_name,
        email: request.email.as_str(),
        phone: request.phone.as_deref().unwrap_or(""),
        boutique: request.boutique.as_deref().unwrap_or(""),
        preferred_date: request.preferred_date.as_deref().unwrap_or(""),
        preferred_time: request.preferred_time.as_deref().unwrap_or(""),
        categories: &categories,
        notes: request.notes.as_deref().unwrap_or(""),
    }
    .render()?;
    Ok(html)
}

/// Render the HTML body for a concierge request.
///
/// # Errors
///
/// Returns error if the template fails to render.
pub fn render_concierge_request(request: &ConciergeRequest) -> Result<String, MailError> {
    let html = ConciergeRequestEmailHtml {
        name: &request.name,
        email: request.email.as_str(),
        subject: request.subject_text(),
        message: &request.message,
    }
    .render()?;
    Ok(html)
}
