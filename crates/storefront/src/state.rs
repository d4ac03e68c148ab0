//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::services::{EmailService, MailError};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and is immutable after startup.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    catalog: Catalog,
    email: Option<EmailService>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The mail service is only built when `config.email` is present; without
    /// it the mail endpoints answer with a configuration error and never open
    /// a connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the SMTP transport cannot be built.
    pub fn new(config: StorefrontConfig) -> Result<Self, MailError> {
        let email = match config.email.as_ref() {
            Some(email_config) => Some(EmailService::new(email_config)?),
            None => {
                tracing::warn!(
                    "EMAIL_FROM / EMAIL_TO / EMAIL_PASSWORD missing, mail endpoints will fail"
                );
                None
            }
        };

        Ok(Self::with_email_service(config, email))
    }

    /// Create application state with an explicit mail service (or none).
    #[must_use]
    pub fn with_email_service(config: StorefrontConfig, email: Option<EmailService>) -> Self {
        let catalog = Catalog::new(config.catalog_path);

        Self {
            inner: Arc::new(AppStateInner {
                catalog,
                email,
            }),
        }
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get the mail service, if mail credentials were configured.
    #[must_use]
    pub fn email(&self) -> Option<&EmailService> {
        self.inner.email.as_ref()
    }
}
