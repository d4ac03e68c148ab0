//! Integration tests for LoopCart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p loopcart-integration-tests
//! ```
//!
//! Each test gets its own [`TestContext`]: a temporary catalog file, the real
//! storefront router bound to an ephemeral port on 127.0.0.1, and a `reqwest`
//! client. Mail never leaves the process: when mail is configured the router
//! delivers into a lettre stub transport exposed as [`TestContext::outbox`].
//!
//! # Test Categories
//!
//! - `catalog` - Search, product listing and lookup, root and health routes
//! - `requests` - Access and concierge form submissions

use std::path::PathBuf;

use lettre::address::Envelope;
use lettre::transport::stub::AsyncStubTransport;
use loopcart_storefront::config::{EmailConfig, StorefrontConfig};
use loopcart_storefront::services::EmailService;
use loopcart_storefront::state::AppState;
use reqwest::Client;
use secrecy::SecretString;
use tempfile::TempDir;
use tokio::task::JoinHandle;

/// Two-product catalog used throughout the tests.
pub const PHONES_CATALOG: &str = r#"[
    {"id": "iphone-14", "title": "iPhone 14", "brand": "Apple", "category": "Phones", "price": 799},
    {"id": "galaxy-s21", "title": "Galaxy S21", "brand": "Samsung", "category": "Phones", "price": 699}
]"#;

/// Sender address configured for mail-enabled contexts.
pub const MAIL_FROM: &str = "concierge@loopcart.test";

/// Recipient address configured for mail-enabled contexts.
pub const MAIL_TO: &str = "desk@loopcart.test";

/// How the storefront under test handles mail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailSetup {
    /// No mail credentials: mail endpoints must answer with a config error.
    Unconfigured,
    /// Credentials present, every send succeeds and is recorded.
    Delivering,
    /// Credentials present, every send fails at the transport.
    Failing,
}

/// A running storefront plus the client and fixtures that talk to it.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
    /// Records every message the storefront hands to the transport.
    pub outbox: AsyncStubTransport,
    catalog_dir: TempDir,
    server: JoinHandle<()>,
}

impl TestContext {
    /// Start a storefront whose catalog file holds `catalog`, or is missing
    /// when `catalog` is `None`.
    ///
    /// # Panics
    ///
    /// Panics if the fixture directory or the listener cannot be created.
    pub async fn new(catalog: Option<&str>, mail: MailSetup) -> Self {
        let catalog_dir = tempfile::tempdir().expect("Failed to create catalog dir");
        let catalog_path = catalog_dir.path().join("product.json");
        if let Some(contents) = catalog {
            std::fs::write(&catalog_path, contents).expect("Failed to write catalog");
        }

        let outbox = match mail {
            MailSetup::Failing => AsyncStubTransport::new_error(),
            MailSetup::Unconfigured | MailSetup::Delivering => AsyncStubTransport::new_ok(),
        };

        let mut config = StorefrontConfig::local(catalog_path);
        let email = if mail == MailSetup::Unconfigured {
            None
        } else {
            let email_config = EmailConfig {
                from_address: MAIL_FROM.to_string(),
                to_address: MAIL_TO.to_string(),
                password: SecretString::from("integration-test-password"),
            };
            let service = EmailService::with_stub_transport(&email_config, outbox.clone());
            config.email = Some(email_config);
            Some(service)
        };

        let state = AppState::with_email_service(config, email);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");

        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, loopcart_storefront::app(state)).await;
        });

        Self {
            client: Client::new(),
            base_url: format!("http://{addr}"),
            outbox,
            catalog_dir,
            server,
        }
    }

    /// Start a storefront serving [`PHONES_CATALOG`].
    pub async fn with_phones(mail: MailSetup) -> Self {
        Self::new(Some(PHONES_CATALOG), mail).await
    }

    /// Absolute URL for `path` on the server under test.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Path of the catalog file the server reads.
    #[must_use]
    pub fn catalog_path(&self) -> PathBuf {
        self.catalog_dir.path().join("product.json")
    }

    /// Messages handed to the mail transport so far.
    pub async fn sent_mail(&self) -> Vec<(Envelope, String)> {
        self.outbox.messages().await
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        self.server.abort();
    }
}
