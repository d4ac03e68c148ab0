//! Business logic services for storefront.
//!
//! # Services
//!
//! - `email` - Forwarding access and concierge requests through the mail relay

pub mod email;

pub use email::{EmailService, MailError};
