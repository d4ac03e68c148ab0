//! LoopCart Core - Shared types library.
//!
//! This crate provides the domain types used by the LoopCart backend:
//! - `storefront` - HTTP service for catalog search and access requests
//! - `integration-tests` - End-to-end HTTP tests against the storefront router
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP,
//! no mail transport. Loading the catalog and sending mail live in the
//! storefront crate.
//!
//! # Modules
//!
//! - [`types`] - Email addresses, catalog products, and validated form submissions

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
