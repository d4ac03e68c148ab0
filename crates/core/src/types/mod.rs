//! Core types for LoopCart.
//!
//! This module provides type-safe wrappers for the domain concepts the
//! storefront exchanges with clients.

pub mod email;
pub mod product;
pub mod request;

pub use email::{Email, EmailError};
pub use product::{Product, ProductQuery, filter_products};
pub use request::{
    AccessRequest, AccessRequestForm, ConciergeRequest, ConciergeRequestForm, FieldError,
    FieldErrorKind, ValidationErrors,
};
