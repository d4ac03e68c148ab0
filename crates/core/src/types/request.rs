//! Form submissions forwarded by email.
//!
//! Each form arrives as a loosely-typed `*Form` (every field optional, so that
//! a missing field is reported rather than aborting deserialization) and is
//! validated into its strict counterpart with `TryFrom`. Validation collects
//! every field error instead of stopping at the first one.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::email::Email;

/// What went wrong with a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldErrorKind {
    /// Required field absent or `null`.
    Missing,
    /// Required text field present but blank.
    Blank,
    /// Field is not a syntactically valid email address.
    InvalidEmail,
}

impl FieldErrorKind {
    /// Machine-readable error type reported to clients.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Blank => "string_too_short",
            Self::InvalidEmail => "value_error",
        }
    }
}

/// A validation failure attached to one input field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    /// Field name as it appears on the wire.
    pub field: &'static str,
    pub kind: FieldErrorKind,
    /// Human-readable description.
    pub message: String,
}

impl FieldError {
    #[must_use]
    pub fn missing(field: &'static str) -> Self {
        Self {
            field,
            kind: FieldErrorKind::Missing,
            message: "Field required".to_string(),
        }
    }

    #[must_use]
    pub fn blank(field: &'static str) -> Self {
        Self {
            field,
            kind: FieldErrorKind::Blank,
            message: "Field cannot be blank".to_string(),
        }
    }

    #[must_use]
    pub fn invalid_email(field: &'static str, reason: &impl fmt::Display) -> Self {
        Self {
            field,
            kind: FieldErrorKind::InvalidEmail,
            message: format!("value is not a valid email address: {reason}"),
        }
    }
}

/// All field errors found while validating one submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Whether any error is reported against `field`.
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<FieldError> {
        self.0
    }

    fn into_result<T>(self, value: Option<T>) -> Result<T, Self> {
        match value {
            Some(value) if self.is_empty() => Ok(value),
            _ => Err(self),
        }
    }

    fn require(&mut self, field: &'static str, value: Option<String>) -> Option<String> {
        if value.is_none() {
            self.push(FieldError::missing(field));
        }
        value
    }

    fn require_non_blank(&mut self, field: &'static str, value: Option<String>) -> Option<String> {
        match value {
            None => {
                self.push(FieldError::missing(field));
                None
            }
            Some(v) if v.trim().is_empty() => {
                self.push(FieldError::blank(field));
                None
            }
            Some(v) => Some(v),
        }
    }

    fn require_email(&mut self, field: &'static str, value: Option<String>) -> Option<Email> {
        let value = self.require(field, value)?;
        match Email::parse(&value) {
            Ok(email) => Some(email),
            Err(e) => {
                self.push(FieldError::invalid_email(field, &e));
                None
            }
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl From<FieldError> for ValidationErrors {
    fn from(error: FieldError) -> Self {
        Self(vec![error])
    }
}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

// =============================================================================
// Access request
// =============================================================================

/// Raw exclusive-collection access request as posted by the client.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessRequestForm {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub boutique: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub categories: Option<Vec<String>>,
    pub notes: Option<String>,
}

/// A validated exclusive-collection access request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRequest {
    pub full_name: String,
    pub email: Email,
    pub phone: Option<String>,
    pub boutique: Option<String>,
    pub preferred_date: Option<String>,
    pub preferred_time: Option<String>,
    pub categories: Option<Vec<String>>,
    pub notes: Option<String>,
}

impl AccessRequest {
    /// Email subject line. The name is used verbatim.
    #[must_use]
    pub fn subject(&self) -> String {
        format!("New Access Request: {}", self.full_name)
    }

    /// Categories joined with `", "`.
    ///
    /// An empty list yields `""`; only an absent list yields `"None"`.
    #[must_use]
    pub fn categories_text(&self) -> String {
        self.categories
            .as_ref()
            .map_or_else(|| "None".to_string(), |c| c.join(", "))
    }
}

impl TryFrom<AccessRequestForm> for AccessRequest {
    type Error = ValidationErrors;

    fn try_from(form: AccessRequestForm) -> Result<Self, Self::Error> {
        let mut errors = ValidationErrors::new();
        let full_name = errors.require("fullName", form.full_name);
        let email = errors.require_email("email", form.email);

        let fields = full_name.zip(email);
        errors.into_result(fields).map(|(full_name, email)| Self {
            full_name,
            email,
            phone: form.phone,
            boutique: form.boutique,
            preferred_date: form.date,
            preferred_time: form.time,
            categories: form.categories,
            notes: form.notes,
        })
    }
}

// =============================================================================
// Personal concierge request
// =============================================================================

/// Raw personal-concierge contact form as posted by the client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConciergeRequestForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

/// A validated personal-concierge request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConciergeRequest {
    pub name: String,
    pub email: Email,
    pub subject: Option<String>,
    pub message: String,
}

impl ConciergeRequest {
    /// Email subject line, falling back to "No subject".
    #[must_use]
    pub fn email_subject(&self) -> String {
        format!(
            "New Personal Concierge Request: {}",
            self.subject.as_deref().unwrap_or("No subject")
        )
    }

    /// Subject as shown in the message body.
    #[must_use]
    pub fn subject_text(&self) -> &str {
        self.subject.as_deref().unwrap_or("Not provided")
    }
}

impl TryFrom<ConciergeRequestForm> for ConciergeRequest {
    type Error = ValidationErrors;

    fn try_from(form: ConciergeRequestForm) -> Result<Self, Self::Error> {
        let mut errors = ValidationErrors::new();
        let name = errors.require_non_blank("name", form.name);
        let email = errors.require_email("email", form.email);
        let message = errors.require_non_blank("message", form.message);

        let fields = name.zip(email).zip(message);
        errors
            .into_result(fields)
            .map(|((name, email), message)| Self {
                name,
                email,
                subject: form.subject,
                message,
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn access_form(value: serde_json::Value) -> AccessRequestForm {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_access_request_minimal() {
        let request = AccessRequest::try_from(access_form(json!({
            "fullName": "Jane Doe",
            "email": "jane@example.com"
        })))
        .unwrap();

        assert_eq!(request.full_name, "Jane Doe");
        assert_eq!(request.email.as_str(), "jane@example.com");
        assert_eq!(request.phone, None);
        assert_eq!(request.categories, None);
    }

    #[test]
    fn test_access_request_full() {
        let request = AccessRequest::try_from(access_form(json!({
            "fullName": "Jane Doe",
            "email": "jane@example.com",
            "phone": "+1 555 0100",
            "boutique": "Paris",
            "date": "2026-11-02",
            "time": "14:00",
            "categories": ["Watches", "Jewelry"],
            "notes": "Window seat"
        })))
        .unwrap();

        assert_eq!(request.boutique.as_deref(), Some("Paris"));
        assert_eq!(request.preferred_date.as_deref(), Some("2026-11-02"));
        assert_eq!(request.preferred_time.as_deref(), Some("14:00"));
        assert_eq!(request.categories_text(), "Watches, Jewelry");
    }

    #[test]
    fn test_access_request_invalid_email() {
        let errors = AccessRequest::try_from(access_form(json!({
            "fullName": "Jane Doe",
            "email": "not-an-email"
        })))
        .unwrap_err();

        assert_eq!(errors.len(), 1);
        let error = errors.iter().next().unwrap();
        assert_eq!(error.field, "email");
        assert_eq!(error.kind, FieldErrorKind::InvalidEmail);
    }

    #[test]
    fn test_access_request_missing_required_fields() {
        let errors = AccessRequest::try_from(access_form(json!({}))).unwrap_err();

        assert_eq!(errors.len(), 2);
        assert!(errors.has_field("fullName"));
        assert!(errors.has_field("email"));
        assert!(errors.iter().all(|e| e.kind == FieldErrorKind::Missing));
    }

    #[test]
    fn test_access_request_null_is_missing() {
        let errors = AccessRequest::try_from(access_form(json!({
            "fullName": null,
            "email": "jane@example.com"
        })))
        .unwrap_err();

        assert!(errors.has_field("fullName"));
        assert!(!errors.has_field("email"));
    }

    #[test]
    fn test_categories_absent_renders_none() {
        let request = AccessRequest::try_from(access_form(json!({
            "fullName": "Jane Doe",
            "email": "jane@example.com"
        })))
        .unwrap();
        assert_eq!(request.categories_text(), "None");
    }

    #[test]
    fn test_categories_empty_renders_empty() {
        let request = AccessRequest::try_from(access_form(json!({
            "fullName": "Jane Doe",
            "email": "jane@example.com",
            "categories": []
        })))
        .unwrap();
        assert_eq!(request.categories_text(), "");
    }

    #[test]
    fn test_subject_is_verbatim() {
        let request = AccessRequest::try_from(access_form(json!({
            "fullName": "<b>Jane</b>",
            "email": "jane@example.com"
        })))
        .unwrap();
        assert_eq!(request.subject(), "New Access Request: <b>Jane</b>");
    }

    #[test]
    fn test_wrong_type_fails_deserialization() {
        let result: Result<AccessRequestForm, _> =
            serde_json::from_value(json!({"fullName": 5, "email": "jane@example.com"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_concierge_request_valid() {
        let form: ConciergeRequestForm = serde_json::from_value(json!({
            "name": "Sam",
            "email": "sam@example.com",
            "message": "Need a fitting"
        }))
        .unwrap();
        let request = ConciergeRequest::try_from(form).unwrap();

        assert_eq!(
            request.email_subject(),
            "New Personal Concierge Request: No subject"
        );
        assert_eq!(request.subject_text(), "Not provided");
    }

    #[test]
    fn test_concierge_request_with_subject() {
        let form: ConciergeRequestForm = serde_json::from_value(json!({
            "name": "Sam",
            "email": "sam@example.com",
            "subject": "Fitting",
            "message": "Saturday?"
        }))
        .unwrap();
        let request = ConciergeRequest::try_from(form).unwrap();

        assert_eq!(request.email_subject(), "New Personal Concierge Request: Fitting");
        assert_eq!(request.subject_text(), "Fitting");
    }

    #[test]
    fn test_concierge_request_blank_fields() {
        let form: ConciergeRequestForm = serde_json::from_value(json!({
            "name": "  ",
            "email": "sam@example.com",
            "message": ""
        }))
        .unwrap();
        let errors = ConciergeRequest::try_from(form).unwrap_err();

        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.kind == FieldErrorKind::Blank));
    }

    #[test]
    fn test_validation_errors_display() {
        let mut errors = ValidationErrors::new();
        errors.push(FieldError::missing("fullName"));
        errors.push(FieldError::missing("email"));
        assert_eq!(
            errors.to_string(),
            "fullName: Field required; email: Field required"
        );
    }
}
