//! Contact form endpoint
//!
//! Validates a submission, strips angle brackets, and hands it to a
//! [`ContactSink`]. The default [`LogSink`] only logs; nothing is emailed.

use crate::config::ContactConfig;
use crate::error::ContactError;
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use log::{error, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::error::Error;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

const SUCCESS_MESSAGE: &str = "Thank you for your message. We'll get back to you soon!";
const SERVER_ERROR_MESSAGE: &str = "Something went wrong. Please try again later.";
const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method not allowed";

/// Raw request payload. Any field may be missing.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

/// A submission that passed validation, with fields sanitized
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    /// Read the four fields from a parsed JSON object.
    ///
    /// Falsy values (`null`, `false`, `0`, `""`) count as missing. Any other
    /// non-string value is kept as its JSON text and validated like a string.
    pub fn from_object(object: &Map<String, Value>) -> Self {
        let field = |key: &str| object.get(key).and_then(field_text);
        Self {
            name: field("name"),
            email: field("email"),
            subject: field("subject"),
            message: field("message"),
        }
    }

    /// Check the rules in order and stop at the first failure:
    /// presence, name length, email format, subject length, message length.
    ///
    /// Lengths are counted in characters on the raw input, before sanitizing.
    pub fn validate(&self) -> Result<ContactSubmission, ContactError> {
        let (name, email, subject, message) = match (
            present(&self.name),
            present(&self.email),
            present(&self.subject),
            present(&self.message),
        ) {
            (Some(name), Some(email), Some(subject), Some(message)) => {
                (name, email, subject, message)
            }
            _ => return Err(ContactError::MissingField),
        };

        if !within(name, 2, 100) {
            return Err(ContactError::NameLength);
        }
        if !is_valid_email(email) {
            return Err(ContactError::InvalidEmail);
        }
        if !within(subject, 3, 200) {
            return Err(ContactError::SubjectLength);
        }
        if !within(message, 10, 5000) {
            return Err(ContactError::MessageLength);
        }

        Ok(ContactSubmission {
            name: sanitize_input(name),
            email: sanitize_input(email),
            subject: sanitize_input(subject),
            message: sanitize_input(message),
        })
    }
}

fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

fn within(value: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&value.chars().count())
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Remove `<` and `>` and surrounding whitespace
pub fn sanitize_input(input: &str) -> String {
    input.replace(['<', '>'], "").trim().to_string()
}

/// Destination for accepted submissions
#[async_trait]
pub trait ContactSink: Send + Sync {
    /// Get the sink name (e.g., "log")
    fn sink_name(&self) -> &str;

    async fn deliver(
        &self,
        submission: &ContactSubmission,
    ) -> Result<(), Box<dyn Error + Send + Sync>>;
}

/// Logs submissions instead of sending them
#[derive(Debug, Clone)]
pub struct LogSink {
    to_email: String,
    from_email: String,
}

impl LogSink {
    pub fn new(config: &ContactConfig) -> Self {
        Self {
            to_email: config.to_email.clone(),
            from_email: config.from_email.clone(),
        }
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new(&ContactConfig::default())
    }
}

#[async_trait]
impl ContactSink for LogSink {
    fn sink_name(&self) -> &str {
        "log"
    }

    async fn deliver(
        &self,
        submission: &ContactSubmission,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        info!(
            "Contact form submission: {}",
            json!({
                "name": submission.name,
                "email": submission.email,
                "subject": submission.subject,
                "message": submission.message,
                "to": self.to_email,
                "from": self.from_email,
                "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            })
        );
        Ok(())
    }
}

/// Status code and JSON body returned to the caller
#[derive(Debug, Clone, PartialEq)]
pub struct ContactResponse {
    pub status: u16,
    pub body: Value,
}

impl ContactResponse {
    fn error(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            body: json!({ "error": message.into() }),
        }
    }

    fn success() -> Self {
        Self {
            status: 200,
            body: json!({ "success": true, "message": SUCCESS_MESSAGE }),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    /// The `error` message, if this is an error response
    pub fn error_message(&self) -> Option<&str> {
        self.body.get("error").and_then(Value::as_str)
    }
}

pub struct ContactHandler {
    sink: Box<dyn ContactSink>,
}

impl Default for ContactHandler {
    fn default() -> Self {
        Self::new(Box::new(LogSink::default()))
    }
}

impl ContactHandler {
    pub fn new(sink: Box<dyn ContactSink>) -> Self {
        Self { sink }
    }

    pub fn from_config(config: &ContactConfig) -> Self {
        Self::new(Box::new(LogSink::new(config)))
    }

    /// Handle a raw request. Only POST is accepted.
    pub async fn handle(&self, method: &str, body: &str) -> ContactResponse {
        if !method.eq_ignore_ascii_case("POST") {
            return ContactResponse::error(405, METHOD_NOT_ALLOWED_MESSAGE);
        }

        let payload = match serde_json::from_str::<Value>(body) {
            Ok(payload) => payload,
            Err(e) => {
                error!("Contact form error: {}", e);
                return ContactResponse::error(500, SERVER_ERROR_MESSAGE);
            }
        };

        // Arrays and scalars carry no named fields
        let form = match payload.as_object() {
            Some(object) => ContactForm::from_object(object),
            None => ContactForm::default(),
        };
        self.submit(&form).await
    }

    /// Validate and deliver an already parsed form
    pub async fn submit(&self, form: &ContactForm) -> ContactResponse {
        let submission = match form.validate() {
            Ok(submission) => submission,
            Err(e) => {
                warn!("Rejected contact form submission: {}", e);
                return ContactResponse::error(400, e.to_string());
            }
        };

        match self.sink.deliver(&submission).await {
            Ok(()) => ContactResponse::success(),
            Err(e) => {
                error!(
                    "Contact form error: sink '{}' failed: {}",
                    self.sink.sink_name(),
                    e
                );
                ContactResponse::error(500, SERVER_ERROR_MESSAGE)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> ContactForm {
        ContactForm {
            name: Some("Ana".to_string()),
            email: Some("ana@example.com".to_string()),
            subject: Some("Visa question".to_string()),
            message: Some("How long does the rentista visa take?".to_string()),
        }
    }

    #[test]
    fn test_valid_form() {
        let submission = valid_form().validate().unwrap();
        assert_eq!(submission.name, "Ana");
    }

    #[test]
    fn test_empty_field_counts_as_missing() {
        let mut form = valid_form();
        form.subject = Some(String::new());
        assert_eq!(form.validate(), Err(ContactError::MissingField));

        form.subject = None;
        assert_eq!(form.validate(), Err(ContactError::MissingField));
    }

    #[test]
    fn test_length_bounds() {
        let mut form = valid_form();
        form.name = Some("A".to_string());
        assert_eq!(form.validate(), Err(ContactError::NameLength));
        form.name = Some("A".repeat(101));
        assert_eq!(form.validate(), Err(ContactError::NameLength));
        form.name = Some("A".repeat(100));
        assert!(form.validate().is_ok());

        let mut form = valid_form();
        form.subject = Some("Hi".to_string());
        assert_eq!(form.validate(), Err(ContactError::SubjectLength));

        let mut form = valid_form();
        form.message = Some("x".repeat(5001));
        assert_eq!(form.validate(), Err(ContactError::MessageLength));
        form.message = Some("x".repeat(10));
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_length_counts_characters() {
        let mut form = valid_form();
        form.name = Some("Zoë".to_string());
        form.message = Some("ñ".repeat(10));
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("@c.com"));
        assert!(!is_valid_email("a@@c.com"));
    }

    #[test]
    fn test_from_object_falsy_values_are_missing() {
        let payload = json!({"name": null, "email": false, "subject": 0, "message": ""});
        let form = ContactForm::from_object(payload.as_object().unwrap());
        assert_eq!(form.name, None);
        assert_eq!(form.email, None);
        assert_eq!(form.subject, None);
        assert_eq!(form.message, None);
    }

    #[test]
    fn test_from_object_keeps_non_string_text() {
        let payload = json!({
            "name": 42,
            "email": "ana@example.com",
            "subject": ["a", "b"],
            "message": true
        });
        let form = ContactForm::from_object(payload.as_object().unwrap());
        assert_eq!(form.name.as_deref(), Some("42"));
        assert_eq!(form.subject.as_deref(), Some(r#"["a","b"]"#));
        assert_eq!(form.message.as_deref(), Some("true"));
    }

    #[test]
    fn test_sanitize_input() {
        assert_eq!(sanitize_input("  <b>Hola</b> "), "bHola/b");
    }

    #[test]
    fn test_validation_checks_raw_input() {
        let mut form = valid_form();
        // 12 chars raw, 2 after stripping brackets
        form.message = Some("<<<<<ok>>>>>".to_string());
        let submission = form.validate().unwrap();
        assert_eq!(submission.message, "ok");
    }
}
