//! Validation for inbound enquiries
//!
//! The enquiry form is declared with `validator` attributes. Every violated
//! constraint is reported, ordered provider id, name, phone, email, message.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::{EnquiryStatus, NewEnquiry};

/// Order in which field violations are reported
pub const ENQUIRY_FIELD_ORDER: [&str; 5] = [
    "provider_id",
    "customer_name",
    "customer_phone",
    "customer_email",
    "message",
];

/// Raw enquiry as submitted by the public form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct EnquirySubmission {
    #[validate(custom = "validate_provider_id")]
    pub provider_id: String,

    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub customer_name: String,

    #[validate(length(min = 10, message = "Please enter a valid phone number"))]
    pub customer_phone: String,

    #[serde(default)]
    #[validate(email(message = "Please enter a valid email"))]
    pub customer_email: Option<String>,

    #[validate(length(min = 10, message = "Message must be at least 10 characters"))]
    pub message: String,
}

impl EnquirySubmission {
    /// Treat an empty email the same as a missing one
    pub fn normalized(mut self) -> Self {
        if self.customer_email.as_deref() == Some("") {
            self.customer_email = None;
        }
        self
    }
}

/// A single violated field constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

/// Every constraint an enquiry submission failed
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{}", summarize(.violations))]
pub struct ValidationFailure {
    pub violations: Vec<FieldViolation>,
}

impl ValidationFailure {
    fn from_errors(errors: &ValidationErrors) -> Self {
        let field_errors = errors.field_errors();
        let violations = ENQUIRY_FIELD_ORDER
            .iter()
            .filter_map(|field| field_errors.get(field).map(|errs| (*field, errs)))
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| FieldViolation {
                    field: field.to_string(),
                    message: err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string()),
                })
            })
            .collect();

        Self { violations }
    }

    /// Whether `field` failed at least one constraint
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }

    pub fn messages(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.message.as_str()).collect()
    }
}

fn summarize(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| v.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Provider ids must be hyphenated UUIDs
fn validate_provider_id(value: &str) -> Result<(), ValidationError> {
    if value.len() == 36 && Uuid::parse_str(value).is_ok() {
        return Ok(());
    }
    let mut error = ValidationError::new("uuid");
    error.message = Some("Invalid uuid".into());
    Err(error)
}

/// Validate a submission and produce the insert payload
///
/// Pure: the same input always yields the same outcome.
pub fn validate_enquiry(input: &EnquirySubmission) -> Result<NewEnquiry, ValidationFailure> {
    let input = input.clone().normalized();
    input
        .validate()
        .map_err(|errors| ValidationFailure::from_errors(&errors))?;

    let provider_id = Uuid::parse_str(&input.provider_id).map_err(|_| ValidationFailure {
        violations: vec![FieldViolation {
            field: "provider_id".to_string(),
            message: "Invalid uuid".to_string(),
        }],
    })?;

    Ok(NewEnquiry {
        provider_id,
        customer_name: input.customer_name,
        customer_phone: input.customer_phone,
        customer_email: input.customer_email,
        message: input.message,
        status: EnquiryStatus::New,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_submission() -> EnquirySubmission {
        EnquirySubmission {
            provider_id: "2f1b6c1e-8a44-4c1a-9d2e-5b7f0e6a9c31".to_string(),
            customer_name: "Amit Shah".to_string(),
            customer_phone: "9876543210".to_string(),
            customer_email: None,
            message: "Need AC repair urgently please".to_string(),
        }
    }

    #[test]
    fn test_valid_submission() {
        let payload = validate_enquiry(&valid_submission()).unwrap();
        assert_eq!(payload.status, EnquiryStatus::New);
        assert_eq!(payload.customer_name, "Amit Shah");
        assert_eq!(payload.customer_email, None);
    }

    #[test]
    fn test_empty_email_is_absent() {
        let mut input = valid_submission();
        input.customer_email = Some(String::new());
        let payload = validate_enquiry(&input).unwrap();
        assert_eq!(payload.customer_email, None);
    }

    #[test]
    fn test_valid_email_kept() {
        let mut input = valid_submission();
        input.customer_email = Some("amit@example.com".to_string());
        let payload = validate_enquiry(&input).unwrap();
        assert_eq!(payload.customer_email.as_deref(), Some("amit@example.com"));
    }

    #[test]
    fn test_invalid_email() {
        let mut input = valid_submission();
        input.customer_email = Some("not-an-email".to_string());
        let failure = validate_enquiry(&input).unwrap_err();
        assert_eq!(failure.messages(), vec!["Please enter a valid email"]);
    }

    #[test]
    fn test_short_name() {
        let mut input = valid_submission();
        input.customer_name = "A".to_string();
        let failure = validate_enquiry(&input).unwrap_err();
        assert!(failure.has_field("customer_name"));
        assert_eq!(failure.to_string(), "Name must be at least 2 characters");
    }

    #[test]
    fn test_provider_id_must_be_uuid() {
        let mut input = valid_submission();
        input.provider_id = "provider-42".to_string();
        let failure = validate_enquiry(&input).unwrap_err();
        assert_eq!(failure.messages(), vec!["Invalid uuid"]);

        input.provider_id = "2f1b6c1e8a444c1a9d2e5b7f0e6a9c31".to_string();
        assert!(validate_enquiry(&input).is_err());
    }

    #[test]
    fn test_all_violations_reported_in_order() {
        let input = EnquirySubmission {
            provider_id: String::new(),
            customer_name: "A".to_string(),
            customer_phone: "123".to_string(),
            customer_email: Some("nope".to_string()),
            message: "Hi".to_string(),
        };
        let failure = validate_enquiry(&input).unwrap_err();
        assert_eq!(
            failure.messages(),
            vec![
                "Invalid uuid",
                "Name must be at least 2 characters",
                "Please enter a valid phone number",
                "Please enter a valid email",
                "Message must be at least 10 characters",
            ]
        );
        assert_eq!(
            failure.to_string(),
            "Invalid uuid; Name must be at least 2 characters; Please enter a valid phone number; \
             Please enter a valid email; Message must be at least 10 characters"
        );
    }

    #[test]
    fn test_missing_email_deserializes() {
        let json = r#"{
            "provider_id": "2f1b6c1e-8a44-4c1a-9d2e-5b7f0e6a9c31",
            "customer_name": "Amit Shah",
            "customer_phone": "9876543210",
            "message": "Need AC repair urgently please"
        }"#;
        let input: EnquirySubmission = serde_json::from_str(json).unwrap();
        assert!(validate_enquiry(&input).is_ok());
    }
}
