//! Field-level input validation. Pure functions, no side effects.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::ValidationError;

use super::model::ProfileField;

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@]+@[^@]+\.[^@]+$").expect("email regex"))
}

fn phone_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]{10}$").expect("phone regex"))
}

/// Permissive syntactic email check: exactly one `@` with a `.` somewhere
/// after it. Does not verify deliverability.
pub fn validate_email(input: &str) -> bool {
    email_re().is_match(input)
}

/// Exactly 10 ASCII digits — no separators, no surrounding whitespace.
pub fn validate_phone(input: &str) -> bool {
    phone_re().is_match(input)
}

/// Non-negative integer. Surrounding whitespace is tolerated, matching how
/// the answer is later coerced for storage.
pub fn validate_experience_years(input: &str) -> bool {
    input.trim().parse::<u32>().is_ok()
}

/// Apply the validation rule for `field` to `input`.
///
/// Free-text fields always pass; only email, phone, and experience carry
/// syntactic rules.
pub fn validate_field(field: ProfileField, input: &str) -> Result<(), ValidationError> {
    match field {
        ProfileField::EmailAddress if !validate_email(input) => {
            Err(ValidationError::InvalidEmail)
        }
        ProfileField::PhoneNumber if !validate_phone(input) => Err(ValidationError::InvalidPhone),
        ProfileField::ExperienceYears if !validate_experience_years(input) => {
            Err(ValidationError::InvalidExperienceYears)
        }
        _ => Ok(()),
    }
}
