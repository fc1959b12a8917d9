//! Input validation for submissions and account registration.
//!
//! All checks run before any persistence, so a validation failure never
//! leaves a partial write. Limits follow the submission form contract.

use validator::{ValidateEmail, ValidateUrl};

use crate::error::CoreError;
use crate::project_type::ProjectType;

/// Minimum length of the project description.
pub const MIN_DESCRIPTION_LENGTH: usize = 20;

/// Minimum length of the technical description.
pub const MIN_TECHNICAL_DESC_LENGTH: usize = 50;

/// Minimum account password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// The raw fields of a new application submission.
#[derive(Debug, Clone)]
pub struct SubmissionInput<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub technical_desc: &'a str,
    pub project_type: &'a str,
    pub duration_days: i32,
    pub cost: f64,
    pub document_link: Option<&'a str>,
}

/// Validate a full submission. Returns the parsed project type on success.
pub fn validate_submission(input: &SubmissionInput<'_>) -> Result<ProjectType, CoreError> {
    if input.title.trim().is_empty() {
        return Err(CoreError::Validation("Project title is required".into()));
    }

    if input.description.trim().len() < MIN_DESCRIPTION_LENGTH {
        return Err(CoreError::Validation(format!(
            "Description must be at least {MIN_DESCRIPTION_LENGTH} characters"
        )));
    }

    if input.technical_desc.trim().len() < MIN_TECHNICAL_DESC_LENGTH {
        return Err(CoreError::Validation(format!(
            "Technical description must be at least {MIN_TECHNICAL_DESC_LENGTH} characters"
        )));
    }

    let project_type = ProjectType::parse(input.project_type)?;

    validate_duration(input.duration_days)?;
    validate_cost(input.cost)?;

    if let Some(link) = input.document_link {
        validate_document_link(link)?;
    }

    Ok(project_type)
}

/// Duration must be at least one day.
pub fn validate_duration(duration_days: i32) -> Result<(), CoreError> {
    if duration_days < 1 {
        return Err(CoreError::Validation(
            "Duration must be at least 1 day".into(),
        ));
    }
    Ok(())
}

/// Cost must be a finite, non-negative number.
pub fn validate_cost(cost: f64) -> Result<(), CoreError> {
    if !cost.is_finite() || cost < 0.0 {
        return Err(CoreError::Validation(
            "Cost must be a non-negative number".into(),
        ));
    }
    Ok(())
}

/// Document links, when present, must be non-empty valid URLs.
pub fn validate_document_link(link: &str) -> Result<(), CoreError> {
    if link.trim().is_empty() {
        // An empty string means "no link"; callers normalize it to None.
        return Ok(());
    }
    if !link.validate_url() {
        return Err(CoreError::Validation(format!(
            "Invalid document link '{link}'"
        )));
    }
    Ok(())
}

/// Validate registration input (email format, password length, name).
pub fn validate_registration(name: &str, email: &str, password: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("Name is required".into()));
    }
    if !email.validate_email() {
        return Err(CoreError::Validation(format!("Invalid email '{email}'")));
    }
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}
