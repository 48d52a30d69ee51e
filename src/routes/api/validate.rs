use crate::{
    db::entities::task::DESCRIPTION_MAX_CHARS,
    error::{AppError, FieldError},
};

/// Accumulates field errors so one response reports every rejected field.
#[derive(Debug, Default)]
pub(super) struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub(super) fn new() -> Self {
        Self::default()
    }

    /// Trimmed value, or records `message` against `field` when blank.
    pub(super) fn required(&mut self, field: &'static str, value: &str, message: &str) -> String {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.errors.push(FieldError::new(field, message));
        }
        trimmed.to_string()
    }

    pub(super) fn email(&mut self, field: &'static str, value: &str) -> String {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.errors.push(FieldError::new(field, "Email required"));
        } else if !is_valid_email(trimmed) {
            self.errors
                .push(FieldError::new(field, "Email must be a valid address"));
        }
        trimmed.to_string()
    }

    pub(super) fn description(&mut self, value: Option<String>) -> Option<String> {
        let value = optional_trimmed(value)?;
        if value.chars().count() > DESCRIPTION_MAX_CHARS {
            self.errors.push(FieldError::new(
                "description",
                format!("Description must be at most {DESCRIPTION_MAX_CHARS} characters"),
            ));
        }
        Some(value)
    }

    pub(super) fn finish(self) -> Result<(), AppError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::validation(self.errors))
        }
    }
}

/// Trims an optional string; blank collapses to `None`.
pub(super) fn optional_trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// `local@domain` with a single `@`, no whitespace and no empty domain
/// labels. A dot in the domain is not required.
fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }
    domain.split('.').all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_alphanumeric() || c == '-')
    })
}
