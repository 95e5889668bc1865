//! Client-side validation of form payloads.
//!
//! Checked before any network call; a failing payload never leaves the client.

/// Field-level validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("VIN must be 17 characters (letters and digits, no I, O or Q), got '{0}'")]
    InvalidVin(String),

    #[error("IMEI must be 15 digits, got '{0}'")]
    InvalidImei(String),

    #[error("Year must be between 1980 and {max}, got {year}")]
    InvalidYear { year: i32, max: i32 },

    #[error("Invalid email address '{0}'")]
    InvalidEmail(String),

    #[error("Phone number must contain 10 to 15 digits, got '{0}'")]
    InvalidPhone(String),

    #[error("End time must be after start time")]
    InvalidTimeWindow,
}

/// Fail with `MissingField` when `value` is blank
pub fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(())
    }
}

pub fn validate_vin(vin: &str) -> Result<(), ValidationError> {
    let valid = vin.len() == 17
        && vin
            .chars()
            .all(|c| c.is_ascii_alphanumeric() && !matches!(c.to_ascii_uppercase(), 'I' | 'O' | 'Q'));
    if valid {
        Ok(())
    } else {
        Err(ValidationError::InvalidVin(vin.to_string()))
    }
}

pub fn validate_imei(imei: &str) -> Result<(), ValidationError> {
    if imei.len() == 15 && imei.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidImei(imei.to_string()))
    }
}

/// Model years run from 1980 to next year
pub fn validate_year(year: i32) -> Result<(), ValidationError> {
    use chrono::Datelike;
    let max = chrono::Local::now().year() + 1;
    if (1980..=max).contains(&year) {
        Ok(())
    } else {
        Err(ValidationError::InvalidYear { year, max })
    }
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    };
    if valid && !email.contains(char::is_whitespace) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail(email.to_string()))
    }
}

/// Accepts separators like spaces, dashes, dots, parentheses and a leading '+'
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let allowed = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '.' | '(' | ')' | '+'));
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    if allowed && (10..=15).contains(&digits) {
        Ok(())
    } else {
        Err(ValidationError::InvalidPhone(phone.to_string()))
    }
}
