use super::{ServiceError, ServiceResult};

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_EMAIL_LEN: usize = 255;
pub const MAX_PHONE_LEN: usize = 20;
pub const MAX_EVENT_NAME_LEN: usize = 200;
pub const MAX_LOCATION_LEN: usize = 255;
pub const MAX_STATUS_LEN: usize = 50;
pub const MIN_PASSWORD_LEN: usize = 8;

/// Trim and check the shape `local@domain.tld`. Case is preserved; the store
/// compares emails case-insensitively.
pub fn normalize_email(raw: &str) -> ServiceResult<String> {
    let email = raw.trim();
    let invalid = || ServiceError::Validation("A valid email address is required.".into());

    if email.is_empty() || email.len() > MAX_EMAIL_LEN || email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return Err(invalid());
    }
    Ok(email.to_string())
}

/// Trim a required text field and enforce its maximum length.
pub fn required_text(label: &str, raw: &str, max_len: usize) -> ServiceResult<String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(ServiceError::Validation(format!("{} is required.", label)));
    }
    if value.chars().count() > max_len {
        return Err(ServiceError::Validation(format!(
            "{} must be at most {} characters.",
            label, max_len
        )));
    }
    Ok(value.to_string())
}

pub fn optional_text(label: &str, raw: &str, max_len: usize) -> ServiceResult<String> {
    let value = raw.trim();
    if value.chars().count() > max_len {
        return Err(ServiceError::Validation(format!(
            "{} must be at most {} characters.",
            label, max_len
        )));
    }
    Ok(value.to_string())
}

pub fn password(raw: &str) -> ServiceResult<()> {
    if raw.chars().count() < MIN_PASSWORD_LEN {
        return Err(ServiceError::Validation(format!(
            "Password must be at least {} characters.",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

pub fn capacity(max_capacity: i64) -> ServiceResult<()> {
    if max_capacity <= 0 {
        return Err(ServiceError::Validation(
            "Max capacity must be a positive number.".into(),
        ));
    }
    Ok(())
}
