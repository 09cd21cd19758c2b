//! Input validation functions
//!
//! Validation runs on normalized input; call the `normalize_*` helpers
//! first. Email syntax checking is delegated to the `validator` crate.

use validator::ValidateEmail;

pub const MAX_USERNAME_CHARS: usize = 64;
pub const MAX_EMAIL_LEN: usize = 255;
/// Upper bound on password bytes fed to the hasher
pub const MAX_PASSWORD_LEN: usize = 128;

/// Trim surrounding whitespace from a username
pub fn normalize_username(username: &str) -> String {
    username.trim().to_string()
}

/// Trim and lowercase an email address
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate username format
///
/// Usernames may not contain `@` so that a login identifier can never
/// be both some user's username and another user's email.
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("Username cannot be empty".to_string());
    }
    if username.chars().count() > MAX_USERNAME_CHARS {
        return Err(format!(
            "Username must be at most {} characters",
            MAX_USERNAME_CHARS
        ));
    }
    if username.chars().any(char::is_whitespace) {
        return Err("Username cannot contain whitespace".to_string());
    }
    if username.contains('@') {
        return Err("Username cannot contain '@'".to_string());
    }
    Ok(())
}

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }
    if email.len() > MAX_EMAIL_LEN {
        return Err("Email too long".to_string());
    }
    if !email.validate_email() {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

/// Validate password
///
/// No strength policy is enforced here, only presence and a length cap.
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password cannot be empty".to_string());
    }
    if password.len() > MAX_PASSWORD_LEN {
        return Err("Password too long".to_string());
    }
    Ok(())
}
