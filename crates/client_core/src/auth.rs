//! Demo sign-in and sign-up.
//!
//! This is a stub boundary, not authentication. Any well-formed email is
//! accepted together with the password `"password"` or any password of at
//! least [`MIN_PASSWORD_LEN`] characters, and nothing is checked against stored
//! accounts. Replace it before trusting an identity for anything but picking a
//! storage partition.

use std::sync::LazyLock;

use regex::Regex;
use shared::{
    domain::UserIdentity,
    error::{AuthError, AuthErrorKind},
};
use tracing::info;

pub const MIN_PASSWORD_LEN: usize = 6;
const DEMO_PASSWORD: &str = "password";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

#[derive(Debug, Clone, Default)]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Length in UTF-16 code units, so a character outside the BMP (most emoji)
/// counts twice.
fn password_len(password: &str) -> usize {
    password.encode_utf16().count()
}

fn accepts_password(password: &str) -> bool {
    password == DEMO_PASSWORD || password_len(password) >= MIN_PASSWORD_LEN
}

pub fn sign_in(email: &str, password: &str) -> Result<UserIdentity, AuthError> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(AuthError::new(
            AuthErrorKind::MissingCredentials,
            "Please enter email and password.",
        ));
    }
    if !is_valid_email(email) {
        return Err(AuthError::new(
            AuthErrorKind::InvalidEmail,
            "Please enter a valid email address.",
        ));
    }
    if !accepts_password(password) {
        return Err(AuthError::new(
            AuthErrorKind::InvalidCredentials,
            format!(
                "Invalid credentials. Try password length >= {MIN_PASSWORD_LEN} or \"{DEMO_PASSWORD}\"."
            ),
        ));
    }

    info!(email, "demo sign-in accepted");
    Ok(UserIdentity::new(email))
}

pub fn sign_up(request: &SignUpRequest) -> Result<UserIdentity, AuthError> {
    let name = request.name.trim();
    let email = request.email.trim();

    if name.is_empty() {
        return Err(AuthError::new(
            AuthErrorKind::MissingName,
            "Please enter your name.",
        ));
    }
    if email.is_empty() || request.password.is_empty() || request.confirm_password.is_empty() {
        return Err(AuthError::new(
            AuthErrorKind::MissingFields,
            "Please fill all the fields.",
        ));
    }
    if !is_valid_email(email) {
        return Err(AuthError::new(
            AuthErrorKind::InvalidEmail,
            "Please enter a valid email address.",
        ));
    }
    if password_len(&request.password) < MIN_PASSWORD_LEN {
        return Err(AuthError::new(
            AuthErrorKind::WeakPassword,
            format!("Password must be at least {MIN_PASSWORD_LEN} characters long."),
        ));
    }
    if request.password != request.confirm_password {
        return Err(AuthError::new(
            AuthErrorKind::PasswordMismatch,
            "Password and confirm password do not match.",
        ));
    }

    let identity = sign_in(email, &request.password)?.with_display_name(name);
    info!(email, "demo account created");
    Ok(identity)
}

#[cfg(test)]
#[path = "tests/auth_tests.rs"]
mod tests;
