use super::*;

fn sign_up_request(name: &str, email: &str, password: &str, confirm: &str) -> SignUpRequest {
    SignUpRequest {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        confirm_password: confirm.to_string(),
    }
}

#[test]
fn sign_in_requires_both_fields() {
    let err = sign_in("   ", "secret1").expect_err("missing email");
    assert_eq!(err.kind, AuthErrorKind::MissingCredentials);
    let err = sign_in("a@b.co", "").expect_err("missing password");
    assert_eq!(err.kind, AuthErrorKind::MissingCredentials);
}

#[test]
fn sign_in_rejects_malformed_email() {
    for email in ["plain", "a@b", "a b@c.d", "@c.d"] {
        let err = sign_in(email, "password").expect_err(email);
        assert_eq!(err.kind, AuthErrorKind::InvalidEmail, "{email}");
    }
}

#[test]
fn sign_in_accepts_demo_password_or_long_password() {
    let identity = sign_in("  dana@example.com ", "password").expect("demo password");
    assert_eq!(identity.email, "dana@example.com");
    assert!(sign_in("dana@example.com", "sixchr").is_ok());

    let err = sign_in("dana@example.com", "short").expect_err("short password");
    assert_eq!(err.kind, AuthErrorKind::InvalidCredentials);
    assert_eq!(err.title(), "Login failed");
}

#[test]
fn sign_up_checks_fields_in_order() {
    let cases = [
        (
            sign_up_request(" ", "", "", ""),
            AuthErrorKind::MissingName,
        ),
        (
            sign_up_request("Eve", "eve@example.com", "secret1", ""),
            AuthErrorKind::MissingFields,
        ),
        (
            sign_up_request("Eve", "eve.example.com", "secret1", "secret1"),
            AuthErrorKind::InvalidEmail,
        ),
        (
            sign_up_request("Eve", "eve@example.com", "abc", "abc"),
            AuthErrorKind::WeakPassword,
        ),
        (
            sign_up_request("Eve", "eve@example.com", "secret1", "secret2"),
            AuthErrorKind::PasswordMismatch,
        ),
    ];

    for (request, expected) in cases {
        let err = sign_up(&request).expect_err("invalid sign-up");
        assert_eq!(err.kind, expected);
    }
}

#[test]
fn sign_up_signs_in_with_display_name() {
    let identity = sign_up(&sign_up_request(
        " Eve ",
        "eve@example.com",
        "secret1",
        "secret1",
    ))
    .expect("sign-up");
    assert_eq!(identity.email, "eve@example.com");
    assert_eq!(identity.display_name.as_deref(), Some("Eve"));
}

#[test]
fn weak_demo_password_is_rejected_at_sign_up() {
    let err = sign_up(&sign_up_request("Eve", "eve@example.com", "pw", "pw")).expect_err("weak");
    assert_eq!(err.kind, AuthErrorKind::WeakPassword);
}

#[test]
fn password_length_counts_utf16_code_units() {
    // Three emoji are six UTF-16 code units.
    assert!(sign_in("a@b.co", "😀😀😀").is_ok());
    assert_eq!(
        sign_in("a@b.co", "😀😀").map_err(|err| err.kind),
        Err(AuthErrorKind::InvalidCredentials)
    );

    let request = sign_up_request("Ada", "ada@example.com", "ab😀😀", "ab😀😀");
    assert!(sign_up(&request).is_ok());
    let short = sign_up_request("Ada", "ada@example.com", "abc😀", "abc😀");
    assert_eq!(
        sign_up(&short).map_err(|err| err.kind),
        Err(AuthErrorKind::WeakPassword)
    );
}
