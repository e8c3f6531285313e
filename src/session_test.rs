use super::*;

fn registration() -> Registration {
    Registration {
        name: "Asha Rao".into(),
        email: "asha@acme.io".into(),
        password: "secret1".into(),
        confirm_password: "secret1".into(),
        company: "Acme".into(),
        agree_terms: true,
    }
}

// =============================================================================
// User::from_login
// =============================================================================

#[test]
fn from_login_uses_local_part_as_name() {
    let user = User::from_login("jane.doe@example.com");
    assert_eq!(user.name, "jane.doe");
    assert_eq!(user.email, "jane.doe@example.com");
    assert_eq!(user.role, SUPPORT_AGENT_ROLE);
    assert_eq!(user.avatar.as_deref(), Some("J"));
    assert!(user.company.is_none());
}

#[test]
fn from_login_without_at_sign_keeps_whole_email() {
    assert_eq!(User::from_login("agent").name, "agent");
}

#[test]
fn from_login_empty_local_part_falls_back_to_user() {
    let user = User::from_login("@example.com");
    assert_eq!(user.name, "User");
    assert_eq!(user.avatar.as_deref(), Some("@"));
}

#[test]
fn demo_user_identity() {
    let user = User::demo();
    assert_eq!(user.name, "Demo User");
    assert_eq!(user.email, "demo@supportpro.com");
}

#[test]
fn user_serialization_omits_missing_optionals() {
    let value = serde_json::to_value(User::demo()).unwrap();
    assert!(value.get("company").is_none());
    assert!(value.get("avatar").is_none());
    let restored: User = serde_json::from_value(value).unwrap();
    assert_eq!(restored, User::demo());
}

// =============================================================================
// LoginForm
// =============================================================================

#[test]
fn login_form_requires_both_fields() {
    let errors = LoginForm::default().validate().unwrap_err();
    assert_eq!(errors.get("email"), Some("Email is required"));
    assert_eq!(errors.get("password"), Some("Password is required"));

    let ok = LoginForm { email: "a@b.c".into(), password: "x".into() };
    assert!(ok.validate().is_ok());
}

// =============================================================================
// Registration
// =============================================================================

#[test]
fn registration_valid_form_passes() {
    assert!(registration().validate().is_ok());
}

#[test]
fn registration_empty_form_reports_every_field() {
    let errors = Registration::default().validate().unwrap_err();
    assert_eq!(errors.get("name"), Some("Full name is required"));
    assert_eq!(errors.get("email"), Some("Email is required"));
    assert_eq!(errors.get("password"), Some("Password must be at least 6 characters"));
    assert_eq!(errors.get("company"), Some("Company name is required"));
    assert_eq!(errors.get("agreeTerms"), Some("You must agree to the terms"));
    // Both passwords empty, so they match.
    assert_eq!(errors.get("confirmPassword"), None);
}

#[test]
fn registration_password_mismatch() {
    let form = Registration { confirm_password: "secret2".into(), ..registration() };
    let errors = form.validate().unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.get("confirmPassword"), Some("Passwords do not match"));
}

#[test]
fn registration_short_password() {
    let form = Registration { password: "abc".into(), confirm_password: "abc".into(), ..registration() };
    let errors = form.validate().unwrap_err();
    assert_eq!(errors.get("password"), Some("Password must be at least 6 characters"));
}

#[test]
fn registration_user_carries_company() {
    let user = registration().to_user();
    assert_eq!(user.name, "Asha Rao");
    assert_eq!(user.company.as_deref(), Some("Acme"));
    assert_eq!(user.role, SUPPORT_AGENT_ROLE);
}
