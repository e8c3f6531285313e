//! Session users and the mock login/registration forms.
//!
//! There is no credential check anywhere: login accepts any email and
//! derives a display identity from it. The form rules below only mirror
//! what the login page asks for before letting a user through.

use serde::{Deserialize, Serialize};

use crate::error::FieldErrors;

pub const SUPPORT_AGENT_ROLE: &str = "Support Agent";
pub const DEMO_NAME: &str = "Demo User";
pub const DEMO_EMAIL: &str = "demo@supportpro.com";
const MIN_PASSWORD_LEN: usize = 6;

/// The logged-in user. At most one exists per store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl User {
    /// Identity for a plain email login: the local part becomes the name
    /// (`User` when empty) and the first character the avatar letter.
    #[must_use]
    pub fn from_login(email: &str) -> Self {
        let local = email.split('@').next().unwrap_or_default();
        let name = if local.is_empty() { "User" } else { local };
        let avatar = email.chars().next().map(|c| c.to_uppercase().collect::<String>());
        Self { name: name.to_owned(), email: email.to_owned(), role: SUPPORT_AGENT_ROLE.to_owned(), company: None, avatar }
    }

    #[must_use]
    pub fn demo() -> Self {
        Self {
            name: DEMO_NAME.to_owned(),
            email: DEMO_EMAIL.to_owned(),
            role: SUPPORT_AGENT_ROLE.to_owned(),
            company: None,
            avatar: None,
        }
    }
}

// =============================================================================
// LOGIN FORM
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    /// # Errors
    ///
    /// Returns field messages for a missing email or password.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.email.is_empty() {
            errors.insert("email", "Email is required");
        }
        if self.password.is_empty() {
            errors.insert("password", "Password is required");
        }
        errors.into_result()
    }
}

// =============================================================================
// REGISTRATION FORM
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub company: String,
    pub agree_terms: bool,
}

impl Registration {
    /// # Errors
    ///
    /// Returns one message per failing field.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.name.trim().is_empty() {
            errors.insert("name", "Full name is required");
        }
        if self.email.trim().is_empty() {
            errors.insert("email", "Email is required");
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.insert("password", "Password must be at least 6 characters");
        }
        if self.password != self.confirm_password {
            errors.insert("confirmPassword", "Passwords do not match");
        }
        if self.company.trim().is_empty() {
            errors.insert("company", "Company name is required");
        }
        if !self.agree_terms {
            errors.insert("agreeTerms", "You must agree to the terms");
        }
        errors.into_result()
    }

    #[must_use]
    pub fn to_user(&self) -> User {
        User {
            name: self.name.clone(),
            email: self.email.clone(),
            role: SUPPORT_AGENT_ROLE.to_owned(),
            company: Some(self.company.clone()),
            avatar: None,
        }
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
