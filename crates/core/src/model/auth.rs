use serde::Serialize;
use thiserror::Error;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CredentialsError {
    #[error("email cannot be empty")]
    EmptyEmail,

    #[error("email address is not valid")]
    InvalidEmail,

    #[error("password cannot be empty")]
    EmptyPassword,

    #[error("password must be at least {MIN_PASSWORD_LEN} characters")]
    PasswordTooShort,

    #[error("full name cannot be empty")]
    EmptyFullName,

    #[error("password confirmation does not match")]
    PasswordMismatch,
}

/// Raw login form input.
#[derive(Clone, Debug, Default)]
pub struct LoginDraft {
    pub email: String,
    pub password: String,
}

/// Login request body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl LoginDraft {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Validate and normalize the draft into a login request.
    ///
    /// # Errors
    ///
    /// Returns `CredentialsError` if the email or password is missing or malformed.
    pub fn validate(self) -> Result<Credentials, CredentialsError> {
        let email = normalize_email(&self.email)?;
        if self.password.is_empty() {
            return Err(CredentialsError::EmptyPassword);
        }
        Ok(Credentials {
            email,
            password: self.password,
        })
    }
}

/// Raw registration form input.
#[derive(Clone, Debug, Default)]
pub struct RegisterDraft {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: Option<String>,
}

/// Registration request body. The confirmation is only sent when given.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Registration {
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_confirmation: Option<String>,
}

impl RegisterDraft {
    /// Validate and normalize the draft into a registration request.
    ///
    /// # Errors
    ///
    /// Returns `CredentialsError` for a blank name, malformed email, short
    /// password, or a confirmation that does not match.
    pub fn validate(self) -> Result<Registration, CredentialsError> {
        let full_name = self.full_name.trim().to_owned();
        if full_name.is_empty() {
            return Err(CredentialsError::EmptyFullName);
        }
        let email = normalize_email(&self.email)?;
        if self.password.is_empty() {
            return Err(CredentialsError::EmptyPassword);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(CredentialsError::PasswordTooShort);
        }
        let password_confirmation = self.password_confirmation.filter(|c| !c.is_empty());
        if let Some(confirmation) = password_confirmation.as_deref() {
            if confirmation != self.password {
                return Err(CredentialsError::PasswordMismatch);
            }
        }

        Ok(Registration {
            full_name,
            email,
            password: self.password,
            password_confirmation,
        })
    }
}

fn normalize_email(raw: &str) -> Result<String, CredentialsError> {
    let email = raw.trim();
    if email.is_empty() {
        return Err(CredentialsError::EmptyEmail);
    }
    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !valid || email.contains(char::is_whitespace) {
        return Err(CredentialsError::InvalidEmail);
    }
    Ok(email.to_owned())
}

/// Signed-in user as reported by the auth endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub full_name: String,
    pub email: String,
}

/// Outcome of a login or registration call.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AuthSession {
    pub access_token: Option<String>,
    pub user: Option<UserProfile>,
}
