use std::sync::Arc;

use tracing::info;

use hoctap_core::model::{AuthSession, LoginDraft, RegisterDraft};
use hoctap_core::normalize::extract_auth_session;

use crate::api::AuthGateway;
use crate::error::AuthServiceError;
use crate::token_store::TokenStore;

/// Sign-in, registration and sign-out.
#[derive(Clone)]
pub struct AuthService {
    gateway: Arc<dyn AuthGateway>,
    tokens: TokenStore,
}

impl AuthService {
    #[must_use]
    pub fn new(gateway: Arc<dyn AuthGateway>, tokens: TokenStore) -> Self {
        Self { gateway, tokens }
    }

    /// Validate the form, log in and persist the returned token.
    ///
    /// # Errors
    ///
    /// Returns `AuthServiceError` if validation or the request fails, or if
    /// the response carries no token.
    pub async fn login(&self, draft: LoginDraft) -> Result<AuthSession, AuthServiceError> {
        let credentials = draft.validate()?;
        let response = self.gateway.login(&credentials).await?;
        let session = extract_auth_session(&response);
        let token = session
            .access_token
            .as_deref()
            .ok_or(AuthServiceError::MissingToken)?;
        self.tokens.set(token).await?;
        info!(email = %credentials.email, "signed in");
        Ok(session)
    }

    /// Validate the form and register. A token in the response is persisted,
    /// signing the learner in; without one the learner must log in next.
    ///
    /// # Errors
    ///
    /// Returns `AuthServiceError` if validation or the request fails.
    pub async fn register(&self, draft: RegisterDraft) -> Result<AuthSession, AuthServiceError> {
        let registration = draft.validate()?;
        let response = self.gateway.register(&registration).await?;
        let session = extract_auth_session(&response);
        if let Some(token) = session.access_token.as_deref() {
            self.tokens.set(token).await?;
        }
        info!(
            email = %registration.email,
            signed_in = session.access_token.is_some(),
            "registered"
        );
        Ok(session)
    }

    /// Forget the stored token.
    ///
    /// # Errors
    ///
    /// Returns `AuthServiceError::Token` if the token slot cannot be cleared.
    pub async fn logout(&self) -> Result<(), AuthServiceError> {
        self.tokens.clear().await?;
        info!("signed out");
        Ok(())
    }

    /// Whether a token is stored.
    ///
    /// # Errors
    ///
    /// Returns `AuthServiceError::Token` if the token slot cannot be read.
    pub async fn is_signed_in(&self) -> Result<bool, AuthServiceError> {
        Ok(self.tokens.get().await?.is_some())
    }
}
