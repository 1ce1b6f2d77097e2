//! Shared error types for the services crate.

use thiserror::Error;

use hoctap_core::model::CredentialsError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by the HTTP gateway.
///
/// `Display` is the text shown inline to the learner.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("{0} is required")]
    MissingId(&'static str),
    #[error("{message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },
    #[error("could not reach the server: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("the server sent an unreadable response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Token(#[from] TokenStoreError),
}

impl ApiError {
    /// HTTP status of a rejected request, if the server answered at all.
    #[must_use]
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Inline text for the learner, or `fallback` when the error carries none.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        let text = self.to_string();
        if text.trim().is_empty() {
            fallback.to_owned()
        } else {
            text
        }
    }
}

/// Errors emitted by `TokenStore`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TokenStoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `AuthService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthServiceError {
    #[error(transparent)]
    Credentials(#[from] CredentialsError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Token(#[from] TokenStoreError),
    #[error("the server did not return an access token")]
    MissingToken,
}

/// Errors emitted by `CatalogService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("Không thể tải danh sách lớp. Vui lòng thử lại sau.")]
    NoClasses,
    #[error("Không thể tải danh sách lớp. Vui lòng thử lại sau.")]
    Classes(#[source] ApiError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("no subject could be resolved")]
    SubjectUnresolved,
}

/// Errors emitted while reading configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(String),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
