//! Gateways to the learning backend.
//!
//! Gateways return raw JSON records; shaping them into view models is the
//! job of `hoctap_core::normalize`.

use async_trait::async_trait;
use serde_json::Value;

use hoctap_core::model::{ChapterId, ClassId, Credentials, Registration, SubjectId};

use crate::error::ApiError;

mod client;
mod static_catalog;

pub use client::ApiClient;
pub use static_catalog::StaticCatalog;

/// Login and registration endpoints.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Submit a login; the response body is returned as-is.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the server rejects it.
    async fn login(&self, credentials: &Credentials) -> Result<Value, ApiError>;

    /// Submit a registration; the response body is returned as-is.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the server rejects it.
    async fn register(&self, registration: &Registration) -> Result<Value, ApiError>;
}

/// Read-only catalog endpoints. Every list call yields an empty list when the
/// server answers with something other than an array.
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the server rejects it.
    async fn fetch_classes(&self) -> Result<Vec<Value>, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError::MissingId` for a blank id, otherwise as `fetch_classes`.
    async fn fetch_subjects_by_class(&self, class_id: &ClassId) -> Result<Vec<Value>, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError::MissingId` for a blank id, otherwise as `fetch_classes`.
    async fn fetch_chapters_by_subject(
        &self,
        subject_id: &SubjectId,
    ) -> Result<Vec<Value>, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError::MissingId` for a blank id, otherwise as `fetch_classes`.
    async fn fetch_lessons_by_chapter(
        &self,
        chapter_id: &ChapterId,
    ) -> Result<Vec<Value>, ApiError>;
}

/// Reject a blank id before any request is made.
pub(crate) fn require_id<'a>(id: &'a str, name: &'static str) -> Result<&'a str, ApiError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return Err(ApiError::MissingId(name));
    }
    Ok(trimmed)
}

/// Non-array bodies become an empty list.
pub(crate) fn into_list(body: Value) -> Vec<Value> {
    match body {
        Value::Array(items) => items,
        _ => Vec::new(),
    }
}
