use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use hoctap_core::model::{ChapterId, ClassId, Credentials, Registration, SubjectId};

use super::{AuthGateway, CatalogGateway, into_list, require_id};
use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::token_store::TokenStore;

/// HTTP gateway backed by `reqwest`.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    config: ApiConfig,
    tokens: TokenStore,
}

impl ApiClient {
    #[must_use]
    pub fn new(config: ApiConfig, tokens: TokenStore) -> Self {
        Self {
            client: Client::new(),
            config,
            tokens,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn post_json<B: Serialize + Sync>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<Value, ApiError> {
        let url = self.config.endpoint(segments);
        debug!(%url, "POST");
        let response = self.client.post(url).json(body).send().await?;
        read_json(response).await
    }

    async fn get_list(&self, segments: &[&str]) -> Result<Vec<Value>, ApiError> {
        let url = self.config.endpoint(segments);
        debug!(%url, "GET");
        let request = self.authorize(self.client.get(url)).await?;
        let response = request.send().await?;
        Ok(into_list(read_json(response).await?))
    }

    async fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder, ApiError> {
        Ok(match self.tokens.get().await? {
            Some(token) => request.bearer_auth(token),
            None => request,
        })
    }
}

async fn read_json(response: Response) -> Result<Value, ApiError> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        let message = error_message(&text)
            .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));
        warn!(status = status.as_u16(), %message, "request rejected");
        return Err(ApiError::Status { status, message });
    }

    Ok(serde_json::from_str(&text)?)
}

/// Server-supplied reason for a failure: JSON `message` / `error`, else the raw body.
fn error_message(body: &str) -> Option<String> {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        let reason = ["message", "error"].iter().find_map(|key| {
            value
                .get(key)
                .and_then(Value::as_str)
                .filter(|text| !text.trim().is_empty())
        });
        if let Some(reason) = reason {
            return Some(reason.to_owned());
        }
    }
    (!body.trim().is_empty()).then(|| body.to_owned())
}

#[async_trait]
impl AuthGateway for ApiClient {
    async fn login(&self, credentials: &Credentials) -> Result<Value, ApiError> {
        self.post_json(&["api", "auth", "login"], credentials).await
    }

    async fn register(&self, registration: &Registration) -> Result<Value, ApiError> {
        self.post_json(&["api", "auth", "register"], registration)
            .await
    }
}

#[async_trait]
impl CatalogGateway for ApiClient {
    async fn fetch_classes(&self) -> Result<Vec<Value>, ApiError> {
        self.get_list(&["api", "admin", "classes", ""]).await
    }

    async fn fetch_subjects_by_class(&self, class_id: &ClassId) -> Result<Vec<Value>, ApiError> {
        let id = require_id(class_id.as_str(), "classId")?;
        self.get_list(&["api", "subjects", "by-class", id]).await
    }

    async fn fetch_chapters_by_subject(
        &self,
        subject_id: &SubjectId,
    ) -> Result<Vec<Value>, ApiError> {
        let id = require_id(subject_id.as_str(), "subjectId")?;
        self.get_list(&["api", "admin", "chapters", "by-subject", id])
            .await
    }

    async fn fetch_lessons_by_chapter(
        &self,
        chapter_id: &ChapterId,
    ) -> Result<Vec<Value>, ApiError> {
        let id = require_id(chapter_id.as_str(), "chapterId")?;
        self.get_list(&["api", "admin", "lessons", "by-chapter", id])
            .await
    }
}
