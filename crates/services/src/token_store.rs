use std::sync::Arc;

use storage::repository::KeyValueRepository;

use crate::error::TokenStoreError;

/// Storage key of the bearer token.
pub const ACCESS_TOKEN_KEY: &str = "hoctapapp/accessToken";

/// Persists the single access token shared by every gateway call.
#[derive(Clone)]
pub struct TokenStore {
    repo: Arc<dyn KeyValueRepository>,
}

impl TokenStore {
    #[must_use]
    pub fn new(repo: Arc<dyn KeyValueRepository>) -> Self {
        Self { repo }
    }

    /// Current token, if one is stored. A blank stored value reads as absent.
    ///
    /// # Errors
    ///
    /// Returns `TokenStoreError` if the slot cannot be read.
    pub async fn get(&self) -> Result<Option<String>, TokenStoreError> {
        let value = self.repo.get_value(ACCESS_TOKEN_KEY).await?;
        Ok(value.filter(|token| !token.trim().is_empty()))
    }

    /// Replace the stored token. Setting a blank token clears the slot.
    ///
    /// # Errors
    ///
    /// Returns `TokenStoreError` if the slot cannot be written.
    pub async fn set(&self, token: &str) -> Result<(), TokenStoreError> {
        if token.trim().is_empty() {
            return self.clear().await;
        }
        self.repo.set_value(ACCESS_TOKEN_KEY, token).await?;
        Ok(())
    }

    /// Remove the stored token; clearing an empty slot succeeds.
    ///
    /// # Errors
    ///
    /// Returns `TokenStoreError` if the slot cannot be written.
    pub async fn clear(&self) -> Result<(), TokenStoreError> {
        self.repo.remove_value(ACCESS_TOKEN_KEY).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::InMemoryRepository;

    fn store() -> (TokenStore, Arc<InMemoryRepository>) {
        let repo = Arc::new(InMemoryRepository::new());
        (TokenStore::new(repo.clone()), repo)
    }

    #[tokio::test]
    async fn set_then_get() {
        let (tokens, repo) = store();
        assert_eq!(tokens.get().await.unwrap(), None);

        tokens.set("abc").await.unwrap();
        assert_eq!(tokens.get().await.unwrap().as_deref(), Some("abc"));
        assert_eq!(
            repo.get_value(ACCESS_TOKEN_KEY).await.unwrap().as_deref(),
            Some("abc")
        );
    }

    #[tokio::test]
    async fn clear_is_idempotent() {
        let (tokens, _) = store();
        tokens.set("abc").await.unwrap();
        tokens.clear().await.unwrap();
        tokens.clear().await.unwrap();
        assert_eq!(tokens.get().await.unwrap(), None);
    }

    #[tokio::test]
    async fn blank_token_clears() {
        let (tokens, repo) = store();
        tokens.set("abc").await.unwrap();
        tokens.set("  ").await.unwrap();
        assert_eq!(tokens.get().await.unwrap(), None);
        assert_eq!(repo.get_value(ACCESS_TOKEN_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn blank_stored_value_reads_as_absent() {
        let (tokens, repo) = store();
        repo.set_value(ACCESS_TOKEN_KEY, "").await.unwrap();
        assert_eq!(tokens.get().await.unwrap(), None);
    }
}
