use super::{StorageBackend, StoreError};
use reqwest::StatusCode;
use tracing::debug;

/// HTTP key-value client, the network-backed counterpart of
/// [`super::JsonFileStore`]. Expects a plain `GET/PUT/DELETE <base>/kv/<key>`
/// endpoint exchanging raw snapshot bodies.
pub struct RemoteStore {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl RemoteStore {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::blocking::Client::new(),
        }
    }

    fn url_for(&self, key: &str) -> String {
        format!("{}/kv/{}", self.base_url, key)
    }
}

impl StorageBackend for RemoteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let response = self
            .client
            .get(self.url_for(key))
            .send()
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(StoreError::Backend(format!(
                "GET {} returned {}",
                key,
                response.status()
            )));
        }

        let body = response
            .text()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(Some(body))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let response = self
            .client
            .put(self.url_for(key))
            .body(value.to_string())
            .send()
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StoreError::Backend(format!(
                "PUT {} returned {}",
                key,
                response.status()
            )));
        }
        debug!(target: "storage", "pushed {} ({} bytes)", key, value.len());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let response = self
            .client
            .delete(self.url_for(key))
            .send()
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        // Deleting an absent key is fine, mirroring the other backends.
        if !response.status().is_success() && response.status() != StatusCode::NOT_FOUND {
            return Err(StoreError::Backend(format!(
                "DELETE {} returned {}",
                key,
                response.status()
            )));
        }
        Ok(())
    }
}
