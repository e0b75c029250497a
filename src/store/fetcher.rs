//! Shared request path for all stores
//!
//! Attaches credentials for authenticated resources and turns a 401 on
//! those resources into a logout plus [`Error::SessionExpired`].

use crate::auth::CredentialProvider;
use crate::decode::{Page, PageDecoder};
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::resource::ResourceDef;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Issues requests for one resource
#[derive(Debug, Clone)]
pub struct ResourceFetcher {
    resource: ResourceDef,
    client: Arc<HttpClient>,
    credentials: Arc<dyn CredentialProvider>,
    decoder: PageDecoder,
}

impl ResourceFetcher {
    /// Create a fetcher for `resource`
    pub fn new(
        resource: ResourceDef,
        client: Arc<HttpClient>,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Self {
        let decoder = PageDecoder::new(resource.response_key.clone());
        Self {
            resource,
            client,
            credentials,
            decoder,
        }
    }

    /// Resource this fetcher reads
    pub fn resource(&self) -> &ResourceDef {
        &self.resource
    }

    /// `GET {path}?page={page}&limit={limit}`, decoded
    pub async fn page<T: DeserializeOwned>(&self, page: u32, limit: u32) -> Result<Page<T>> {
        let request = RequestConfig::new().query("page", page).query("limit", limit);
        let body = self.get(&self.resource.path, request).await?;
        self.decoder.decode(body)
    }

    /// `GET {path}?limit={limit}`, decoded without pagination
    pub async fn list<T: DeserializeOwned>(&self, limit: u32) -> Result<Vec<T>> {
        let request = RequestConfig::new().query("limit", limit);
        let body = self.get(&self.resource.path, request).await?;
        Ok(self.decoder.decode(body)?.items)
    }

    /// `GET {path}/{id}`, decoded as one record
    pub async fn item<T: DeserializeOwned>(&self, id: &str) -> Result<T> {
        let body = self
            .get(&self.resource.item_path(id), RequestConfig::new())
            .await?;
        self.decoder.decode_item(&self.resource.response_key, body)
    }

    async fn get(&self, path: &str, mut request: RequestConfig) -> Result<Value> {
        if self.resource.requires_auth {
            let token = self.credentials.token().await.ok_or(Error::AuthRequired)?;
            request = request.bearer(token);
        }

        debug!(resource = %self.resource.name, "GET {path}");
        match self.client.get_json_with_config(path, request).await {
            Err(e) if self.resource.requires_auth && e.is_unauthorized() => {
                warn!(resource = %self.resource.name, "Server rejected credentials");
                // Detached so a superseded request still finishes the logout
                let credentials = Arc::clone(&self.credentials);
                let logout = tokio::spawn(async move { credentials.session_expired().await });
                if let Err(join_err) = logout.await {
                    warn!(resource = %self.resource.name, "Logout task failed: {join_err}");
                }
                Err(Error::SessionExpired)
            }
            other => other,
        }
    }
}
