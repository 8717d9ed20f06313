//! Appwrite client
//!
//! Immutable configuration plus the dispatch entry points every façade goes
//! through.

use super::decode::decode;
use super::http::HttpTransport;
use super::params::Params;
use crate::error::Result;
use reqwest::header::HeaderMap;
use reqwest::multipart::Form;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt;

/// Connection settings for one Appwrite project
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API endpoint including the version prefix, e.g. `https://cloud.appwrite.io/v1`
    pub endpoint: String,
    /// Project id sent as `X-Appwrite-Project`
    pub project: String,
    /// Server API key sent as `X-Appwrite-Key`
    pub key: Option<String>,
    pub locale: Option<String>,
    /// Accept self-signed TLS certificates (local development servers)
    pub self_signed: bool,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("project", &self.project)
            .field("key", &self.key.as_ref().map(|_| "<redacted>"))
            .field("locale", &self.locale)
            .field("self_signed", &self.self_signed)
            .finish()
    }
}

impl ClientConfig {
    pub fn new(endpoint: &str, project: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            project: project.to_string(),
            key: None,
            locale: None,
            self_signed: false,
        }
    }

    pub fn with_key(mut self, key: &str) -> Self {
        self.key = Some(key.to_string());
        self
    }

    pub fn with_locale(mut self, locale: &str) -> Self {
        self.locale = Some(locale.to_string());
        self
    }

    pub fn with_self_signed(mut self, self_signed: bool) -> Self {
        self.self_signed = self_signed;
        self
    }
}

/// Main Appwrite client
///
/// Holds no mutable state, so clones can be handed to façades and used from
/// concurrent tasks without locking.
#[derive(Clone, Debug)]
pub struct Client {
    config: ClientConfig,
    http: HttpTransport,
}

impl Client {
    /// Create a new client
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = HttpTransport::new(&config)?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn endpoint(&self) -> &str {
        self.http.endpoint()
    }

    /// Issue a request and return the raw response body
    pub async fn call_api(
        &self,
        method: Method,
        path: &str,
        headers: Option<&HeaderMap>,
        params: Params,
    ) -> Result<Vec<u8>> {
        self.http.send(method, path, headers, &params).await
    }

    /// Issue a request and return the response as a generic JSON object.
    ///
    /// An empty body yields an empty map.
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        headers: Option<&HeaderMap>,
        params: Params,
    ) -> Result<Map<String, Value>> {
        let body = self.call_api(method, path, headers, params).await?;
        decode(&body)
    }

    /// Issue a request and decode the response into `T`
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        params: Params,
    ) -> Result<T> {
        let body = self.call_api(method, path, None, params).await?;
        decode(&body)
    }

    /// Issue a request whose response carries nothing worth decoding
    pub async fn request_empty(&self, method: Method, path: &str, params: Params) -> Result<()> {
        self.call_api(method, path, None, params).await?;
        Ok(())
    }

    /// Upload a multipart form and decode the response into `T`
    pub async fn call_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        headers: Option<&HeaderMap>,
        form: Form,
    ) -> Result<T> {
        let body = self.http.send_multipart(path, headers, form).await?;
        decode(&body)
    }
}
