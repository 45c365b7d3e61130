// ABOUTME: KE-chain API client: URL building, status handling and the results envelope
// ABOUTME: Resource operations live in the scopes, activities, parts and properties submodules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 KE-chain Client Contributors

//! # KE-chain Client
//!
//! [`Client`] owns the base URL and an injected [`Transport`]. It is cheap to
//! clone; clones share the transport.
//!
//! Every operation awaits its full round trip. Status codes are checked per
//! operation and a mismatch becomes [`KechainError::Api`] carrying the
//! transport's last exchange.
//!
//! ```rust,no_run
//! use kechain::client::Client;
//! use kechain::config::{ClientConfig, Credentials};
//!
//! # async fn example() -> kechain_core::KechainResult<()> {
//! let config = ClientConfig::new("https://acme.ke-chain.com")
//!     .with_credentials(Credentials::Token("bd9377793f7e74a2".to_owned()));
//! let client = Client::new(config)?;
//! let project = client.scope_by_name("Bike Project").await?;
//! # Ok(())
//! # }
//! ```

/// Activity retrieval and editing
pub mod activities;
/// Part retrieval
pub mod parts;
/// Property value updates and attachment uploads
pub mod properties;
/// Scope retrieval and project team management
pub mod scopes;

pub use activities::{ActivityFilter, ActivityUpdate, DateInput};
pub use parts::PartFilter;
pub use scopes::ScopeFilter;

use crate::config::{ClientConfig, EnvSettings};
use crate::transport::{ApiRequest, ApiResponse, HttpMethod, HttpTransport, Transport};
use kechain_core::models::ResultsEnvelope;
use kechain_core::{KechainError, KechainResult, RequestDiagnostics};
use serde::de::DeserializeOwned;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Async client for one KE-chain instance
#[derive(Clone)]
pub struct Client {
    base_url: Url,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Client over HTTPS with the configured credentials
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client cannot be built
    pub fn new(config: ClientConfig) -> KechainResult<Self> {
        let transport = HttpTransport::new(config.credentials, &config.http)?;
        Self::with_transport(&config.url, Arc::new(transport))
    }

    /// Client over an arbitrary transport
    ///
    /// # Errors
    ///
    /// Returns [`KechainError::Config`] if `url` is not an absolute http(s) URL
    pub fn with_transport(url: &str, transport: Arc<dyn Transport>) -> KechainResult<Self> {
        Ok(Self {
            base_url: normalize_base_url(url)?,
            transport,
        })
    }

    /// Client configured from `KECHAIN_*` variables, seeded from an optional `.env` file
    ///
    /// # Errors
    ///
    /// Returns [`KechainError::Config`] when the file cannot be loaded or `KECHAIN_URL` is missing
    pub fn from_env(env_file: Option<&Path>) -> KechainResult<Self> {
        Self::new(EnvSettings::load(env_file)?.client_config()?)
    }

    /// Base URL, always ending in `/`
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Method, URL, status and body of the most recent exchange
    #[must_use]
    pub fn last_exchange(&self) -> Option<RequestDiagnostics> {
        self.transport.last_exchange()
    }

    pub(crate) fn url(&self, path: &str) -> KechainResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| KechainError::illegal_argument(format!("invalid API path '{path}': {e}")))
    }

    pub(crate) fn request(&self, method: HttpMethod, path: &str) -> KechainResult<ApiRequest> {
        Ok(ApiRequest::new(method, self.url(path)?))
    }

    /// Send `request` and require `expected` as the response status
    pub(crate) async fn send_expecting(
        &self,
        request: ApiRequest,
        expected: u16,
        failure: impl FnOnce() -> String,
    ) -> KechainResult<ApiResponse> {
        let response = self.send(request).await?;
        if response.status == expected {
            Ok(response)
        } else {
            Err(self.api_error(failure()))
        }
    }

    pub(crate) async fn send(&self, request: ApiRequest) -> KechainResult<ApiResponse> {
        self.transport.execute(request).await
    }

    /// API error carrying the last exchange
    pub(crate) fn api_error(&self, message: String) -> KechainError {
        let diagnostics = self
            .transport
            .last_exchange()
            .unwrap_or_else(|| RequestDiagnostics::new("?", self.base_url.as_str()));
        KechainError::api(message, diagnostics)
    }

    /// GET a list endpoint and unwrap its `results` envelope
    pub(crate) async fn list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
        what: &str,
    ) -> KechainResult<Vec<T>> {
        let mut request = self.request(HttpMethod::Get, path)?;
        request.query = query;
        debug!(path, what, "Listing KE-chain resources");

        let response = self
            .send_expecting(request, 200, || format!("Could not retrieve {what}"))
            .await?;
        let envelope: ResultsEnvelope<T> = serde_json::from_value(response.body)?;
        Ok(envelope.results)
    }
}

/// Exactly one element of `items`
pub(crate) fn single<T>(mut items: Vec<T>, what: &str) -> KechainResult<T> {
    match items.len() {
        0 => Err(KechainError::not_found(format!("No {what} fits criteria"))),
        1 => Ok(items.remove(0)),
        n => Err(KechainError::multiple_found(format!(
            "Multiple {what} fit criteria ({n} found)"
        ))),
    }
}

/// Collects query parameters, skipping unset filters
#[derive(Debug, Default)]
pub(crate) struct Query(Vec<(String, String)>);

impl Query {
    pub(crate) fn opt(mut self, key: &str, value: Option<impl ToString>) -> Self {
        if let Some(value) = value {
            self.0.push((key.to_owned(), value.to_string()));
        }
        self
    }

    pub(crate) fn into_pairs(self) -> Vec<(String, String)> {
        self.0
    }
}

fn normalize_base_url(raw: &str) -> KechainResult<Url> {
    let mut url = Url::parse(raw.trim())
        .map_err(|e| KechainError::config(format!("invalid KE-chain URL '{raw}': {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(KechainError::config(format!(
            "KE-chain URL '{raw}' must use http or https"
        )));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let url = normalize_base_url("https://acme.ke-chain.com").unwrap();
        assert_eq!(url.as_str(), "https://acme.ke-chain.com/");

        let url = normalize_base_url("https://host.example/kechain?x=1").unwrap();
        assert_eq!(url.as_str(), "https://host.example/kechain/");
        assert_eq!(
            url.join("api/scopes.json").unwrap().as_str(),
            "https://host.example/kechain/api/scopes.json"
        );
    }

    #[test]
    fn test_base_url_rejects_garbage() {
        assert!(normalize_base_url("not a url").is_err());
        assert!(normalize_base_url("ftp://files.example").is_err());
    }

    #[test]
    fn test_single_distinguishes_none_and_many() {
        assert_eq!(single(vec![7], "scope").unwrap(), 7);

        let none = single(Vec::<u8>::new(), "scope").unwrap_err();
        assert!(matches!(none, KechainError::NotFound(_)));

        let many = single(vec![1, 2], "scope").unwrap_err();
        assert!(matches!(many, KechainError::MultipleFound(_)));
        assert!(many.to_string().contains("2 found"));
    }

    #[test]
    fn test_query_skips_unset_values() {
        let pairs = Query::default()
            .opt("name", Some("Bike"))
            .opt("id", None::<String>)
            .opt("limit", Some(5))
            .into_pairs();
        assert_eq!(
            pairs,
            vec![
                ("name".to_owned(), "Bike".to_owned()),
                ("limit".to_owned(), "5".to_owned())
            ]
        );
    }
}
