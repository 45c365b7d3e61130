// ABOUTME: Transport abstraction between the client and the KE-chain REST API
// ABOUTME: Request/response value types plus the injectable async Transport trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 KE-chain Client Contributors

//! # Transport
//!
//! The [`Client`](crate::client::Client) never talks to the network directly.
//! It builds an [`ApiRequest`] and hands it to a [`Transport`], which returns
//! the status and decoded body. Non-success statuses are not errors at this
//! layer; the client decides which statuses an operation accepts.
//!
//! [`HttpTransport`] is the reqwest-backed implementation. Tests substitute an
//! in-memory transport.

/// reqwest-backed transport
pub mod http;

pub use http::HttpTransport;

use async_trait::async_trait;
use kechain_core::{KechainResult, RequestDiagnostics};
use serde_json::Value;
use std::fmt;
use url::Url;

/// HTTP methods used by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// Read
    Get,
    /// Create or upload
    Post,
    /// Replace or update
    Put,
    /// Remove
    Delete,
}

impl HttpMethod {
    /// Method name as sent on the wire
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file sent as one field of a multipart request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    /// Form field name
    pub field: String,
    /// File name reported to the server
    pub file_name: String,
    /// MIME type, e.g. `image/png`
    pub content_type: String,
    /// File contents
    pub data: Vec<u8>,
}

impl FilePart {
    /// Create a file part
    #[must_use]
    pub fn new(
        field: impl Into<String>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            field: field.into(),
            file_name: file_name.into(),
            content_type: content_type.into(),
            data,
        }
    }
}

/// Multipart body: plain text fields plus files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    /// Text fields in insertion order
    pub fields: Vec<(String, String)>,
    /// Files in insertion order
    pub files: Vec<FilePart>,
}

/// Request body variants
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    /// No body
    #[default]
    Empty,
    /// `application/json`
    Json(Value),
    /// `application/x-www-form-urlencoded`
    Form(Vec<(String, String)>),
    /// `multipart/form-data`
    Multipart(MultipartForm),
}

/// One API request
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method
    pub method: HttpMethod,
    /// Absolute URL without query string
    pub url: Url,
    /// Query parameters in insertion order
    pub query: Vec<(String, String)>,
    /// Body
    pub body: RequestBody,
}

impl ApiRequest {
    /// Request with no query and no body
    #[must_use]
    pub fn new(method: HttpMethod, url: Url) -> Self {
        Self {
            method,
            url,
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Set a JSON body
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    /// Set a urlencoded form body
    #[must_use]
    pub fn form(mut self, fields: Vec<(String, String)>) -> Self {
        self.body = RequestBody::Form(fields);
        self
    }

    /// Set a multipart body
    #[must_use]
    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }

    /// Full URL including the query string
    #[must_use]
    pub fn full_url(&self) -> Url {
        let mut url = self.url.clone();
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(self.query.iter());
        }
        url
    }
}

/// Status and decoded body of a response
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Decoded JSON body; `Null` when empty, a string when not JSON
    pub body: Value,
}

impl ApiResponse {
    /// Build a response from raw body text
    #[must_use]
    pub fn from_text(status: u16, text: &str) -> Self {
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_owned()))
        };
        Self { status, body }
    }

    /// Whether the status is in the 2xx range
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Carries requests to the KE-chain API
///
/// Implementations must be usable from several tasks at once and must keep
/// the last request/response pair for error diagnostics.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue one request and return whatever status came back
    ///
    /// # Errors
    ///
    /// Returns [`KechainError::Transport`](kechain_core::KechainError::Transport)
    /// when no response was received.
    async fn execute(&self, request: ApiRequest) -> KechainResult<ApiResponse>;

    /// Method, URL, status and body of the most recent exchange
    fn last_exchange(&self) -> Option<RequestDiagnostics>;
}
