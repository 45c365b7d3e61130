// ABOUTME: Unified error type for the KE-chain client with error codes and request diagnostics
// ABOUTME: Maps validation, range, API and transport failures onto a single thiserror enum
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 KE-chain Client Contributors

//! # Error Handling
//!
//! Every fallible operation in the client returns [`KechainResult`]. Errors are
//! surfaced to the immediate caller; nothing is retried or swallowed.
//!
//! - [`KechainError`] - the error enum
//! - [`ErrorCode`] - stable, serializable classification of an error
//! - [`RequestDiagnostics`] - the last request/response pair, attached to API errors

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input failed schema validation
    ValidationFailed,
    /// An index was outside the bounds of a sequence
    IndexOutOfRange,
    /// The remote API answered with a non-success status
    ApiError,
    /// A lookup matched no resource
    ResourceNotFound,
    /// A lookup that must match one resource matched several
    MultipleResourcesFound,
    /// An argument is not acceptable for the requested operation
    IllegalArgument,
    /// Client configuration is missing or invalid
    ConfigInvalid,
    /// The request never produced a response (connectivity, TLS, timeout)
    TransportFailure,
    /// A payload could not be serialized or deserialized
    SerializationError,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::ValidationFailed => "The provided configuration failed schema validation",
            Self::IndexOutOfRange => "The index is outside the bounds of the sequence",
            Self::ApiError => "The KE-chain API rejected the request",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::MultipleResourcesFound => "More than one resource matched the lookup",
            Self::IllegalArgument => "The argument is not valid for this operation",
            Self::ConfigInvalid => "Client configuration is missing or invalid",
            Self::TransportFailure => "The request could not be delivered to KE-chain",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }
}

/// The last request issued by a transport and what came back
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestDiagnostics {
    /// HTTP method of the request
    pub method: String,
    /// Full request URL, including the query string
    pub url: String,
    /// Response status, when a response was received
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Response body, when a response was received
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl RequestDiagnostics {
    /// Create diagnostics for a request that has not been answered yet
    #[must_use]
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            status: None,
            body: None,
        }
    }

    /// Attach the response status and body
    #[must_use]
    pub fn with_response(mut self, status: u16, body: Value) -> Self {
        self.status = Some(status);
        self.body = Some(body);
        self
    }
}

impl fmt::Display for RequestDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)?;
        if let Some(status) = self.status {
            write!(f, " -> {status}")?;
        }
        match &self.body {
            Some(Value::Null) | None => Ok(()),
            Some(body) => write!(f, ": {body}"),
        }
    }
}

/// Unified error type for the client
#[derive(Debug, Error)]
pub enum KechainError {
    /// A widget configuration failed JSON schema validation; nothing was sent
    #[error("validation failed: {}", .errors.join("; "))]
    Validation {
        /// One message per schema violation
        errors: Vec<String>,
    },

    /// An index was outside the current sequence; nothing was sent
    #[error("index {index} is out of range for a sequence of {len}")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Length of the sequence at the time of the call
        len: usize,
    },

    /// The remote API answered with a non-success status
    #[error("{message} ({diagnostics})")]
    Api {
        /// What the client was trying to do
        message: String,
        /// Last request URL, status and body
        diagnostics: Box<RequestDiagnostics>,
    },

    /// A lookup matched nothing
    #[error("{0}")]
    NotFound(String),

    /// A single-resource lookup matched more than one resource
    #[error("{0}")]
    MultipleFound(String),

    /// An argument is not valid for the requested operation
    #[error("{0}")]
    IllegalArgument(String),

    /// Client configuration is missing or invalid
    #[error("configuration error: {0}")]
    Config(String),

    /// The request did not produce a response
    #[error("transport failure: {message}")]
    Transport {
        /// Human-readable description
        message: String,
        /// Underlying transport error
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// A payload could not be (de)serialized
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for convenience
pub type KechainResult<T> = Result<T, KechainError>;

impl KechainError {
    /// Schema validation failure
    #[must_use]
    pub fn validation(errors: Vec<String>) -> Self {
        Self::Validation { errors }
    }

    /// API failure carrying the last exchange
    #[must_use]
    pub fn api(message: impl Into<String>, diagnostics: RequestDiagnostics) -> Self {
        Self::Api {
            message: message.into(),
            diagnostics: Box::new(diagnostics),
        }
    }

    /// Resource not found
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// More than one resource matched
    #[must_use]
    pub fn multiple_found(message: impl Into<String>) -> Self {
        Self::MultipleFound(message.into())
    }

    /// Illegal argument
    #[must_use]
    pub fn illegal_argument(message: impl Into<String>) -> Self {
        Self::IllegalArgument(message.into())
    }

    /// Configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Transport failure without an underlying error value
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Classify this error
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Validation { .. } => ErrorCode::ValidationFailed,
            Self::IndexOutOfRange { .. } => ErrorCode::IndexOutOfRange,
            Self::Api { .. } => ErrorCode::ApiError,
            Self::NotFound(_) => ErrorCode::ResourceNotFound,
            Self::MultipleFound(_) => ErrorCode::MultipleResourcesFound,
            Self::IllegalArgument(_) => ErrorCode::IllegalArgument,
            Self::Config(_) => ErrorCode::ConfigInvalid,
            Self::Transport { .. } => ErrorCode::TransportFailure,
            Self::Serialization(_) => ErrorCode::SerializationError,
        }
    }

    /// Whether repeating the same call could succeed without changing the input
    ///
    /// The client never retries on its own; this is a hint for callers.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Diagnostics of the failed exchange, for API errors
    #[must_use]
    pub fn diagnostics(&self) -> Option<&RequestDiagnostics> {
        match self {
            Self::Api { diagnostics, .. } => Some(diagnostics),
            _ => None,
        }
    }
}

#[cfg(feature = "http-errors")]
impl From<reqwest::Error> for KechainError {
    fn from(error: reqwest::Error) -> Self {
        let message = match error.url() {
            Some(url) => format!("request to {url} failed: {error}"),
            None => error.to_string(),
        };
        Self::Transport {
            message,
            source: Some(Box::new(error)),
        }
    }
}
