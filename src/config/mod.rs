// ABOUTME: Configuration module for the KE-chain client
// ABOUTME: Re-exports client, credential and environment settings types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 KE-chain Client Contributors

//! Configuration for the KE-chain client
//!
//! - **Environment**: `KECHAIN_*` variables and `.env` files
//! - **Client**: base URL, credentials and HTTP timeouts

/// Environment variables and client configuration
pub mod environment;

pub use environment::{
    parse_bool, ClientConfig, Credentials, EnvSettings, HttpClientConfig,
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS,
};
