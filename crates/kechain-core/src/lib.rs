// ABOUTME: Core types and constants for the KE-chain client library
// ABOUTME: Foundation crate with error handling, platform enumerations and resource records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 KE-chain Client Contributors

#![deny(unsafe_code)]

//! # KE-chain Core
//!
//! Foundation crate providing shared types for the KE-chain client. Nothing in
//! here performs I/O; the async client in the `kechain` crate builds on these
//! records and errors.
//!
//! ## Modules
//!
//! - **errors**: `KechainError`, `ErrorCode` and request diagnostics
//! - **enums**: platform enumerations (categories, activity types, widget xtypes)
//! - **constants**: API endpoint templates, header names and environment keys
//! - **models**: typed records for scopes, activities, parts, properties and customizations

/// Unified error handling with error codes and request diagnostics
pub mod errors;

/// Platform enumerations shared by the records and the client
pub mod enums;

/// API paths, header names and environment variable names
pub mod constants;

/// Typed resource records parsed at the JSON boundary
pub mod models;

pub use errors::{ErrorCode, KechainError, KechainResult, RequestDiagnostics};
