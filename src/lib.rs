// ABOUTME: Main library entry point for the KE-chain client
// ABOUTME: Async REST client for scopes, activities, parts and activity widget customization
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 KE-chain Client Contributors

#![deny(unsafe_code)]

//! # KE-chain Client
//!
//! An async client for the KE-chain PLM REST API. Scripts use it to look up a
//! project, walk its activities and parts, and configure what an activity
//! shows to its assignees.
//!
//! ## Features
//!
//! - **Project bootstrap**: [`get_project`] from arguments or `KECHAIN_*` variables
//! - **Resources**: scopes, activities, parts and properties as typed records
//! - **Widget customization**: [`ExtCustomization`] adds, removes and validates
//!   the Ext JS widgets of an activity
//! - **Pluggable transport**: the HTTP layer sits behind the [`transport::Transport`] trait
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use kechain::{get_project, ProjectArgs, TitlePolicy};
//! use kechain::client::{ActivityFilter, PartFilter};
//!
//! #[tokio::main]
//! async fn main() -> kechain::KechainResult<()> {
//!     kechain::logging::init_from_env().ok();
//!
//!     let project = get_project(ProjectArgs::default()).await?;
//!     let client = kechain::Client::from_env(None)?;
//!     let activity = client
//!         .activity(ActivityFilter::named_in_scope("Specify wheel diameter", project.id))
//!         .await?;
//!     let wheel = client.part(PartFilter::name("Front Wheel")).await?;
//!
//!     let mut customization = client.customization(activity);
//!     customization
//!         .add_property_grid_widget(&wheel, None, TitlePolicy::UseDefaultName)
//!         .await?;
//!     println!("{customization}");
//!     Ok(())
//! }
//! ```

/// Async KE-chain API client and resource operations
pub mod client;

/// Connection settings and environment loading
pub mod config;

/// Activity widget customization
pub mod customization;

/// Project bootstrap from arguments or environment
pub mod helpers;

/// Structured logging setup
pub mod logging;

/// HTTP transport abstraction
pub mod transport;

pub use client::Client;
pub use customization::{ExtCustomization, TitlePolicy};
pub use helpers::{get_project, ProjectArgs};
pub use kechain_core::{enums, models, ErrorCode, KechainError, KechainResult};
