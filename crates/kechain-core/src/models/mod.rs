// ABOUTME: Typed resource records for the KE-chain API, parsed at the JSON boundary
// ABOUTME: Scopes, activities, parts, properties, users and activity customizations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 KE-chain Client Contributors

//! Resource records
//!
//! These are plain data: they describe what the API returned and carry no
//! client handle. Operations that talk to the API live on the `kechain::Client`.

use serde::{Deserialize, Deserializer};
use uuid::Uuid;

/// Activity records
pub mod activity;
/// Widget customization document embedded in activities
pub mod customization;
/// Part records and ordered part collections
pub mod part;
/// Property records
pub mod property;
/// Scope (project) records, members and users
pub mod scope;

pub use activity::Activity;
pub use customization::{Customization, ExtSection, WidgetConfig};
pub use part::{Part, PartSet};
pub use property::Property;
pub use scope::{BucketRef, Scope, ScopeMember, ScopeRef, User};

/// `{"results": [...]}` envelope used by every list endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ResultsEnvelope<T> {
    /// Matching records
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

/// Deserialize `null` as the type's default value
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Last eight characters of an id, as shown in record summaries
pub(crate) fn short_id(id: &Uuid) -> String {
    let text = id.to_string();
    text[text.len() - 8..].to_owned()
}
