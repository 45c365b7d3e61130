// ABOUTME: Property records: a typed value slot on a part, possibly an attachment
// ABOUTME: Value changes and uploads go through the client; this is the parsed payload only
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 KE-chain Client Contributors

use crate::enums::PropertyType;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A property of a part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Property id
    pub id: Uuid,
    /// Property name, unique within its part
    pub name: String,
    /// Current value; `null` when unset
    #[serde(default)]
    pub value: Value,
    /// Value type
    #[serde(default)]
    pub property_type: Option<PropertyType>,
    /// Whether the property is an output of its activity
    #[serde(default)]
    pub output: bool,
    /// Owning part
    #[serde(default)]
    pub part: Option<Uuid>,
}

impl Property {
    /// Whether this property stores an uploaded file
    #[must_use]
    pub fn is_attachment(&self) -> bool {
        self.property_type == Some(PropertyType::AttachmentValue)
    }
}
