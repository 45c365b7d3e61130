// ABOUTME: Platform enumerations accepted by the KE-chain API
// ABOUTME: Part categories, multiplicities, property types, activity types/statuses and widget xtypes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 KE-chain Client Contributors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a part: the model (template) or an instance of it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    /// Concrete instance of a model
    Instance,
    /// Template describing instances
    Model,
}

impl Category {
    /// Wire representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Instance => "INSTANCE",
            Self::Model => "MODEL",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How many instances a model allows under its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Multiplicity {
    /// Optional, at most one
    ZeroOne,
    /// Exactly one
    One,
    /// Any number
    #[default]
    ZeroMany,
    /// At least one
    OneMany,
}

/// Product/catalog classification of a part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Classification {
    /// Part of the product tree
    Product,
    /// Part of the catalog
    Catalog,
}

/// Value types of properties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyType {
    /// Floating point number
    FloatValue,
    /// Integer
    IntValue,
    /// Multi-line text
    TextValue,
    /// URL
    LinkValue,
    /// Reference to another part
    ReferenceValue,
    /// Date and time
    DatetimeValue,
    /// Boolean
    BooleanValue,
    /// Single-line text
    CharValue,
    /// Uploaded file
    AttachmentValue,
}

/// Kinds of activities in a process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ActivityType {
    /// Task performed by a user
    #[default]
    UserTask,
    /// Task performed by a service
    ServiceTask,
    /// Container of other activities
    Subprocess,
}

impl ActivityType {
    /// Wire representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UserTask => "UserTask",
            Self::ServiceTask => "ServiceTask",
            Self::Subprocess => "Subprocess",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of an activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityStatus {
    /// Work pending
    Open,
    /// Work done
    Completed,
}

impl ActivityStatus {
    /// Wire representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Completed => "COMPLETED",
        }
    }
}

/// Ext JS component kinds a customized activity can render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentXType {
    /// Plain panel
    #[serde(rename = "panel")]
    Panel,
    /// Toolbar
    #[serde(rename = "toolbar")]
    Toolbar,
    /// Property grid of a single part
    #[serde(rename = "propertyGrid")]
    PropertyGrid,
    /// Grid of part instances
    #[serde(rename = "superGrid")]
    SuperGrid,
    /// Paginated grid of part instances
    #[serde(rename = "paginatedSuperGrid")]
    PaginatedSuperGrid,
    /// Grid with filters
    #[serde(rename = "filteredGrid")]
    FilteredGrid,
    /// Read-only field
    #[serde(rename = "displayfield")]
    DisplayField,
}

impl ComponentXType {
    /// Every supported xtype, in declaration order
    pub const ALL: [Self; 7] = [
        Self::Panel,
        Self::Toolbar,
        Self::PropertyGrid,
        Self::SuperGrid,
        Self::PaginatedSuperGrid,
        Self::FilteredGrid,
        Self::DisplayField,
    ];

    /// Wire representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Panel => "panel",
            Self::Toolbar => "toolbar",
            Self::PropertyGrid => "propertyGrid",
            Self::SuperGrid => "superGrid",
            Self::PaginatedSuperGrid => "paginatedSuperGrid",
            Self::FilteredGrid => "filteredGrid",
            Self::DisplayField => "displayfield",
        }
    }

    /// Wire representations of every supported xtype
    #[must_use]
    pub fn values() -> Vec<&'static str> {
        Self::ALL.iter().map(Self::as_str).collect()
    }
}

impl fmt::Display for ComponentXType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
