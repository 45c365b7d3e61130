// ABOUTME: Activity records: tasks and subprocesses of a scope's process tree
// ABOUTME: Carries the parsed widget customization document of the activity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 KE-chain Client Contributors

use super::customization::{self, Customization};
use super::ScopeRef;
use crate::enums::{ActivityStatus, ActivityType};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A KE-chain activity
///
/// `customization` is validated when the payload is parsed: values that are
/// not a usable customization document are read as `None` rather than
/// failing the whole record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Activity id
    pub id: Uuid,
    /// Activity name, unique within its scope
    pub name: String,
    /// Free text description
    #[serde(default)]
    pub description: Option<String>,
    /// Owning scope
    pub scope: ScopeRef,
    /// Task or subprocess
    #[serde(default, rename = "activity_class")]
    pub activity_type: Option<ActivityType>,
    /// Open or completed
    #[serde(default)]
    pub status: Option<ActivityStatus>,
    /// Subprocess containing this activity
    #[serde(default)]
    pub container: Option<Uuid>,
    /// Root process of the scope
    #[serde(default)]
    pub root_container: Option<Uuid>,
    /// Planned start, as sent by the server
    #[serde(default)]
    pub start_date: Option<String>,
    /// Planned end, as sent by the server
    #[serde(default)]
    pub due_date: Option<String>,
    /// Usernames of the assignees
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub assignees: Vec<String>,
    /// Widget customization, absent when no widgets are configured
    #[serde(
        default,
        deserialize_with = "customization::deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub customization: Option<Customization>,
}

impl Activity {
    /// Whether this activity can contain other activities
    #[must_use]
    pub fn is_subprocess(&self) -> bool {
        self.activity_type == Some(ActivityType::Subprocess)
    }

    /// Whether this activity sits directly under the root process
    #[must_use]
    pub fn is_top_level(&self) -> bool {
        self.container == self.root_container
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Activity '{}' id {}>", self.name, super::short_id(&self.id))
    }
}
