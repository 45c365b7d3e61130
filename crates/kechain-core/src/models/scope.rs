// ABOUTME: Scope (project) records with their project team and bucket references
// ABOUTME: Also holds the lightweight user record used to resolve usernames to ids
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 KE-chain Client Contributors

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Reference to a scope embedded in other records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeRef {
    /// Scope id
    pub id: Uuid,
    /// Scope name
    #[serde(default)]
    pub name: String,
}

/// Reference to the part bucket of a scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketRef {
    /// Bucket id
    pub id: Uuid,
}

/// A member of a scope's project team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeMember {
    /// Username of the member
    pub username: String,
    /// Inactive members keep their entry but do not count as members
    #[serde(default)]
    pub is_active: bool,
    /// Managers may edit the project team
    #[serde(default)]
    pub is_manager: bool,
}

/// A KE-chain scope (project)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scope {
    /// Scope id
    pub id: Uuid,
    /// Scope name
    pub name: String,
    /// Bucket holding the parts of this scope
    #[serde(default)]
    pub bucket: Option<BucketRef>,
    /// Root process (activity) of this scope
    #[serde(default)]
    pub process: Option<Uuid>,
    /// Project team
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub members: Vec<ScopeMember>,
}

impl Scope {
    /// Active members of the project team, or only the active managers
    #[must_use]
    pub fn members(&self, managers_only: bool) -> Vec<&ScopeMember> {
        self.members
            .iter()
            .filter(|member| member.is_active && (!managers_only || member.is_manager))
            .collect()
    }

    /// Whether `username` belongs to the project team, active or not
    #[must_use]
    pub fn has_member(&self, username: &str) -> bool {
        self.members.iter().any(|member| member.username == username)
    }

    /// Reference to this scope as embedded in other records
    #[must_use]
    pub fn to_ref(&self) -> ScopeRef {
        ScopeRef {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Scope '{}' id {}>", self.name, super::short_id(&self.id))
    }
}

/// A KE-chain user account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Numeric primary key
    pub pk: i64,
    /// Login name
    pub username: String,
}
