// ABOUTME: Constants module with domain-separated organization
// ABOUTME: API endpoint paths, HTTP header names, environment keys and widget identifiers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 KE-chain Client Contributors

//! Constants module
//!
//! Constants are grouped by domain rather than kept in one flat list.

/// Relative API paths, resolved against the configured base URL
pub mod api_paths {
    /// All scopes
    pub const SCOPES: &str = "api/scopes.json";
    /// All activities
    pub const ACTIVITIES: &str = "api/activities.json";
    /// All parts
    pub const PARTS: &str = "api/parts.json";
    /// All properties
    pub const PROPERTIES: &str = "api/properties.json";
    /// All users
    pub const USERS: &str = "api/users.json";

    /// Single scope
    #[must_use]
    pub fn scope(id: &str) -> String {
        format!("api/scopes/{id}.json")
    }

    /// Single activity
    #[must_use]
    pub fn activity(id: &str) -> String {
        format!("api/activities/{id}.json")
    }

    /// Single property
    #[must_use]
    pub fn property(id: &str) -> String {
        format!("api/properties/{id}.json")
    }

    /// Attachment upload for a property
    #[must_use]
    pub fn property_upload(id: &str) -> String {
        format!("api/properties/{id}/upload")
    }
}

/// HTTP header names and values sent with every request
pub mod headers {
    /// Marks requests as API calls rather than browser navigation
    pub const X_REQUESTED_WITH: &str = "X-Requested-With";
    /// Value for [`X_REQUESTED_WITH`]
    pub const XML_HTTP_REQUEST: &str = "XMLHttpRequest";
    /// Prefix of the token authorization scheme
    pub const TOKEN_SCHEME: &str = "Token";
}

/// `select_action` query values understood by the API
pub mod select_actions {
    /// Replace the input/output property associations of an activity
    pub const UPDATE_ASSOCIATIONS: &str = "update_associations";
    /// Add a member to a scope
    pub const ADD_MEMBER: &str = "add_member";
    /// Remove a member from a scope
    pub const REMOVE_MEMBER: &str = "remove_member";
    /// Add a manager to a scope
    pub const ADD_MANAGER: &str = "add_manager";
    /// Remove a manager from a scope
    pub const REMOVE_MANAGER: &str = "remove_manager";
}

/// Environment variables read by the client configuration
pub mod env_config {
    /// Base URL of the KE-chain instance
    pub const KECHAIN_URL: &str = "KECHAIN_URL";
    /// API token
    pub const KECHAIN_TOKEN: &str = "KECHAIN_TOKEN";
    /// Username for basic authentication
    pub const KECHAIN_USERNAME: &str = "KECHAIN_USERNAME";
    /// Password for basic authentication
    pub const KECHAIN_PASSWORD: &str = "KECHAIN_PASSWORD";
    /// Scope (project) name
    pub const KECHAIN_SCOPE: &str = "KECHAIN_SCOPE";
    /// Scope (project) id
    pub const KECHAIN_SCOPE_ID: &str = "KECHAIN_SCOPE_ID";
    /// Forces configuration from the environment even when arguments are given
    pub const KECHAIN_FORCE_ENV_USE: &str = "KECHAIN_FORCE_ENV_USE";
    /// Request timeout in seconds
    pub const KECHAIN_TIMEOUT_SECS: &str = "KECHAIN_TIMEOUT_SECS";
    /// Connect timeout in seconds
    pub const KECHAIN_CONNECT_TIMEOUT_SECS: &str = "KECHAIN_CONNECT_TIMEOUT_SECS";
}

/// Widget identifiers and presentation labels stored in customizations
pub mod widgets {
    /// Widget built from a schema-validated Ext JS component config
    pub const JSON_WIDGET: &str = "jsonWidget";
    /// Property grid of a single part instance
    pub const PROPERTY_GRID_WIDGET: &str = "propertyGridWidget";

    /// Height mode label when no max height is set
    pub const HEIGHT_AUTO: &str = "Auto";
    /// Height mode label when a max height is set
    pub const HEIGHT_CUSTOM: &str = "Custom max height";

    /// Title mode label for the part name as title
    pub const TITLE_DEFAULT: &str = "Default";
    /// Title mode label for a caller-provided title
    pub const TITLE_CUSTOM: &str = "Custom Title";
    /// Title mode label for a hidden title
    pub const TITLE_NONE: &str = "No title";
}
