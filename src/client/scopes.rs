// ABOUTME: Scope retrieval, user lookup and project team (member/manager) management
// ABOUTME: Team changes are PUTs on the scope with a select_action query and a user_id form field
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 KE-chain Client Contributors

use super::{single, Client, Query};
use crate::transport::HttpMethod;
use kechain_core::constants::{api_paths, select_actions};
use kechain_core::enums::ActivityType;
use kechain_core::models::{Activity, Scope, User};
use kechain_core::{KechainError, KechainResult};
use tracing::info;
use uuid::Uuid;

/// Criteria for scope queries; unset fields do not filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeFilter {
    /// Exact scope name
    pub name: Option<String>,
    /// Scope id
    pub pk: Option<Uuid>,
}

impl ScopeFilter {
    /// Filter on name
    #[must_use]
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            pk: None,
        }
    }

    /// Filter on id
    #[must_use]
    pub const fn pk(pk: Uuid) -> Self {
        Self {
            name: None,
            pk: Some(pk),
        }
    }

    fn into_query(self) -> Vec<(String, String)> {
        Query::default()
            .opt("name", self.name)
            .opt("id", self.pk)
            .into_pairs()
    }
}

impl Client {
    /// Scopes matching `filter`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects it
    pub async fn scopes(&self, filter: ScopeFilter) -> KechainResult<Vec<Scope>> {
        self.list(api_paths::SCOPES, filter.into_query(), "scopes").await
    }

    /// The one scope matching `filter`
    ///
    /// # Errors
    ///
    /// Returns [`KechainError::NotFound`] or [`KechainError::MultipleFound`]
    /// unless exactly one scope matches
    pub async fn scope(&self, filter: ScopeFilter) -> KechainResult<Scope> {
        single(self.scopes(filter).await?, "scope")
    }

    /// Scope by exact name
    ///
    /// # Errors
    ///
    /// See [`Client::scope`]
    pub async fn scope_by_name(&self, name: &str) -> KechainResult<Scope> {
        self.scope(ScopeFilter::name(name)).await
    }

    /// Scope by id
    ///
    /// # Errors
    ///
    /// See [`Client::scope`]
    pub async fn scope_by_id(&self, id: Uuid) -> KechainResult<Scope> {
        self.scope(ScopeFilter::pk(id)).await
    }

    /// All users visible to the authenticated account
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects it
    pub async fn users(&self) -> KechainResult<Vec<User>> {
        self.list(api_paths::USERS, Vec::new(), "users").await
    }

    /// Add `username` to the members of `scope`
    ///
    /// # Errors
    ///
    /// Returns [`KechainError::NotFound`] for an unknown user, or an API error
    pub async fn add_member(&self, scope: &Scope, username: &str) -> KechainResult<()> {
        self.update_project_team(scope, select_actions::ADD_MEMBER, username)
            .await
    }

    /// Remove `username` from the members of `scope`
    ///
    /// # Errors
    ///
    /// Returns [`KechainError::NotFound`] for an unknown user, or an API error
    pub async fn remove_member(&self, scope: &Scope, username: &str) -> KechainResult<()> {
        self.update_project_team(scope, select_actions::REMOVE_MEMBER, username)
            .await
    }

    /// Make `username` a manager of `scope`
    ///
    /// # Errors
    ///
    /// Returns [`KechainError::NotFound`] for an unknown user, or an API error
    pub async fn add_manager(&self, scope: &Scope, username: &str) -> KechainResult<()> {
        self.update_project_team(scope, select_actions::ADD_MANAGER, username)
            .await
    }

    /// Revoke the manager role of `username` in `scope`
    ///
    /// # Errors
    ///
    /// Returns [`KechainError::NotFound`] for an unknown user, or an API error
    pub async fn remove_manager(&self, scope: &Scope, username: &str) -> KechainResult<()> {
        self.update_project_team(scope, select_actions::REMOVE_MANAGER, username)
            .await
    }

    async fn update_project_team(
        &self,
        scope: &Scope,
        action: &str,
        username: &str,
    ) -> KechainResult<()> {
        let user = self
            .users()
            .await?
            .into_iter()
            .find(|user| user.username == username)
            .ok_or_else(|| KechainError::not_found(format!("User {username} does not exist")))?;

        let request = self
            .request(HttpMethod::Put, &api_paths::scope(&scope.id.to_string()))?
            .query("select_action", action)
            .form(vec![("user_id".to_owned(), user.pk.to_string())]);

        // add_member -> "add", member
        let (verb, role) = action.split_once('_').unwrap_or((action, "member"));
        self.send_expecting(request, 200, || {
            format!("Could not {verb} {role} '{username}' in scope '{}'", scope.name)
        })
        .await?;

        info!(scope = %scope.name, username, action, "Updated scope project team");
        Ok(())
    }

    /// Create an activity under the root process of `scope`
    ///
    /// # Errors
    ///
    /// Returns [`KechainError::IllegalArgument`] when the scope has no process,
    /// or an API error
    pub async fn create_activity_in_scope(
        &self,
        scope: &Scope,
        name: &str,
        activity_type: ActivityType,
    ) -> KechainResult<Activity> {
        let process = scope.process.ok_or_else(|| {
            KechainError::illegal_argument(format!("Scope '{}' has no process", scope.name))
        })?;
        self.create_activity(process, name, activity_type).await
    }
}
