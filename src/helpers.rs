// ABOUTME: Bootstrap helper returning the KE-chain project (scope) a script works on
// ABOUTME: Resolves connection settings from explicit arguments or KECHAIN_* environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 KE-chain Client Contributors

use crate::client::Client;
use crate::config::{ClientConfig, Credentials, EnvSettings};
use kechain_core::models::Scope;
use kechain_core::{KechainError, KechainResult};
use std::path::PathBuf;
use tracing::info;
use uuid::Uuid;

/// Explicit connection arguments for [`get_project`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectArgs {
    /// Base URL of KE-chain
    pub url: Option<String>,
    /// Username, used together with `password` when no token is given
    pub username: Option<String>,
    /// Password for `username`
    pub password: Option<String>,
    /// API token
    pub token: Option<String>,
    /// Scope name
    pub scope: Option<String>,
    /// Scope id, preferred over the name
    pub scope_id: Option<Uuid>,
    /// `.env` file seeding the environment
    pub env_file: Option<PathBuf>,
}

impl ProjectArgs {
    fn has_connection_args(&self) -> bool {
        self.url.is_some()
            || self.username.is_some()
            || self.password.is_some()
            || self.token.is_some()
            || self.scope.is_some()
            || self.scope_id.is_some()
    }
}

#[derive(Debug)]
enum ScopeSelector {
    Id(Uuid),
    Name(String),
}

/// Retrieve the project (scope) to work on
///
/// Without connection arguments, or when `KECHAIN_FORCE_ENV_USE` is truthy,
/// everything comes from the environment. Otherwise `url`, a token or a
/// username/password pair, and a scope name or id are all required.
///
/// # Errors
///
/// Returns [`KechainError::Config`] for missing or conflicting settings, and
/// any error from the scope lookup
pub async fn get_project(args: ProjectArgs) -> KechainResult<Scope> {
    let env = EnvSettings::load(args.env_file.as_deref())?;

    let (client, selector) = if env.force_env_use || !args.has_connection_args() {
        if env.force_env_use {
            env.require_complete()?;
        }
        let client = Client::new(env.client_config()?)?;
        (client, env_selector(&env)?)
    } else {
        explicit_connection(args)?
    };

    let scope = match selector {
        ScopeSelector::Id(id) => client.scope_by_id(id).await?,
        ScopeSelector::Name(name) => client.scope_by_name(&name).await?,
    };
    info!(scope = %scope.name, id = %scope.id, "Connected to KE-chain project");
    Ok(scope)
}

fn env_selector(env: &EnvSettings) -> KechainResult<ScopeSelector> {
    if let Some(raw) = &env.scope_id {
        let id = Uuid::parse_str(raw)
            .map_err(|e| KechainError::config(format!("KECHAIN_SCOPE_ID '{raw}' is not a UUID: {e}")))?;
        return Ok(ScopeSelector::Id(id));
    }
    env.scope.clone().map(ScopeSelector::Name).ok_or_else(|| {
        KechainError::config("KECHAIN_SCOPE or KECHAIN_SCOPE_ID should be provided")
    })
}

fn explicit_connection(args: ProjectArgs) -> KechainResult<(Client, ScopeSelector)> {
    let insufficient = || {
        KechainError::config(
            "insufficient arguments to connect to KE-chain: need url, a token or username and password, and a scope name or id",
        )
    };

    let url = args.url.ok_or_else(insufficient)?;
    let credentials = Credentials::from_parts(
        args.token.as_deref(),
        args.username.as_deref(),
        args.password.as_deref(),
    )
    .ok_or_else(insufficient)?;
    let selector = match (args.scope_id, args.scope) {
        (Some(id), _) => ScopeSelector::Id(id),
        (None, Some(name)) => ScopeSelector::Name(name),
        (None, None) => return Err(insufficient()),
    };

    let client = Client::new(ClientConfig::new(url).with_credentials(credentials))?;
    Ok((client, selector))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_arguments_need_scope() {
        let args = ProjectArgs {
            url: Some("https://kec.example".to_owned()),
            token: Some("abc".to_owned()),
            ..ProjectArgs::default()
        };
        let error = explicit_connection(args).unwrap_err();
        assert!(error.to_string().contains("insufficient arguments"));
    }

    #[test]
    fn test_explicit_arguments_need_complete_credentials() {
        let args = ProjectArgs {
            url: Some("https://kec.example".to_owned()),
            username: Some("alice".to_owned()),
            scope: Some("Bike Project".to_owned()),
            ..ProjectArgs::default()
        };
        assert!(explicit_connection(args).is_err());
    }

    #[test]
    fn test_scope_id_wins_over_name() {
        let id = Uuid::new_v4();
        let args = ProjectArgs {
            url: Some("https://kec.example".to_owned()),
            token: Some("abc".to_owned()),
            scope: Some("Bike Project".to_owned()),
            scope_id: Some(id),
            ..ProjectArgs::default()
        };
        let (client, selector) = explicit_connection(args).unwrap();
        assert_eq!(client.base_url().as_str(), "https://kec.example/");
        assert!(matches!(selector, ScopeSelector::Id(found) if found == id));
    }

    #[test]
    fn test_env_selector_rejects_bad_id() {
        let env = EnvSettings {
            scope_id: Some("not-a-uuid".to_owned()),
            ..EnvSettings::default()
        };
        assert!(env_selector(&env).is_err());

        let env = EnvSettings {
            scope: Some("Bike Project".to_owned()),
            ..EnvSettings::default()
        };
        assert!(matches!(env_selector(&env), Ok(ScopeSelector::Name(name)) if name == "Bike Project"));
    }
}
