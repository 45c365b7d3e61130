// ABOUTME: Ext JS widget customization manager for a single activity
// ABOUTME: Every mutation is a whole-document replace followed by a server re-fetch
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 KE-chain Client Contributors

//! # Activity Customization
//!
//! [`ExtCustomization`] is a view over the `customization` document of one
//! activity. Mutators build the complete new widget list from the activity as
//! last fetched, replace the remote document with it, and then fetch the
//! activity again by name and scope. The local copy is never taken as the
//! outcome of a write.
//!
//! A failed write (validation, range or API error) leaves the local activity
//! untouched.
//!
//! There is no version check on the remote document. Two writers updating the
//! same activity race, and the last full replace wins. Callers that mutate one
//! activity from several tasks must serialize those calls themselves;
//! `&mut self` already rules it out through a single manager.
//!
//! ```rust,no_run
//! use kechain::client::{ActivityFilter, Client, PartFilter};
//! use kechain::customization::TitlePolicy;
//!
//! # async fn example(client: Client) -> kechain_core::KechainResult<()> {
//! let project = client.scope_by_name("Bike Project").await?;
//! let activity = client
//!     .activity(ActivityFilter::named_in_scope("Customizable activity", project.id))
//!     .await?;
//! let bike = client.part(PartFilter::name("Bike")).await?;
//!
//! let mut customization = client.customization(activity);
//! customization
//!     .add_property_grid_widget(&bike, Some(400), TitlePolicy::UseCustomTitle("My bike".into()))
//!     .await?;
//! # Ok(())
//! # }
//! ```

/// JSON Schema for generic component configs
pub mod schema;
/// Widget config builders
pub mod widgets;

pub use schema::{component_schema, ComponentValidator};
pub use widgets::{property_grid_widget, TitlePolicy};

use crate::client::{ActivityFilter, Client};
use crate::transport::HttpMethod;
use kechain_core::constants::api_paths;
use kechain_core::enums::Category;
use kechain_core::models::{Activity, Customization, Part, WidgetConfig};
use kechain_core::{KechainError, KechainResult};
use serde_json::{json, Value};
use std::fmt;
use tracing::{debug, info, warn};

/// Widget customization of one activity
pub struct ExtCustomization {
    client: Client,
    activity: Activity,
}

impl ExtCustomization {
    /// Manager over `activity` using `client` for saves and re-fetches
    #[must_use]
    pub fn new(client: Client, activity: Activity) -> Self {
        Self { client, activity }
    }

    /// The activity as last fetched from the server
    #[must_use]
    pub fn activity(&self) -> &Activity {
        &self.activity
    }

    /// Release the activity as last fetched from the server
    #[must_use]
    pub fn into_activity(self) -> Activity {
        self.activity
    }

    /// Widgets in display order; empty when the activity has no customization
    #[must_use]
    pub fn list_widgets(&self) -> &[WidgetConfig] {
        self.activity
            .customization
            .as_ref()
            .map_or(&[], Customization::widgets)
    }

    /// Append `widget` and save
    ///
    /// # Errors
    ///
    /// Returns an API error if the save is rejected, or any error from the re-fetch
    pub async fn add_widget(&mut self, widget: WidgetConfig) -> KechainResult<()> {
        let mut widgets = self.list_widgets().to_vec();
        widgets.push(widget);
        self.save(widgets).await
    }

    /// Validate `config` as an Ext JS component and append it as a `jsonWidget`
    ///
    /// # Errors
    ///
    /// Returns [`KechainError::Validation`] without contacting the server when
    /// `config` violates the component schema; otherwise as [`Self::add_widget`]
    pub async fn add_generic_widget(&mut self, config: Value) -> KechainResult<()> {
        ComponentValidator::shared()?.validate(&config)?;
        let Value::Object(config) = config else {
            return Err(KechainError::validation(vec![
                "component config must be a JSON object".to_owned(),
            ]));
        };
        self.add_widget(widgets::json_widget(config)).await
    }

    /// Append a property grid showing the properties of `part`
    ///
    /// A `max_height` of `None` or `Some(0)` lets the grid size itself.
    ///
    /// # Errors
    ///
    /// Returns [`KechainError::IllegalArgument`] when `part` is a model;
    /// otherwise as [`Self::add_widget`]
    pub async fn add_property_grid_widget(
        &mut self,
        part: &Part,
        max_height: Option<u32>,
        title: TitlePolicy,
    ) -> KechainResult<()> {
        if part.category != Category::Instance {
            return Err(KechainError::illegal_argument(format!(
                "A property grid needs a part instance, '{}' is a {}",
                part.name, part.category
            )));
        }
        let widget = property_grid_widget(self.activity.id, part, max_height, &title);
        self.add_widget(widget).await
    }

    /// Remove the widget at `index` and save
    ///
    /// # Errors
    ///
    /// Returns [`KechainError::IndexOutOfRange`] without contacting the server
    /// when `index` is past the end; otherwise as [`Self::add_widget`]
    pub async fn delete_widget(&mut self, index: usize) -> KechainResult<()> {
        let mut widgets = self.list_widgets().to_vec();
        if index >= widgets.len() {
            return Err(KechainError::IndexOutOfRange {
                index,
                len: widgets.len(),
            });
        }
        widgets.remove(index);
        self.save(widgets).await
    }

    /// Remove every widget; the activity's customization becomes `null`
    ///
    /// # Errors
    ///
    /// As [`Self::add_widget`]
    pub async fn delete_all_widgets(&mut self) -> KechainResult<()> {
        self.save(Vec::new()).await
    }

    async fn save(&mut self, widgets: Vec<WidgetConfig>) -> KechainResult<()> {
        let count = widgets.len();
        let document = Customization::with_widgets(self.activity.customization.as_ref(), widgets);
        let customization = match &document {
            Some(document) => Value::String(serde_json::to_string(document)?),
            None => Value::Null,
        };

        let request = self
            .client
            .request(
                HttpMethod::Put,
                &api_paths::activity(&self.activity.id.to_string()),
            )?
            .json(json!({ "customization": customization }));
        debug!(activity = %self.activity.name, widgets = count, "Saving customization");

        let response = self.client.send(request).await?;
        if !response.is_success() {
            warn!(
                activity = %self.activity.name,
                status = response.status,
                "Customization save rejected"
            );
            return Err(self.client.api_error(format!(
                "Could not save customization of activity '{}'",
                self.activity.name
            )));
        }

        self.activity = self
            .client
            .activity(ActivityFilter::named_in_scope(
                self.activity.name.clone(),
                self.activity.scope.id,
            ))
            .await?;
        info!(
            activity = %self.activity.name,
            widgets = self.list_widgets().len(),
            "Saved customization"
        );
        Ok(())
    }
}

impl fmt::Display for ExtCustomization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self.activity.id.simple().to_string();
        write!(
            f,
            "<ExtCustomization '{}' id {} ({} widgets)>",
            self.activity.name,
            &id[id.len() - 8..],
            self.list_widgets().len()
        )
    }
}

impl fmt::Debug for ExtCustomization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtCustomization")
            .field("activity", &self.activity.id)
            .field("widgets", &self.list_widgets().len())
            .finish_non_exhaustive()
    }
}
