// ABOUTME: Activity retrieval, creation, editing, configuration and deletion
// ABOUTME: Also navigates the process tree (subprocess, children, siblings) and associated parts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 KE-chain Client Contributors

use super::{single, Client, PartFilter, Query};
use crate::customization::ExtCustomization;
use crate::transport::HttpMethod;
use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, TimeZone, Utc};
use kechain_core::constants::{api_paths, select_actions};
use kechain_core::enums::{ActivityStatus, ActivityType, Category};
use kechain_core::models::{Activity, PartSet, Property, ResultsEnvelope};
use kechain_core::{KechainError, KechainResult};
use serde_json::{json, Map, Value};
use tracing::{info, warn};
use uuid::Uuid;

/// Criteria for activity queries; unset fields do not filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityFilter {
    /// Exact activity name
    pub name: Option<String>,
    /// Activity id
    pub pk: Option<Uuid>,
    /// Owning scope
    pub scope: Option<Uuid>,
    /// Containing subprocess
    pub container: Option<Uuid>,
}

impl ActivityFilter {
    /// Activity named `name` within `scope`
    #[must_use]
    pub fn named_in_scope(name: impl Into<String>, scope: Uuid) -> Self {
        Self {
            name: Some(name.into()),
            scope: Some(scope),
            ..Self::default()
        }
    }

    fn into_query(self) -> Vec<(String, String)> {
        Query::default()
            .opt("name", self.name)
            .opt("id", self.pk)
            .opt("scope", self.scope)
            .opt("container", self.container)
            .into_pairs()
    }
}

/// A start or due date for [`Client::edit_activity`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateInput {
    /// Timezone-aware date
    Zoned(DateTime<FixedOffset>),
    /// Date without timezone, read as UTC
    Naive(NaiveDateTime),
}

impl DateInput {
    /// RFC 3339 text sent to the API
    ///
    /// Naive dates log a warning and are sent as UTC.
    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        match self {
            Self::Zoned(date) => date.to_rfc3339(),
            Self::Naive(date) => {
                warn!(
                    date = %date,
                    "Date is naive and not timezone aware; it is interpreted as UTC"
                );
                Utc.from_utc_datetime(date).to_rfc3339()
            }
        }
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for DateInput {
    fn from(date: DateTime<Tz>) -> Self {
        Self::Zoned(date.with_timezone(&date.offset().fix()))
    }
}

impl From<NaiveDateTime> for DateInput {
    fn from(date: NaiveDateTime) -> Self {
        Self::Naive(date)
    }
}

/// Changes for [`Client::edit_activity`]; unset and empty fields are left alone
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityUpdate {
    /// New name
    pub name: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New start date
    pub start_date: Option<DateInput>,
    /// New due date
    pub due_date: Option<DateInput>,
    /// Replacement assignee list; every name must be a member of the scope
    pub assignees: Option<Vec<String>>,
    /// New status
    pub status: Option<ActivityStatus>,
}

impl ActivityUpdate {
    /// Set the name
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the description
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the start date
    #[must_use]
    pub fn start_date(mut self, date: impl Into<DateInput>) -> Self {
        self.start_date = Some(date.into());
        self
    }

    /// Set the due date
    #[must_use]
    pub fn due_date(mut self, date: impl Into<DateInput>) -> Self {
        self.due_date = Some(date.into());
        self
    }

    /// Replace the assignees
    #[must_use]
    pub fn assignees<I, S>(mut self, assignees: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.assignees = Some(assignees.into_iter().map(Into::into).collect());
        self
    }

    /// Set the status
    #[must_use]
    pub const fn status(mut self, status: ActivityStatus) -> Self {
        self.status = Some(status);
        self
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

impl Client {
    /// Activities matching `filter`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects it
    pub async fn activities(&self, filter: ActivityFilter) -> KechainResult<Vec<Activity>> {
        self.list(api_paths::ACTIVITIES, filter.into_query(), "activities")
            .await
    }

    /// The one activity matching `filter`
    ///
    /// # Errors
    ///
    /// Returns [`KechainError::NotFound`] or [`KechainError::MultipleFound`]
    /// unless exactly one activity matches
    pub async fn activity(&self, filter: ActivityFilter) -> KechainResult<Activity> {
        single(self.activities(filter).await?, "activity")
    }

    /// Create an activity under `process`
    ///
    /// # Errors
    ///
    /// Returns an API error unless the server answers 201 Created
    pub async fn create_activity(
        &self,
        process: Uuid,
        name: &str,
        activity_type: ActivityType,
    ) -> KechainResult<Activity> {
        let request = self.request(HttpMethod::Post, api_paths::ACTIVITIES)?.json(json!({
            "name": name,
            "process": process,
            "activity_class": activity_type,
        }));
        let response = self
            .send_expecting(request, 201, || format!("Could not create activity '{name}'"))
            .await?;

        let created: ResultsEnvelope<Activity> = serde_json::from_value(response.body)?;
        let activity = single(created.results, "created activity")?;
        info!(activity = %activity.name, id = %activity.id, %activity_type, "Created activity");
        Ok(activity)
    }

    /// Create an activity inside the subprocess `parent`
    ///
    /// # Errors
    ///
    /// Returns [`KechainError::IllegalArgument`] unless `parent` is a subprocess
    pub async fn create_child_activity(
        &self,
        parent: &Activity,
        name: &str,
        activity_type: ActivityType,
    ) -> KechainResult<Activity> {
        if !parent.is_subprocess() {
            return Err(KechainError::illegal_argument(
                "One can only create a task under a subprocess",
            ));
        }
        self.create_activity(parent.id, name, activity_type).await
    }

    /// Apply `update` to the activity and to the local record
    ///
    /// The local record only changes after the server accepted the update.
    ///
    /// # Errors
    ///
    /// Returns [`KechainError::NotFound`] when an assignee is not a member of
    /// the activity's scope (nothing is sent), or an API error
    pub async fn edit_activity(
        &self,
        activity: &mut Activity,
        update: ActivityUpdate,
    ) -> KechainResult<()> {
        let name = non_empty(update.name);
        let description = non_empty(update.description);
        let start_date = update.start_date.map(|date| date.to_rfc3339());
        let due_date = update.due_date.map(|date| date.to_rfc3339());
        let assignees = update.assignees.filter(|list| !list.is_empty());

        let mut body = Map::new();
        body.insert("id".to_owned(), json!(activity.id));
        if let Some(name) = &name {
            body.insert("name".to_owned(), json!(name));
        }
        if let Some(description) = &description {
            body.insert("description".to_owned(), json!(description));
        }
        if let Some(start_date) = &start_date {
            body.insert("start_date".to_owned(), json!(start_date));
        }
        if let Some(due_date) = &due_date {
            body.insert("due_date".to_owned(), json!(due_date));
        }
        if let Some(assignees) = &assignees {
            let scope = self.scope_by_id(activity.scope.id).await?;
            if let Some(stranger) = assignees.iter().find(|name| !scope.has_member(name)) {
                return Err(KechainError::not_found(format!(
                    "Assignee '{stranger}' should be a member of the scope"
                )));
            }
            body.insert("assignees".to_owned(), json!(assignees));
        }
        if let Some(status) = update.status {
            body.insert("status".to_owned(), json!(status));
        }

        let request = self
            .request(HttpMethod::Put, &api_paths::activity(&activity.id.to_string()))?
            .json(Value::Object(body));
        self.send_expecting(request, 200, || {
            format!("Could not update activity '{}'", activity.name)
        })
        .await?;

        if let Some(name) = name {
            activity.name = name;
        }
        if description.is_some() {
            activity.description = description;
        }
        if start_date.is_some() {
            activity.start_date = start_date;
        }
        if due_date.is_some() {
            activity.due_date = due_date;
        }
        if let Some(assignees) = assignees {
            activity.assignees = assignees;
        }
        if update.status.is_some() {
            activity.status = update.status;
        }
        info!(activity = %activity.name, id = %activity.id, "Edited activity");
        Ok(())
    }

    /// Replace the input and output property associations of `activity`
    ///
    /// # Errors
    ///
    /// Returns an API error unless the server answers 200
    pub async fn configure_activity(
        &self,
        activity: &Activity,
        inputs: &[Property],
        outputs: &[Property],
    ) -> KechainResult<()> {
        let ids = |properties: &[Property]| -> Vec<Uuid> {
            properties.iter().map(|property| property.id).collect()
        };
        let request = self
            .request(HttpMethod::Put, &api_paths::activity(&activity.id.to_string()))?
            .query("select_action", select_actions::UPDATE_ASSOCIATIONS)
            .json(json!({ "inputs": ids(inputs), "outputs": ids(outputs) }));
        self.send_expecting(request, 200, || {
            format!("Could not configure activity '{}'", activity.name)
        })
        .await?;

        info!(
            activity = %activity.name,
            inputs = inputs.len(),
            outputs = outputs.len(),
            "Configured activity associations"
        );
        Ok(())
    }

    /// Delete `activity`
    ///
    /// # Errors
    ///
    /// Returns an API error unless the server answers 204 No Content
    pub async fn delete_activity(&self, activity: Activity) -> KechainResult<()> {
        let request =
            self.request(HttpMethod::Delete, &api_paths::activity(&activity.id.to_string()))?;
        self.send_expecting(request, 204, || {
            format!(
                "Could not delete activity: {} with id {}",
                activity.name, activity.id
            )
        })
        .await?;
        info!(activity = %activity.name, id = %activity.id, "Deleted activity");
        Ok(())
    }

    /// The subprocess containing `activity`
    ///
    /// # Errors
    ///
    /// Returns [`KechainError::NotFound`] for a task on the top level
    pub async fn subprocess(&self, activity: &Activity) -> KechainResult<Activity> {
        let container = activity
            .container
            .filter(|_| !activity.is_top_level())
            .ok_or_else(|| {
                KechainError::not_found(format!(
                    "Cannot find subprocess for this task '{}', as this task exist on top level",
                    activity.name
                ))
            })?;
        self.activity(ActivityFilter {
            pk: Some(container),
            scope: Some(activity.scope.id),
            ..ActivityFilter::default()
        })
        .await
    }

    /// Tasks and subprocesses directly inside the subprocess `activity`
    ///
    /// # Errors
    ///
    /// Returns [`KechainError::NotFound`] when `activity` is not a subprocess
    pub async fn children(&self, activity: &Activity) -> KechainResult<Vec<Activity>> {
        if !activity.is_subprocess() {
            let kind = activity
                .activity_type
                .map_or_else(|| "unknown".to_owned(), |kind| kind.to_string());
            return Err(KechainError::not_found(format!(
                "Only subprocesses can have children, please choose a subprocess instead of a '{kind}' (activity '{}')",
                activity.name
            )));
        }
        self.activities(ActivityFilter {
            container: Some(activity.id),
            scope: Some(activity.scope.id),
            ..ActivityFilter::default()
        })
        .await
    }

    /// Activities in the same container as `activity`, including itself
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects it
    pub async fn siblings(&self, activity: &Activity) -> KechainResult<Vec<Activity>> {
        self.activities(ActivityFilter {
            container: activity.container,
            scope: Some(activity.scope.id),
            ..ActivityFilter::default()
        })
        .await
    }

    /// Parts of `category` associated with `activity`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects it
    pub async fn activity_parts(
        &self,
        activity: &Activity,
        category: Category,
    ) -> KechainResult<PartSet> {
        self.parts(PartFilter {
            activity: Some(activity.id),
            category: Some(category),
            ..PartFilter::default()
        })
        .await
    }

    /// Models and instances associated with `activity`, in that order
    ///
    /// # Errors
    ///
    /// Returns an error if either request fails or the API rejects it
    pub async fn associated_parts(&self, activity: &Activity) -> KechainResult<(PartSet, PartSet)> {
        let models = self.activity_parts(activity, Category::Model).await?;
        let instances = self.activity_parts(activity, Category::Instance).await?;
        Ok((models, instances))
    }

    /// Widget customization manager for `activity`
    #[must_use]
    pub fn customization(&self, activity: Activity) -> ExtCustomization {
        ExtCustomization::new(self.clone(), activity)
    }
}
