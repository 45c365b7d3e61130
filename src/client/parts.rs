// ABOUTME: Part and part model retrieval, scoped to buckets and activities
// ABOUTME: Query results are returned as ordered PartSets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 KE-chain Client Contributors

use super::{single, Client, Query};
use kechain_core::constants::api_paths;
use kechain_core::enums::Category;
use kechain_core::models::{Part, PartSet, Scope};
use kechain_core::{KechainError, KechainResult};
use uuid::Uuid;

/// Criteria for part queries
///
/// The default filter selects instances only; set `category` to `None` to
/// get models and instances together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartFilter {
    /// Exact part name
    pub name: Option<String>,
    /// Part id
    pub pk: Option<Uuid>,
    /// Instances of this model
    pub model: Option<Uuid>,
    /// Models or instances
    pub category: Option<Category>,
    /// Bucket (scope) holding the parts
    pub bucket: Option<Uuid>,
    /// Direct children of this part
    pub parent: Option<Uuid>,
    /// Parts associated with this activity
    pub activity: Option<Uuid>,
    /// Maximum number of results
    pub limit: Option<u32>,
}

impl Default for PartFilter {
    fn default() -> Self {
        Self {
            name: None,
            pk: None,
            model: None,
            category: Some(Category::Instance),
            bucket: None,
            parent: None,
            activity: None,
            limit: None,
        }
    }
}

impl PartFilter {
    /// Instances named `name`
    #[must_use]
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    fn into_query(self) -> Vec<(String, String)> {
        Query::default()
            .opt("name", self.name)
            .opt("id", self.pk)
            .opt("model", self.model)
            .opt("category", self.category)
            .opt("bucket", self.bucket)
            .opt("parent", self.parent)
            .opt("activity_id", self.activity)
            .opt("limit", self.limit)
            .into_pairs()
    }
}

impl Client {
    /// Parts matching `filter`, in server order
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects it
    pub async fn parts(&self, filter: PartFilter) -> KechainResult<PartSet> {
        let parts: Vec<Part> = self
            .list(api_paths::PARTS, filter.into_query(), "parts")
            .await?;
        Ok(PartSet::new(parts))
    }

    /// The one part matching `filter`
    ///
    /// # Errors
    ///
    /// Returns [`KechainError::NotFound`] or [`KechainError::MultipleFound`]
    /// unless exactly one part matches
    pub async fn part(&self, filter: PartFilter) -> KechainResult<Part> {
        single(self.parts(filter).await?.into_vec(), "part")
    }

    /// The one part model matching `filter`; the category is forced to models
    ///
    /// # Errors
    ///
    /// See [`Client::part`]
    pub async fn model(&self, filter: PartFilter) -> KechainResult<Part> {
        self.part(PartFilter {
            category: Some(Category::Model),
            ..filter
        })
        .await
    }

    /// Parts of `scope` matching `filter`; the bucket is forced to the scope's bucket
    ///
    /// # Errors
    ///
    /// Returns [`KechainError::IllegalArgument`] when the scope has no bucket,
    /// or a request error
    pub async fn scope_parts(&self, scope: &Scope, filter: PartFilter) -> KechainResult<PartSet> {
        let bucket = scope.bucket.ok_or_else(|| {
            KechainError::illegal_argument(format!("Scope '{}' has no part bucket", scope.name))
        })?;
        self.parts(PartFilter {
            bucket: Some(bucket.id),
            ..filter
        })
        .await
    }
}
