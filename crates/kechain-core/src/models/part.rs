// ABOUTME: Part records and the ordered PartSet collection returned by part queries
// ABOUTME: PartSet renders an HTML overview table for notebook-style front ends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 KE-chain Client Contributors

use super::Property;
use crate::enums::{Category, Classification, Multiplicity};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;
use std::slice;
use std::vec;
use uuid::Uuid;

/// A part model or part instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    /// Part id
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Model or instance
    pub category: Category,
    /// Parent part, absent for the root
    #[serde(default, rename = "parent")]
    pub parent_id: Option<Uuid>,
    /// Model of an instance
    #[serde(default, rename = "model")]
    pub model_id: Option<Uuid>,
    /// Allowed instance count, for models
    #[serde(default)]
    pub multiplicity: Option<Multiplicity>,
    /// Product or catalog part
    #[serde(default)]
    pub classification: Option<Classification>,
    /// Embedded properties
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub properties: Vec<Property>,
}

impl Part {
    /// Embedded property by name
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|property| property.name == name)
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Part '{}' id {}>", self.name, super::short_id(&self.id))
    }
}

/// Ordered result of a part query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartSet {
    parts: Vec<Part>,
}

impl PartSet {
    /// Wrap parts, keeping their order
    #[must_use]
    pub fn new(parts: Vec<Part>) -> Self {
        Self { parts }
    }

    /// Number of parts
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether the set is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Part at `index`
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Part> {
        self.parts.get(index)
    }

    /// Iterate in query order
    pub fn iter(&self) -> slice::Iter<'_, Part> {
        self.parts.iter()
    }

    /// Unwrap into the underlying parts
    #[must_use]
    pub fn into_vec(self) -> Vec<Part> {
        self.parts
    }

    /// HTML overview table with one row per part
    ///
    /// A Category column is only rendered when the set is not made of
    /// instances alone.
    #[must_use]
    pub fn to_html_table(&self) -> String {
        let all_instances = self.parts.iter().all(|part| part.category == Category::Instance);

        let mut html = String::from("<table width=100%><tr><th>Part</th>");
        if !all_instances {
            html.push_str("<th>Category</th>");
        }
        html.push_str("<th>ID</th></tr>");

        for part in &self.parts {
            html.push_str("<tr><td>");
            html.push_str(&html_escape::encode_text(&part.name));
            html.push_str("</td>");
            if !all_instances {
                html.push_str("<td>");
                html.push_str(part.category.as_str());
                html.push_str("</td>");
            }
            html.push_str("<td>");
            html.push_str(&part.id.to_string());
            html.push_str("</td></tr>");
        }

        html.push_str("</table>");
        html
    }
}

impl fmt::Display for PartSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<PartSet {} parts>", self.parts.len())
    }
}

impl From<Vec<Part>> for PartSet {
    fn from(parts: Vec<Part>) -> Self {
        Self::new(parts)
    }
}

impl Index<usize> for PartSet {
    type Output = Part;

    fn index(&self, index: usize) -> &Part {
        &self.parts[index]
    }
}

impl IntoIterator for PartSet {
    type Item = Part;
    type IntoIter = vec::IntoIter<Part>;

    fn into_iter(self) -> Self::IntoIter {
        self.parts.into_iter()
    }
}

impl<'a> IntoIterator for &'a PartSet {
    type Item = &'a Part;
    type IntoIter = slice::Iter<'a, Part>;

    fn into_iter(self) -> Self::IntoIter {
        self.parts.iter()
    }
}
