// ABOUTME: Activity customization document: ordered Ext JS widget configs plus preserved extra keys
// ABOUTME: Lenient boundary parsing and the widget-replacement merge used by every save
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 KE-chain Client Contributors

//! # Customization Document
//!
//! An activity's `customization` field holds a document of the shape
//! `{"ext": {"widgets": [...]}, ...}`. The widget order is the display order.
//!
//! An activity without widgets has no customization at all: an empty widget
//! list is never written as `{"ext": {"widgets": []}}`. [`Customization::with_widgets`]
//! enforces that collapse.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// A single widget attached to an activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Widget kind, e.g. `jsonWidget` or `propertyGridWidget`
    pub name: String,
    /// Ext JS component configuration
    pub config: Map<String, Value>,
    /// Presentation metadata for editors that read it instead of `config`
    ///
    /// `None` when the key is absent; an explicit `null` is kept as `Some(Value::Null)`.
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub meta: Option<Value>,
    /// Other keys of the widget entry, kept untouched
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl WidgetConfig {
    /// Create a widget without presentation metadata
    #[must_use]
    pub fn new(name: impl Into<String>, config: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            config,
            meta: None,
            other: Map::new(),
        }
    }

    /// Attach presentation metadata
    #[must_use]
    pub fn with_meta(mut self, meta: Value) -> Self {
        self.meta = Some(meta);
        self
    }
}

/// The `ext` section of a customization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtSection {
    /// Widgets in display order; malformed entries are skipped when parsing
    #[serde(default, deserialize_with = "lenient_widgets")]
    pub widgets: Vec<WidgetConfig>,
    /// Sibling keys of `widgets`, kept untouched
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// Customization document of an activity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Customization {
    /// Ext JS widget section
    #[serde(
        default,
        deserialize_with = "lenient_ext",
        skip_serializing_if = "Option::is_none"
    )]
    pub ext: Option<ExtSection>,
    /// Other top-level keys, kept untouched
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl Customization {
    /// Widgets of this customization in display order; empty without an `ext` section
    #[must_use]
    pub fn widgets(&self) -> &[WidgetConfig] {
        self.ext.as_ref().map_or(&[], |ext| ext.widgets.as_slice())
    }

    /// Build the document that replaces `existing` when saving `widgets`
    ///
    /// Only `ext.widgets` is replaced; every other key survives. An empty
    /// widget list yields `None`, whatever `existing` held.
    #[must_use]
    pub fn with_widgets(existing: Option<&Self>, widgets: Vec<WidgetConfig>) -> Option<Self> {
        if widgets.is_empty() {
            return None;
        }
        let mut customization = existing.cloned().unwrap_or_default();
        customization.ext.get_or_insert_with(ExtSection::default).widgets = widgets;
        Some(customization)
    }

    /// Parse a raw `customization` value, treating anything unusable as absent
    ///
    /// Accepts an object or a string holding a serialized object. Nulls,
    /// other scalars and arrays yield `None`. Inside an object document, a
    /// malformed `ext` section or widget entry is dropped on its own and
    /// every other key is kept.
    #[must_use]
    pub fn from_raw(raw: Value) -> Option<Self> {
        let value = match raw {
            Value::Null => return None,
            Value::Object(_) => raw,
            Value::String(text) => match serde_json::from_str::<Value>(&text) {
                Ok(parsed @ Value::Object(_)) => parsed,
                Ok(Value::Null) => return None,
                Ok(_) | Err(_) => {
                    warn!("Ignoring customization string that does not hold a JSON object");
                    return None;
                }
            },
            other => {
                warn!(kind = %json_kind(&other), "Ignoring customization of unexpected type");
                return None;
            }
        };

        match serde_json::from_value(value) {
            Ok(customization) => Some(customization),
            Err(e) => {
                warn!(error = %e, "Ignoring malformed customization document");
                None
            }
        }
    }
}

/// Serde adapter for the `customization` field of activity payloads
pub(crate) fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<Customization>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(Customization::from_raw))
}

fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn lenient_ext<'de, D>(deserializer: D) -> Result<Option<ExtSection>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(value @ Value::Object(_)) => match serde_json::from_value::<ExtSection>(value) {
            Ok(ext) => Ok(Some(ext)),
            Err(e) => {
                warn!(error = %e, "Ignoring malformed ext section");
                Ok(None)
            }
        },
        Some(other) => {
            warn!(kind = %json_kind(&other), "Ignoring ext section of unexpected type");
            Ok(None)
        }
    }
}

fn lenient_widgets<'de, D>(deserializer: D) -> Result<Vec<WidgetConfig>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(entries)) => entries,
        Some(other) => {
            warn!(kind = %json_kind(&other), "Ignoring widget list of unexpected type");
            return Ok(Vec::new());
        }
    };

    Ok(entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value::<WidgetConfig>(entry) {
            Ok(widget) => Some(widget),
            Err(e) => {
                warn!(index, error = %e, "Skipping malformed widget");
                None
            }
        })
        .collect())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
