// ABOUTME: Builders for the widget configs the customization manager persists
// ABOUTME: Property grid config/meta assembly with explicit title and height policies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 KE-chain Client Contributors

use kechain_core::constants::widgets;
use kechain_core::enums::{Category, ComponentXType};
use kechain_core::models::{Part, WidgetConfig};
use serde_json::{json, Map, Value};
use uuid::Uuid;

/// Title shown above a property grid
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TitlePolicy {
    /// Show the part instance's name
    #[default]
    UseDefaultName,
    /// Show this text; an empty text hides the title
    UseCustomTitle(String),
    /// Show no title
    SuppressTitle,
}

impl TitlePolicy {
    /// Resolved title and the matching presentation label
    #[must_use]
    pub fn resolve(&self, part: &Part) -> (Option<String>, &'static str) {
        match self {
            Self::UseDefaultName => (Some(part.name.clone()), widgets::TITLE_DEFAULT),
            Self::UseCustomTitle(title) if !title.is_empty() => {
                (Some(title.clone()), widgets::TITLE_CUSTOM)
            }
            Self::UseCustomTitle(_) | Self::SuppressTitle => (None, widgets::TITLE_NONE),
        }
    }
}

/// Widget config for the property grid of `part` inside `activity_id`
///
/// `max_height` of `None` or `Some(0)` lets the grid size itself.
#[must_use]
pub fn property_grid_widget(
    activity_id: Uuid,
    part: &Part,
    max_height: Option<u32>,
    title: &TitlePolicy,
) -> WidgetConfig {
    let max_height = max_height.filter(|height| *height > 0);
    let (title, title_label) = title.resolve(part);

    let mut config = Map::new();
    config.insert("xtype".to_owned(), json!(ComponentXType::PropertyGrid));
    config.insert("category".to_owned(), json!(Category::Instance));
    config.insert(
        "filter".to_owned(),
        json!({
            "activity_id": activity_id.to_string(),
            "part": part.id.to_string(),
        }),
    );
    if let Some(height) = max_height {
        config.insert("maxHeight".to_owned(), json!(height));
    }
    config.insert("title".to_owned(), json!(title));

    let height_label = if max_height.is_some() {
        widgets::HEIGHT_CUSTOM
    } else {
        widgets::HEIGHT_AUTO
    };
    let meta = json!({
        "activityId": activity_id.to_string(),
        "customHeight": max_height,
        "customTitle": title,
        "partInstanceId": part.id.to_string(),
        "showHeightValue": height_label,
        "showTitleValue": title_label,
    });

    WidgetConfig::new(widgets::PROPERTY_GRID_WIDGET, config).with_meta(meta)
}

/// Generic widget wrapping an already validated component config
#[must_use]
pub fn json_widget(config: Map<String, Value>) -> WidgetConfig {
    WidgetConfig::new(widgets::JSON_WIDGET, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bike() -> Part {
        serde_json::from_value(json!({
            "id": "3e8f4b9a-4c9d-4a0b-9f3e-1d2c3b4a5e6f",
            "name": "Bike",
            "category": "INSTANCE"
        }))
        .unwrap()
    }

    #[test]
    fn test_title_policy_labels() {
        let part = bike();
        assert_eq!(
            TitlePolicy::UseDefaultName.resolve(&part),
            (Some("Bike".to_owned()), "Default")
        );
        assert_eq!(
            TitlePolicy::UseCustomTitle("Foo".to_owned()).resolve(&part),
            (Some("Foo".to_owned()), "Custom Title")
        );
        assert_eq!(TitlePolicy::SuppressTitle.resolve(&part), (None, "No title"));
        assert_eq!(
            TitlePolicy::UseCustomTitle(String::new()).resolve(&part),
            (None, "No title")
        );
    }

    #[test]
    fn test_property_grid_with_height() {
        let activity = Uuid::nil();
        let widget = property_grid_widget(activity, &bike(), Some(300), &TitlePolicy::UseDefaultName);

        assert_eq!(widget.name, "propertyGridWidget");
        assert_eq!(widget.config["xtype"], "propertyGrid");
        assert_eq!(widget.config["category"], "INSTANCE");
        assert_eq!(widget.config["maxHeight"], 300);
        assert_eq!(widget.config["title"], "Bike");
        assert_eq!(
            widget.config["filter"]["part"],
            "3e8f4b9a-4c9d-4a0b-9f3e-1d2c3b4a5e6f"
        );

        let meta = widget.meta.unwrap();
        assert_eq!(meta["customHeight"], 300);
        assert_eq!(meta["showHeightValue"], "Custom max height");
        assert_eq!(meta["showTitleValue"], "Default");
        assert_eq!(meta["activityId"], activity.to_string());
    }

    #[test]
    fn test_property_grid_auto_height_and_no_title() {
        for height in [None, Some(0)] {
            let widget =
                property_grid_widget(Uuid::nil(), &bike(), height, &TitlePolicy::SuppressTitle);
            assert!(!widget.config.contains_key("maxHeight"));
            assert_eq!(widget.config["title"], Value::Null);

            let meta = widget.meta.unwrap();
            assert_eq!(meta["customHeight"], Value::Null);
            assert_eq!(meta["customTitle"], Value::Null);
            assert_eq!(meta["showHeightValue"], "Auto");
            assert_eq!(meta["showTitleValue"], "No title");
        }
    }
}
