// ABOUTME: Integration tests for the activity widget customization manager
// ABOUTME: Drives add/delete/validate cycles against an in-memory KE-chain store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 KE-chain Client Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{activity_payload, client_and_activity, part_payload, FakeKechain};
use kechain::models::{Part, WidgetConfig};
use kechain::transport::{HttpMethod, RequestBody};
use kechain::{ErrorCode, KechainError, TitlePolicy};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use uuid::Uuid;

const ACTIVITY_NAME: &str = "Customizable activity";

fn setup(customization: Value) -> (Arc<FakeKechain>, Uuid) {
    let id = Uuid::new_v4();
    let fake = FakeKechain::with_activities(vec![
        activity_payload(id, ACTIVITY_NAME, customization),
        activity_payload(Uuid::new_v4(), "Other activity", Value::Null),
    ]);
    (fake, id)
}

fn panel(title: &str) -> WidgetConfig {
    let mut config = Map::new();
    config.insert("xtype".to_owned(), json!("panel"));
    config.insert("title".to_owned(), json!(title));
    WidgetConfig::new("jsonWidget", config)
}

fn bike() -> Part {
    serde_json::from_value(part_payload(Uuid::new_v4(), "Bike", "INSTANCE")).unwrap()
}

fn saved_customization(fake: &FakeKechain) -> Value {
    let puts = fake.requests_with(HttpMethod::Put);
    let RequestBody::Json(body) = &puts.last().unwrap().body else {
        panic!("customization saves are JSON");
    };
    body["customization"].clone()
}

#[tokio::test]
async fn test_fresh_activity_has_no_widgets() {
    let (fake, id) = setup(Value::Null);
    let (client, activity) = client_and_activity(&fake, id);

    let customization = client.customization(activity);
    assert!(customization.list_widgets().is_empty());
    assert!(fake.requests().is_empty());
}

#[tokio::test]
async fn test_widgets_are_appended_in_order() {
    let (fake, id) = setup(Value::Null);
    let (client, activity) = client_and_activity(&fake, id);
    let mut customization = client.customization(activity);

    customization.add_widget(panel("first")).await.unwrap();
    customization.add_widget(panel("second")).await.unwrap();

    let titles: Vec<_> = customization
        .list_widgets()
        .iter()
        .map(|widget| widget.config["title"].clone())
        .collect();
    assert_eq!(titles, vec![json!("first"), json!("second")]);

    // Every save is followed by a re-fetch by name within the scope
    let gets = fake.requests_with(HttpMethod::Get);
    assert_eq!(gets.len(), 2);
    assert!(gets[0]
        .query
        .contains(&("name".to_owned(), ACTIVITY_NAME.to_owned())));
    assert!(gets[0]
        .query
        .contains(&("scope".to_owned(), common::SCOPE_ID.to_owned())));
}

#[tokio::test]
async fn test_customization_is_sent_as_serialized_document() {
    let (fake, id) = setup(Value::Null);
    let (client, activity) = client_and_activity(&fake, id);
    let mut customization = client.customization(activity);

    customization.add_widget(panel("first")).await.unwrap();

    let sent = saved_customization(&fake);
    let document: Value = serde_json::from_str(sent.as_str().unwrap()).unwrap();
    assert_eq!(document["ext"]["widgets"][0]["name"], "jsonWidget");
    assert_eq!(document["ext"]["widgets"][0]["config"]["title"], "first");

    let puts = fake.requests_with(HttpMethod::Put);
    assert_eq!(puts[0].url.path(), format!("/api/activities/{id}.json"));
}

#[tokio::test]
async fn test_last_full_replace_wins() {
    let (fake, id) = setup(Value::Null);
    let (client, activity) = client_and_activity(&fake, id);
    let mut customization = client.customization(activity);

    customization.add_widget(panel("mine")).await.unwrap();
    // Another writer changes the document; the next save starts from what was last fetched
    fake.set_customization(
        id,
        json!({ "ext": { "widgets": [{ "name": "jsonWidget", "config": { "xtype": "toolbar" } }] } }),
    );
    customization.add_widget(panel("second")).await.unwrap();

    let widgets = customization.list_widgets();
    assert_eq!(widgets.len(), 2);
    assert_eq!(widgets[0].config["title"], "mine");
    assert_eq!(widgets[1].config["title"], "second");
}

#[tokio::test]
async fn test_delete_widget_by_index() {
    let (fake, id) = setup(Value::Null);
    let (client, activity) = client_and_activity(&fake, id);
    let mut customization = client.customization(activity);

    for title in ["w0", "w1", "w2"] {
        customization.add_widget(panel(title)).await.unwrap();
    }
    customization.delete_widget(1).await.unwrap();

    let titles: Vec<_> = customization
        .list_widgets()
        .iter()
        .map(|widget| widget.config["title"].clone())
        .collect();
    assert_eq!(titles, vec![json!("w0"), json!("w2")]);
}

#[tokio::test]
async fn test_delete_widget_out_of_range_sends_nothing() {
    let (fake, id) = setup(Value::Null);
    let (client, activity) = client_and_activity(&fake, id);
    let mut customization = client.customization(activity);

    for title in ["w0", "w1", "w2"] {
        customization.add_widget(panel(title)).await.unwrap();
    }
    let before = fake.requests().len();

    let error = customization.delete_widget(5).await.unwrap_err();
    assert!(matches!(
        error,
        KechainError::IndexOutOfRange { index: 5, len: 3 }
    ));
    assert_eq!(error.code(), ErrorCode::IndexOutOfRange);
    assert_eq!(fake.requests().len(), before);
    assert_eq!(customization.list_widgets().len(), 3);
}

#[tokio::test]
async fn test_deleting_last_widget_clears_customization() {
    let (fake, id) = setup(Value::Null);
    let (client, activity) = client_and_activity(&fake, id);
    let mut customization = client.customization(activity);

    customization.add_widget(panel("only")).await.unwrap();
    customization.delete_widget(0).await.unwrap();

    assert_eq!(saved_customization(&fake), Value::Null);
    assert_eq!(fake.stored(id)["customization"], Value::Null);
    assert!(customization.list_widgets().is_empty());
    assert!(customization.activity().customization.is_none());
}

#[tokio::test]
async fn test_delete_all_widgets() {
    let (fake, id) = setup(Value::Null);
    let (client, activity) = client_and_activity(&fake, id);
    let mut customization = client.customization(activity);

    customization.add_widget(panel("a")).await.unwrap();
    customization.add_widget(panel("b")).await.unwrap();
    customization.delete_all_widgets().await.unwrap();

    assert_eq!(saved_customization(&fake), Value::Null);
    assert!(customization.list_widgets().is_empty());
}

#[tokio::test]
async fn test_sibling_keys_survive_a_save() {
    let (fake, id) = setup(json!({
        "ext": { "widgets": [], "layout": "vbox" },
        "version": 2
    }));
    let (client, activity) = client_and_activity(&fake, id);
    let mut customization = client.customization(activity);

    customization.add_widget(panel("kept")).await.unwrap();

    let stored = &fake.stored(id)["customization"];
    assert_eq!(stored["ext"]["layout"], "vbox");
    assert_eq!(stored["version"], 2);
    assert_eq!(stored["ext"]["widgets"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_unknown_widget_keys_survive_a_save() {
    let (fake, id) = setup(json!({
        "ext": { "widgets": [{
            "name": "jsonWidget",
            "config": { "xtype": "panel" },
            "id": "w-1",
            "collapsed": true
        }] }
    }));
    let (client, activity) = client_and_activity(&fake, id);
    let mut customization = client.customization(activity);

    customization.add_widget(panel("new")).await.unwrap();

    let stored = &fake.stored(id)["customization"]["ext"]["widgets"];
    assert_eq!(stored.as_array().unwrap().len(), 2);
    assert_eq!(stored[0]["id"], "w-1");
    assert_eq!(stored[0]["collapsed"], true);
    assert!(stored[1].get("id").is_none());
}

#[tokio::test]
async fn test_malformed_widget_does_not_wipe_the_document() {
    let (fake, id) = setup(json!({
        "ext": { "widgets": [
            { "name": "jsonWidget", "config": { "xtype": "panel", "title": "good" } },
            { "name": "htmlWidget", "config": "raw-html" }
        ] },
        "theme": "dark"
    }));
    let (client, activity) = client_and_activity(&fake, id);
    let mut customization = client.customization(activity);
    assert_eq!(customization.list_widgets().len(), 1);

    customization.add_widget(panel("new")).await.unwrap();

    let stored = &fake.stored(id)["customization"];
    assert_eq!(stored["theme"], "dark");
    let widgets = stored["ext"]["widgets"].as_array().unwrap();
    assert_eq!(widgets.len(), 2);
    assert_eq!(widgets[0]["config"]["title"], "good");
    assert_eq!(widgets[1]["config"]["title"], "new");
}

#[tokio::test]
async fn test_generic_widget_is_validated_before_saving() {
    let (fake, id) = setup(Value::Null);
    let (client, activity) = client_and_activity(&fake, id);
    let mut customization = client.customization(activity);

    let error = customization
        .add_generic_widget(json!({ "title": "No xtype" }))
        .await
        .unwrap_err();
    assert_eq!(error.code(), ErrorCode::ValidationFailed);

    let error = customization
        .add_generic_widget(json!({ "xtype": "superGrid", "filter": { "model": "abc" } }))
        .await
        .unwrap_err();
    assert!(matches!(error, KechainError::Validation { .. }));

    assert!(fake.requests().is_empty());
    assert!(customization.list_widgets().is_empty());
}

#[tokio::test]
async fn test_generic_widget_is_wrapped_as_json_widget() {
    let (fake, id) = setup(Value::Null);
    let (client, activity) = client_and_activity(&fake, id);
    let mut customization = client.customization(activity);

    customization
        .add_generic_widget(json!({
            "xtype": "superGrid",
            "filter": { "parent": "e5106946-40f7-4b49-ae5e-421450857911" },
            "title": null
        }))
        .await
        .unwrap();

    let widget = &customization.list_widgets()[0];
    assert_eq!(widget.name, "jsonWidget");
    assert_eq!(widget.config["xtype"], "superGrid");
    assert!(widget.meta.is_none());
}

#[tokio::test]
async fn test_property_grid_title_policies() {
    let (fake, id) = setup(Value::Null);
    let (client, activity) = client_and_activity(&fake, id);
    let mut customization = client.customization(activity);
    let part = bike();

    customization
        .add_property_grid_widget(&part, Some(400), TitlePolicy::UseDefaultName)
        .await
        .unwrap();
    customization
        .add_property_grid_widget(&part, None, TitlePolicy::UseCustomTitle("Foo".to_owned()))
        .await
        .unwrap();
    customization
        .add_property_grid_widget(&part, Some(0), TitlePolicy::SuppressTitle)
        .await
        .unwrap();

    let widgets = customization.list_widgets();
    assert_eq!(widgets.len(), 3);

    let default = &widgets[0];
    assert_eq!(default.name, "propertyGridWidget");
    assert_eq!(default.config["title"], "Bike");
    assert_eq!(default.config["maxHeight"], 400);
    assert_eq!(default.config["filter"]["activity_id"], id.to_string());
    assert_eq!(default.config["filter"]["part"], part.id.to_string());
    let meta = default.meta.as_ref().unwrap();
    assert_eq!(meta["showTitleValue"], "Default");
    assert_eq!(meta["showHeightValue"], "Custom max height");

    let custom = &widgets[1];
    assert_eq!(custom.config["title"], "Foo");
    assert!(!custom.config.contains_key("maxHeight"));
    let meta = custom.meta.as_ref().unwrap();
    assert_eq!(meta["showTitleValue"], "Custom Title");
    assert_eq!(meta["customTitle"], "Foo");
    assert_eq!(meta["showHeightValue"], "Auto");

    let hidden = &widgets[2];
    assert_eq!(hidden.config["title"], Value::Null);
    let meta = hidden.meta.as_ref().unwrap();
    assert_eq!(meta["showTitleValue"], "No title");
    assert_eq!(meta["customHeight"], Value::Null);
}

#[tokio::test]
async fn test_property_grid_rejects_part_models() {
    let (fake, id) = setup(Value::Null);
    let (client, activity) = client_and_activity(&fake, id);
    let mut customization = client.customization(activity);
    let model: Part =
        serde_json::from_value(part_payload(Uuid::new_v4(), "Bike", "MODEL")).unwrap();

    let error = customization
        .add_property_grid_widget(&model, None, TitlePolicy::UseDefaultName)
        .await
        .unwrap_err();
    assert!(matches!(error, KechainError::IllegalArgument(_)));
    assert!(fake.requests().is_empty());
}

#[tokio::test]
async fn test_rejected_save_leaves_state_unchanged() {
    let (fake, id) = setup(Value::Null);
    let (client, activity) = client_and_activity(&fake, id);
    let mut customization = client.customization(activity);

    customization.add_widget(panel("kept")).await.unwrap();
    fake.reject_next_write(400);

    let error = customization.add_widget(panel("lost")).await.unwrap_err();
    assert_eq!(error.code(), ErrorCode::ApiError);
    let diagnostics = error.diagnostics().unwrap();
    assert_eq!(diagnostics.status, Some(400));
    assert_eq!(diagnostics.method, "PUT");
    assert!(diagnostics.url.ends_with(&format!("api/activities/{id}.json")));
    assert!(error.to_string().contains(ACTIVITY_NAME));

    assert_eq!(customization.list_widgets().len(), 1);
    assert_eq!(
        fake.stored(id)["customization"]["ext"]["widgets"]
            .as_array()
            .unwrap()
            .len(),
        1
    );
}

#[tokio::test]
async fn test_string_customization_from_server_is_parsed() {
    let (fake, id) = setup(json!(
        r#"{"ext":{"widgets":[{"name":"jsonWidget","config":{"xtype":"panel"}}]}}"#
    ));
    let (client, activity) = client_and_activity(&fake, id);

    let customization = client.customization(activity);
    assert_eq!(customization.list_widgets().len(), 1);
    assert!(customization.to_string().starts_with("<ExtCustomization 'Customizable activity' id "));
    assert!(customization.to_string().ends_with("(1 widgets)>"));
}
