// ABOUTME: Shared test utilities for integration tests
// ABOUTME: In-memory KE-chain activity store behind the Transport trait plus quiet logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 KE-chain Client Contributors
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]
//! Shared test utilities for `kechain`
//!
//! [`FakeKechain`] answers the activity list and activity update endpoints the
//! customization manager uses, so its read-modify-write cycle can be observed
//! without a server.

use async_trait::async_trait;
use kechain::models::Activity;
use kechain::transport::{ApiRequest, ApiResponse, HttpMethod, RequestBody, Transport};
use kechain::{Client, KechainResult};
use kechain_core::RequestDiagnostics;
use serde_json::{json, Value};
use std::env;
use std::sync::{Arc, Mutex, Once};
use tracing::Level;
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Base URL every fake client is built with
pub const BASE_URL: &str = "https://kec.example/";

/// Scope every fixture activity belongs to
pub const SCOPE_ID: &str = "0b3ab4a2-5bd1-4e43-9d23-c5b6b1a3e7a1";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

#[derive(Default)]
struct FakeState {
    activities: Vec<Value>,
    requests: Vec<ApiRequest>,
    reject_next_write: Option<u16>,
    last_exchange: Option<RequestDiagnostics>,
}

/// In-memory activity store speaking the KE-chain wire format
#[derive(Default)]
pub struct FakeKechain {
    state: Mutex<FakeState>,
}

impl FakeKechain {
    /// Store seeded with `activities` payloads
    pub fn with_activities(activities: Vec<Value>) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(FakeState {
                activities,
                ..FakeState::default()
            }),
        })
    }

    /// Answer the next PUT with `status` instead of applying it
    pub fn reject_next_write(&self, status: u16) {
        self.state.lock().unwrap().reject_next_write = Some(status);
    }

    /// Every request received so far
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Requests received with `method`
    pub fn requests_with(&self, method: HttpMethod) -> Vec<ApiRequest> {
        self.requests()
            .into_iter()
            .filter(|request| request.method == method)
            .collect()
    }

    /// Stored payload of the activity with `id`
    pub fn stored(&self, id: Uuid) -> Value {
        let state = self.state.lock().unwrap();
        state
            .activities
            .iter()
            .find(|activity| activity["id"] == id.to_string())
            .cloned()
            .unwrap()
    }

    /// Overwrite the stored customization, as another writer would
    pub fn set_customization(&self, id: Uuid, customization: Value) {
        let mut state = self.state.lock().unwrap();
        let activity = state
            .activities
            .iter_mut()
            .find(|activity| activity["id"] == id.to_string())
            .unwrap();
        activity["customization"] = customization;
    }

    fn list_activities(state: &FakeState, request: &ApiRequest) -> ApiResponse {
        let results: Vec<Value> = state
            .activities
            .iter()
            .filter(|activity| {
                request.query.iter().all(|(key, value)| match key.as_str() {
                    "name" => activity["name"] == value.as_str(),
                    "id" => activity["id"] == value.as_str(),
                    "scope" => activity["scope"]["id"] == value.as_str(),
                    "container" => activity["container"] == value.as_str(),
                    _ => true,
                })
            })
            .cloned()
            .collect();
        ApiResponse {
            status: 200,
            body: json!({ "results": results }),
        }
    }

    fn update_activity(state: &mut FakeState, request: &ApiRequest) -> ApiResponse {
        if let Some(status) = state.reject_next_write.take() {
            return ApiResponse {
                status,
                body: json!({ "detail": "write rejected" }),
            };
        }

        let id = request
            .url
            .path()
            .trim_start_matches("/api/activities/")
            .trim_end_matches(".json")
            .to_owned();
        let RequestBody::Json(body) = &request.body else {
            return ApiResponse {
                status: 400,
                body: json!({ "detail": "expected a JSON body" }),
            };
        };
        let customization = match &body["customization"] {
            Value::String(text) => serde_json::from_str(text).unwrap(),
            other => other.clone(),
        };

        match state.activities.iter_mut().find(|a| a["id"] == id.as_str()) {
            Some(activity) => {
                activity["customization"] = customization;
                ApiResponse {
                    status: 200,
                    body: json!({ "results": [activity.clone()] }),
                }
            }
            None => ApiResponse {
                status: 404,
                body: json!({ "detail": "Not found." }),
            },
        }
    }
}

#[async_trait]
impl Transport for FakeKechain {
    async fn execute(&self, request: ApiRequest) -> KechainResult<ApiResponse> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(request.clone());

        let path = request.url.path().to_owned();
        let response = match request.method {
            HttpMethod::Get if path == "/api/activities.json" => {
                Self::list_activities(&state, &request)
            }
            HttpMethod::Put if path.starts_with("/api/activities/") => {
                Self::update_activity(&mut state, &request)
            }
            _ => ApiResponse {
                status: 404,
                body: json!({ "detail": "Not found." }),
            },
        };

        state.last_exchange = Some(
            RequestDiagnostics::new(request.method.as_str(), request.full_url().as_str())
                .with_response(response.status, response.body.clone()),
        );
        Ok(response)
    }

    fn last_exchange(&self) -> Option<RequestDiagnostics> {
        self.state.lock().unwrap().last_exchange.clone()
    }
}

/// Activity payload in the scope [`SCOPE_ID`]
pub fn activity_payload(id: Uuid, name: &str, customization: Value) -> Value {
    json!({
        "id": id.to_string(),
        "name": name,
        "scope": { "id": SCOPE_ID, "name": "Bike Project" },
        "activity_class": "UserTask",
        "status": "OPEN",
        "container": "1c9b8e2a-7a54-4d7e-93e3-9b6fd1a5d222",
        "root_container": "1c9b8e2a-7a54-4d7e-93e3-9b6fd1a5d222",
        "assignees": [],
        "customization": customization
    })
}

/// Client over `fake` plus the parsed activity `id`
pub fn client_and_activity(fake: &Arc<FakeKechain>, id: Uuid) -> (Client, Activity) {
    init_test_logging();
    let client = Client::with_transport(BASE_URL, fake.clone()).unwrap();
    let activity = serde_json::from_value(fake.stored(id)).unwrap();
    (client, activity)
}

/// Part instance payload
pub fn part_payload(id: Uuid, name: &str, category: &str) -> Value {
    json!({
        "id": id.to_string(),
        "name": name,
        "category": category,
        "properties": []
    })
}
