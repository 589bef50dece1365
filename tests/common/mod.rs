// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process stand-in for the Lighter Footprints server.

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use lighterprints_client::config::Config;
use lighterprints_client::Session;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Participant group the mock server logs everyone in as.
#[allow(dead_code)]
pub const PARTICIPANT_GROUP_ID: u64 = 42;

/// Value of the `csrftoken` cookie set on login.
#[allow(dead_code)]
pub const CSRF_TOKEN: &str = "test-csrf-token";

#[derive(Default)]
struct MockState {
    responses: HashMap<String, Value>,
    statuses: HashMap<String, StatusCode>,
    delays: HashMap<String, Duration>,
    hits: HashMap<String, usize>,
    forms: HashMap<String, HashMap<String, String>>,
    csrf: HashMap<String, Option<String>>,
}

type SharedMock = Arc<Mutex<MockState>>;

/// Handle to a running mock server. Responses are keyed by endpoint name
/// (`login`, `view-model`, `perform-activity`, `message`, `comment`,
/// `like`, `group-score`).
#[allow(dead_code)]
pub struct MockServer {
    pub base_url: String,
    state: SharedMock,
}

#[allow(dead_code)]
impl MockServer {
    pub async fn start() -> Self {
        let state = SharedMock::default();
        {
            let mut mock = state.lock().unwrap();
            mock.responses.insert(
                "login".to_string(),
                json!({ "success": true, "participant_group_id": PARTICIPANT_GROUP_ID }),
            );
            mock.responses.insert(
                "view-model".to_string(),
                json!({ "success": true, "viewModel": sample_view_model() }),
            );
            mock.responses.insert(
                "group-score".to_string(),
                json!({
                    "success": true,
                    "scores": [{
                        "total_points": 120.0,
                        "points_to_next_level": 30.0,
                        "average_points_per_person": 24.0
                    }]
                }),
            );
        }

        let app = Router::new()
            .route("/lighterprints/api/view-model/{id}", get(view_model))
            .route("/lighterprints/api/group-score/{id}", get(group_score))
            .route("/lighterprints/api/{name}", post(action))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock server");
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    /// Client config pointing at this server.
    pub fn config(&self) -> Config {
        Config {
            base_url: self.base_url.clone(),
            email: Some("participant@example.org".to_string()),
            password: Some("secret".to_string()),
            request_timeout: Duration::from_secs(5),
            ..Config::default()
        }
    }

    /// Log in against this server.
    pub async fn session(&self) -> Session {
        Session::login(&self.config())
            .await
            .expect("Login against mock server failed")
    }

    pub fn set_response(&self, endpoint: &str, body: Value) {
        self.state
            .lock()
            .unwrap()
            .responses
            .insert(endpoint.to_string(), body);
    }

    pub fn set_status(&self, endpoint: &str, status: StatusCode) {
        self.state
            .lock()
            .unwrap()
            .statuses
            .insert(endpoint.to_string(), status);
    }

    pub fn set_delay(&self, endpoint: &str, delay: Duration) {
        self.state
            .lock()
            .unwrap()
            .delays
            .insert(endpoint.to_string(), delay);
    }

    pub fn hits(&self, endpoint: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .hits
            .get(endpoint)
            .copied()
            .unwrap_or(0)
    }

    /// Form fields of the last POST to `endpoint`.
    pub fn last_form(&self, endpoint: &str) -> Option<HashMap<String, String>> {
        self.state.lock().unwrap().forms.get(endpoint).cloned()
    }

    /// `X-CSRFToken` header of the last POST to `endpoint`.
    pub fn last_csrf(&self, endpoint: &str) -> Option<String> {
        self.state
            .lock()
            .unwrap()
            .csrf
            .get(endpoint)
            .cloned()
            .flatten()
    }
}

async fn view_model(State(state): State<SharedMock>, Path(_id): Path<u64>) -> Response {
    respond(&state, "view-model").await
}

async fn group_score(State(state): State<SharedMock>, Path(_id): Path<u64>) -> Response {
    respond(&state, "group-score").await
}

async fn action(
    State(state): State<SharedMock>,
    Path(name): Path<String>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    {
        let mut mock = state.lock().unwrap();
        let csrf = headers
            .get("x-csrftoken")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        mock.csrf.insert(name.clone(), csrf);
        mock.forms.insert(name.clone(), form);
    }

    let mut response = respond(&state, &name).await;
    if name == "login" && response.status().is_success() {
        response.headers_mut().insert(
            header::SET_COOKIE,
            format!("csrftoken={}; Path=/", CSRF_TOKEN).parse().unwrap(),
        );
    }
    response
}

async fn respond(state: &SharedMock, endpoint: &str) -> Response {
    let (delay, status, body) = {
        let mut mock = state.lock().unwrap();
        *mock.hits.entry(endpoint.to_string()).or_default() += 1;
        (
            mock.delays.get(endpoint).copied(),
            mock.statuses.get(endpoint).copied(),
            mock.responses
                .get(endpoint)
                .cloned()
                .unwrap_or_else(|| json!({ "success": true })),
        )
    };

    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    match status {
        Some(status) if !status.is_success() => (status, "Internal Server Error").into_response(),
        _ => Json(body).into_response(),
    }
}

/// View model for participant group 42.
///
/// Activities: 1 available, 2 locked, 3 completed, 4 available at level 2.
/// Group activity: chat 10, activity 11 (group 7), own comment 12,
/// comment 13 (group 7), like 14.
#[allow(dead_code)]
pub fn sample_view_model() -> Value {
    json!({
        "participantGroupId": PARTICIPANT_GROUP_ID,
        "hoursLeft": 5,
        "minutesLeft": "09",
        "hasLeaderboard": false,
        "groupName": "Green Team",
        "activities": [
            { "pk": 1, "name": "recycle-paper", "display_name": "Recycle paper", "status": "available", "level": 1 },
            { "pk": 2, "name": "bike-to-work", "status": "locked", "level": 1 },
            { "pk": 3, "name": "cold-wash", "status": "completed", "level": 1 },
            { "pk": 4, "name": "eat-local", "status": "available", "level": 2 }
        ],
        "groupActivity": [
            { "pk": 10, "parameter_name": "chat_message", "value": "hello team", "participant_number": 3, "date_created": "10:15" },
            { "pk": 11, "parameter_name": "activity_performed", "participant_group_id": 7, "display_name": "Cold wash" },
            { "pk": 12, "parameter_name": "comment", "participant_group_id": PARTICIPANT_GROUP_ID, "message": "nice" },
            { "pk": 13, "parameter_name": "comment", "participant_group_id": 7, "message": "go team" },
            { "pk": 14, "parameter_name": "like", "participant_group_id": 7 }
        ]
    })
}
