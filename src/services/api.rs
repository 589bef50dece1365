// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Lighter Footprints API client.
//!
//! Handles:
//! - Login and session cookies
//! - View-model and group-score fetches
//! - Action form posts (perform, chat, comment, like)
//! - Anti-forgery header on same-origin POSTs
//!
//! Outcome of an action is the `success` flag in the JSON body; a non-2xx
//! status means the request never reached the application and is reported
//! as a transport failure.

use std::sync::Arc;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{ApiPaths, Config};
use crate::error::{ClientError, Result};
use crate::models::forms::{
    ActivityForm, ChatMessageForm, CommentForm, LikeForm, LoginForm,
};
use crate::models::{GroupScore, GroupScoreResponse, ViewModelSnapshot};

/// Session cookie holding the anti-forgery token.
pub const CSRF_COOKIE: &str = "csrftoken";

/// Header the server expects the token in.
pub const CSRF_HEADER: &str = "X-CSRFToken";

const API_ROOT: &str = "lighterprints/api/";

/// Lighter Footprints HTTP client. Cheap to clone; clones share cookies.
#[derive(Clone)]
pub struct LighterprintsClient {
    http: reqwest::Client,
    cookies: Arc<Jar>,
    base_url: Url,
    api_root: Url,
    paths: ApiPaths,
}

impl LighterprintsClient {
    /// Create a client for the configured server.
    pub fn new(config: &Config) -> Result<Self> {
        let base_url = parse_base_url(&config.base_url)?;
        let api_root = base_url
            .join(API_ROOT)
            .map_err(|e| ClientError::Config(format!("Invalid API root: {}", e)))?;

        let cookies = Arc::new(Jar::default());
        let http = reqwest::Client::builder()
            .cookie_provider(cookies.clone())
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ClientError::Config(format!("HTTP client setup failed: {}", e)))?;

        Ok(Self {
            http,
            cookies,
            base_url,
            api_root,
            paths: config.paths.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an endpoint path against the API root.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.api_root
            .join(path)
            .map_err(|e| ClientError::Config(format!("Invalid endpoint {:?}: {}", path, e)))
    }

    /// Log in and return the participant group ID.
    pub async fn login(&self, email: &str, password: &str) -> Result<u64> {
        let response: LoginResponse = self
            .post_form(&self.paths.login, &LoginForm { email, password })
            .await?;

        match (response.success, response.participant_group_id) {
            (true, Some(participant_group_id)) => {
                tracing::info!(participant_group_id, "Logged in");
                Ok(participant_group_id)
            }
            (true, None) => Err(ClientError::Decode(
                "login response missing participant_group_id".to_string(),
            )),
            (false, _) => Err(ClientError::ActionRejected(
                response
                    .message
                    .unwrap_or_else(|| "Invalid login".to_string()),
            )),
        }
    }

    /// Fetch and decode the full view model.
    pub async fn fetch_view_model(&self, participant_group_id: u64) -> Result<ViewModelSnapshot> {
        let path = format!("{}/{}", self.paths.view_model, participant_group_id);
        let envelope: ViewModelEnvelope = self.get_json(&path).await?;

        if envelope.success == Some(false) {
            return Err(ClientError::ActionRejected(
                envelope.message.unwrap_or_default(),
            ));
        }
        let view_model = envelope
            .view_model
            .or(envelope.view_model_json)
            .ok_or_else(|| ClientError::Decode("response missing viewModel".to_string()))?;

        ViewModelSnapshot::from_value(view_model)
    }

    pub async fn perform_activity(
        &self,
        participant_group_id: u64,
        activity_id: u64,
    ) -> Result<ActionResponse> {
        let form = ActivityForm {
            participant_group_id,
            activity_id,
        };
        self.post_form(&self.paths.perform_activity, &form).await
    }

    pub async fn post_chat_message(&self, form: &ChatMessageForm) -> Result<ActionResponse> {
        self.post_form(&self.paths.message, form).await
    }

    pub async fn post_comment(&self, form: &CommentForm) -> Result<ActionResponse> {
        self.post_form(&self.paths.comment, form).await
    }

    pub async fn like(&self, participant_group_id: u64, target_id: u64) -> Result<ActionResponse> {
        let form = LikeForm {
            participant_group_id,
            target_id,
        };
        self.post_form(&self.paths.like, &form).await
    }

    pub async fn group_score(&self, participant_group_id: u64) -> Result<Vec<GroupScore>> {
        let path = format!("{}/{}", self.paths.group_score, participant_group_id);
        let response: GroupScoreResponse = self.get_json(&path).await?;
        Ok(response.scores)
    }

    /// Anti-forgery token to attach to a POST to `url`, if any.
    ///
    /// Only same-origin requests (scheme, host and port of the base URL)
    /// carry the token.
    pub fn csrf_token_for(&self, url: &Url) -> Option<String> {
        if url.origin() != self.base_url.origin() {
            return None;
        }
        let header = self.cookies.cookies(&self.base_url)?;
        let cookies = header.to_str().ok()?;

        cookies
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == CSRF_COOKIE)
            .and_then(|(_, value)| urlencoding::decode(value).ok())
            .map(|value| value.into_owned())
    }

    /// Generic GET request with JSON response.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        tracing::debug!(url = %url, "GET");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        self.check_response_json(response).await
    }

    /// Form POST with JSON response.
    async fn post_form<F, T>(&self, path: &str, form: &F) -> Result<T>
    where
        F: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let csrf_token = self.csrf_token_for(&url);
        tracing::debug!(url = %url, csrf = csrf_token.is_some(), "POST");

        let mut request = self.http.post(url).form(form);
        if let Some(token) = csrf_token {
            request = request.header(CSRF_HEADER, token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        self.check_response_json(response).await
    }

    /// Check response status and parse the JSON body.
    async fn check_response_json<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Lighter Footprints request failed");
            return Err(ClientError::Transport(format!("HTTP {}: {}", status, body)));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        serde_json::from_slice(&body)
            .map_err(|e| ClientError::Decode(format!("JSON parse error: {}", e)))
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    // `Url::join` drops the last path segment unless it ends with a slash.
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    };
    Url::parse(&normalized)
        .map_err(|e| ClientError::Config(format!("Invalid base URL {:?}: {}", raw, e)))
}

/// Login response body.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(default)]
    pub participant_group_id: Option<u64>,
    #[serde(default)]
    pub message: Option<String>,
}

/// View-model endpoint response body. Deployments name the member
/// `viewModel` or `view_model_json`.
#[derive(Debug, Clone, Deserialize)]
struct ViewModelEnvelope {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default, rename = "viewModel")]
    view_model: Option<Value>,
    #[serde(default)]
    view_model_json: Option<Value>,
    #[serde(default)]
    message: Option<String>,
}

/// Response body shared by every action endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionResponse {
    pub success: bool,
    #[serde(default, rename = "viewModel")]
    pub view_model: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
    /// Some endpoints put the failure reason here instead of `message`
    #[serde(default)]
    pub response: Option<String>,
}

impl ActionResponse {
    /// Turn `success: false` into [`ClientError::ActionRejected`]; on success
    /// yield the raw view model, if the endpoint sent one.
    pub fn into_view_model(self) -> Result<Option<Value>> {
        if self.success {
            return Ok(self.view_model.filter(|v| !v.is_null()));
        }
        let reason = self.message.or(self.response).unwrap_or_default();
        Err(ClientError::ActionRejected(reason))
    }
}
