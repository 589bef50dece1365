// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client configuration loaded from environment variables.
//!
//! Deployments of the Lighter Footprints server differ slightly in endpoint
//! paths and in how much of the group feed the sidebar shows; those
//! differences live here instead of in separate client variants.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::services::ticker::TICK_PERIOD;
use crate::views::ViewOptions;

/// Paths of the API endpoints, relative to `{base_url}/lighterprints/api/`.
///
/// A path may also be an absolute URL, in which case it replaces the API
/// root entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiPaths {
    pub login: String,
    pub view_model: String,
    pub perform_activity: String,
    pub message: String,
    pub comment: String,
    pub like: String,
    pub group_score: String,
}

impl Default for ApiPaths {
    fn default() -> Self {
        Self {
            login: "login".to_string(),
            view_model: "view-model".to_string(),
            perform_activity: "perform-activity".to_string(),
            message: "message".to_string(),
            comment: "comment".to_string(),
            like: "like".to_string(),
            group_score: "group-score".to_string(),
        }
    }
}

/// Client configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server origin, e.g. `https://vcweb.asu.edu`
    pub base_url: String,
    /// Login email (only needed when the client logs in itself)
    pub email: Option<String>,
    /// Login password
    pub password: Option<String>,
    /// Endpoint paths for this deployment
    pub paths: ApiPaths,
    /// Sidebar truncation limits
    pub view_options: ViewOptions,
    /// How often the countdown ticks
    pub tick_period: Duration,
    /// Per-request timeout
    pub request_timeout: Duration,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            email: None,
            password: None,
            paths: ApiPaths::default(),
            view_options: ViewOptions::default(),
            tick_period: TICK_PERIOD,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();
        let view_defaults = defaults.view_options;

        let mut paths = ApiPaths::default();
        if let Ok(path) = env::var("LIGHTERPRINTS_PERFORM_PATH") {
            paths.perform_activity = path.trim().to_string();
        }

        Ok(Self {
            base_url: env::var("LIGHTERPRINTS_BASE_URL").unwrap_or(defaults.base_url),
            email: env::var("LIGHTERPRINTS_EMAIL").ok(),
            password: env::var("LIGHTERPRINTS_PASSWORD").ok(),
            paths,
            view_options: ViewOptions {
                sidebar_limit: parse_var("LIGHTERPRINTS_SIDEBAR_LIMIT", view_defaults.sidebar_limit)?,
                leaderboard_sidebar_limit: parse_var(
                    "LIGHTERPRINTS_LEADERBOARD_SIDEBAR_LIMIT",
                    view_defaults.leaderboard_sidebar_limit,
                )?,
            },
            tick_period: parse_seconds("LIGHTERPRINTS_TICK_SECONDS", defaults.tick_period)?,
            request_timeout: parse_seconds("LIGHTERPRINTS_TIMEOUT_SECS", defaults.request_timeout)?,
        })
    }
}

/// Parse an optional environment variable, falling back to `default` when unset.
fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            value: raw.clone(),
        }),
        Err(_) => Ok(default),
    }
}

/// Parse a whole number of seconds. Zero is rejected: it is not a usable
/// tick period or request timeout.
fn parse_seconds(name: &'static str, default: Duration) -> Result<Duration, ConfigError> {
    match parse_var(name, default.as_secs())? {
        0 => Err(ConfigError::Invalid {
            name,
            value: "0".to_string(),
        }),
        secs => Ok(Duration::from_secs(secs)),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}
