// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Challenge activity model as delivered in the view-model snapshot.

use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;

/// Server-assigned availability of an activity for the current period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityStatus {
    Locked,
    Available,
    Completed,
    Expired,
    Upcoming,
}

impl ActivityStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityStatus::Locked => "locked",
            ActivityStatus::Available => "available",
            ActivityStatus::Completed => "completed",
            ActivityStatus::Expired => "expired",
            ActivityStatus::Upcoming => "upcoming",
        }
    }

    /// Only `available` activities can be performed.
    pub fn is_interactive(self) -> bool {
        self == ActivityStatus::Available
    }
}

impl fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sustainability challenge a participant can perform for points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Server-assigned identifier
    #[serde(alias = "id")]
    pub pk: u64,
    /// Slug-style name
    pub name: String,
    /// Human-readable title (falls back to `name`)
    #[serde(default)]
    pub display_name: Option<String>,
    pub status: ActivityStatus,
    /// Unlock level grouping
    #[serde(default = "default_level")]
    pub level: u32,
    /// Server's "can be performed right now" flag; derived from `status`
    /// when the server omits it
    #[serde(default, alias = "availableNow")]
    pub available_now: Option<bool>,
    #[serde(default)]
    pub points: Option<i64>,
    /// Carbon savings; sent as a number or a decimal string ("1.50")
    #[serde(default, deserialize_with = "optional_decimal")]
    pub savings: Option<f64>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub personal_benefits: Option<String>,
    #[serde(default)]
    pub icon_url: Option<String>,
    #[serde(default)]
    pub icon_name: Option<String>,
    #[serde(default)]
    pub time_slots: Option<String>,
    #[serde(default)]
    pub available_all_day: Option<bool>,
}

fn default_level() -> u32 {
    1
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DecimalRepr {
    Number(f64),
    Text(String),
}

fn optional_decimal<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<f64>, D::Error> {
    match Option::<DecimalRepr>::deserialize(deserializer)? {
        None => Ok(None),
        Some(DecimalRepr::Number(value)) => Ok(Some(value)),
        Some(DecimalRepr::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid decimal value {text:?}"))),
    }
}

impl Activity {
    /// Minimal activity, mostly useful for tests and fixtures.
    pub fn new(pk: u64, name: impl Into<String>, status: ActivityStatus) -> Self {
        Self {
            pk,
            name: name.into(),
            display_name: None,
            status,
            level: default_level(),
            available_now: None,
            points: None,
            savings: None,
            summary: None,
            description: None,
            personal_benefits: None,
            icon_url: None,
            icon_name: None,
            time_slots: None,
            available_all_day: None,
        }
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }

    pub fn is_available_now(&self) -> bool {
        self.available_now
            .unwrap_or(self.status == ActivityStatus::Available)
    }

    pub fn has_status(&self, status: ActivityStatus) -> bool {
        self.status == status
    }

    pub fn is_available(&self) -> bool {
        self.has_status(ActivityStatus::Available)
    }

    pub fn is_locked(&self) -> bool {
        self.has_status(ActivityStatus::Locked)
    }

    pub fn is_completed(&self) -> bool {
        self.has_status(ActivityStatus::Completed)
    }

    pub fn is_expired(&self) -> bool {
        self.has_status(ActivityStatus::Expired)
    }

    pub fn is_upcoming(&self) -> bool {
        self.has_status(ActivityStatus::Upcoming)
    }
}
