// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! View-model snapshot decoding.
//!
//! The server renders a participant's whole view as one JSON object. Full
//! snapshots arrive from the view-model endpoint and from most actions;
//! some actions (chat) only return the fields they changed, which decode
//! into a [`SnapshotPatch`]. Either may arrive as an object or as a
//! JSON-encoded string. Decoding always completes before anything is
//! applied, so a malformed response never leaves half-merged state.

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{ClientError, Result};
use crate::models::{Activity, GroupActivityEntry, GroupStanding};

/// Largest valid `hoursLeft`.
pub const MAX_HOURS_LEFT: u32 = 23;

/// Largest valid `minutesLeft`.
pub const MAX_MINUTES_LEFT: u32 = 59;

/// Complete server-rendered state of one participant's view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewModelSnapshot {
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub group_activity: Vec<GroupActivityEntry>,
    #[serde(default, deserialize_with = "counter")]
    pub hours_left: u32,
    #[serde(default, deserialize_with = "counter")]
    pub minutes_left: u32,
    #[serde(alias = "participant_group_id")]
    pub participant_group_id: u64,
    #[serde(default)]
    pub has_leaderboard: bool,

    // ─── Group summary ───────────────────────────────────────────
    #[serde(default)]
    pub group_name: Option<String>,
    #[serde(default)]
    pub group_level: Option<u32>,
    #[serde(default)]
    pub group_data: Vec<GroupStanding>,
    #[serde(default)]
    pub total_points: Option<f64>,
    #[serde(default)]
    pub average_points: Option<f64>,
    #[serde(default)]
    pub points_to_next_level: Option<f64>,
    #[serde(default)]
    pub completed: Option<bool>,

    // ─── Treatment flags ─────────────────────────────────────────
    #[serde(default)]
    pub linear_public_good: Option<bool>,
    #[serde(default)]
    pub has_scheduled_activities: Option<bool>,
    #[serde(default)]
    pub total_daily_earnings: Option<String>,
    #[serde(default)]
    pub total_earnings: Option<String>,

    // ─── Participant ─────────────────────────────────────────────
    #[serde(default)]
    pub first_visit: Option<bool>,
    #[serde(default)]
    pub quiz_completed: Option<bool>,
    #[serde(default)]
    pub survey_url: Option<String>,
}

impl ViewModelSnapshot {
    /// Snapshot with only the core fields set.
    pub fn new(
        participant_group_id: u64,
        activities: Vec<Activity>,
        group_activity: Vec<GroupActivityEntry>,
    ) -> Self {
        Self {
            activities,
            group_activity,
            hours_left: 0,
            minutes_left: 0,
            participant_group_id,
            has_leaderboard: false,
            group_name: None,
            group_level: None,
            group_data: Vec::new(),
            total_points: None,
            average_points: None,
            points_to_next_level: None,
            completed: None,
            linear_public_good: None,
            has_scheduled_activities: None,
            total_daily_earnings: None,
            total_earnings: None,
            first_visit: None,
            quiz_completed: None,
            survey_url: None,
        }
    }

    /// Decode a full snapshot from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Decode a full snapshot from an object or a JSON-encoded string.
    pub fn from_value(value: Value) -> Result<Self> {
        let snapshot: Self = serde_json::from_value(unwrap_encoded(value)?)?;
        check_counters(Some(snapshot.hours_left), Some(snapshot.minutes_left))?;
        Ok(snapshot)
    }

    /// Merge a decoded patch: every field the patch carries replaces the
    /// current value, everything else is kept.
    pub fn apply(&mut self, patch: SnapshotPatch) {
        macro_rules! replace {
            ($target:ident, $patch:ident; $($field:ident),* $(,)?) => {
                $(if let Some(value) = $patch.$field { $target.$field = value; })*
            };
        }
        macro_rules! replace_optional {
            ($target:ident, $patch:ident; $($field:ident),* $(,)?) => {
                $(if $patch.$field.is_some() { $target.$field = $patch.$field; })*
            };
        }

        let target = self;
        replace!(
            target, patch;
            activities,
            group_activity,
            hours_left,
            minutes_left,
            participant_group_id,
            has_leaderboard,
            group_data,
        );
        replace_optional!(
            target, patch;
            group_name,
            group_level,
            total_points,
            average_points,
            points_to_next_level,
            completed,
            linear_public_good,
            has_scheduled_activities,
            total_daily_earnings,
            total_earnings,
            first_visit,
            quiz_completed,
            survey_url,
        );
    }
}

/// Partial snapshot: only the fields a response carried.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotPatch {
    #[serde(default)]
    pub activities: Option<Vec<Activity>>,
    #[serde(default)]
    pub group_activity: Option<Vec<GroupActivityEntry>>,
    #[serde(default, deserialize_with = "optional_counter")]
    pub hours_left: Option<u32>,
    #[serde(default, deserialize_with = "optional_counter")]
    pub minutes_left: Option<u32>,
    #[serde(default, alias = "participant_group_id")]
    pub participant_group_id: Option<u64>,
    #[serde(default)]
    pub has_leaderboard: Option<bool>,
    #[serde(default)]
    pub group_name: Option<String>,
    #[serde(default)]
    pub group_level: Option<u32>,
    #[serde(default)]
    pub group_data: Option<Vec<GroupStanding>>,
    #[serde(default)]
    pub total_points: Option<f64>,
    #[serde(default)]
    pub average_points: Option<f64>,
    #[serde(default)]
    pub points_to_next_level: Option<f64>,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default)]
    pub linear_public_good: Option<bool>,
    #[serde(default)]
    pub has_scheduled_activities: Option<bool>,
    #[serde(default)]
    pub total_daily_earnings: Option<String>,
    #[serde(default)]
    pub total_earnings: Option<String>,
    #[serde(default)]
    pub first_visit: Option<bool>,
    #[serde(default)]
    pub quiz_completed: Option<bool>,
    #[serde(default)]
    pub survey_url: Option<String>,
}

impl SnapshotPatch {
    /// Decode a partial snapshot from an object or a JSON-encoded string.
    pub fn from_value(value: Value) -> Result<Self> {
        let patch: Self = serde_json::from_value(unwrap_encoded(value)?)?;
        check_counters(patch.hours_left, patch.minutes_left)?;
        Ok(patch)
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Servers double-encode the view model in some responses.
fn unwrap_encoded(value: Value) -> Result<Value> {
    match value {
        Value::String(text) => Ok(serde_json::from_str(&text)?),
        Value::Object(_) => Ok(value),
        other => Err(ClientError::Decode(format!(
            "expected view model object, got {other}"
        ))),
    }
}

fn check_counters(hours_left: Option<u32>, minutes_left: Option<u32>) -> Result<()> {
    if let Some(hours) = hours_left.filter(|h| *h > MAX_HOURS_LEFT) {
        return Err(ClientError::Decode(format!("hoursLeft out of range: {hours}")));
    }
    if let Some(minutes) = minutes_left.filter(|m| *m > MAX_MINUTES_LEFT) {
        return Err(ClientError::Decode(format!(
            "minutesLeft out of range: {minutes}"
        )));
    }
    Ok(())
}

/// Remaining-time counters arrive as numbers or zero-padded strings ("09").
#[derive(Deserialize)]
#[serde(untagged)]
enum CounterRepr {
    Number(u32),
    Text(String),
}

impl CounterRepr {
    fn into_value<E: de::Error>(self) -> std::result::Result<u32, E> {
        match self {
            CounterRepr::Number(n) => Ok(n),
            CounterRepr::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("invalid counter value {text:?}"))),
        }
    }
}

fn counter<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<u32, D::Error> {
    CounterRepr::deserialize(deserializer)?.into_value()
}

fn optional_counter<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<u32>, D::Error> {
    Option::<CounterRepr>::deserialize(deserializer)?
        .map(CounterRepr::into_value)
        .transpose()
}
