// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Group score and leaderboard models.

use serde::{Deserialize, Serialize};

/// Score summary from the group-score endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupScore {
    pub total_points: f64,
    pub points_to_next_level: f64,
    pub average_points_per_person: f64,
}

/// Group-score endpoint response body.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupScoreResponse {
    #[serde(default)]
    pub scores: Vec<GroupScore>,
}

/// One row of the leaderboard carried in the view-model snapshot (`groupData`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupStanding {
    pub group_name: String,
    #[serde(default)]
    pub group_level: Option<u32>,
    #[serde(default)]
    pub group_size: Option<u32>,
    #[serde(default)]
    pub average_points: f64,
    #[serde(default)]
    pub total_points: f64,
    #[serde(default)]
    pub points_to_next_level: Option<f64>,
}
