// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the view-model snapshot and API bodies.

pub mod activity;
pub mod forms;
pub mod group_activity;
pub mod score;
pub mod snapshot;

pub use activity::{Activity, ActivityStatus};
pub use group_activity::{ChatMessage, GroupActivityEntry};
pub use score::{GroupScore, GroupScoreResponse, GroupStanding};
pub use snapshot::{SnapshotPatch, ViewModelSnapshot};
