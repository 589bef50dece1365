// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Derived views over a view-model snapshot.
//!
//! Every view is a stable filter of the snapshot's `activities` or
//! `group_activity` list: source order is preserved and nothing is re-sorted.
//! The free functions compute a view directly; [`DerivedViews`] caches the
//! positions of every view so a [`crate::ViewModel`] can recompute them once
//! per state replacement.

use crate::models::{Activity, ActivityStatus, GroupActivityEntry, ViewModelSnapshot};

/// Suffix added to the status class of activities that cannot be performed.
pub const DISABLED_CSS_SUFFIX: &str = " disabled";

/// Sidebar truncation limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    /// Entries shown in the sidebar without a leaderboard
    pub sidebar_limit: usize,
    /// Entries shown in the sidebar when the leaderboard takes up room
    pub leaderboard_sidebar_limit: usize,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            sidebar_limit: 12,
            leaderboard_sidebar_limit: 6,
        }
    }
}

impl ViewOptions {
    pub fn sidebar_limit_for(&self, has_leaderboard: bool) -> usize {
        if has_leaderboard {
            self.leaderboard_sidebar_limit
        } else {
            self.sidebar_limit
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Activity views
// ─────────────────────────────────────────────────────────────────────────────

pub fn available_activities(activities: &[Activity]) -> Vec<&Activity> {
    activities.iter().filter(|a| a.is_available()).collect()
}

pub fn locked_challenges(activities: &[Activity]) -> Vec<&Activity> {
    activities.iter().filter(|a| a.is_locked()).collect()
}

pub fn unlocked_challenges(activities: &[Activity]) -> Vec<&Activity> {
    activities.iter().filter(|a| !a.is_locked()).collect()
}

pub fn has_available_activities(activities: &[Activity]) -> bool {
    activities.iter().any(Activity::is_available)
}

/// Activities in one unlock level (mobile level tabs).
pub fn activities_at_level(activities: &[Activity], level: u32) -> Vec<&Activity> {
    activities.iter().filter(|a| a.level == level).collect()
}

/// CSS class list for an activity: its status, plus `disabled` unless it is
/// the one interactive status.
pub fn activity_status_css(activity: &Activity) -> String {
    let mut css = activity.status.as_str().to_string();
    if is_activity_disabled(activity) {
        css.push_str(DISABLED_CSS_SUFFIX);
    }
    css
}

pub fn is_activity_disabled(activity: &Activity) -> bool {
    !activity.status.is_interactive()
}

// ─────────────────────────────────────────────────────────────────────────────
// Group activity views
// ─────────────────────────────────────────────────────────────────────────────

pub fn chat_messages(entries: &[GroupActivityEntry]) -> Vec<&GroupActivityEntry> {
    entries.iter().filter(|e| e.is_chat_message()).collect()
}

/// "My group" feed: everything except chat.
pub fn team_activity(entries: &[GroupActivityEntry]) -> Vec<&GroupActivityEntry> {
    entries.iter().filter(|e| !e.is_chat_message()).collect()
}

/// Sidebar feed: the viewer's own comments are shown inline instead, so
/// they are dropped here, then the list is truncated.
pub fn sidebar_group_activities(
    entries: &[GroupActivityEntry],
    viewer_group_id: u64,
    limit: usize,
) -> Vec<&GroupActivityEntry> {
    entries
        .iter()
        .filter(|e| shown_in_sidebar(e, viewer_group_id))
        .take(limit)
        .collect()
}

fn shown_in_sidebar(entry: &GroupActivityEntry, viewer_group_id: u64) -> bool {
    !(entry.is_comment() && entry.participant_group_id == Some(viewer_group_id))
}

/// Template name used to render a feed entry.
pub fn group_activity_template(entry: &GroupActivityEntry) -> &str {
    &entry.parameter_name
}

// ─────────────────────────────────────────────────────────────────────────────
// Cached positions
// ─────────────────────────────────────────────────────────────────────────────

/// Positions of every derived view within the snapshot it was computed from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivedViews {
    pub available: Vec<usize>,
    pub locked: Vec<usize>,
    pub unlocked: Vec<usize>,
    pub chat: Vec<usize>,
    pub team: Vec<usize>,
    pub sidebar: Vec<usize>,
}

impl DerivedViews {
    pub fn compute(snapshot: &ViewModelSnapshot, options: &ViewOptions) -> Self {
        let mut views = Self::default();

        for (i, activity) in snapshot.activities.iter().enumerate() {
            match activity.status {
                ActivityStatus::Locked => views.locked.push(i),
                ActivityStatus::Available => {
                    views.available.push(i);
                    views.unlocked.push(i);
                }
                _ => views.unlocked.push(i),
            }
        }

        let limit = options.sidebar_limit_for(snapshot.has_leaderboard);
        for (i, entry) in snapshot.group_activity.iter().enumerate() {
            if entry.is_chat_message() {
                views.chat.push(i);
            } else {
                views.team.push(i);
            }
            if views.sidebar.len() < limit && shown_in_sidebar(entry, snapshot.participant_group_id)
            {
                views.sidebar.push(i);
            }
        }

        views
    }
}
