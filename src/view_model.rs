// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session view model: the committed snapshot, its cached derived views, and
//! the transient UI state layered on top.
//!
//! The snapshot only changes by replacement or by merging a fully decoded
//! patch, and the derived views are recomputed after every such change.
//! Transient state is limited to the tentative "liked" overlay, the
//! countdown counters, the inline error message, and the request sequence
//! used to drop stale responses.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::models::{Activity, ChatMessage, GroupActivityEntry, SnapshotPatch, ViewModelSnapshot};
use crate::services::ticker::Countdown;
use crate::views::{self, DerivedViews, ViewOptions};

/// View model shared between a session's actions and its ticker.
pub type SharedViewModel = Arc<RwLock<ViewModel>>;

#[derive(Debug, Clone)]
pub struct ViewModel {
    snapshot: ViewModelSnapshot,
    options: ViewOptions,
    derived: DerivedViews,
    /// Likes sent but not yet confirmed
    pending_likes: HashSet<u64>,
    error_message: Option<String>,
    last_performed_activity: Option<Activity>,
    /// Last sequence number handed to a request
    issued_seq: u64,
    /// Sequence number of the newest response applied
    applied_seq: u64,
    refreshed_at: DateTime<Utc>,
}

impl ViewModel {
    pub fn new(snapshot: ViewModelSnapshot, options: ViewOptions) -> Self {
        let derived = DerivedViews::compute(&snapshot, &options);
        Self {
            snapshot,
            options,
            derived,
            pending_likes: HashSet::new(),
            error_message: None,
            last_performed_activity: None,
            issued_seq: 0,
            applied_seq: 0,
            refreshed_at: Utc::now(),
        }
    }

    pub fn shared(self) -> SharedViewModel {
        Arc::new(RwLock::new(self))
    }

    pub fn snapshot(&self) -> &ViewModelSnapshot {
        &self.snapshot
    }

    pub fn participant_group_id(&self) -> u64 {
        self.snapshot.participant_group_id
    }

    /// When the snapshot was last replaced or merged.
    pub fn refreshed_at(&self) -> DateTime<Utc> {
        self.refreshed_at
    }

    // ─── State replacement ───────────────────────────────────────

    /// Replace the whole snapshot.
    pub fn replace(&mut self, snapshot: ViewModelSnapshot) {
        self.snapshot = snapshot;
        self.recompute();
    }

    /// Merge a decoded partial snapshot.
    pub fn merge(&mut self, patch: SnapshotPatch) {
        self.snapshot.apply(patch);
        self.recompute();
    }

    fn recompute(&mut self) {
        self.derived = DerivedViews::compute(&self.snapshot, &self.options);
        self.refreshed_at = Utc::now();
    }

    // ─── Request sequencing ──────────────────────────────────────

    /// Hand out the sequence number for a new snapshot-bearing request.
    pub fn begin_request(&mut self) -> u64 {
        self.issued_seq += 1;
        self.issued_seq
    }

    /// Whether a response to request `seq` is newer than anything applied.
    pub fn accepts(&self, seq: u64) -> bool {
        seq > self.applied_seq
    }

    pub fn mark_applied(&mut self, seq: u64) {
        self.applied_seq = self.applied_seq.max(seq);
    }

    // ─── Activity views ──────────────────────────────────────────

    pub fn activities(&self) -> &[Activity] {
        &self.snapshot.activities
    }

    pub fn activity(&self, pk: u64) -> Option<&Activity> {
        self.snapshot.activities.iter().find(|a| a.pk == pk)
    }

    pub fn available_activities(&self) -> Vec<&Activity> {
        self.pick_activities(&self.derived.available)
    }

    pub fn locked_challenges(&self) -> Vec<&Activity> {
        self.pick_activities(&self.derived.locked)
    }

    pub fn unlocked_challenges(&self) -> Vec<&Activity> {
        self.pick_activities(&self.derived.unlocked)
    }

    pub fn has_available_activities(&self) -> bool {
        !self.derived.available.is_empty()
    }

    pub fn activities_at_level(&self, level: u32) -> Vec<&Activity> {
        views::activities_at_level(&self.snapshot.activities, level)
    }

    fn pick_activities(&self, positions: &[usize]) -> Vec<&Activity> {
        positions
            .iter()
            .filter_map(|&i| self.snapshot.activities.get(i))
            .collect()
    }

    // ─── Group activity views ────────────────────────────────────

    pub fn group_activity(&self) -> &[GroupActivityEntry] {
        &self.snapshot.group_activity
    }

    pub fn entry(&self, pk: u64) -> Option<&GroupActivityEntry> {
        self.snapshot.group_activity.iter().find(|e| e.pk == pk)
    }

    pub fn has_group_activity(&self) -> bool {
        !self.snapshot.group_activity.is_empty()
    }

    pub fn chat_messages(&self) -> Vec<ChatMessage<'_>> {
        self.pick_entries(&self.derived.chat)
            .into_iter()
            .filter_map(GroupActivityEntry::as_chat_message)
            .collect()
    }

    pub fn has_chat_messages(&self) -> bool {
        !self.derived.chat.is_empty()
    }

    pub fn team_activity(&self) -> Vec<&GroupActivityEntry> {
        self.pick_entries(&self.derived.team)
    }

    pub fn sidebar_group_activities(&self) -> Vec<&GroupActivityEntry> {
        self.pick_entries(&self.derived.sidebar)
    }

    fn pick_entries(&self, positions: &[usize]) -> Vec<&GroupActivityEntry> {
        positions
            .iter()
            .filter_map(|&i| self.snapshot.group_activity.get(i))
            .collect()
    }

    // ─── Likes ───────────────────────────────────────────────────

    /// Liked as far as the UI is concerned: committed or tentatively.
    pub fn is_liked(&self, pk: u64) -> bool {
        self.pending_likes.contains(&pk) || self.entry(pk).is_some_and(|e| e.liked)
    }

    pub fn is_like_pending(&self, pk: u64) -> bool {
        self.pending_likes.contains(&pk)
    }

    /// Add the tentative overlay. Returns `false` if the target already
    /// counts as liked.
    pub fn mark_liked_tentative(&mut self, pk: u64) -> bool {
        if self.is_liked(pk) {
            return false;
        }
        self.pending_likes.insert(pk)
    }

    /// Server confirmed the like: fold the overlay into the committed entry.
    pub fn confirm_like(&mut self, pk: u64) {
        self.pending_likes.remove(&pk);
        if let Some(entry) = self
            .snapshot
            .group_activity
            .iter_mut()
            .find(|e| e.pk == pk)
        {
            entry.liked = true;
        }
    }

    /// Like failed: drop the overlay, committed state is untouched.
    pub fn rollback_like(&mut self, pk: u64) {
        self.pending_likes.remove(&pk);
    }

    // ─── Transient UI state ──────────────────────────────────────

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn set_error_message(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
    }

    pub fn clear_error_message(&mut self) {
        self.error_message = None;
    }

    pub fn last_performed_activity(&self) -> Option<&Activity> {
        self.last_performed_activity.as_ref()
    }

    pub fn set_last_performed_activity(&mut self, activity: Activity) {
        self.last_performed_activity = Some(activity);
    }

    pub fn countdown(&self) -> Countdown {
        Countdown::new(self.snapshot.hours_left, self.snapshot.minutes_left)
    }

    /// Advance the countdown one minute. Touches only the two counters.
    pub fn tick(&mut self) -> Countdown {
        let mut countdown = self.countdown();
        countdown.tick();
        self.snapshot.hours_left = countdown.hours_left;
        self.snapshot.minutes_left = countdown.minutes_left;
        countdown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActivityStatus;

    fn view_model() -> ViewModel {
        let mut liked = GroupActivityEntry::new(11, "activity_performed").owned_by(7);
        liked.liked = true;
        let snapshot = ViewModelSnapshot::new(
            42,
            vec![
                Activity::new(1, "recycle", ActivityStatus::Available),
                Activity::new(2, "carpool", ActivityStatus::Locked),
            ],
            vec![
                GroupActivityEntry::new(10, "chat_message"),
                liked,
                GroupActivityEntry::new(12, "activity_performed").owned_by(7),
            ],
        );
        ViewModel::new(snapshot, ViewOptions::default())
    }

    #[test]
    fn test_views_recomputed_after_replace() {
        let mut vm = view_model();
        assert!(vm.has_available_activities());
        assert_eq!(vm.chat_messages().len(), 1);

        vm.replace(ViewModelSnapshot::new(42, Vec::new(), Vec::new()));

        assert!(!vm.has_available_activities());
        assert!(vm.available_activities().is_empty());
        assert!(vm.chat_messages().is_empty());
        assert!(!vm.has_group_activity());
    }

    #[test]
    fn test_merge_only_touches_patched_fields() {
        let mut vm = view_model();
        let patch = SnapshotPatch {
            group_activity: Some(vec![GroupActivityEntry::new(20, "chat_message")]),
            ..SnapshotPatch::default()
        };

        vm.merge(patch);

        assert_eq!(vm.activities().len(), 2);
        assert_eq!(vm.team_activity().len(), 0);
        assert_eq!(vm.chat_messages()[0].pk(), 20);
    }

    #[test]
    fn test_refreshed_at_moves_forward() {
        let mut vm = view_model();
        let created = vm.refreshed_at();

        vm.replace(ViewModelSnapshot::new(42, Vec::new(), Vec::new()));
        let replaced = vm.refreshed_at();
        assert!(replaced >= created);

        vm.merge(SnapshotPatch {
            hours_left: Some(3),
            ..SnapshotPatch::default()
        });
        assert!(vm.refreshed_at() >= replaced);
    }

    #[test]
    fn test_tick_does_not_touch_refreshed_at() {
        let mut vm = view_model();
        let before = vm.refreshed_at();
        vm.tick();
        assert_eq!(vm.refreshed_at(), before);
    }

    #[test]
    fn test_like_overlay_confirm() {
        let mut vm = view_model();
        assert!(vm.mark_liked_tentative(12));
        assert!(vm.is_liked(12));
        assert!(!vm.entry(12).unwrap().liked);
        assert!(!vm.mark_liked_tentative(12));

        vm.confirm_like(12);
        assert!(!vm.is_like_pending(12));
        assert!(vm.entry(12).unwrap().liked);
    }

    #[test]
    fn test_like_overlay_rollback() {
        let mut vm = view_model();
        vm.mark_liked_tentative(12);
        vm.rollback_like(12);
        assert!(!vm.is_liked(12));
    }

    #[test]
    fn test_already_liked_entry_rejects_overlay() {
        let mut vm = view_model();
        assert!(!vm.mark_liked_tentative(11));
        assert!(!vm.is_like_pending(11));
    }

    #[test]
    fn test_sequence_numbers() {
        let mut vm = view_model();
        let first = vm.begin_request();
        let second = vm.begin_request();
        assert!(vm.accepts(first));

        vm.mark_applied(second);
        assert!(!vm.accepts(first));
        assert!(!vm.accepts(second));
    }

    #[test]
    fn test_tick_only_touches_counters() {
        let mut vm = view_model();
        let before = vm.snapshot().clone();

        let countdown = vm.tick();

        assert_eq!(countdown, Countdown::new(23, 59));
        assert_eq!(vm.snapshot().activities, before.activities);
        assert_eq!(vm.snapshot().group_activity, before.group_activity);
    }
}
