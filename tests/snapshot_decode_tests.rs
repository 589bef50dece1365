// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Snapshot decoding and derived view tests over realistic payloads.

use lighterprints_client::models::{ActivityStatus, SnapshotPatch, ViewModelSnapshot};
use lighterprints_client::views::ViewOptions;
use lighterprints_client::{ClientError, ViewModel};
use serde_json::json;

mod common;

fn decoded() -> ViewModel {
    let snapshot = ViewModelSnapshot::from_value(common::sample_view_model()).unwrap();
    ViewModel::new(snapshot, ViewOptions::default())
}

#[test]
fn test_decode_sample_view_model() {
    let snapshot = ViewModelSnapshot::from_value(common::sample_view_model()).unwrap();

    assert_eq!(snapshot.participant_group_id, 42);
    assert_eq!(snapshot.hours_left, 5);
    assert_eq!(snapshot.minutes_left, 9);
    assert!(!snapshot.has_leaderboard);
    assert_eq!(snapshot.group_name.as_deref(), Some("Green Team"));
    assert_eq!(snapshot.activities[3].level, 2);
    assert_eq!(snapshot.activities[2].status, ActivityStatus::Completed);
    assert_eq!(snapshot.group_activity.len(), 5);
}

#[test]
fn test_decode_string_encoded_view_model() {
    let encoded = common::sample_view_model().to_string();
    let snapshot = ViewModelSnapshot::from_value(json!(encoded)).unwrap();

    assert_eq!(snapshot.activities.len(), 4);
    assert_eq!(snapshot.minutes_left, 9);
}

#[test]
fn test_missing_activities_is_decode_error() {
    let mut payload = common::sample_view_model();
    payload.as_object_mut().unwrap().remove("activities");

    let result = ViewModelSnapshot::from_value(payload);

    assert!(matches!(result, Err(ClientError::Decode(_))));
}

#[test]
fn test_unknown_status_is_decode_error() {
    let mut payload = common::sample_view_model();
    payload["activities"][0]["status"] = json!("paused");

    assert!(matches!(
        ViewModelSnapshot::from_value(payload),
        Err(ClientError::Decode(_))
    ));
}

#[test]
fn test_failed_patch_leaves_view_model_untouched() {
    let vm = decoded();
    let before = vm.snapshot().clone();

    let patch = SnapshotPatch::from_value(json!({ "groupActivity": [{ "pk": "x" }] }));
    assert!(matches!(patch, Err(ClientError::Decode(_))));

    // Nothing was merged, so the derived views still match the old snapshot
    assert_eq!(vm.snapshot(), &before);
    assert_eq!(vm.chat_messages().len(), 1);
}

#[test]
fn test_derived_views_of_sample() {
    let vm = decoded();

    let ids = |list: Vec<&lighterprints_client::models::Activity>| -> Vec<u64> {
        list.iter().map(|a| a.pk).collect()
    };
    assert_eq!(ids(vm.available_activities()), vec![1, 4]);
    assert_eq!(ids(vm.locked_challenges()), vec![2]);
    assert_eq!(ids(vm.unlocked_challenges()), vec![1, 3, 4]);
    assert_eq!(ids(vm.activities_at_level(2)), vec![4]);

    let chat: Vec<u64> = vm.chat_messages().iter().map(|m| m.pk()).collect();
    assert_eq!(chat, vec![10]);
    assert_eq!(vm.chat_messages()[0].body(), "hello team");

    let team: Vec<u64> = vm.team_activity().iter().map(|e| e.pk).collect();
    assert_eq!(team, vec![11, 12, 13, 14]);

    // Own comment 12 is shown inline, not in the sidebar
    let sidebar: Vec<u64> = vm.sidebar_group_activities().iter().map(|e| e.pk).collect();
    assert_eq!(sidebar, vec![10, 11, 13, 14]);
}

#[test]
fn test_sidebar_limit_follows_leaderboard_flag() {
    let entries: Vec<_> = (100..120)
        .map(|pk| json!({ "pk": pk, "parameter_name": "activity_performed", "participant_group_id": 7 }))
        .collect();

    let mut payload = common::sample_view_model();
    payload["groupActivity"] = json!(entries);
    let vm = ViewModel::new(
        ViewModelSnapshot::from_value(payload.clone()).unwrap(),
        ViewOptions::default(),
    );
    assert_eq!(vm.sidebar_group_activities().len(), 12);

    payload["hasLeaderboard"] = json!(true);
    let vm = ViewModel::new(
        ViewModelSnapshot::from_value(payload).unwrap(),
        ViewOptions::default(),
    );
    let sidebar: Vec<u64> = vm.sidebar_group_activities().iter().map(|e| e.pk).collect();
    assert_eq!(sidebar, (100..106).collect::<Vec<u64>>());
}

#[test]
fn test_patch_merge_recomputes_views() {
    let mut vm = decoded();
    let patch = SnapshotPatch::from_value(json!({
        "activities": [
            { "pk": 1, "name": "recycle-paper", "status": "completed" },
            { "pk": 2, "name": "bike-to-work", "status": "available" }
        ],
        "minutesLeft": "07"
    }))
    .unwrap();

    vm.merge(patch);

    let available: Vec<u64> = vm.available_activities().iter().map(|a| a.pk).collect();
    assert_eq!(available, vec![2]);
    assert!(vm.locked_challenges().is_empty());
    assert_eq!(vm.countdown().minutes_left, 7);
    assert_eq!(vm.countdown().hours_left, 5);
    assert_eq!(vm.group_activity().len(), 5);
}
