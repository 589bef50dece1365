// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Participant session: the context object every user action runs against.
//!
//! Each action follows the same shape:
//! 1. Check client-side guards under the lock (no network on failure)
//! 2. Release the lock and send the request
//! 3. Re-take the lock, decode the response, and merge it if no newer
//!    response has been applied in the meantime
//!
//! Failures never touch committed state; they only set the view model's
//! `error_message`. The tentative "liked" overlay is the one piece of state
//! written before the server answers.

use tokio::sync::RwLockReadGuard;
use validator::Validate;

use crate::config::Config;
use crate::error::{ClientError, Result};
use crate::models::forms::{ChatMessageForm, CommentForm};
use crate::models::{GroupScore, SnapshotPatch};
use crate::services::api::{ActionResponse, LighterprintsClient};
use crate::view_model::{SharedViewModel, ViewModel};
use crate::views::ViewOptions;

use serde_json::Value;

/// What an action did to the view model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Response applied (possibly with nothing to merge)
    Applied,
    /// Nothing to do; no request was sent
    Skipped,
    /// Response arrived after a newer one and was dropped
    Stale,
}

/// One participant's session.
#[derive(Clone)]
pub struct Session {
    client: LighterprintsClient,
    participant_group_id: u64,
    state: SharedViewModel,
}

impl Session {
    /// Log in with the configured credentials and load the view model.
    pub async fn login(config: &Config) -> Result<Self> {
        let email = config
            .email
            .as_deref()
            .ok_or_else(|| ClientError::Config("LIGHTERPRINTS_EMAIL is not set".to_string()))?;
        let password = config.password.as_deref().ok_or_else(|| {
            ClientError::Config("LIGHTERPRINTS_PASSWORD is not set".to_string())
        })?;

        let client = LighterprintsClient::new(config)?;
        let participant_group_id = client.login(email, password).await?;
        Self::connect(client, participant_group_id, config.view_options).await
    }

    /// Load the view model for an already authenticated participant.
    pub async fn connect(
        client: LighterprintsClient,
        participant_group_id: u64,
        options: ViewOptions,
    ) -> Result<Self> {
        let snapshot = client.fetch_view_model(participant_group_id).await?;
        tracing::info!(
            participant_group_id,
            activities = snapshot.activities.len(),
            group_activity = snapshot.group_activity.len(),
            "View model loaded"
        );
        Ok(Self::from_view_model(
            client,
            ViewModel::new(snapshot, options),
        ))
    }

    /// Bind to a view model that was already decoded (e.g. embedded in the
    /// participate page).
    pub fn from_view_model(client: LighterprintsClient, view_model: ViewModel) -> Self {
        Self {
            client,
            participant_group_id: view_model.participant_group_id(),
            state: view_model.shared(),
        }
    }

    pub fn participant_group_id(&self) -> u64 {
        self.participant_group_id
    }

    pub fn client(&self) -> &LighterprintsClient {
        &self.client
    }

    /// Shared handle to the view model (for the ticker).
    pub fn state(&self) -> SharedViewModel {
        self.state.clone()
    }

    /// Read access to the current view model.
    pub async fn view(&self) -> RwLockReadGuard<'_, ViewModel> {
        self.state.read().await
    }

    /// Re-fetch the whole view model.
    pub async fn refresh(&self) -> Result<ActionOutcome> {
        let seq = self.state.write().await.begin_request();
        let result = self.client.fetch_view_model(self.participant_group_id).await;

        let mut vm = self.state.write().await;
        match result {
            Ok(snapshot) => {
                if !vm.accepts(seq) {
                    tracing::warn!(seq, "Discarding stale view model");
                    return Ok(ActionOutcome::Stale);
                }
                vm.replace(snapshot);
                vm.mark_applied(seq);
                vm.clear_error_message();
                Ok(ActionOutcome::Applied)
            }
            Err(err) => Err(fail(&mut vm, err)),
        }
    }

    /// Perform an activity. Activities that are not available right now are
    /// rejected without contacting the server.
    pub async fn perform_activity(&self, activity_id: u64) -> Result<ActionOutcome> {
        let (seq, activity) = {
            let mut vm = self.state.write().await;
            let activity = match vm.activity(activity_id) {
                Some(activity) if activity.is_available() && activity.is_available_now() => {
                    activity.clone()
                }
                _ => {
                    tracing::debug!(activity_id, "Activity not available right now");
                    return Err(ClientError::ActivityUnavailable(activity_id));
                }
            };
            (vm.begin_request(), activity)
        };

        tracing::info!(activity_id, "Performing activity");
        let result = self
            .client
            .perform_activity(self.participant_group_id, activity_id)
            .await
            .and_then(ActionResponse::into_view_model);

        let mut vm = self.state.write().await;
        let outcome = settle(&mut vm, seq, result)?;
        if outcome == ActionOutcome::Applied {
            vm.set_last_performed_activity(activity);
        }
        Ok(outcome)
    }

    /// Post a chat message to the group.
    pub async fn post_chat_message(&self, message: &str) -> Result<ActionOutcome> {
        let form = ChatMessageForm {
            participant_group_id: self.participant_group_id,
            message: message.trim().to_string(),
        };
        form.validate()?;

        let seq = self.state.write().await.begin_request();
        let result = self
            .client
            .post_chat_message(&form)
            .await
            .and_then(ActionResponse::into_view_model);

        settle(&mut *self.state.write().await, seq, result)
    }

    /// Comment on a group activity entry.
    pub async fn post_comment(&self, target_id: u64, message: &str) -> Result<ActionOutcome> {
        let form = CommentForm {
            participant_group_id: self.participant_group_id,
            target_id,
            message: message.trim().to_string(),
        };
        form.validate()?;

        let seq = {
            let mut vm = self.state.write().await;
            if vm.entry(target_id).is_none() {
                return Err(ClientError::NotFound(format!(
                    "group activity {}",
                    target_id
                )));
            }
            vm.begin_request()
        };

        let result = self
            .client
            .post_comment(&form)
            .await
            .and_then(ActionResponse::into_view_model);

        settle(&mut *self.state.write().await, seq, result)
    }

    /// Like a group activity entry.
    ///
    /// Marks the entry liked immediately; the mark is committed when the
    /// server confirms and rolled back if it does not. Liking an entry that
    /// already counts as liked sends nothing.
    ///
    /// The request and its reconciliation run on their own task, so dropping
    /// the returned future does not leave the tentative mark behind.
    pub async fn like(&self, target_id: u64) -> Result<ActionOutcome> {
        let seq = {
            let mut vm = self.state.write().await;
            if vm.entry(target_id).is_none() {
                return Err(ClientError::NotFound(format!(
                    "group activity {}",
                    target_id
                )));
            }
            if !vm.mark_liked_tentative(target_id) {
                tracing::debug!(target_id, "Already liked");
                return Ok(ActionOutcome::Skipped);
            }
            vm.begin_request()
        };

        let session = self.clone();
        tokio::spawn(async move { session.finish_like(seq, target_id).await })
            .await
            .map_err(|e| ClientError::Transport(format!("like task failed: {}", e)))?
    }

    async fn finish_like(&self, seq: u64, target_id: u64) -> Result<ActionOutcome> {
        let result = self
            .client
            .like(self.participant_group_id, target_id)
            .await
            .and_then(ActionResponse::into_view_model);

        let mut vm = self.state.write().await;
        match result {
            Ok(view_model) => {
                let outcome = settle(&mut vm, seq, Ok(view_model));
                vm.confirm_like(target_id);
                outcome
            }
            Err(err) => {
                vm.rollback_like(target_id);
                Err(fail(&mut vm, err))
            }
        }
    }

    /// Fetch the group's score summary.
    pub async fn group_score(&self) -> Result<Vec<GroupScore>> {
        self.client.group_score(self.participant_group_id).await
    }
}

/// Apply an action's result to the view model.
fn settle(vm: &mut ViewModel, seq: u64, result: Result<Option<Value>>) -> Result<ActionOutcome> {
    let view_model = match result {
        Ok(view_model) => view_model,
        Err(err) => return Err(fail(vm, err)),
    };

    let patch = match view_model.map(SnapshotPatch::from_value).transpose() {
        Ok(patch) => patch,
        Err(err) => return Err(fail(vm, err)),
    };

    if !vm.accepts(seq) {
        tracing::warn!(seq, "Discarding stale response");
        return Ok(ActionOutcome::Stale);
    }

    if let Some(patch) = patch {
        vm.merge(patch);
    }
    vm.mark_applied(seq);
    vm.clear_error_message();
    Ok(ActionOutcome::Applied)
}

/// Surface a failure in the view model and hand it back to the caller.
fn fail(vm: &mut ViewModel, err: ClientError) -> ClientError {
    tracing::warn!(error = %err, "Action failed");
    vm.set_error_message(err.display_message());
    err
}
