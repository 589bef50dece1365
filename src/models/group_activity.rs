// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Group activity feed entries (chat, comments, likes, completed challenges).

use serde::{Deserialize, Serialize};

/// `parameter_name` prefix of chat messages.
pub const CHAT_MESSAGE_PREFIX: &str = "chat_message";

/// `parameter_name` prefix of comments.
pub const COMMENT_PREFIX: &str = "comment";

/// One item of a group's activity feed, in server order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupActivityEntry {
    /// Server-assigned data value ID (like and comment target)
    pub pk: u64,
    /// Feed item kind, classified by prefix
    pub parameter_name: String,
    /// Owning participant group relationship
    #[serde(default)]
    pub participant_group_id: Option<u64>,
    /// Whether the viewer has liked this entry
    #[serde(default)]
    pub liked: bool,
    /// Whether the viewer has commented on this entry
    #[serde(default)]
    pub commented: bool,
    #[serde(default)]
    pub date_created: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub participant_name: Option<String>,
    #[serde(default)]
    pub participant_number: Option<u32>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub points: Option<i64>,
    /// Entry a like or comment points at
    #[serde(default)]
    pub target_id: Option<u64>,
}

impl GroupActivityEntry {
    pub fn new(pk: u64, parameter_name: impl Into<String>) -> Self {
        Self {
            pk,
            parameter_name: parameter_name.into(),
            participant_group_id: None,
            liked: false,
            commented: false,
            date_created: None,
            value: None,
            message: None,
            participant_name: None,
            participant_number: None,
            display_name: None,
            points: None,
            target_id: None,
        }
    }

    pub fn owned_by(mut self, participant_group_id: u64) -> Self {
        self.participant_group_id = Some(participant_group_id);
        self
    }

    pub fn is_chat_message(&self) -> bool {
        self.parameter_name.starts_with(CHAT_MESSAGE_PREFIX)
    }

    pub fn is_comment(&self) -> bool {
        self.parameter_name.starts_with(COMMENT_PREFIX)
    }

    pub fn as_chat_message(&self) -> Option<ChatMessage<'_>> {
        self.is_chat_message().then_some(ChatMessage { entry: self })
    }
}

/// Borrowed view of a feed entry that is a chat message.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChatMessage<'a> {
    entry: &'a GroupActivityEntry,
}

impl<'a> ChatMessage<'a> {
    pub fn pk(&self) -> u64 {
        self.entry.pk
    }

    pub fn timestamp(&self) -> Option<&'a str> {
        self.entry.date_created.as_deref()
    }

    /// Message text; chat values arrive as `value`, older payloads use `message`.
    pub fn body(&self) -> &'a str {
        self.entry
            .value
            .as_deref()
            .or(self.entry.message.as_deref())
            .unwrap_or_default()
    }

    pub fn participant_number(&self) -> Option<u32> {
        self.entry.participant_number
    }

    pub fn entry(&self) -> &'a GroupActivityEntry {
        self.entry
    }
}
