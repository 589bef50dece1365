// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Form bodies posted to the API.

use serde::Serialize;
use validator::Validate;

/// Longest chat message or comment the server accepts.
pub const MAX_MESSAGE_LENGTH: u64 = 512;

#[derive(Debug, Clone, Serialize)]
pub struct LoginForm<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivityForm {
    pub participant_group_id: u64,
    pub activity_id: u64,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct ChatMessageForm {
    pub participant_group_id: u64,
    #[validate(length(min = 1, max = 512, message = "Chat messages must be 1-512 characters"))]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct CommentForm {
    pub participant_group_id: u64,
    pub target_id: u64,
    #[validate(length(min = 1, max = 512, message = "Comments must be 1-512 characters"))]
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LikeForm {
    pub participant_group_id: u64,
    pub target_id: u64,
}
