// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - HTTP client, session actions, and countdown.

pub mod api;
pub mod session;
pub mod ticker;

pub use api::{ActionResponse, LighterprintsClient};
pub use session::{ActionOutcome, Session};
pub use ticker::{spawn_ticker, Countdown};
