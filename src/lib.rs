// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Lighter Footprints participant client.
//!
//! This crate holds one participant's view of a Lighter Footprints
//! experiment: it decodes the server-rendered view-model snapshot, keeps the
//! derived challenge and group-activity views current, dispatches user
//! actions to the HTTP API, and runs the remaining-time countdown.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod view_model;
pub mod views;

pub use config::Config;
pub use error::{ClientError, Result};
pub use services::{ActionOutcome, LighterprintsClient, Session};
pub use view_model::{SharedViewModel, ViewModel};
