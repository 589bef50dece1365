// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Remaining-time countdown.
//!
//! Purely a display timer: it wraps instead of stopping at zero and never
//! expires anything. The server decides when activities actually expire and
//! resets the counters with every snapshot.

use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};

use crate::view_model::SharedViewModel;

/// Default tick period (one wall-clock minute).
pub const TICK_PERIOD: Duration = Duration::from_secs(60);

/// Hours and minutes left in the current period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Countdown {
    pub hours_left: u32,
    pub minutes_left: u32,
}

impl Countdown {
    pub const fn new(hours_left: u32, minutes_left: u32) -> Self {
        Self {
            hours_left,
            minutes_left,
        }
    }

    /// Advance one minute, wrapping 00:00 to 23:59.
    pub fn tick(&mut self) {
        if self.minutes_left == 0 {
            self.minutes_left = 59;
            self.hours_left = if self.hours_left == 0 {
                23
            } else {
                self.hours_left - 1
            };
        } else {
            self.minutes_left -= 1;
        }
    }
}

/// Spawn the countdown task. The first tick fires one full `period` after
/// the call; abort the returned handle to stop it.
///
/// `period` must be non-zero; `Config` never hands out a zero period.
pub fn spawn_ticker(state: SharedViewModel, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = interval_at(Instant::now() + period, period);
        loop {
            interval.tick().await;
            let countdown = {
                let mut view_model = state.write().await;
                view_model.tick()
            };
            tracing::trace!(
                hours_left = countdown.hours_left,
                minutes_left = countdown.minutes_left,
                "Countdown tick"
            );
        }
    })
}
