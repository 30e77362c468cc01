// chat_transcript — A terminal chat transcript view
// Copyright (C) 2025  Simon Peter Rothgang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Debounced auto-scroll.
//!
//! While a response streams in, every re-render asks to bring the footer
//! sentinel into view. Scrolling on each of those requests makes the
//! viewport jitter, so requests are coalesced: each one replaces the pending
//! request and pushes its deadline out by the quiet period. The event loop
//! polls the deadline; only the last request in a quiet window fires.
//!
//! Time is passed in rather than read, so the debounce is deterministic
//! under test.

use std::time::{Duration, Instant};

/// What a fired request scrolls to. Resolved against the latest layout at
/// fire time, not at request time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollTarget {
    FooterSentinel,
}

/// A scheduled scroll that has not fired yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingScroll<T> {
    pub deadline: Instant,
    pub target: T,
}

/// Holds at most one [`PendingScroll`]. The handle lives here for the whole
/// lifetime of the view; every request cancels and replaces it in one step.
#[derive(Debug)]
pub struct AutoScrollScheduler<T = ScrollTarget> {
    quiet_period: Duration,
    pending: Option<PendingScroll<T>>,
}

impl<T> AutoScrollScheduler<T> {
    #[must_use]
    pub fn new(quiet_period: Duration) -> Self {
        Self { quiet_period, pending: None }
    }

    #[must_use]
    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Arm a scroll for `target` one quiet period from `now`.
    /// Returns the request it cancelled, if any.
    pub fn request(&mut self, target: T, now: Instant) -> Option<PendingScroll<T>> {
        let deadline = now.checked_add(self.quiet_period).unwrap_or(now);
        self.pending.replace(PendingScroll { deadline, target })
    }

    /// Drop the pending request without firing it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.target)
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the pending target once its quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        if self.pending.as_ref().is_some_and(|p| p.deadline <= now) {
            return self.pending.take().map(|p| p.target);
        }
        None
    }
}

/// Viewport scroll position with per-frame easing toward a target.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollState {
    /// Rendered offset in rows (rounded from `pos`).
    pub offset: usize,
    /// Offset requested by the user or by auto-scroll.
    pub target: usize,
    /// Fractional position used for the smooth animation.
    pub pos: f32,
    max: usize,
    viewport: usize,
}

impl ScrollState {
    /// Record the latest content/viewport geometry and clamp to it.
    pub fn set_bounds(&mut self, content_height: usize, viewport_height: usize) {
        self.viewport = viewport_height;
        self.max = content_height.saturating_sub(viewport_height);
        self.target = self.target.min(self.max);
    }

    #[must_use]
    pub fn max(&self) -> usize {
        self.max
    }

    /// Place `row` at the vertical middle of the viewport.
    pub fn center_on(&mut self, row: usize) {
        self.target = row.saturating_sub(self.viewport / 2).min(self.max);
    }

    pub fn scroll_up(&mut self, rows: usize) {
        self.target = self.target.saturating_sub(rows);
    }

    pub fn scroll_down(&mut self, rows: usize) {
        self.target = self.target.saturating_add(rows).min(self.max);
    }

    /// Advance the animation one frame: half the remaining distance, snapping
    /// once close enough.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss, clippy::cast_sign_loss)]
    pub fn step(&mut self) {
        let target = self.target as f32;
        let delta = target - self.pos;
        if delta.abs() < 0.01 {
            self.pos = target;
        } else {
            self.pos += delta * 0.5;
        }
        self.offset = (self.pos.round() as usize).min(self.max);
    }
}
