// SPDX-License-Identifier: MPL-2.0
//! Walk-cycle animation shown while the image loads.

use crate::domain::ui::FrameInterval;
use std::time::{Duration, Instant};

/// Spinner rotation in radians per frame, used when no sprite sheet is set.
const SPINNER_SPEED: f32 = 0.1;

#[derive(Debug, Clone)]
pub struct PlaceholderAnimation {
    frame: usize,
    frame_count: usize,
    interval: FrameInterval,
    last_advance: Option<Instant>,
    mirrored: bool,
    spinner_rotation: f32,
}

impl PlaceholderAnimation {
    #[must_use]
    pub fn new(frame_count: usize, interval: FrameInterval) -> Self {
        Self {
            frame: 0,
            frame_count: frame_count.max(1),
            interval,
            last_advance: None,
            mirrored: false,
            spinner_rotation: 0.0,
        }
    }

    /// Restarts the cycle, facing backward when `mirrored` is set.
    pub fn reset(&mut self, mirrored: bool) {
        self.frame = 0;
        self.last_advance = None;
        self.mirrored = mirrored;
        self.spinner_rotation = 0.0;
    }

    /// Turns the walker around without restarting the cycle.
    pub fn set_mirrored(&mut self, mirrored: bool) {
        self.mirrored = mirrored;
    }

    /// Advances by as many whole intervals as elapsed since the last step.
    pub fn tick(&mut self, now: Instant) {
        let Some(last) = self.last_advance else {
            self.last_advance = Some(now);
            return;
        };

        let interval_ms = u128::from(self.interval.millis());
        let elapsed_ms = now.saturating_duration_since(last).as_millis();
        let steps = elapsed_ms / interval_ms;
        if steps == 0 {
            return;
        }

        self.frame = ((self.frame as u128 + steps) % self.frame_count as u128) as usize;
        // Bounded by the elapsed time, which already fit in a Duration.
        let consumed = Duration::from_millis((steps * interval_ms) as u64);
        self.last_advance = Some(last + consumed);

        let direction = if self.mirrored { -1.0 } else { 1.0 };
        let turns = (steps % 1000) as f32;
        self.spinner_rotation = (self.spinner_rotation + direction * SPINNER_SPEED * turns)
            .rem_euclid(std::f32::consts::TAU);
    }

    #[must_use]
    pub fn frame(&self) -> usize {
        self.frame
    }

    #[must_use]
    pub fn is_mirrored(&self) -> bool {
        self.mirrored
    }

    #[must_use]
    pub fn spinner_rotation(&self) -> f32 {
        self.spinner_rotation
    }
}
