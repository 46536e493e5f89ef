// SPDX-License-Identifier: MPL-2.0
//! UI newtypes.
//!
//! Type-safe wrappers for detail-view tuning values, always kept within
//! their valid ranges so call sites never clamp by hand.

use std::time::Duration;

// =============================================================================
// Frame Interval Bounds
// =============================================================================

/// Placeholder animation frame interval bounds (10 ms to 1 s).
pub mod frame_interval_bounds {
    /// Minimum interval in milliseconds.
    pub const MIN_MS: u64 = 10;
    /// Maximum interval in milliseconds.
    pub const MAX_MS: u64 = 1000;
    /// Default interval in milliseconds.
    pub const DEFAULT_MS: u64 = 30;
}

// =============================================================================
// FrameInterval
// =============================================================================

/// Delay between two frames of the placeholder walk cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameInterval(u64);

impl FrameInterval {
    /// Creates a new interval, clamping to the valid range.
    #[must_use]
    pub fn from_millis(millis: u64) -> Self {
        Self(millis.clamp(
            frame_interval_bounds::MIN_MS,
            frame_interval_bounds::MAX_MS,
        ))
    }

    #[must_use]
    pub fn millis(self) -> u64 {
        self.0
    }

    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for FrameInterval {
    fn default() -> Self {
        Self(frame_interval_bounds::DEFAULT_MS)
    }
}

// =============================================================================
// Sidebar Fraction Bounds
// =============================================================================

/// Share of the allotted width given to the sidebar (5% to 60%).
pub mod sidebar_fraction_bounds {
    pub const MIN: f32 = 0.05;
    pub const MAX: f32 = 0.6;
    pub const DEFAULT: f32 = 0.2;
}

// =============================================================================
// SidebarFraction
// =============================================================================

/// Fraction of the total width claimed by the metadata sidebar before the
/// minimum-width floor is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SidebarFraction(f32);

impl SidebarFraction {
    /// Creates a new fraction, clamping to the valid range.
    ///
    /// NaN falls back to the default.
    #[must_use]
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self::default();
        }
        Self(value.clamp(sidebar_fraction_bounds::MIN, sidebar_fraction_bounds::MAX))
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }
}

impl Default for SidebarFraction {
    fn default() -> Self {
        Self(sidebar_fraction_bounds::DEFAULT)
    }
}
