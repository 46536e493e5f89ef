// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Detail layout**: sidebar partition and image margin
//! - **Placeholder**: walk-cycle sprite geometry and timing
//! - **Server**: URLs of the blob server
//! - **Frame**: blob frame preview limits

// ==========================================================================
// Detail Layout Defaults
// ==========================================================================

/// Sidebar never gets narrower than this, whatever the window width.
pub const DEFAULT_SIDEBAR_MIN_WIDTH: f32 = 300.0;

/// Share of the total width given to the sidebar above the floor.
pub const DEFAULT_SIDEBAR_FRACTION: f32 = 0.2;

/// Margin kept around the image inside the main area.
pub const DEFAULT_IMAGE_MARGIN: f32 = 20.0;

/// Upper bound for the image margin; anything larger leaves no room for the image.
pub const MAX_IMAGE_MARGIN: f32 = 200.0;

// ==========================================================================
// Placeholder Defaults
// ==========================================================================

/// Width of one walk-cycle frame.
pub const DEFAULT_SPRITE_WIDTH: u32 = 88;

/// Height of one walk-cycle frame.
pub const DEFAULT_SPRITE_HEIGHT: u32 = 62;

/// Frames per sheet row.
pub const DEFAULT_SHEET_COLUMNS: u32 = 8;

/// Rows in the sheet.
pub const DEFAULT_SHEET_ROWS: u32 = 3;

/// Delay between two frames, in milliseconds.
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 30;

/// Duration of the image fade-in once it has loaded, in milliseconds.
pub const DEFAULT_CROSSFADE_MS: u64 = 250;

// ==========================================================================
// Server Defaults
// ==========================================================================

pub const DEFAULT_BASE_URL: &str = "http://localhost:3179/ui/";

pub const DEFAULT_SEARCH_URL: &str = "http://localhost:3179/ui/";

pub const DEFAULT_LEGACY_URL: &str = "http://localhost:3179/ui/old/";

/// Version tag appended to thumbnail URLs so server-side changes bust caches.
pub const DEFAULT_THUMBNAIL_VERSION: u32 = 2;

// ==========================================================================
// Frame Defaults
// ==========================================================================

/// Bytes of raw blob content shown in the frame preview.
pub const DEFAULT_PREVIEW_BYTES: usize = 4096;

pub const MAX_PREVIEW_BYTES: usize = 1024 * 1024;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(DEFAULT_SIDEBAR_MIN_WIDTH > 0.0);
    assert!(DEFAULT_SIDEBAR_FRACTION > 0.0 && DEFAULT_SIDEBAR_FRACTION < 1.0);
    assert!(DEFAULT_IMAGE_MARGIN >= 0.0);
    assert!(DEFAULT_IMAGE_MARGIN <= MAX_IMAGE_MARGIN);

    assert!(DEFAULT_SPRITE_WIDTH > 0);
    assert!(DEFAULT_SPRITE_HEIGHT > 0);
    assert!(DEFAULT_SHEET_COLUMNS > 0);
    assert!(DEFAULT_SHEET_ROWS > 0);
    assert!(DEFAULT_CROSSFADE_MS > 0);

    assert!(DEFAULT_PREVIEW_BYTES > 0);
    assert!(DEFAULT_PREVIEW_BYTES <= MAX_PREVIEW_BYTES);
};
