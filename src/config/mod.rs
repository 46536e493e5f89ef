// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, loaded from a
//! `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language
//! - `[detail]` - Sidebar partition, image margin, placeholder orientation
//! - `[placeholder]` - Walk-cycle sprite sheet and timing
//! - `[server]` - Blob server URLs
//! - `[frame]` - Blob frame preview limits
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. `--config-dir` CLI flag
//! 3. Set `BLOB_LENS_CONFIG_DIR` environment variable
//! 4. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use blob_lens::config::{self, Config};
//!
//! let (mut config, _warning) = config::load();
//! config.detail.backward_placeholder = Some(true);
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::domain::ui::{FrameInterval, SidebarFraction};
use crate::error::{Error, Result};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Detail view layout settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DetailConfig {
    #[serde(
        default = "default_sidebar_min_width",
        skip_serializing_if = "Option::is_none"
    )]
    pub sidebar_min_width: Option<f32>,

    #[serde(
        default = "default_sidebar_fraction",
        skip_serializing_if = "Option::is_none"
    )]
    pub sidebar_fraction: Option<f32>,

    #[serde(
        default = "default_image_margin",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_margin: Option<f32>,

    /// Mirror the placeholder walk cycle so it walks right-to-left.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backward_placeholder: Option<bool>,
}

impl Default for DetailConfig {
    fn default() -> Self {
        Self {
            sidebar_min_width: default_sidebar_min_width(),
            sidebar_fraction: default_sidebar_fraction(),
            image_margin: default_image_margin(),
            backward_placeholder: Some(false),
        }
    }
}

/// Loading placeholder settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaceholderConfig {
    #[serde(
        default = "default_frame_interval_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub frame_interval_ms: Option<u64>,

    /// Sprite sheet image. Without one, the bundled walk cycle is drawn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprite_sheet: Option<PathBuf>,

    #[serde(
        default = "default_sheet_columns",
        skip_serializing_if = "Option::is_none"
    )]
    pub sheet_columns: Option<u32>,

    #[serde(default = "default_sheet_rows", skip_serializing_if = "Option::is_none")]
    pub sheet_rows: Option<u32>,

    #[serde(
        default = "default_sprite_width",
        skip_serializing_if = "Option::is_none"
    )]
    pub sprite_width: Option<u32>,

    #[serde(
        default = "default_sprite_height",
        skip_serializing_if = "Option::is_none"
    )]
    pub sprite_height: Option<u32>,

    #[serde(default = "default_crossfade_ms", skip_serializing_if = "Option::is_none")]
    pub crossfade_ms: Option<u64>,
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: default_frame_interval_ms(),
            sprite_sheet: None,
            sheet_columns: default_sheet_columns(),
            sheet_rows: default_sheet_rows(),
            sprite_width: default_sprite_width(),
            sprite_height: default_sprite_height(),
            crossfade_ms: default_crossfade_ms(),
        }
    }
}

/// Blob server endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    /// Base URL for raw blob content and thumbnails.
    #[serde(default = "default_base_url", skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Target of the "back to search" link.
    #[serde(default = "default_search_url", skip_serializing_if = "Option::is_none")]
    pub search_url: Option<String>,

    /// Legacy (editable) interface; the reference is appended as `b=`.
    #[serde(default = "default_legacy_url", skip_serializing_if = "Option::is_none")]
    pub legacy_url: Option<String>,

    #[serde(
        default = "default_thumbnail_version",
        skip_serializing_if = "Option::is_none"
    )]
    pub thumbnail_version: Option<u32>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            search_url: default_search_url(),
            legacy_url: default_legacy_url(),
            thumbnail_version: default_thumbnail_version(),
        }
    }
}

/// Blob frame settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrameConfig {
    #[serde(
        default = "default_preview_bytes",
        skip_serializing_if = "Option::is_none"
    )]
    pub preview_bytes: Option<usize>,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            preview_bytes: default_preview_bytes(),
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub detail: DetailConfig,

    #[serde(default)]
    pub placeholder: PlaceholderConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub frame: FrameConfig,
}

impl Config {
    #[must_use]
    pub fn sidebar_min_width(&self) -> f32 {
        self.detail
            .sidebar_min_width
            .filter(|w| w.is_finite() && *w >= 0.0)
            .unwrap_or(DEFAULT_SIDEBAR_MIN_WIDTH)
    }

    #[must_use]
    pub fn sidebar_fraction(&self) -> SidebarFraction {
        SidebarFraction::new(
            self.detail
                .sidebar_fraction
                .unwrap_or(DEFAULT_SIDEBAR_FRACTION),
        )
    }

    #[must_use]
    pub fn image_margin(&self) -> f32 {
        self.detail
            .image_margin
            .filter(|m| m.is_finite())
            .unwrap_or(DEFAULT_IMAGE_MARGIN)
            .clamp(0.0, MAX_IMAGE_MARGIN)
    }

    #[must_use]
    pub fn backward_placeholder(&self) -> bool {
        self.detail.backward_placeholder.unwrap_or(false)
    }

    #[must_use]
    pub fn frame_interval(&self) -> FrameInterval {
        FrameInterval::from_millis(
            self.placeholder
                .frame_interval_ms
                .unwrap_or(DEFAULT_FRAME_INTERVAL_MS),
        )
    }

    #[must_use]
    pub fn crossfade_duration(&self) -> Duration {
        Duration::from_millis(
            self.placeholder
                .crossfade_ms
                .filter(|ms| *ms > 0)
                .unwrap_or(DEFAULT_CROSSFADE_MS),
        )
    }

    #[must_use]
    pub fn preview_bytes(&self) -> usize {
        self.frame
            .preview_bytes
            .unwrap_or(DEFAULT_PREVIEW_BYTES)
            .clamp(1, MAX_PREVIEW_BYTES)
    }

    #[must_use]
    pub fn thumbnail_version(&self) -> u32 {
        self.server
            .thumbnail_version
            .unwrap_or(DEFAULT_THUMBNAIL_VERSION)
    }

    pub fn base_url(&self) -> Result<Url> {
        parse_url(self.server.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))
    }

    pub fn search_url(&self) -> Result<Url> {
        parse_url(
            self.server
                .search_url
                .as_deref()
                .unwrap_or(DEFAULT_SEARCH_URL),
        )
    }

    pub fn legacy_url(&self) -> Result<Url> {
        parse_url(
            self.server
                .legacy_url
                .as_deref()
                .unwrap_or(DEFAULT_LEGACY_URL),
        )
    }
}

/// Parses an absolute URL, reporting failures as configuration errors.
pub fn parse_url(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| Error::Config(format!("invalid URL '{}': {}", raw, e)))
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_sidebar_min_width() -> Option<f32> {
    Some(DEFAULT_SIDEBAR_MIN_WIDTH)
}

fn default_sidebar_fraction() -> Option<f32> {
    Some(DEFAULT_SIDEBAR_FRACTION)
}

fn default_image_margin() -> Option<f32> {
    Some(DEFAULT_IMAGE_MARGIN)
}

fn default_frame_interval_ms() -> Option<u64> {
    Some(DEFAULT_FRAME_INTERVAL_MS)
}

fn default_sheet_columns() -> Option<u32> {
    Some(DEFAULT_SHEET_COLUMNS)
}

fn default_sheet_rows() -> Option<u32> {
    Some(DEFAULT_SHEET_ROWS)
}

fn default_sprite_width() -> Option<u32> {
    Some(DEFAULT_SPRITE_WIDTH)
}

fn default_sprite_height() -> Option<u32> {
    Some(DEFAULT_SPRITE_HEIGHT)
}

fn default_crossfade_ms() -> Option<u64> {
    Some(DEFAULT_CROSSFADE_MS)
}

fn default_base_url() -> Option<String> {
    Some(DEFAULT_BASE_URL.to_string())
}

fn default_search_url() -> Option<String> {
    Some(DEFAULT_SEARCH_URL.to_string())
}

fn default_legacy_url() -> Option<String> {
    Some(DEFAULT_LEGACY_URL.to_string())
}

fn default_thumbnail_version() -> Option<u32> {
    Some(DEFAULT_THUMBNAIL_VERSION)
}

fn default_preview_bytes() -> Option<usize> {
    Some(DEFAULT_PREVIEW_BYTES)
}

// =============================================================================
// Load / Save
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If the file exists but
/// cannot be read, the default config is returned with an i18n warning key.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "config: load failed");
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
