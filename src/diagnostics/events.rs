// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types.

use std::time::Instant;

use serde::{Deserialize, Serialize};

/// A diagnostic event with the monotonic time it was recorded at.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    pub timestamp: Instant,
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Instant::now(),
            kind,
        }
    }
}

/// What happened. References and URLs are kept as plain strings so the
/// events serialize without pulling UI types along.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    /// A detail view was mounted (or re-derived) for a new reference.
    ReferenceMounted {
        reference: String,
        aspect: String,
    },

    /// The image element for `reference` finished loading.
    ImageLoaded { reference: String, url: String },

    /// The image element for `reference` failed to load. The view keeps
    /// showing the placeholder.
    ImageLoadFailed {
        reference: String,
        url: String,
        error: String,
    },

    /// A load completion arrived for an element that is no longer mounted.
    StaleCompletionIgnored { key: String },

    /// The embedded blob frame could not fetch its source.
    FrameLoadFailed { url: String, error: String },

    /// The configuration file could not be used as-is.
    ConfigWarning { message: String },
}

impl DiagnosticEventKind {
    /// True for events describing a failure.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            DiagnosticEventKind::ImageLoadFailed { .. }
                | DiagnosticEventKind::FrameLoadFailed { .. }
                | DiagnosticEventKind::ConfigWarning { .. }
        )
    }
}
