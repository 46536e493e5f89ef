// SPDX-License-Identifier: MPL-2.0
//! The diagnostics log owned by the host.

use super::{BufferCapacity, CircularBuffer, DiagnosticEvent, DiagnosticEventKind};
use crate::error::Result;
use std::fs;
use std::path::Path;

/// Bounded event log that also forwards every event to `tracing`.
#[derive(Debug, Clone)]
pub struct DiagnosticsLog {
    events: CircularBuffer<DiagnosticEvent>,
}

impl Default for DiagnosticsLog {
    fn default() -> Self {
        Self::new(BufferCapacity::default())
    }
}

impl DiagnosticsLog {
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        Self {
            events: CircularBuffer::new(capacity),
        }
    }

    /// Records an event and emits the matching log line.
    pub fn record(&mut self, kind: DiagnosticEventKind) {
        match &kind {
            DiagnosticEventKind::ReferenceMounted { reference, aspect } => {
                tracing::debug!(%reference, %aspect, "detail: reference mounted");
            }
            DiagnosticEventKind::ImageLoaded { reference, url } => {
                tracing::debug!(%reference, %url, "detail: image loaded");
            }
            DiagnosticEventKind::ImageLoadFailed {
                reference,
                url,
                error,
            } => {
                tracing::error!(%reference, %url, %error, "Could not load image");
            }
            DiagnosticEventKind::StaleCompletionIgnored { key } => {
                tracing::trace!(%key, "detail: stale load completion ignored");
            }
            DiagnosticEventKind::FrameLoadFailed { url, error } => {
                tracing::warn!(%url, %error, "blob frame: could not load source");
            }
            DiagnosticEventKind::ConfigWarning { message } => {
                tracing::warn!(%message, "config: falling back to defaults");
            }
        }
        self.events.push(DiagnosticEvent::new(kind));
    }

    pub fn events(&self) -> impl Iterator<Item = &DiagnosticEvent> {
        self.events.iter()
    }

    #[must_use]
    pub fn last(&self) -> Option<&DiagnosticEventKind> {
        self.events.last().map(|event| &event.kind)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of failure events currently retained.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.events.iter().filter(|e| e.kind.is_failure()).count()
    }

    /// Serializes the retained events, oldest first, one JSON object per line.
    pub fn export_json_lines(&self) -> Result<String> {
        let mut out = String::new();
        for event in self.events.iter() {
            out.push_str(&serde_json::to_string(&event.kind)?);
            out.push('\n');
        }
        Ok(out)
    }

    /// Writes [`Self::export_json_lines`] to `path` through a temporary
    /// sibling file, so a reader never sees a partial export.
    pub fn export_to_file(&self, path: &Path) -> Result<()> {
        let lines = self.export_json_lines()?;
        let temp_path = path.with_extension("jsonl.tmp");
        fs::write(&temp_path, lines)?;
        if let Err(err) = fs::rename(&temp_path, path) {
            let _ = fs::remove_file(&temp_path);
            return Err(err.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_keeps_events_in_order() {
        let mut log = DiagnosticsLog::default();
        log.record(DiagnosticEventKind::ReferenceMounted {
            reference: "sha1-a".into(),
            aspect: "image".into(),
        });
        log.record(DiagnosticEventKind::ImageLoaded {
            reference: "sha1-a".into(),
            url: "http://x/thumb".into(),
        });

        assert_eq!(log.len(), 2);
        assert!(matches!(
            log.last(),
            Some(DiagnosticEventKind::ImageLoaded { .. })
        ));
        assert_eq!(log.failure_count(), 0);
    }

    #[test]
    fn export_writes_one_line_per_event() {
        let mut log = DiagnosticsLog::default();
        log.record(DiagnosticEventKind::FrameLoadFailed {
            url: "http://x/?b=sha1-a".into(),
            error: "HTTP status 500".into(),
        });
        log.record(DiagnosticEventKind::ConfigWarning {
            message: "bad toml".into(),
        });

        let exported = log.export_json_lines().unwrap();
        let lines: Vec<_> = exported.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"type\":\"frame_load_failed\""));
        assert_eq!(log.failure_count(), 2);
    }

    #[test]
    fn export_to_file_replaces_previous_dump() {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("diagnostics.jsonl");
        std::fs::write(&path, "stale\n").unwrap();

        let mut log = DiagnosticsLog::default();
        log.record(DiagnosticEventKind::StaleCompletionIgnored {
            key: "imgsha1-a".into(),
        });
        log.export_to_file(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written.lines().count(), 1);
        assert!(written.contains("imgsha1-a"));
        assert!(!path.with_extension("jsonl.tmp").exists());
    }

    #[test]
    fn export_to_missing_directory_fails() {
        let log = DiagnosticsLog::default();
        let result = log.export_to_file(Path::new("/nonexistent/dir/diagnostics.jsonl"));
        assert!(matches!(result, Err(crate::error::Error::Io(_))));
    }

    #[test]
    fn capacity_bounds_retained_events() {
        let mut log = DiagnosticsLog::new(BufferCapacity::new(16));
        for i in 0..40 {
            log.record(DiagnosticEventKind::StaleCompletionIgnored {
                key: format!("img{i}"),
            });
        }
        assert_eq!(log.len(), 16);
    }
}
