// SPDX-License-Identifier: MPL-2.0
//! Isolated surface showing the raw content behind a reference.
//!
//! The frame owns nothing but its source URL and what came back from it.
//! Pointing it at a different source discards the previous preview, and a
//! completion for any source other than the current one is ignored.

use crate::aspect::BlobFrameSpec;
use crate::diagnostics::{DiagnosticEventKind, DiagnosticsLog};
use crate::error::FetchError;
use crate::i18n::I18n;
use crate::media::FramePreview;
use crate::ui::design_tokens::{palette, spacing, typography};
use iced::widget::{container, scrollable, Column, Text};
use iced::{Element, Font, Length};
use reqwest::Url;

#[derive(Debug, Clone, PartialEq)]
pub enum Preview {
    Pending,
    Ready(FramePreview),
    Failed(FetchError),
}

#[derive(Debug, Clone)]
pub enum Message {
    Loaded {
        src: Url,
        result: Result<FramePreview, FetchError>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Fetch `src`, previewing at most `limit` bytes.
    Fetch { src: Url, limit: usize },
}

#[derive(Debug, Clone)]
pub struct BlobFrame {
    spec: BlobFrameSpec,
    preview: Preview,
    preview_bytes: usize,
}

impl BlobFrame {
    /// Creates the frame and requests its first fetch.
    #[must_use]
    pub fn mount(spec: BlobFrameSpec, preview_bytes: usize) -> (Self, Effect) {
        let effect = Effect::Fetch {
            src: spec.src.clone(),
            limit: preview_bytes,
        };
        (
            Self {
                spec,
                preview: Preview::Pending,
                preview_bytes,
            },
            effect,
        )
    }

    /// Applies a new spec. Only a source change triggers a fetch.
    pub fn resize(&mut self, spec: BlobFrameSpec) -> Effect {
        let changed = spec.src != self.spec.src;
        self.spec = spec;
        if !changed {
            return Effect::None;
        }
        self.preview = Preview::Pending;
        Effect::Fetch {
            src: self.spec.src.clone(),
            limit: self.preview_bytes,
        }
    }

    pub fn handle(&mut self, message: Message, diagnostics: &mut DiagnosticsLog) -> Effect {
        match message {
            Message::Loaded { src, result } => {
                if src != self.spec.src {
                    diagnostics.record(DiagnosticEventKind::StaleCompletionIgnored {
                        key: src.to_string(),
                    });
                    return Effect::None;
                }
                self.preview = match result {
                    Ok(preview) => Preview::Ready(preview),
                    Err(error) => {
                        diagnostics.record(DiagnosticEventKind::FrameLoadFailed {
                            url: src.to_string(),
                            error: error.to_string(),
                        });
                        Preview::Failed(error)
                    }
                };
                Effect::None
            }
        }
    }

    #[must_use]
    pub fn spec(&self) -> &BlobFrameSpec {
        &self.spec
    }

    #[must_use]
    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    pub fn view<'a>(&'a self, i18n: &I18n) -> Element<'a, Message> {
        let body: Element<'a, Message> = match &self.preview {
            Preview::Pending => Text::new(i18n.tr("frame-loading"))
                .size(typography::BODY)
                .into(),
            Preview::Ready(FramePreview::Text { text, truncated }) => {
                let mut column = Column::new().spacing(spacing::XS).push(
                    Text::new(text.as_str())
                        .font(Font::MONOSPACE)
                        .size(typography::BODY_SM),
                );
                if *truncated {
                    column = column.push(
                        Text::new(i18n.tr("frame-truncated"))
                            .size(typography::CAPTION)
                            .color(palette::GRAY_400),
                    );
                }
                scrollable(column).height(Length::Fill).into()
            }
            Preview::Ready(FramePreview::Binary { len }) => Text::new(match len {
                Some(len) => i18n.tr_with_args("frame-binary", &[("bytes", &len.to_string())]),
                None => i18n.tr("frame-binary-unknown"),
            })
            .size(typography::BODY)
            .into(),
            Preview::Failed(error) => Text::new(i18n.tr_with_args(
                "frame-load-failed",
                &[("error", &describe_error(i18n, error))],
            ))
            .size(typography::BODY)
            .color(palette::ERROR_500)
            .into(),
        };

        container(body)
            .padding(spacing::MD)
            .width(Length::Fixed(self.spec.width))
            .height(Length::Fixed(self.spec.height))
            .into()
    }
}

/// Localized one-line description of a fetch failure.
#[must_use]
pub fn describe_error(i18n: &I18n, error: &FetchError) -> String {
    match error {
        FetchError::Http { status } => {
            i18n.tr_with_args(error.i18n_key(), &[("status", &status.to_string())])
        }
        FetchError::Transport(_) | FetchError::Decode(_) => i18n.tr(error.i18n_key()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(src: &str) -> BlobFrameSpec {
        BlobFrameSpec {
            src: Url::parse(src).unwrap(),
            width: 640.0,
            height: 480.0,
        }
    }

    #[test]
    fn mount_requests_fetch() {
        let (frame, effect) = BlobFrame::mount(spec("http://h/ui/?b=sha1-a&cb=1"), 128);
        assert_eq!(frame.preview(), &Preview::Pending);
        assert_eq!(
            effect,
            Effect::Fetch {
                src: Url::parse("http://h/ui/?b=sha1-a&cb=1").unwrap(),
                limit: 128
            }
        );
    }

    #[test]
    fn resize_with_same_source_keeps_preview() {
        let (mut frame, _) = BlobFrame::mount(spec("http://h/ui/?b=sha1-a&cb=1"), 128);
        let mut log = DiagnosticsLog::default();
        frame.handle(
            Message::Loaded {
                src: frame.spec().src.clone(),
                result: Ok(FramePreview::Binary { len: Some(3) }),
            },
            &mut log,
        );
        let mut bigger = spec("http://h/ui/?b=sha1-a&cb=1");
        bigger.width = 1000.0;
        assert_eq!(frame.resize(bigger), Effect::None);
        assert_eq!(frame.preview(), &Preview::Ready(FramePreview::Binary { len: Some(3) }));
        assert_eq!(frame.spec().width, 1000.0);
    }

    #[test]
    fn new_source_resets_and_refetches() {
        let (mut frame, _) = BlobFrame::mount(spec("http://h/ui/?b=sha1-a&cb=1"), 128);
        let effect = frame.resize(spec("http://h/ui/?b=sha1-b&cb=2"));
        assert!(matches!(effect, Effect::Fetch { .. }));
        assert_eq!(frame.preview(), &Preview::Pending);
    }

    #[test]
    fn stale_completion_is_ignored() {
        let (mut frame, _) = BlobFrame::mount(spec("http://h/ui/?b=sha1-a&cb=1"), 128);
        frame.resize(spec("http://h/ui/?b=sha1-b&cb=2"));
        let mut log = DiagnosticsLog::default();
        frame.handle(
            Message::Loaded {
                src: Url::parse("http://h/ui/?b=sha1-a&cb=1").unwrap(),
                result: Ok(FramePreview::Binary { len: Some(1) }),
            },
            &mut log,
        );
        assert_eq!(frame.preview(), &Preview::Pending);
    }

    #[test]
    fn failure_is_recorded_and_shown() {
        let (mut frame, _) = BlobFrame::mount(spec("http://h/ui/?b=sha1-a&cb=1"), 128);
        let mut log = DiagnosticsLog::default();
        frame.handle(
            Message::Loaded {
                src: frame.spec().src.clone(),
                result: Err(FetchError::Http { status: 500 }),
            },
            &mut log,
        );
        assert_eq!(frame.preview(), &Preview::Failed(FetchError::Http { status: 500 }));
        assert!(matches!(
            log.last(),
            Some(DiagnosticEventKind::FrameLoadFailed { .. })
        ));
    }

    #[test]
    fn http_error_mentions_status() {
        let i18n = I18n::new(Some("en-US".into()), &crate::config::Config::default());
        let text = describe_error(&i18n, &FetchError::Http { status: 404 });
        assert!(text.contains("404"));
    }
}
