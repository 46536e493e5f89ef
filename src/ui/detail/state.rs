// SPDX-License-Identifier: MPL-2.0
//! Image detail view state.
//!
//! The view is driven by a snapshot of inputs ([`ViewInputs`]) that the host
//! replaces on every resize or navigation. A change of reference restarts the
//! load cycle: a thumbnail is chosen, the view enters [`LoadState::Loading`]
//! and a single fetch is requested. The first successful completion for the
//! current image key moves it to [`LoadState::Loaded`]; completions for
//! earlier keys are dropped.

use super::layout::{LayoutGeometry, LayoutSettings};
use super::placeholder::PlaceholderAnimation;
use super::transition::TransitionGroup;
use crate::config::{DEFAULT_CROSSFADE_MS, DEFAULT_SHEET_COLUMNS, DEFAULT_SHEET_ROWS};
use crate::diagnostics::{DiagnosticEventKind, DiagnosticsLog};
use crate::domain::ui::FrameInterval;
use crate::domain::{ContentReference, PermanodeMetadata, ResolvedMetadata};
use crate::error::FetchError;
use crate::media::LoadedImage;
use crate::thumber::{ThumbnailSource, Thumber};
use iced::Size;
use reqwest::Url;
use std::fmt;
use std::time::{Duration, Instant};

const IMAGE_GROUP: &str = "detail-img";
const PLACEHOLDER_GROUP: &str = "detail-piggy";

/// Whether the current image has arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Loaded,
}

/// Everything the view renders from.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewInputs {
    pub size: Size,
    pub resolved: ResolvedMetadata,
    pub permanode: Option<PermanodeMetadata>,
    pub search_url: Url,
    pub legacy_url: Url,
    pub backward_placeholder: bool,
}

impl ViewInputs {
    #[must_use]
    pub fn reference(&self) -> &ContentReference {
        &self.resolved.blob_ref
    }
}

/// Stable per-reference identity of the image element: `img<reference>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageKey(String);

impl ImageKey {
    #[must_use]
    pub fn for_reference(reference: &ContentReference) -> Self {
        Self(format!("img{}", reference))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// State re-derived when the displayed reference changes.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedState {
    pub thumbnail_src: Option<Url>,
    pub load_state: LoadState,
    pub image_key: ImageKey,
}

/// Re-derives view state for `next`, or returns `None` when `prev` shows the
/// same reference.
///
/// References are compared by value, so a new snapshot of the same object
/// (e.g. after a resize) does not restart loading.
pub fn derive_view_state<S, F>(
    prev: Option<&ViewInputs>,
    next: &ViewInputs,
    settings: &LayoutSettings,
    make_source: F,
) -> Option<DerivedState>
where
    S: ThumbnailSource,
    F: FnOnce(&ResolvedMetadata) -> Option<S>,
{
    if prev.is_some_and(|prev| prev.reference() == next.reference()) {
        return None;
    }

    let geometry = LayoutGeometry::compute(settings, next.size, next.resolved.image);
    let thumbnail_src = geometry
        .render_height()
        .and_then(|height| make_source(&next.resolved).map(|source| source.source_for(height)));

    Some(DerivedState {
        thumbnail_src,
        load_state: LoadState::Loading,
        image_key: ImageKey::for_reference(next.reference()),
    })
}

#[derive(Debug, Clone)]
pub enum Message {
    /// A thumbnail fetch issued for `key` completed.
    ImageLoaded {
        key: ImageKey,
        url: Url,
        result: Result<LoadedImage, FetchError>,
    },
    /// Animation clock.
    Tick(Instant),
    BackToSearch,
    OpenLegacy,
}

/// Side effects requested from the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Fetch `url` and report back with [`Message::ImageLoaded`] for `key`.
    FetchImage { key: ImageKey, url: Url },
    /// Leave the detail view (the "back to search" handler).
    Escape,
    /// Open `url` outside the application.
    OpenUrl(Url),
}

/// Construction parameters of [`ImageDetailView`].
#[derive(Debug, Clone)]
pub struct DetailOptions {
    pub layout: LayoutSettings,
    /// Base URL under which `thumbnail/...` paths live.
    pub thumbnail_base: Url,
    pub thumbnail_version: u32,
    pub frame_interval: FrameInterval,
    pub frame_count: usize,
    pub crossfade: Duration,
}

impl DetailOptions {
    #[must_use]
    pub fn new(thumbnail_base: Url) -> Self {
        Self {
            layout: LayoutSettings::default(),
            thumbnail_base,
            thumbnail_version: crate::config::DEFAULT_THUMBNAIL_VERSION,
            frame_interval: FrameInterval::default(),
            frame_count: (DEFAULT_SHEET_COLUMNS * DEFAULT_SHEET_ROWS) as usize,
            crossfade: Duration::from_millis(DEFAULT_CROSSFADE_MS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImageDetailView {
    options: DetailOptions,
    inputs: Option<ViewInputs>,
    derived: Option<DerivedState>,
    image: Option<LoadedImage>,
    image_group: TransitionGroup,
    placeholder_group: TransitionGroup,
    placeholder: PlaceholderAnimation,
    last_fade_tick: Option<Instant>,
}

impl ImageDetailView {
    #[must_use]
    pub fn new(options: DetailOptions) -> Self {
        let placeholder = PlaceholderAnimation::new(options.frame_count, options.frame_interval);
        Self {
            options,
            inputs: None,
            derived: None,
            image: None,
            image_group: TransitionGroup::new(IMAGE_GROUP),
            placeholder_group: TransitionGroup::new(PLACEHOLDER_GROUP),
            placeholder,
            last_fade_tick: None,
        }
    }

    /// Feeds a new input snapshot.
    ///
    /// Returns [`Effect::FetchImage`] exactly when the reference changed (or
    /// on first mount) and a thumbnail source exists.
    pub fn set_inputs(&mut self, inputs: ViewInputs, diagnostics: &mut DiagnosticsLog) -> Effect {
        let options = &self.options;
        let derived = derive_view_state(self.inputs.as_ref(), &inputs, &options.layout, |meta| {
            Thumber::from_metadata(&options.thumbnail_base, meta, options.thumbnail_version)
                .map_err(|err| tracing::warn!(error = %err, "detail: no thumbnail source"))
                .ok()
        });

        let Some(derived) = derived else {
            self.placeholder.set_mirrored(inputs.backward_placeholder);
            self.inputs = Some(inputs);
            return Effect::None;
        };

        diagnostics.record(DiagnosticEventKind::ReferenceMounted {
            reference: inputs.reference().to_string(),
            aspect: "image".to_string(),
        });

        self.image = None;
        self.last_fade_tick = None;
        self.placeholder.reset(inputs.backward_placeholder);
        self.placeholder_group.show(derived.image_key.as_str());
        if inputs.resolved.image.is_some() {
            self.image_group.show(derived.image_key.as_str());
        } else {
            self.image_group.hide();
        }

        let effect = match &derived.thumbnail_src {
            Some(url) => Effect::FetchImage {
                key: derived.image_key.clone(),
                url: url.clone(),
            },
            None => Effect::None,
        };
        self.derived = Some(derived);
        self.inputs = Some(inputs);
        effect
    }

    pub fn handle(&mut self, message: Message, diagnostics: &mut DiagnosticsLog) -> Effect {
        match message {
            Message::ImageLoaded { key, url, result } => {
                if self.image_key() != Some(&key) {
                    diagnostics.record(DiagnosticEventKind::StaleCompletionIgnored {
                        key: key.to_string(),
                    });
                    return Effect::None;
                }
                let reference = self
                    .inputs
                    .as_ref()
                    .map(|inputs| inputs.reference().to_string())
                    .unwrap_or_default();

                match result {
                    Ok(image) => {
                        if let Some(derived) = &mut self.derived {
                            if derived.load_state == LoadState::Loading {
                                derived.load_state = LoadState::Loaded;
                                self.image = Some(image);
                                self.placeholder_group.hide();
                                diagnostics.record(DiagnosticEventKind::ImageLoaded {
                                    reference,
                                    url: url.to_string(),
                                });
                            }
                        }
                    }
                    Err(error) => {
                        diagnostics.record(DiagnosticEventKind::ImageLoadFailed {
                            reference,
                            url: url.to_string(),
                            error: error.to_string(),
                        });
                    }
                }
                Effect::None
            }
            Message::Tick(now) => {
                if self.placeholder_group.is_visible() {
                    self.placeholder.tick(now);
                }
                if self.load_state() == LoadState::Loaded && self.image_group.is_animating() {
                    let elapsed = self
                        .last_fade_tick
                        .map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
                    self.image_group.advance(elapsed, self.options.crossfade);
                    self.last_fade_tick = Some(now);
                }
                Effect::None
            }
            Message::BackToSearch => Effect::Escape,
            Message::OpenLegacy => match &self.inputs {
                Some(inputs) => Effect::OpenUrl(inputs.legacy_url.clone()),
                None => Effect::None,
            },
        }
    }

    /// Geometry for the current inputs, computed on each call.
    #[must_use]
    pub fn geometry(&self) -> Option<LayoutGeometry> {
        self.inputs.as_ref().map(|inputs| {
            LayoutGeometry::compute(&self.options.layout, inputs.size, inputs.resolved.image)
        })
    }

    #[must_use]
    pub fn inputs(&self) -> Option<&ViewInputs> {
        self.inputs.as_ref()
    }

    #[must_use]
    pub fn load_state(&self) -> LoadState {
        self.derived
            .as_ref()
            .map_or(LoadState::Loading, |derived| derived.load_state)
    }

    #[must_use]
    pub fn image_key(&self) -> Option<&ImageKey> {
        self.derived.as_ref().map(|derived| &derived.image_key)
    }

    #[must_use]
    pub fn thumbnail_src(&self) -> Option<&Url> {
        self.derived
            .as_ref()
            .and_then(|derived| derived.thumbnail_src.as_ref())
    }

    #[must_use]
    pub fn loaded_image(&self) -> Option<&LoadedImage> {
        self.image.as_ref()
    }

    #[must_use]
    pub fn image_group(&self) -> &TransitionGroup {
        &self.image_group
    }

    #[must_use]
    pub fn placeholder_group(&self) -> &TransitionGroup {
        &self.placeholder_group
    }

    #[must_use]
    pub fn placeholder(&self) -> &PlaceholderAnimation {
        &self.placeholder
    }

    /// Opacity of the image element: zero until loaded, then fading in.
    #[must_use]
    pub fn image_opacity(&self) -> f32 {
        match self.load_state() {
            LoadState::Loading => 0.0,
            LoadState::Loaded => self.image_group.opacity(),
        }
    }

    /// True while the placeholder walks or the image fades in.
    #[must_use]
    pub fn needs_ticks(&self) -> bool {
        self.placeholder_group.is_visible()
            || (self.load_state() == LoadState::Loaded && self.image_group.is_animating())
    }
}
