// SPDX-License-Identifier: MPL-2.0
//! Application root state.
//!
//! The `App` mounts one aspect for the reference named on the command line
//! and turns the effects its surface requests into Iced tasks: thumbnail and
//! blob fetches, leaving the view, and opening links in the system browser.

mod message;
pub mod paths;
mod subscription;

pub use message::{Flags, Invocation, Message, USAGE};

use crate::aspect::{self, legacy_url_for, Aspect, AspectContent, ImageAspectInputs};
use crate::config::{self, Config, DEFAULT_BASE_URL, DEFAULT_LEGACY_URL, DEFAULT_SEARCH_URL};
use crate::diagnostics::{DiagnosticEventKind, DiagnosticsLog};
use crate::error::Result;
use crate::i18n::I18n;
use crate::media::{fetch_image, fetch_preview, SpriteFrames, SpriteSheetLayout};
use crate::ui::blob_frame::{self, BlobFrame};
use crate::ui::detail::{self, DetailOptions, ImageDetailView, LayoutSettings, ViewContext};
use iced::{window, Element, Size, Subscription, Task, Theme};
use reqwest::Url;
use std::fmt;
use std::path::PathBuf;

pub const WINDOW_DEFAULT_HEIGHT: u32 = 800;
pub const WINDOW_DEFAULT_WIDTH: u32 = 1200;
pub const MIN_WINDOW_HEIGHT: u32 = 400;
pub const MIN_WINDOW_WIDTH: u32 = 650;

/// What the mounted aspect renders into.
#[derive(Debug)]
enum Surface {
    Frame(BlobFrame),
    Image(ImageDetailView),
}

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    config: Config,
    diagnostics: DiagnosticsLog,
    aspect: Aspect,
    surface: Surface,
    window_size: Size,
    /// Where "back to search" leads once the view is left.
    search_url: Url,
    /// Walk-cycle frames, configured or bundled.
    sprites: Option<SpriteFrames>,
    /// Where the diagnostics log is written on exit, if anywhere.
    dump_path: Option<PathBuf>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("aspect", &self.aspect.title())
            .field("reference", &self.aspect.reference().as_str())
            .field("window_size", &self.window_size)
            .finish()
    }
}

/// Builds the window settings
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(Size::new(MIN_WINDOW_WIDTH as f32, MIN_WINDOW_HEIGHT as f32)),
        // Close requests arrive as `Message::Exit` so the log can be dumped first.
        exit_on_close_request: false,
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires an `Fn` boot closure; flags are consumed once.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

/// Server endpoints after CLI and config overrides.
struct Endpoints {
    base: Url,
    search: Url,
    legacy: Url,
}

impl Endpoints {
    fn resolve(flags: &Flags, config: &Config, diagnostics: &mut DiagnosticsLog) -> Self {
        let base = match &flags.base_url {
            Some(url) => url.clone(),
            None => url_or_default(config.base_url(), DEFAULT_BASE_URL, diagnostics),
        };
        Self {
            base,
            search: url_or_default(config.search_url(), DEFAULT_SEARCH_URL, diagnostics),
            legacy: url_or_default(config.legacy_url(), DEFAULT_LEGACY_URL, diagnostics),
        }
    }
}

fn url_or_default(
    configured: Result<Url>,
    fallback: &str,
    diagnostics: &mut DiagnosticsLog,
) -> Url {
    match configured {
        Ok(url) => url,
        Err(err) => {
            diagnostics.record(DiagnosticEventKind::ConfigWarning {
                message: err.to_string(),
            });
            Url::parse(fallback).expect("default server URLs are valid")
        }
    }
}

/// The configured sprite sheet, else the bundled one. `None` leaves the
/// view with its spinner.
fn load_sprites(config: &Config, diagnostics: &mut DiagnosticsLog) -> Option<SpriteFrames> {
    if let Some(path) = config.placeholder.sprite_sheet.as_deref() {
        match SpriteFrames::load(path, SpriteSheetLayout::from_config(config)) {
            Ok(frames) => return Some(frames),
            Err(err) => diagnostics.record(DiagnosticEventKind::ConfigWarning {
                message: format!("sprite sheet {}: {}", path.display(), err),
            }),
        }
    }
    match SpriteFrames::bundled() {
        Ok(frames) => Some(frames),
        Err(err) => {
            tracing::warn!(error = %err, "app: bundled sprite sheet unusable");
            None
        }
    }
}

impl App {
    /// Loads the configuration and mounts the aspect for `flags`.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        paths::init_cli_override(flags.config_dir.clone());
        let (config, warning) = config::load();
        Self::with_config(flags, config, warning)
    }

    /// Mounts the aspect for `flags` against an already loaded config.
    ///
    /// `warning` is the i18n key of a config load problem, if any.
    pub fn with_config(
        flags: Flags,
        config: Config,
        warning: Option<String>,
    ) -> (Self, Task<Message>) {
        let i18n = I18n::new(flags.lang.clone(), &config);
        let mut diagnostics = DiagnosticsLog::default();
        if let Some(key) = warning {
            diagnostics.record(DiagnosticEventKind::ConfigWarning {
                message: i18n.tr(&key),
            });
        }

        let endpoints = Endpoints::resolve(&flags, &config, &mut diagnostics);
        let backward = flags.backward || config.backward_placeholder();
        let image_inputs = ImageAspectInputs {
            legacy_url: legacy_url_for(&endpoints.legacy, &flags.resolved.blob_ref),
            resolved: flags.resolved,
            permanode: flags.permanode,
            search_url: endpoints.search.clone(),
            backward_placeholder: backward,
        };
        let aspect = aspect::select(&endpoints.base, image_inputs);
        tracing::info!(
            reference = %aspect.reference(),
            aspect = aspect.title(),
            "app: aspect selected"
        );

        let window_size = Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32);
        let sprites = match &aspect {
            Aspect::Image(_) => load_sprites(&config, &mut diagnostics),
            Aspect::Blob(_) => None,
        };

        let (surface, task) = match aspect.content(window_size) {
            AspectContent::Frame(spec) => {
                diagnostics.record(DiagnosticEventKind::ReferenceMounted {
                    reference: aspect.reference().to_string(),
                    aspect: "blob".to_string(),
                });
                let (frame, effect) = BlobFrame::mount(spec, config.preview_bytes());
                (Surface::Frame(frame), frame_task(effect))
            }
            AspectContent::ImageDetail(inputs) => {
                let mut options = DetailOptions::new(endpoints.base.clone());
                options.layout = LayoutSettings::from_config(&config);
                options.thumbnail_version = config.thumbnail_version();
                options.frame_interval = config.frame_interval();
                options.crossfade = config.crossfade_duration();
                if let Some(frames) = &sprites {
                    options.frame_count = frames.len();
                }
                let mut view = ImageDetailView::new(options);
                let effect = view.set_inputs(inputs, &mut diagnostics);
                (Surface::Image(view), detail_task(effect, &endpoints.search))
            }
        };

        (
            Self {
                i18n,
                config,
                diagnostics,
                aspect,
                surface,
                window_size,
                search_url: endpoints.search,
                sprites,
                dump_path: flags.dump_diagnostics,
            },
            task,
        )
    }

    pub fn title(&self) -> String {
        self.i18n.tr_with_args(
            "window-title",
            &[
                ("aspect", &self.i18n.tr(self.aspect.title_key())),
                ("reference", self.aspect.reference().as_str()),
            ],
        )
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        let event_sub = subscription::create_event_subscription();
        let animating = matches!(&self.surface, Surface::Image(view) if view.needs_ticks());
        let tick_sub = subscription::create_tick_subscription(
            animating,
            self.config.frame_interval().as_duration(),
        );
        Subscription::batch([event_sub, tick_sub])
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::WindowResized(size) => {
                self.window_size = size;
                self.relayout()
            }
            Message::Tick(now) => self.update_detail(detail::Message::Tick(now)),
            Message::Detail(msg) => self.update_detail(msg),
            Message::Frame(msg) => match &mut self.surface {
                Surface::Frame(frame) => frame_task(frame.handle(msg, &mut self.diagnostics)),
                Surface::Image(_) => Task::none(),
            },
            Message::Exit => {
                self.dump_diagnostics();
                iced::exit()
            }
        }
    }

    /// Writes the diagnostics log to the `--dump-diagnostics` path.
    fn dump_diagnostics(&self) {
        let Some(path) = &self.dump_path else {
            return;
        };
        match self.diagnostics.export_to_file(path) {
            Ok(()) => tracing::info!(
                path = %path.display(),
                events = self.diagnostics.len(),
                failures = self.diagnostics.failure_count(),
                "app: diagnostics written"
            ),
            Err(err) => tracing::warn!(
                path = %path.display(),
                error = %err,
                "app: could not write diagnostics"
            ),
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        match &self.surface {
            Surface::Frame(frame) => frame.view(&self.i18n).map(Message::Frame),
            Surface::Image(view) => detail::view(
                view,
                ViewContext {
                    i18n: &self.i18n,
                    sprites: self.sprites.as_ref(),
                },
            )
            .map(Message::Detail),
        }
    }

    #[must_use]
    pub fn diagnostics(&self) -> &DiagnosticsLog {
        &self.diagnostics
    }

    #[must_use]
    pub fn aspect(&self) -> &Aspect {
        &self.aspect
    }

    #[must_use]
    pub fn window_size(&self) -> Size {
        self.window_size
    }

    /// The image detail view, when the image aspect is mounted.
    #[must_use]
    pub fn detail(&self) -> Option<&ImageDetailView> {
        match &self.surface {
            Surface::Image(view) => Some(view),
            Surface::Frame(_) => None,
        }
    }

    /// The blob frame, when the blob aspect is mounted.
    #[must_use]
    pub fn frame(&self) -> Option<&BlobFrame> {
        match &self.surface {
            Surface::Frame(frame) => Some(frame),
            Surface::Image(_) => None,
        }
    }

    fn update_detail(&mut self, msg: detail::Message) -> Task<Message> {
        match &mut self.surface {
            Surface::Image(view) => {
                detail_task(view.handle(msg, &mut self.diagnostics), &self.search_url)
            }
            Surface::Frame(_) => Task::none(),
        }
    }

    /// Re-renders the mounted aspect at the current window size.
    fn relayout(&mut self) -> Task<Message> {
        let content = self.aspect.content(self.window_size);
        match (&mut self.surface, content) {
            (Surface::Frame(frame), AspectContent::Frame(spec)) => frame_task(frame.resize(spec)),
            (Surface::Image(view), AspectContent::ImageDetail(inputs)) => {
                detail_task(view.set_inputs(inputs, &mut self.diagnostics), &self.search_url)
            }
            _ => Task::none(),
        }
    }
}

fn frame_task(effect: blob_frame::Effect) -> Task<Message> {
    match effect {
        blob_frame::Effect::None => Task::none(),
        blob_frame::Effect::Fetch { src, limit } => {
            let target = src.clone();
            Task::perform(fetch_preview(src, limit), move |result| {
                Message::Frame(blob_frame::Message::Loaded {
                    src: target.clone(),
                    result,
                })
            })
        }
    }
}

fn detail_task(effect: detail::Effect, search_url: &Url) -> Task<Message> {
    match effect {
        detail::Effect::None => Task::none(),
        detail::Effect::FetchImage { key, url } => {
            let target = url.clone();
            Task::perform(fetch_image(url), move |result| {
                Message::Detail(detail::Message::ImageLoaded {
                    key: key.clone(),
                    url: target.clone(),
                    result,
                })
            })
        }
        detail::Effect::Escape => {
            tracing::info!(url = %search_url, "app: leaving detail view");
            open_external(search_url);
            Task::done(Message::Exit)
        }
        detail::Effect::OpenUrl(url) => {
            open_external(&url);
            Task::none()
        }
    }
}

fn open_external(url: &Url) {
    if let Err(err) = open::that_detached(url.as_str()) {
        tracing::warn!(url = %url, error = %err, "app: failed to open link");
    }
}
