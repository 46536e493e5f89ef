// SPDX-License-Identifier: MPL-2.0
use approx::assert_abs_diff_eq;
use blob_lens::aspect::{self, legacy_url_for, Aspect, AspectContent, ImageAspectInputs};
use blob_lens::diagnostics::{DiagnosticEventKind, DiagnosticsLog};
use blob_lens::domain::{ContentReference, PermanodeMetadata, ResolvedMetadata};
use blob_lens::error::FetchError;
use blob_lens::media::LoadedImage;
use blob_lens::ui::detail::sidebar::{self, SidebarGroup};
use blob_lens::ui::detail::{
    DetailOptions, Effect, ImageDetailView, ImageKey, LoadState, Message, ViewInputs,
};
use iced::widget::image::Handle;
use iced::Size;
use reqwest::Url;
use std::time::{Duration, Instant};

fn base() -> Url {
    Url::parse("http://localhost:3179/ui/").expect("valid base")
}

fn reference(raw: &str) -> ContentReference {
    ContentReference::parse(raw).expect("valid reference")
}

fn image_inputs(raw: &str, size: Size) -> ViewInputs {
    let blob_ref = reference(raw);
    let inputs = ImageAspectInputs {
        legacy_url: legacy_url_for(&base(), &blob_ref),
        resolved: ResolvedMetadata::new(blob_ref)
            .with_file(format!("{raw}.jpg"), 4096)
            .with_image(2000, 1500),
        permanode: Some(
            PermanodeMetadata::new(reference("sha1-perm")).with_attr("title", "Holiday"),
        ),
        search_url: base(),
        backward_placeholder: false,
    };
    match aspect::select(&base(), inputs).content(size) {
        AspectContent::ImageDetail(inputs) => inputs,
        AspectContent::Frame(_) => panic!("image snapshot should select the image aspect"),
    }
}

fn pixel() -> LoadedImage {
    LoadedImage {
        handle: Handle::from_rgba(1, 1, vec![255, 255, 255, 255]),
        width: 1,
        height: 1,
    }
}

fn expect_fetch(effect: Effect) -> (ImageKey, Url) {
    match effect {
        Effect::FetchImage { key, url } => (key, url),
        other => panic!("expected a thumbnail fetch, got {other:?}"),
    }
}

#[test]
fn reference_switch_discards_late_completion() {
    let mut diagnostics = DiagnosticsLog::default();
    let mut view = ImageDetailView::new(DetailOptions::new(base()));
    let size = Size::new(1200.0, 800.0);

    let (first_key, first_url) =
        expect_fetch(view.set_inputs(image_inputs("sha1-a", size), &mut diagnostics));
    let (second_key, second_url) =
        expect_fetch(view.set_inputs(image_inputs("sha1-b", size), &mut diagnostics));
    assert_ne!(first_key, second_key);

    // The thumbnail for the previous reference arrives late.
    view.handle(
        Message::ImageLoaded {
            key: first_key,
            url: first_url,
            result: Ok(pixel()),
        },
        &mut diagnostics,
    );
    assert_eq!(view.load_state(), LoadState::Loading);
    assert!(view.loaded_image().is_none());
    assert!(matches!(
        diagnostics.last(),
        Some(DiagnosticEventKind::StaleCompletionIgnored { .. })
    ));

    view.handle(
        Message::ImageLoaded {
            key: second_key,
            url: second_url,
            result: Ok(pixel()),
        },
        &mut diagnostics,
    );
    assert_eq!(view.load_state(), LoadState::Loaded);
    assert!(!view.placeholder_group().is_visible());
}

#[test]
fn resize_reuses_thumbnail_source() {
    let mut diagnostics = DiagnosticsLog::default();
    let mut view = ImageDetailView::new(DetailOptions::new(base()));

    let (_, url) = expect_fetch(view.set_inputs(
        image_inputs("sha1-a", Size::new(1200.0, 800.0)),
        &mut diagnostics,
    ));
    assert_eq!(url.query(), Some("mh=750&tv=2"));

    let effect = view.set_inputs(
        image_inputs("sha1-a", Size::new(600.0, 400.0)),
        &mut diagnostics,
    );
    assert_eq!(effect, Effect::None);
    assert_eq!(view.thumbnail_src(), Some(&url));

    let geometry = view.geometry().expect("geometry once mounted");
    let image = geometry.image.expect("image placement");
    assert_abs_diff_eq!(geometry.sidebar_width, 300.0);
    assert_abs_diff_eq!(image.width + 2.0 * image.left, 300.0, epsilon = 1e-3);
}

#[test]
fn failed_thumbnail_keeps_placeholder_walking() {
    let mut diagnostics = DiagnosticsLog::default();
    let mut view = ImageDetailView::new(DetailOptions::new(base()));
    let (key, url) = expect_fetch(view.set_inputs(
        image_inputs("sha1-a", Size::new(1200.0, 800.0)),
        &mut diagnostics,
    ));

    view.handle(
        Message::ImageLoaded {
            key,
            url,
            result: Err(FetchError::Http { status: 500 }),
        },
        &mut diagnostics,
    );

    assert_eq!(view.load_state(), LoadState::Loading);
    assert!(view.placeholder_group().is_visible());
    assert!(view.needs_ticks());
    assert_eq!(diagnostics.failure_count(), 1);

    let start = Instant::now();
    view.handle(Message::Tick(start), &mut diagnostics);
    view.handle(Message::Tick(start + Duration::from_millis(95)), &mut diagnostics);
    assert_eq!(view.placeholder().frame(), 3);
}

#[test]
fn loaded_image_fades_in_then_stops_ticking() {
    let mut diagnostics = DiagnosticsLog::default();
    let mut view = ImageDetailView::new(DetailOptions::new(base()));
    let (key, url) = expect_fetch(view.set_inputs(
        image_inputs("sha1-a", Size::new(1200.0, 800.0)),
        &mut diagnostics,
    ));
    assert_abs_diff_eq!(view.image_opacity(), 0.0);

    view.handle(
        Message::ImageLoaded {
            key,
            url,
            result: Ok(pixel()),
        },
        &mut diagnostics,
    );
    assert!(view.needs_ticks());

    let start = Instant::now();
    view.handle(Message::Tick(start), &mut diagnostics);
    view.handle(Message::Tick(start + Duration::from_secs(1)), &mut diagnostics);
    assert_abs_diff_eq!(view.image_opacity(), 1.0);
    assert!(!view.needs_ticks());
}

#[test]
fn links_map_to_host_effects() {
    let mut diagnostics = DiagnosticsLog::default();
    let mut view = ImageDetailView::new(DetailOptions::new(base()));
    view.set_inputs(image_inputs("sha1-a", Size::new(1200.0, 800.0)), &mut diagnostics);

    assert_eq!(view.handle(Message::BackToSearch, &mut diagnostics), Effect::Escape);
    match view.handle(Message::OpenLegacy, &mut diagnostics) {
        Effect::OpenUrl(url) => assert_eq!(url.query(), Some("b=sha1-a")),
        other => panic!("expected legacy link, got {other:?}"),
    }
}

#[test]
fn sidebar_lists_groups_in_order() {
    let groups = sidebar::compose(&image_inputs("sha1-a", Size::new(1200.0, 800.0)));
    let keys: Vec<_> = groups.iter().map(sidebar::group_title_key).collect();
    assert_eq!(
        keys,
        vec![
            "detail-group-generalities",
            "detail-group-file",
            "detail-group-image",
            "detail-group-elsewhere",
        ]
    );
    assert!(matches!(
        &groups[0],
        SidebarGroup::General { title: Some(title), description: None } if title == "Holiday"
    ));
}

#[test]
fn non_image_snapshot_falls_back_to_blob_frame() {
    let blob_ref = reference("sha1-notes");
    let inputs = ImageAspectInputs {
        legacy_url: legacy_url_for(&base(), &blob_ref),
        resolved: ResolvedMetadata::new(blob_ref).with_file("notes.txt", 12),
        permanode: None,
        search_url: base(),
        backward_placeholder: false,
    };

    let aspect = aspect::select(&base(), inputs);
    assert!(matches!(aspect, Aspect::Blob(_)));
    match aspect.content(Size::new(640.0, 480.0)) {
        AspectContent::Frame(spec) => {
            let first = spec.src.query_pairs().next();
            assert_eq!(
                first.map(|(k, v)| (k.into_owned(), v.into_owned())),
                Some(("b".to_string(), "sha1-notes".to_string()))
            );
            assert_abs_diff_eq!(spec.width, 640.0);
        }
        AspectContent::ImageDetail(_) => {
            panic!("non-image snapshot must not get the image aspect")
        }
    }
}
