// SPDX-License-Identifier: MPL-2.0
//! Presentations ("aspects") of a content reference.
//!
//! Every reference can be shown as a raw blob. References whose snapshot
//! carries image dimensions can additionally be shown in the image detail
//! view. The host asks an [`Aspect`] for a title and for the content to lay
//! out in a given size; it never inspects which variant it holds.
//!
//! # Example
//!
//! ```
//! use blob_lens::aspect::{self, AspectContent};
//! use blob_lens::domain::ContentReference;
//! use reqwest::Url;
//!
//! let base = Url::parse("http://localhost:3179/ui/").unwrap();
//! let reference = ContentReference::parse("sha1-abc").unwrap();
//!
//! let aspect = aspect::resolve(&base, reference);
//! assert_eq!(aspect.title(), "Blob");
//! match aspect.content(iced::Size::new(800.0, 600.0)) {
//!     AspectContent::Frame(frame) => {
//!         assert!(frame.src.query().unwrap().starts_with("b=sha1-abc"))
//!     }
//!     AspectContent::ImageDetail(_) => unreachable!(),
//! }
//! ```

mod blob;
mod image;

pub use blob::{cache_buster, BlobAspect, BlobFrameSpec, CACHE_BUSTER_PARAM, REFERENCE_PARAM};
pub use image::{legacy_url_for, ImageAspect, ImageAspectInputs};

use crate::domain::ContentReference;
use crate::ui::detail::ViewInputs;
use iced::Size;
use reqwest::Url;

/// A presentation of one content reference.
#[derive(Debug, Clone)]
pub enum Aspect {
    Blob(BlobAspect),
    Image(ImageAspect),
}

/// What an aspect renders for a given allotted size.
#[derive(Debug, Clone, PartialEq)]
pub enum AspectContent {
    Frame(BlobFrameSpec),
    ImageDetail(ViewInputs),
}

impl Aspect {
    /// Constant human-readable label.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Aspect::Blob(blob) => blob.title(),
            Aspect::Image(image) => image.title(),
        }
    }

    /// Translation key of [`Self::title`].
    #[must_use]
    pub fn title_key(&self) -> &'static str {
        match self {
            Aspect::Blob(_) => "aspect-title-blob",
            Aspect::Image(_) => "aspect-title-image",
        }
    }

    #[must_use]
    pub fn reference(&self) -> &ContentReference {
        match self {
            Aspect::Blob(blob) => blob.reference(),
            Aspect::Image(image) => image.reference(),
        }
    }

    #[must_use]
    pub fn content(&self, size: Size) -> AspectContent {
        match self {
            Aspect::Blob(blob) => AspectContent::Frame(blob.content(size)),
            Aspect::Image(image) => AspectContent::ImageDetail(image.content(size)),
        }
    }
}

/// Resolves the fallback presentation: everything is a blob.
#[must_use]
pub fn resolve(base_url: &Url, reference: ContentReference) -> Aspect {
    Aspect::Blob(BlobAspect::new(base_url, reference))
}

/// Picks the richest presentation for the reference `inputs` describe.
///
/// The image aspect is chosen when the snapshot carries image dimensions;
/// otherwise the same reference falls through to [`resolve`].
#[must_use]
pub fn select(base_url: &Url, inputs: ImageAspectInputs) -> Aspect {
    if inputs.resolved.image.is_some() {
        Aspect::Image(ImageAspect::new(inputs))
    } else {
        resolve(base_url, inputs.resolved.blob_ref)
    }
}
