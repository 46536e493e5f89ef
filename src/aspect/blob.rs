// SPDX-License-Identifier: MPL-2.0
//! Raw blob presentation.

use crate::domain::ContentReference;
use iced::Size;
use reqwest::Url;
use std::sync::atomic::{AtomicU64, Ordering};

/// Query parameter carrying the reference on raw-content URLs.
pub const REFERENCE_PARAM: &str = "b";

/// Query parameter defeating intermediate caches.
pub const CACHE_BUSTER_PARAM: &str = "cb";

const CACHE_BUSTER_LEN: usize = 16;

static GENERATION: AtomicU64 = AtomicU64::new(0);

/// Returns a fresh cache-busting token for `reference`.
///
/// Two calls never return the same token within a process, even for the same
/// reference.
#[must_use]
pub fn cache_buster(reference: &ContentReference) -> String {
    let generation = GENERATION.fetch_add(1, Ordering::Relaxed);
    let mut hasher = blake3::Hasher::new();
    hasher.update(reference.as_str().as_bytes());
    hasher.update(&generation.to_le_bytes());
    let hex = hasher.finalize().to_hex();
    hex[..CACHE_BUSTER_LEN].to_string()
}

/// Isolated surface showing the raw bytes behind a reference.
#[derive(Debug, Clone, PartialEq)]
pub struct BlobFrameSpec {
    pub src: Url,
    pub width: f32,
    pub height: f32,
}

impl BlobFrameSpec {
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

#[derive(Debug, Clone)]
pub struct BlobAspect {
    reference: ContentReference,
    src: Url,
}

impl BlobAspect {
    /// Builds the aspect; the frame source gets a fresh cache buster.
    #[must_use]
    pub fn new(base_url: &Url, reference: ContentReference) -> Self {
        let token = cache_buster(&reference);
        let mut src = base_url.clone();
        let kept: Vec<(String, String)> = base_url
            .query_pairs()
            .filter(|(name, _)| name != REFERENCE_PARAM && name != CACHE_BUSTER_PARAM)
            .map(|(name, value)| (name.into_owned(), value.into_owned()))
            .collect();
        src.set_query(None);
        {
            let mut query = src.query_pairs_mut();
            query.append_pair(REFERENCE_PARAM, reference.as_str());
            for (name, value) in &kept {
                query.append_pair(name, value);
            }
            query.append_pair(CACHE_BUSTER_PARAM, &token);
        }

        Self { reference, src }
    }

    #[must_use]
    pub fn title(&self) -> &'static str {
        "Blob"
    }

    #[must_use]
    pub fn reference(&self) -> &ContentReference {
        &self.reference
    }

    /// The frame for `size`. Resizing keeps the same source.
    #[must_use]
    pub fn content(&self, size: Size) -> BlobFrameSpec {
        BlobFrameSpec {
            src: self.src.clone(),
            width: size.width.max(0.0),
            height: size.height.max(0.0),
        }
    }
}
