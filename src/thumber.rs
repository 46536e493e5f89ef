// SPDX-License-Identifier: MPL-2.0
//! Thumbnail URL selection.
//!
//! A [`Thumber`] is built once per displayed reference and answers "which
//! thumbnail URL should be fetched for this render height". Heights are
//! bucketed so that small resizes keep hitting the same server-side cache
//! entry, and never exceed the natural height of the image.

use crate::domain::{ImageDimensions, ResolvedMetadata};
use crate::error::{Error, Result};
use reqwest::Url;

/// Height buckets the thumbnail server is asked for.
pub const SIZE_BUCKETS: [u32; 9] = [64, 128, 256, 375, 500, 750, 1000, 1500, 2000];

const DEFAULT_FILE_NAME: &str = "image";

/// Yields an image URL for a requested render height.
pub trait ThumbnailSource {
    fn source_for(&self, height: f32) -> Url;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Thumber {
    path: Url,
    natural: Option<ImageDimensions>,
    version: u32,
}

impl Thumber {
    /// Builds the thumbnail source for the object described by `meta`.
    ///
    /// Fails only when `base` cannot carry a path (e.g. `mailto:`).
    pub fn from_metadata(base: &Url, meta: &ResolvedMetadata, version: u32) -> Result<Self> {
        let mut path = base.clone();
        path.set_query(None);
        path.set_fragment(None);
        {
            let mut segments = path
                .path_segments_mut()
                .map_err(|()| Error::Config(format!("URL cannot be a base: {}", base)))?;
            segments
                .pop_if_empty()
                .push("thumbnail")
                .push(meta.blob_ref.as_str())
                .push(meta.file_name().unwrap_or(DEFAULT_FILE_NAME));
        }

        Ok(Self {
            path,
            natural: meta.image,
            version,
        })
    }

    /// Bucket used for `height`.
    #[must_use]
    pub fn bucket_for(&self, height: f32) -> u32 {
        bucket_for(height, self.natural.map(|dims| dims.height))
    }
}

impl ThumbnailSource for Thumber {
    fn source_for(&self, height: f32) -> Url {
        let mut url = self.path.clone();
        url.query_pairs_mut()
            .clear()
            .append_pair("mh", &self.bucket_for(height).to_string())
            .append_pair("tv", &self.version.to_string());
        url
    }
}

/// Smallest bucket at least `height` tall, capped at `natural_height`.
#[must_use]
pub fn bucket_for(height: f32, natural_height: Option<u32>) -> u32 {
    let wanted = if height.is_finite() && height > 0.0 {
        height.ceil() as u32
    } else {
        0
    };
    let bucket = SIZE_BUCKETS
        .iter()
        .copied()
        .find(|bucket| *bucket >= wanted)
        .unwrap_or(SIZE_BUCKETS[SIZE_BUCKETS.len() - 1]);

    match natural_height {
        Some(natural) if natural > 0 => bucket.min(natural),
        _ => bucket,
    }
}
