// SPDX-License-Identifier: MPL-2.0
//! Media retrieval and preparation: remote thumbnails and blob bodies, and
//! the sprite sheet of the loading placeholder.

pub mod fetch;
pub mod sprite;

pub use fetch::{
    classify_preview, decode_image, fetch_bytes, fetch_image, fetch_preview, FetchResult,
    FramePreview, LoadedImage,
};
pub use sprite::{SpriteFrames, SpriteSheetLayout};
