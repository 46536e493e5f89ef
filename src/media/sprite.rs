// SPDX-License-Identifier: MPL-2.0
//! Sprite-sheet slicing for the loading placeholder.
//!
//! A sheet is a grid of equally sized frames read row by row. Frames are
//! cut once at startup and handed to the placeholder as ready-made image
//! handles, in both walking directions, so that mirroring never happens at
//! draw time.

use crate::config::{
    Config, DEFAULT_SHEET_COLUMNS, DEFAULT_SHEET_ROWS, DEFAULT_SPRITE_HEIGHT,
    DEFAULT_SPRITE_WIDTH,
};
use crate::error::{Error, FetchError, Result};
use iced::widget::image;
use image_rs::{imageops, DynamicImage, GenericImageView, RgbaImage};
use rust_embed::RustEmbed;
use std::fs;
use std::path::Path;

#[derive(RustEmbed)]
#[folder = "assets/sprites/"]
struct SpriteAsset;

/// Walk cycle shipped with the binary, cut with [`SpriteSheetLayout::default`].
const BUNDLED_SHEET: &str = "walk.png";

/// Grid geometry of a sprite sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteSheetLayout {
    pub columns: u32,
    pub rows: u32,
    pub sprite_width: u32,
    pub sprite_height: u32,
}

impl Default for SpriteSheetLayout {
    fn default() -> Self {
        Self {
            columns: DEFAULT_SHEET_COLUMNS,
            rows: DEFAULT_SHEET_ROWS,
            sprite_width: DEFAULT_SPRITE_WIDTH,
            sprite_height: DEFAULT_SPRITE_HEIGHT,
        }
    }
}

impl SpriteSheetLayout {
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let placeholder = &config.placeholder;
        Self {
            columns: placeholder.sheet_columns.unwrap_or(DEFAULT_SHEET_COLUMNS),
            rows: placeholder.sheet_rows.unwrap_or(DEFAULT_SHEET_ROWS),
            sprite_width: placeholder.sprite_width.unwrap_or(DEFAULT_SPRITE_WIDTH),
            sprite_height: placeholder.sprite_height.unwrap_or(DEFAULT_SPRITE_HEIGHT),
        }
    }

    #[must_use]
    pub fn frame_count(&self) -> usize {
        (self.columns as usize) * (self.rows as usize)
    }

    fn validate(&self, sheet_width: u32, sheet_height: u32) -> Result<()> {
        if self.frame_count() == 0 || self.sprite_width == 0 || self.sprite_height == 0 {
            return Err(Error::Config("sprite sheet layout has no frames".into()));
        }
        let needed_width = self.columns.saturating_mul(self.sprite_width);
        let needed_height = self.rows.saturating_mul(self.sprite_height);
        if sheet_width < needed_width || sheet_height < needed_height {
            return Err(Error::Config(format!(
                "sprite sheet is {}x{}, layout needs {}x{}",
                sheet_width, sheet_height, needed_width, needed_height
            )));
        }
        Ok(())
    }
}

/// Frames of a walk cycle, in display order, facing both ways.
#[derive(Debug, Clone)]
pub struct SpriteFrames {
    forward: Vec<image::Handle>,
    backward: Vec<image::Handle>,
    width: u32,
    height: u32,
}

fn to_handle(frame: RgbaImage) -> image::Handle {
    let (w, h) = frame.dimensions();
    image::Handle::from_rgba(w, h, frame.into_raw())
}

impl SpriteFrames {
    /// Cuts `sheet` into frames and their horizontal mirrors.
    pub fn slice(sheet: &DynamicImage, layout: SpriteSheetLayout) -> Result<Self> {
        let frames = slice_rgba(sheet, layout)?;
        let backward = frames
            .iter()
            .map(|frame| to_handle(imageops::flip_horizontal(frame)))
            .collect();
        let forward = frames.into_iter().map(to_handle).collect();

        Ok(Self {
            forward,
            backward,
            width: layout.sprite_width,
            height: layout.sprite_height,
        })
    }

    /// Decodes and slices an encoded sheet (PNG, JPEG, GIF, WebP).
    pub fn from_bytes(bytes: &[u8], layout: SpriteSheetLayout) -> Result<Self> {
        let sheet = image_rs::load_from_memory(bytes).map_err(FetchError::from)?;
        Self::slice(&sheet, layout)
    }

    /// The walk cycle bundled with the binary.
    pub fn bundled() -> Result<Self> {
        let file = SpriteAsset::get(BUNDLED_SHEET).ok_or_else(|| {
            Error::Config(format!("bundled sprite sheet {BUNDLED_SHEET} is missing"))
        })?;
        Self::from_bytes(&file.data, SpriteSheetLayout::default())
    }

    /// Reads and slices the sheet stored at `path`.
    pub fn load(path: &Path, layout: SpriteSheetLayout) -> Result<Self> {
        let bytes = fs::read(path)?;
        Self::from_bytes(&bytes, layout)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Frame `index` of the cycle facing backward when `mirrored` is set,
    /// wrapping around the cycle.
    #[must_use]
    pub fn frame(&self, index: usize, mirrored: bool) -> Option<&image::Handle> {
        let frames = if mirrored {
            &self.backward
        } else {
            &self.forward
        };
        if frames.is_empty() {
            return None;
        }
        frames.get(index % frames.len())
    }

    #[must_use]
    pub fn sprite_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

fn slice_rgba(sheet: &DynamicImage, layout: SpriteSheetLayout) -> Result<Vec<RgbaImage>> {
    let (sheet_width, sheet_height) = sheet.dimensions();
    layout.validate(sheet_width, sheet_height)?;

    let mut frames = Vec::with_capacity(layout.frame_count());
    for row in 0..layout.rows {
        for column in 0..layout.columns {
            frames.push(
                sheet
                    .crop_imm(
                        column * layout.sprite_width,
                        row * layout.sprite_height,
                        layout.sprite_width,
                        layout.sprite_height,
                    )
                    .to_rgba8(),
            );
        }
    }
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::Rgba;
    use tempfile::tempdir;

    fn small_layout() -> SpriteSheetLayout {
        SpriteSheetLayout {
            columns: 3,
            rows: 2,
            sprite_width: 4,
            sprite_height: 2,
        }
    }

    /// Each frame is filled with its own index as red channel; the left
    /// column of every frame is marked green.
    fn sheet(layout: SpriteSheetLayout) -> DynamicImage {
        let width = layout.columns * layout.sprite_width;
        let height = layout.rows * layout.sprite_height;
        let img = RgbaImage::from_fn(width, height, |x, y| {
            let index = (y / layout.sprite_height) * layout.columns + x / layout.sprite_width;
            let green = if x % layout.sprite_width == 0 { 255 } else { 0 };
            Rgba([index as u8, green, 0, 255])
        });
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn layout_reads_placeholder_config() {
        let mut config = Config::default();
        config.placeholder.sheet_columns = Some(4);
        config.placeholder.sprite_height = None;
        let layout = SpriteSheetLayout::from_config(&config);
        assert_eq!(layout.columns, 4);
        assert_eq!(layout.rows, DEFAULT_SHEET_ROWS);
        assert_eq!(layout.sprite_height, DEFAULT_SPRITE_HEIGHT);
    }

    #[test]
    fn default_layout_matches_walk_cycle() {
        let layout = SpriteSheetLayout::default();
        assert_eq!(layout.frame_count(), 24);
        assert_eq!((layout.sprite_width, layout.sprite_height), (88, 62));
    }

    #[test]
    fn frames_are_read_row_major() {
        let layout = small_layout();
        let frames = slice_rgba(&sheet(layout), layout).unwrap();
        assert_eq!(frames.len(), 6);
        for (index, frame) in frames.iter().enumerate() {
            assert_eq!(frame.dimensions(), (4, 2));
            assert_eq!(frame.get_pixel(1, 1)[0], index as u8);
        }
    }

    #[test]
    fn mirrored_frames_are_flipped() {
        let layout = small_layout();
        let frames = slice_rgba(&sheet(layout), layout).unwrap();
        let frame = imageops::flip_horizontal(&frames[0]);
        assert_eq!(frame.get_pixel(3, 0)[1], 255);
        assert_eq!(frame.get_pixel(0, 0)[1], 0);
    }

    #[test]
    fn each_direction_has_its_own_frames() {
        let layout = small_layout();
        let frames = SpriteFrames::slice(&sheet(layout), layout).unwrap();
        assert_ne!(frames.frame(0, false), frames.frame(0, true));
        assert_eq!(frames.frame(1, true), frames.frame(7, true));
    }

    #[test]
    fn undersized_sheet_is_rejected() {
        let layout = small_layout();
        let tiny = DynamicImage::ImageRgba8(RgbaImage::new(5, 5));
        assert!(matches!(
            SpriteFrames::slice(&tiny, layout),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn frame_index_wraps() {
        let layout = small_layout();
        let frames = SpriteFrames::slice(&sheet(layout), layout).unwrap();
        assert_eq!(frames.len(), 6);
        assert!(frames.frame(6, false).is_some());
        assert_eq!(frames.frame(7, false), frames.frame(1, false));
    }

    #[test]
    fn load_reads_sheet_from_disk() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("sheet.png");
        let layout = small_layout();
        sheet(layout).save(&path).expect("failed to write sheet");

        let frames = SpriteFrames::load(&path, layout).unwrap();
        assert_eq!(frames.sprite_size(), (4, 2));
    }

    #[test]
    fn bundled_sheet_has_full_walk_cycle() {
        let frames = SpriteFrames::bundled().expect("bundled sheet should slice");
        assert_eq!(frames.len(), SpriteSheetLayout::default().frame_count());
        assert_eq!(
            frames.sprite_size(),
            (DEFAULT_SPRITE_WIDTH, DEFAULT_SPRITE_HEIGHT)
        );
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let result = SpriteFrames::load(Path::new("/nonexistent/sheet.png"), small_layout());
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
