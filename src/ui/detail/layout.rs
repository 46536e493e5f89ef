// SPDX-License-Identifier: MPL-2.0
//! Geometry of the image detail view.
//!
//! The view is split into a main area and a right-hand sidebar. The image is
//! scaled down (never up) to fit the main area minus a margin, and both the
//! image and the loading placeholder are centered in the main area. Nothing
//! here is cached: geometry is recomputed for every layout pass.

use crate::config::{
    Config, DEFAULT_IMAGE_MARGIN, DEFAULT_SIDEBAR_MIN_WIDTH, DEFAULT_SPRITE_HEIGHT,
    DEFAULT_SPRITE_WIDTH,
};
use crate::domain::ui::SidebarFraction;
use crate::domain::ImageDimensions;
use iced::Size;

/// Tunables of the detail layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutSettings {
    pub sidebar_min_width: f32,
    pub sidebar_fraction: SidebarFraction,
    pub image_margin: f32,
    pub placeholder_size: Size,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            sidebar_min_width: DEFAULT_SIDEBAR_MIN_WIDTH,
            sidebar_fraction: SidebarFraction::default(),
            image_margin: DEFAULT_IMAGE_MARGIN,
            placeholder_size: Size::new(DEFAULT_SPRITE_WIDTH as f32, DEFAULT_SPRITE_HEIGHT as f32),
        }
    }
}

impl LayoutSettings {
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let placeholder_width = config
            .placeholder
            .sprite_width
            .unwrap_or(DEFAULT_SPRITE_WIDTH);
        let placeholder_height = config
            .placeholder
            .sprite_height
            .unwrap_or(DEFAULT_SPRITE_HEIGHT);

        Self {
            sidebar_min_width: config.sidebar_min_width(),
            sidebar_fraction: config.sidebar_fraction(),
            image_margin: config.image_margin(),
            placeholder_size: Size::new(placeholder_width as f32, placeholder_height as f32),
        }
    }

    /// `max(fraction × width, min_width)`.
    #[must_use]
    pub fn sidebar_width(&self, width: f32) -> f32 {
        (width * self.sidebar_fraction.value()).max(self.sidebar_min_width)
    }
}

/// Absolute position of an element inside the main area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub top: f32,
    pub left: f32,
    pub width: f32,
    pub height: f32,
}

impl Placement {
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Largest size with the aspect ratio of `natural` that fits `available`.
///
/// Returns `natural` unchanged when it already fits.
#[must_use]
pub fn scale_to_fit(natural: Size, available: Size) -> Size {
    let available = Size::new(available.width.max(0.0), available.height.max(0.0));
    if natural.width <= available.width && natural.height <= available.height {
        return natural;
    }
    let scale = (available.width / natural.width).min(available.height / natural.height);
    Size::new(natural.width * scale, natural.height * scale)
}

/// Centers an element of size `element` in an area of size `area`.
///
/// Offsets may be negative when the element is larger than the area. The
/// view cannot draw at negative offsets and pins such an element to the
/// top-left corner of the area.
#[must_use]
pub fn centered(element: Size, area: Size) -> Placement {
    Placement {
        top: (area.height - element.height) / 2.0,
        left: (area.width - element.width) / 2.0,
        width: element.width,
        height: element.height,
    }
}

/// Derived geometry for one allotted size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutGeometry {
    pub sidebar_width: f32,
    /// Main area, `width − sidebar` by the allotted height.
    pub main: Size,
    /// Present only when the image dimensions are known.
    pub image: Option<Placement>,
    pub placeholder: Placement,
}

impl LayoutGeometry {
    #[must_use]
    pub fn compute(
        settings: &LayoutSettings,
        allotted: Size,
        dimensions: Option<ImageDimensions>,
    ) -> Self {
        let sidebar_width = settings.sidebar_width(allotted.width);
        let main = Size::new(allotted.width - sidebar_width, allotted.height);

        let margin = settings.image_margin * 2.0;
        let available = Size::new(main.width - margin, main.height - margin);

        let image = dimensions.map(|dims| {
            let natural = Size::new(dims.width as f32, dims.height as f32);
            centered(scale_to_fit(natural, available), main)
        });

        Self {
            sidebar_width,
            main,
            image,
            placeholder: centered(settings.placeholder_size, main),
        }
    }

    /// Height the thumbnail should be fetched for.
    #[must_use]
    pub fn render_height(&self) -> Option<f32> {
        self.image.map(|placement| placement.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    fn dims(width: u32, height: u32) -> Option<ImageDimensions> {
        Some(ImageDimensions { width, height })
    }

    #[test]
    fn sidebar_has_minimum_width() {
        let settings = LayoutSettings::default();
        assert_abs_diff_eq!(settings.sidebar_width(1000.0), 300.0);
        assert_abs_diff_eq!(settings.sidebar_width(0.0), 300.0);
    }

    #[test]
    fn sidebar_grows_with_width() {
        let settings = LayoutSettings::default();
        assert_abs_diff_eq!(settings.sidebar_width(2000.0), 400.0, epsilon = 1e-3);
    }

    #[test]
    fn reference_scenario_scales_to_available_width() {
        let geometry = LayoutGeometry::compute(
            &LayoutSettings::default(),
            Size::new(1200.0, 800.0),
            dims(2000, 1500),
        );
        let image = geometry.image.unwrap();

        assert_abs_diff_eq!(geometry.sidebar_width, 300.0);
        assert_abs_diff_eq!(geometry.main.width, 900.0);
        assert_abs_diff_eq!(image.width, 860.0, epsilon = 1e-3);
        assert_abs_diff_eq!(image.height, 645.0, epsilon = 1e-3);
        assert_abs_diff_eq!(image.left, 20.0, epsilon = 1e-3);
        assert_abs_diff_eq!(image.top, 77.5, epsilon = 1e-3);
    }

    #[test]
    fn small_image_keeps_natural_size() {
        let geometry = LayoutGeometry::compute(
            &LayoutSettings::default(),
            Size::new(1200.0, 800.0),
            dims(100, 50),
        );
        let image = geometry.image.unwrap();
        assert_eq!(image.size(), Size::new(100.0, 50.0));
        assert_abs_diff_eq!(image.left, 400.0);
        assert_abs_diff_eq!(image.top, 375.0);
    }

    #[test]
    fn tall_image_is_bound_by_height() {
        let fitted = scale_to_fit(Size::new(500.0, 2000.0), Size::new(860.0, 760.0));
        assert_abs_diff_eq!(fitted.height, 760.0, epsilon = 1e-3);
        assert_abs_diff_eq!(fitted.width, 190.0, epsilon = 1e-3);
    }

    #[test]
    fn scale_to_fit_never_upscales() {
        let natural = Size::new(10.0, 10.0);
        assert_eq!(scale_to_fit(natural, Size::new(1000.0, 1000.0)), natural);
    }

    #[test]
    fn negative_available_clamps_to_zero() {
        let geometry = LayoutGeometry::compute(
            &LayoutSettings::default(),
            Size::new(200.0, 30.0),
            dims(100, 100),
        );
        let image = geometry.image.unwrap();
        assert_abs_diff_eq!(geometry.main.width, -100.0);
        assert_abs_diff_eq!(image.width, 0.0);
        assert_abs_diff_eq!(image.height, 0.0);
    }

    #[test]
    fn placeholder_is_centered_in_main_area() {
        let geometry =
            LayoutGeometry::compute(&LayoutSettings::default(), Size::new(1200.0, 800.0), None);
        assert!(geometry.image.is_none());
        assert_abs_diff_eq!(geometry.placeholder.left, (900.0 - 88.0) / 2.0);
        assert_abs_diff_eq!(geometry.placeholder.top, (800.0 - 62.0) / 2.0);
    }

    #[test]
    fn identical_inputs_give_identical_geometry() {
        let settings = LayoutSettings::default();
        let size = Size::new(1440.0, 900.0);
        assert_eq!(
            LayoutGeometry::compute(&settings, size, dims(4000, 3000)),
            LayoutGeometry::compute(&settings, size, dims(4000, 3000))
        );
    }

    #[test]
    fn settings_follow_config() {
        let mut config = Config::default();
        config.detail.sidebar_min_width = Some(120.0);
        config.detail.image_margin = Some(0.0);
        let settings = LayoutSettings::from_config(&config);
        assert_abs_diff_eq!(settings.sidebar_width(100.0), 120.0);
        assert_abs_diff_eq!(settings.image_margin, 0.0);
    }
}
