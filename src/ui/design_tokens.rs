// SPDX-License-Identifier: MPL-2.0
//! Design tokens shared by the detail view widgets.
//!
//! - **Palette**: base colors
//! - **Spacing**: spacing scale (8px grid)
//! - **Typography**: font size scale
//!
//! ```
//! use blob_lens::ui::design_tokens::{palette, spacing};
//!
//! let padding = spacing::MD; // 16px
//! let link = palette::PRIMARY_500;
//! # let _ = (padding, link);
//! ```

// ============================================================================
// Color Palette
// ============================================================================

pub mod palette {
    use iced::Color;

    pub const GRAY_400: Color = Color::from_rgb(0.4, 0.4, 0.4);

    pub const PRIMARY_500: Color = Color::from_rgb(0.3, 0.6, 0.9);

    pub const ERROR_500: Color = Color::from_rgb(0.898, 0.224, 0.208);
}

// ============================================================================
// Spacing Scale
// ============================================================================

pub mod spacing {
    pub const XXS: f32 = 4.0; // 0.5 unit
    pub const XS: f32 = 8.0; // 1 unit
    pub const SM: f32 = 12.0; // 1.5 units
    pub const MD: f32 = 16.0; // 2 units
    pub const LG: f32 = 24.0; // 3 units
}

// ============================================================================
// Typography Scale
// ============================================================================

pub mod typography {
    /// Medium title - permanode title in the sidebar
    pub const TITLE_MD: f32 = 20.0;

    /// Large body - sidebar group headers
    pub const BODY_LG: f32 = 16.0;

    /// Standard body - labels and values
    pub const BODY: f32 = 14.0;

    /// Small body - raw text previews
    pub const BODY_SM: f32 = 13.0;

    /// Caption - truncation notices
    pub const CAPTION: f32 = 12.0;
}

// ============================================================================
// Compile-time Validation
// ============================================================================

const _: () = {
    assert!(spacing::XS > spacing::XXS);
    assert!(spacing::SM > spacing::XS);
    assert!(spacing::MD > spacing::SM);
    assert!(spacing::LG > spacing::MD);

    assert!(typography::TITLE_MD > typography::BODY_LG);
    assert!(typography::BODY_LG > typography::BODY);
    assert!(typography::BODY > typography::BODY_SM);
    assert!(typography::BODY_SM > typography::CAPTION);
};
