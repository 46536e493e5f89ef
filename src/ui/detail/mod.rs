// SPDX-License-Identifier: MPL-2.0
//! Image detail view: a centered, scaled-to-fit image with a metadata
//! sidebar and an animated placeholder while the thumbnail loads.

pub mod layout;
pub mod placeholder;
pub mod sidebar;
pub mod state;
pub mod transition;
mod view;

pub use layout::{centered, scale_to_fit, LayoutGeometry, LayoutSettings, Placement};
pub use sidebar::SidebarGroup;
pub use state::{
    derive_view_state, DerivedState, DetailOptions, Effect, ImageDetailView, ImageKey, LoadState,
    Message, ViewInputs,
};
pub use view::{view, ViewContext};
