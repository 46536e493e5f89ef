// SPDX-License-Identifier: MPL-2.0
//! Domain layer - pure types with no UI or I/O dependencies beyond parsing.
//!
//! # Modules
//!
//! - [`reference`]: the opaque [`ContentReference`](reference::ContentReference)
//! - [`metadata`]: backend snapshots ([`ResolvedMetadata`](metadata::ResolvedMetadata),
//!   [`PermanodeMetadata`](metadata::PermanodeMetadata))
//! - [`ui`]: UI value objects ([`FrameInterval`](ui::newtypes::FrameInterval),
//!   [`SidebarFraction`](ui::newtypes::SidebarFraction))

pub mod metadata;
pub mod reference;
pub mod ui;

pub use metadata::{
    ContentKind, DirInfo, FileInfo, ImageDimensions, PermanodeMetadata, ResolvedMetadata,
};
pub use reference::ContentReference;
