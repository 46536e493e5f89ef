// SPDX-License-Identifier: MPL-2.0
//! UI domain types.
//!
//! Value objects for the detail view that do not depend on Iced.

pub mod newtypes;

pub use newtypes::{FrameInterval, SidebarFraction};
