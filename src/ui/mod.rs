// SPDX-License-Identifier: MPL-2.0
//! User interface components, following the Elm-style "state down, messages
//! up" pattern: each component owns its state, handles its messages and
//! returns effects for the host to perform.
//!
//! - [`detail`] - Image detail view (layout, load state, sidebar)
//! - [`blob_frame`] - Raw content surface of blob aspects
//! - [`widgets`] - Custom Iced widgets (spinner)
//! - [`design_tokens`] - Design system constants

pub mod blob_frame;
pub mod design_tokens;
pub mod detail;
pub mod widgets;
