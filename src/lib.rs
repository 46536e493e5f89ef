// SPDX-License-Identifier: MPL-2.0
//! `blob_lens` shows a single content-addressed object from a blob server,
//! built with the Iced GUI framework.
//!
//! Images get a detail view: a fitted thumbnail with an animated loading
//! placeholder and a metadata sidebar. Any other object falls back to a raw
//! blob frame. Labels are localized with Fluent and the layout is tuned
//! through a TOML settings file.

pub mod app;
pub mod aspect;
pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod media;
pub mod thumber;
pub mod ui;

#[cfg(test)]
mod test_utils;
