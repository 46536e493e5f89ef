// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Window resizes are always routed so the mounted aspect can be laid out
//! again, and close requests so the app can shut down on its own terms. The
//! animation clock only runs while something moves.

use super::Message;
use iced::{event, time, window, Subscription};
use std::time::Duration;

/// Routes window resizes to [`Message::WindowResized`] and close requests
/// to [`Message::Exit`].
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, _status, _window_id| match event {
        event::Event::Window(window::Event::Resized(size)) => Some(Message::WindowResized(size)),
        event::Event::Window(window::Event::CloseRequested) => Some(Message::Exit),
        _ => None,
    })
}

/// Ticks every `interval` while `animating`, nothing otherwise.
pub fn create_tick_subscription(animating: bool, interval: Duration) -> Subscription<Message> {
    if animating {
        time::every(interval).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
