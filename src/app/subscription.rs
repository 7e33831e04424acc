// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Two sources feed the update loop from outside the widget tree: window
//! file drops, and a periodic tick that drives notification auto-dismiss
//! and the compression timeout check.

use super::Message;
use iced::{event, time, Subscription};
use std::time::Duration;

/// How often the tick fires while anything is pending.
const TICK_INTERVAL: Duration = Duration::from_millis(200);

/// Listens for files dropped onto the window.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, _status, _window_id| {
        if let event::Event::Window(iced::window::Event::FileDropped(path)) = &event {
            return Some(Message::FileDropped(path.clone()));
        }
        None
    })
}

/// Creates the periodic tick subscription.
///
/// The tick only runs while there is something to time out: visible or
/// queued notifications, or an in-flight compression. An idle application
/// wakes up for nothing.
pub fn create_tick_subscription(
    is_compressing: bool,
    has_notifications: bool,
) -> Subscription<Message> {
    if is_compressing || has_notifications {
        time::every(TICK_INTERVAL).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
