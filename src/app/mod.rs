// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration.
//!
//! The `App` struct wires the compressor screen to the notification overlay
//! and translates messages into side effects like file dialogs and disk
//! writes. Policy decisions (window size, tick cadence, dialog filters) stay
//! close to the update loop so user-facing behavior is easy to audit.

mod message;
mod subscription;
mod update;

pub use message::{Flags, Message};

use crate::media;
use crate::ui::compressor;
use crate::ui::notifications::{self, Toast};
use iced::widget::Stack;
use iced::{window, Element, Subscription, Task, Theme};

pub const WINDOW_DEFAULT_WIDTH: u32 = 560;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 760;
pub const MIN_WINDOW_WIDTH: u32 = 480;
pub const MIN_WINDOW_HEIGHT: u32 = 600;

const APP_NAME: &str = "Iced Press";

/// Root Iced application state.
#[derive(Debug, Default)]
pub struct App {
    compressor: compressor::State,
    notifications: notifications::Manager,
}

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce)
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Initializes application state and optionally kicks off asynchronous
    /// loading of the image path received from the launcher.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let app = Self::default();

        let task = match flags.file_path {
            Some(path_str) => {
                let path = std::path::PathBuf::from(path_str);
                Task::perform(
                    async move { media::load_source(&path) },
                    Message::SourceLoaded,
                )
            }
            None => Task::none(),
        };

        (app, task)
    }

    fn title(&self) -> String {
        match self.compressor.source().and_then(media::SourceImage::file_name) {
            Some(name) => format!("{name} - {APP_NAME}"),
            None => APP_NAME.to_owned(),
        }
    }

    fn theme(&self) -> Theme {
        Theme::Light
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_event_subscription(),
            subscription::create_tick_subscription(
                self.compressor.is_compressing(),
                self.notifications.has_notifications(),
            ),
        ])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let mut ctx = update::UpdateContext {
            compressor: &mut self.compressor,
            notifications: &mut self.notifications,
        };
        update::update(&mut ctx, message)
    }

    fn view(&self) -> Element<'_, Message> {
        let screen = self.compressor.view().map(Message::Compressor);
        let toasts = Toast::view_overlay(&self.notifications).map(Message::Notification);

        Stack::new().push(screen).push(toasts).into()
    }
}
