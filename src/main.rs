// SPDX-License-Identifier: MPL-2.0
//! Binary entry point: parses CLI arguments into [`Flags`] and starts the
//! application loop.

use iced_press::app::{self, Flags};

fn main() -> iced::Result {
    let mut args = pico_args::Arguments::from_env();

    let flags = Flags {
        file_path: args
            .finish()
            .into_iter()
            .next()
            .and_then(|s| s.into_string().ok()),
    };

    app::run(flags)
}
