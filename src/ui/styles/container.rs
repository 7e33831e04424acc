// SPDX-License-Identifier: MPL-2.0
//! Centralized container styles.

use crate::ui::design_tokens::{border, radius, shadow};
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

/// The central card that hosts the compressor view.
pub fn card(theme: &Theme) -> container::Style {
    let base = theme.extended_palette().background.base;

    container::Style {
        background: Some(Background::Color(base.color)),
        border: Border {
            color: Color {
                a: 0.3,
                ..theme.extended_palette().background.strong.color
            },
            width: border::WIDTH_SM,
            radius: radius::LG.into(),
        },
        shadow: shadow::MD,
        text_color: Some(theme.palette().text),
        ..Default::default()
    }
}

/// Dashed-border look-alike for the drop target in the empty state.
pub fn drop_zone(theme: &Theme) -> container::Style {
    let accent = theme.extended_palette().primary.base.color;

    container::Style {
        background: Some(Background::Color(Color { a: 0.08, ..accent })),
        border: Border {
            color: Color { a: 0.4, ..accent },
            width: border::WIDTH_MD,
            radius: radius::LG.into(),
        },
        ..Default::default()
    }
}
