// SPDX-License-Identifier: MPL-2.0
//! View rendering for the compressor screen.
//!
//! The layout mirrors a single centered card: a drop zone while no image is
//! selected, then preview, parameter controls, and (after a successful run)
//! the result section with its size metrics and save button.

use super::component::{Message, State};
use crate::media::size_format::{compression_ratio, format_size};
use crate::media::OutputFormat;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, pick_list, scrollable, slider, Column, Container, Image, Row, Text};
use iced::{alignment, Color, Element, Length};

use crate::media::codec::{MAX_QUALITY, MIN_QUALITY, QUALITY_STEP};

/// Renders the compressor screen.
pub fn view(state: &State) -> Element<'_, Message> {
    let heading = Text::new("Image Compressor").size(typography::TITLE_LG);

    let mut content = Column::new()
        .spacing(spacing::LG)
        .align_x(alignment::Horizontal::Center)
        .push(heading);

    match state.source() {
        None => {
            content = content.push(empty_state());
        }
        Some(_) => {
            content = content
                .push(preview_section(state))
                .push(controls_section(state));

            if state.is_compressing() {
                content = content.push(
                    Text::new("Compressing…")
                        .size(typography::BODY)
                        .color(palette::GRAY_400),
                );
            }

            if let Some(result_view) = result_section(state) {
                content = content.push(result_view);
            }
        }
    }

    let card = Container::new(content)
        .width(Length::Fixed(sizing::CARD_WIDTH))
        .padding(spacing::XL)
        .style(styles::container::card);

    Container::new(scrollable(card))
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .into()
}

/// Drop zone shown before any image is selected.
fn empty_state() -> Element<'static, Message> {
    let title = Text::new("Drag & drop an image here")
        .size(typography::TITLE_SM)
        .color(palette::GRAY_400);

    let open_button = button(Text::new("Choose an image"))
        .padding([spacing::SM, spacing::LG])
        .style(styles::button::primary)
        .on_press(Message::OpenFileRequested);

    let drop_hint = Text::new("PNG, JPEG, WebP, GIF and BMP are supported")
        .size(typography::CAPTION)
        .color(Color {
            a: 0.5,
            ..palette::GRAY_400
        });

    let inner = Column::new()
        .spacing(spacing::MD)
        .align_x(alignment::Horizontal::Center)
        .push(title)
        .push(open_button)
        .push(drop_hint);

    Container::new(inner)
        .width(Length::Fill)
        .padding(spacing::XL)
        .align_x(alignment::Horizontal::Center)
        .style(styles::container::drop_zone)
        .into()
}

fn preview_section(state: &State) -> Element<'_, Message> {
    // Only called with a source present.
    let Some(source) = state.source() else {
        return Column::new().into();
    };

    let preview = Image::new(source.handle.clone())
        .width(Length::Fixed(sizing::PREVIEW_EDGE))
        .height(Length::Fixed(sizing::PREVIEW_EDGE));

    let size_line = Text::new(format!("Original Size: {}", format_size(source.size_bytes)))
        .size(typography::BODY)
        .color(palette::GRAY_400);

    let change_button = button(Text::new("Change image").size(typography::CAPTION))
        .padding([spacing::XXS, spacing::SM])
        .style(styles::button::primary)
        .on_press(Message::OpenFileRequested);

    Column::new()
        .spacing(spacing::XS)
        .align_x(alignment::Horizontal::Center)
        .push(Text::new("Preview").size(typography::TITLE_SM))
        .push(preview)
        .push(size_line)
        .push(change_button)
        .into()
}

fn controls_section(state: &State) -> Element<'_, Message> {
    let quality_label = Text::new(format!("Quality: {}", state.quality())).size(typography::BODY);

    let quality_slider = slider(
        MIN_QUALITY..=MAX_QUALITY,
        state.quality().fraction(),
        Message::QualityChanged,
    )
    .step(QUALITY_STEP);

    let format_row = Row::new()
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center)
        .push(Text::new("Convert to:").size(typography::BODY))
        .push(pick_list(
            OutputFormat::all(),
            Some(state.format()),
            Message::FormatSelected,
        ));

    // Disabled while a run is in flight; re-triggering would only race it.
    let compress_button = button(
        Text::new("Convert & Compress")
            .width(Length::Fill)
            .align_x(alignment::Horizontal::Center),
    )
    .width(Length::Fill)
    .padding(spacing::SM)
    .style(styles::button::primary)
    .on_press_maybe((!state.is_compressing()).then_some(Message::CompressRequested));

    Column::new()
        .spacing(spacing::MD)
        .push(quality_label)
        .push(quality_slider)
        .push(format_row)
        .push(compress_button)
        .into()
}

fn result_section(state: &State) -> Option<Element<'_, Message>> {
    let source = state.source()?;
    let result = state.result()?;

    let image = Image::new(result.handle.clone())
        .width(Length::Fixed(sizing::PREVIEW_EDGE))
        .height(Length::Fixed(sizing::PREVIEW_EDGE));

    let size_line = Text::new(format!(
        "Compressed Size: {}",
        format_size(result.size_bytes)
    ))
    .size(typography::BODY)
    .color(palette::GRAY_400);

    let mut details = Column::new()
        .spacing(spacing::XS)
        .align_x(alignment::Horizontal::Center)
        .push(Text::new("Compressed Image").size(typography::TITLE_SM))
        .push(image)
        .push(size_line);

    if let Some(ratio) = compression_ratio(source.size_bytes, result.size_bytes) {
        details = details.push(
            Text::new(format!("Compression Ratio: {ratio}"))
                .size(typography::BODY)
                .color(palette::GRAY_400),
        );
    }

    let save_button = button(Text::new("Download"))
        .padding([spacing::SM, spacing::LG])
        .style(styles::button::secondary)
        .on_press(Message::SaveRequested);

    Some(details.push(save_button).into())
}
