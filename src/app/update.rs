// SPDX-License-Identifier: MPL-2.0
//! Message handling for the application.
//!
//! The update loop forwards compressor messages to the component and
//! translates the [`Effect`]s it returns into iced tasks: file dialogs,
//! background encodes, and disk writes all run here.

use super::Message;
use crate::error::{Error, Result};
use crate::media::{self, codec, CompressedImage, OutputFormat, Quality, SourceImage};
use crate::ui::compressor::{self, Effect};
use crate::ui::notifications::{self, Notification};
use iced::Task;
use std::path::PathBuf;
use std::sync::Arc;

/// File dialog filter for image intake. The filter is a convenience, not a
/// gate; intake accepts any readable file.
const OPEN_FILTER_NAME: &str = "Images";
const OPEN_FILTER_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif", "bmp"];

/// Mutable state the update loop operates on.
pub struct UpdateContext<'a> {
    pub compressor: &'a mut compressor::State,
    pub notifications: &'a mut notifications::Manager,
}

/// Handles a top-level message and returns the follow-up task.
pub fn update(ctx: &mut UpdateContext<'_>, message: Message) -> Task<Message> {
    match message {
        Message::Compressor(msg) => {
            let effect = ctx.compressor.handle_message(msg);
            run_effect(ctx, effect)
        }
        Message::OpenFileDialogResult(Some(path)) | Message::FileDropped(path) => {
            load_source_task(path)
        }
        Message::OpenFileDialogResult(None) => Task::none(),
        Message::SourceLoaded(Ok(source)) => {
            ctx.compressor.set_source(source);
            Task::none()
        }
        Message::SourceLoaded(Err(err)) => {
            ctx.notifications
                .push(Notification::error(format!("Could not open file: {err}")));
            Task::none()
        }
        Message::SaveDialogResult {
            path: Some(path),
            result,
        } => write_result_task(path, result),
        Message::SaveDialogResult { path: None, .. } => Task::none(),
        Message::SaveFinished(Ok(path)) => {
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("file")
                .to_owned();
            ctx.notifications
                .push(Notification::success(format!("Saved {name}")));
            Task::none()
        }
        Message::SaveFinished(Err(err)) => {
            ctx.notifications
                .push(Notification::error(format!("Save failed: {err}")));
            Task::none()
        }
        Message::Notification(msg) => {
            ctx.notifications.handle_message(&msg);
            Task::none()
        }
        Message::Tick(_) => {
            ctx.notifications.tick();
            if ctx.compressor.check_compress_timeout() {
                ctx.notifications
                    .push(Notification::error("Compression timed out"));
            }
            Task::none()
        }
    }
}

/// Translates a compressor effect into the task that performs it.
fn run_effect(ctx: &mut UpdateContext<'_>, effect: Effect) -> Task<Message> {
    match effect {
        Effect::None => Task::none(),
        Effect::OpenFileDialog => open_file_dialog_task(),
        Effect::StartCompress {
            generation,
            bytes,
            format,
            quality,
        } => Task::perform(compress_blocking(bytes, format, quality), move |result| {
            Message::Compressor(compressor::Message::CompressFinished { generation, result })
        }),
        Effect::SaveResult(result) => save_dialog_task(result),
        Effect::ShowError(message) => {
            ctx.notifications.push(Notification::error(message));
            Task::none()
        }
    }
}

/// Opens the native file picker for a source image.
fn open_file_dialog_task() -> Task<Message> {
    Task::perform(
        async move {
            rfd::AsyncFileDialog::new()
                .add_filter(OPEN_FILTER_NAME, OPEN_FILTER_EXTENSIONS)
                .pick_file()
                .await
                .map(|h| h.path().to_path_buf())
        },
        Message::OpenFileDialogResult,
    )
}

/// Reads the picked file in the background.
fn load_source_task(path: PathBuf) -> Task<Message> {
    Task::perform(load_source_blocking(path), Message::SourceLoaded)
}

/// Runs the CPU-bound re-encode on the blocking thread pool so it does not
/// occupy an executor thread for the duration of the encode.
async fn compress_blocking(
    bytes: Arc<Vec<u8>>,
    format: OutputFormat,
    quality: Quality,
) -> Result<CompressedImage> {
    tokio::task::spawn_blocking(move || codec::compress(&bytes, format, quality))
        .await
        .map_err(|e| Error::Encode(e.to_string()))?
}

/// Runs the synchronous file read on the blocking thread pool.
async fn load_source_blocking(path: PathBuf) -> Result<SourceImage> {
    tokio::task::spawn_blocking(move || media::load_source(&path))
        .await
        .map_err(|e| Error::Io(e.to_string()))?
}

/// Runs the synchronous file write on the blocking thread pool.
async fn write_result_blocking(path: PathBuf, result: CompressedImage) -> Result<PathBuf> {
    tokio::task::spawn_blocking(move || {
        std::fs::write(&path, result.bytes.as_slice())
            .map(|()| path)
            .map_err(Error::from)
    })
    .await
    .map_err(|e| Error::Io(e.to_string()))?
}

/// Opens the save dialog, pre-filled with the format's default file name.
fn save_dialog_task(result: CompressedImage) -> Task<Message> {
    let file_name = result.default_file_name();
    let filter_name = result.format.to_string();
    let filter_ext = vec![result.format.extension()];

    Task::perform(
        async move {
            rfd::AsyncFileDialog::new()
                .set_file_name(&file_name)
                .add_filter(&filter_name, &filter_ext)
                .save_file()
                .await
                .map(|h| h.path().to_path_buf())
        },
        move |path| Message::SaveDialogResult {
            path,
            result: result.clone(),
        },
    )
}

/// Writes the compressed bytes to the chosen path.
fn write_result_task(path: PathBuf, result: CompressedImage) -> Task<Message> {
    Task::perform(write_result_blocking(path, result), Message::SaveFinished)
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::widget::image::Handle;
    use image_rs::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;
    use std::time::Instant;
    use tempfile::tempdir;

    fn sample_source(size_bytes: usize) -> SourceImage {
        let bytes = Arc::new(vec![0_u8; size_bytes]);
        SourceImage {
            path: PathBuf::from("/photos/dog.png"),
            handle: Handle::from_bytes((*bytes).clone()),
            size_bytes: size_bytes as u64,
            bytes,
        }
    }

    #[test]
    fn source_loaded_installs_the_source() {
        let mut compressor = compressor::State::new();
        let mut notifications = notifications::Manager::new();
        let mut ctx = UpdateContext {
            compressor: &mut compressor,
            notifications: &mut notifications,
        };

        let _ = update(&mut ctx, Message::SourceLoaded(Ok(sample_source(42))));

        assert!(compressor.has_source());
        assert_eq!(compressor.source().unwrap().size_bytes, 42);
        assert!(!notifications.has_notifications());
    }

    #[test]
    fn source_load_failure_surfaces_a_toast() {
        let mut compressor = compressor::State::new();
        let mut notifications = notifications::Manager::new();
        let mut ctx = UpdateContext {
            compressor: &mut compressor,
            notifications: &mut notifications,
        };

        let _ = update(
            &mut ctx,
            Message::SourceLoaded(Err(Error::Io("permission denied".into()))),
        );

        assert!(!compressor.has_source());
        assert_eq!(notifications.visible_count(), 1);
    }

    #[test]
    fn cancelled_open_dialog_changes_nothing() {
        let mut compressor = compressor::State::new();
        let mut notifications = notifications::Manager::new();
        let mut ctx = UpdateContext {
            compressor: &mut compressor,
            notifications: &mut notifications,
        };

        let _ = update(&mut ctx, Message::OpenFileDialogResult(None));

        assert!(!compressor.has_source());
        assert!(!notifications.has_notifications());
    }

    #[test]
    fn failed_compression_effect_becomes_a_toast() {
        let mut compressor = compressor::State::new();
        let mut notifications = notifications::Manager::new();
        compressor.set_source(sample_source(100));

        let mut ctx = UpdateContext {
            compressor: &mut compressor,
            notifications: &mut notifications,
        };
        let _ = update(
            &mut ctx,
            Message::Compressor(compressor::Message::CompressRequested),
        );
        let _ = update(
            &mut ctx,
            Message::Compressor(compressor::Message::CompressFinished {
                generation: 1,
                result: Err(Error::Decode("truncated header".into())),
            }),
        );

        assert_eq!(notifications.visible_count(), 1);
        assert!(!compressor.is_compressing());
    }

    #[test]
    fn save_outcome_is_reported_either_way() {
        let mut compressor = compressor::State::new();
        let mut notifications = notifications::Manager::new();
        let mut ctx = UpdateContext {
            compressor: &mut compressor,
            notifications: &mut notifications,
        };

        let _ = update(
            &mut ctx,
            Message::SaveFinished(Ok(PathBuf::from("/tmp/compressed.jpeg"))),
        );
        let _ = update(
            &mut ctx,
            Message::SaveFinished(Err(Error::Io("read-only filesystem".into()))),
        );

        assert_eq!(notifications.visible_count(), 2);
    }

    #[test]
    fn tick_reports_a_compression_timeout_once() {
        let mut compressor = compressor::State::new();
        let mut notifications = notifications::Manager::new();
        compressor.set_source(sample_source(100));

        let mut ctx = UpdateContext {
            compressor: &mut compressor,
            notifications: &mut notifications,
        };
        let _ = update(
            &mut ctx,
            Message::Compressor(compressor::Message::CompressRequested),
        );
        ctx.compressor.backdate_compress_start();

        let _ = update(&mut ctx, Message::Tick(Instant::now()));
        assert_eq!(ctx.notifications.visible_count(), 1);

        // A later tick with nothing in flight stays quiet.
        let _ = update(&mut ctx, Message::Tick(Instant::now()));
        assert_eq!(notifications.visible_count(), 1);
    }

    fn sample_png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = RgbaImage::from_pixel(width, height, Rgba([60, 60, 180, 255]));
        let mut bytes = Cursor::new(Vec::new());
        image_rs::DynamicImage::ImageRgba8(image)
            .write_to(&mut bytes, ImageFormat::Png)
            .expect("encode sample png");
        bytes.into_inner()
    }

    #[tokio::test]
    async fn compress_runs_off_the_executor_thread() {
        let bytes = Arc::new(sample_png_bytes(6, 6));

        let result = compress_blocking(bytes, OutputFormat::Jpeg, Quality::default())
            .await
            .expect("compress should succeed");

        assert_eq!(result.format, OutputFormat::Jpeg);
        assert!(result.size_bytes > 0);
    }

    #[tokio::test]
    async fn load_and_write_round_trip_off_the_executor_thread() {
        let dir = tempdir().expect("create temp dir");
        let input = dir.path().join("input.png");
        std::fs::write(&input, sample_png_bytes(4, 4)).expect("write input");

        let source = load_source_blocking(input)
            .await
            .expect("load should succeed");
        let compressed = compress_blocking(source.bytes, OutputFormat::Png, Quality::default())
            .await
            .expect("compress should succeed");

        let out = dir.path().join(compressed.default_file_name());
        let written = write_result_blocking(out.clone(), compressed)
            .await
            .expect("write should succeed");

        assert_eq!(written, out);
        assert!(image_rs::open(&out).is_ok());
    }

    #[test]
    fn open_dialog_filter_covers_common_raster_formats() {
        for format in OutputFormat::all() {
            assert!(OPEN_FILTER_EXTENSIONS.contains(&format.extension()));
        }
        assert_eq!(OPEN_FILTER_NAME, "Images");
    }
}
