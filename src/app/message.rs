// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::error::Error;
use crate::media::{CompressedImage, SourceImage};
use crate::ui::compressor;
use crate::ui::notifications;
use std::path::PathBuf;
use std::time::Instant;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Compressor(compressor::Message),
    /// Result from the open file dialog.
    OpenFileDialogResult(Option<PathBuf>),
    /// Result from reading the selected file off disk.
    SourceLoaded(Result<SourceImage, Error>),
    /// A file was dropped on the window.
    FileDropped(PathBuf),
    /// Result from the save dialog; the result bytes ride along so a
    /// cancelled dialog leaves nothing half-saved.
    SaveDialogResult {
        path: Option<PathBuf>,
        result: CompressedImage,
    },
    /// Result from writing the compressed bytes to disk.
    SaveFinished(Result<PathBuf, Error>),
    Notification(notifications::Message),
    /// Periodic tick for notification auto-dismiss and the compression
    /// timeout check.
    Tick(Instant),
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional image path to preload on startup.
    pub file_path: Option<String>,
}
