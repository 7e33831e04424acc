// SPDX-License-Identifier: MPL-2.0
//! State and message handling for the compressor screen.
//!
//! The component owns the whole session: the selected source image, the
//! compression parameters, any pending compression, and the latest result.
//! Side effects (dialogs, background encodes) are returned as [`Effect`]s
//! for the application root to translate into tasks.

use crate::error::Error;
use crate::media::{CompressedImage, OutputFormat, Quality, SourceImage};
use iced::Element;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Timeout before a pending compression is considered stuck. Bumping the
/// request generation afterwards makes a late completion land harmlessly.
pub const COMPRESS_TIMEOUT: Duration = Duration::from_secs(30);

/// Messages produced by the compressor view.
#[derive(Debug, Clone)]
pub enum Message {
    /// User asked to pick a source image (button in the empty state or the
    /// "Change image" affordance).
    OpenFileRequested,
    /// Quality slider moved.
    QualityChanged(f32),
    /// Output format selected from the pick list.
    FormatSelected(OutputFormat),
    /// User pressed "Convert & Compress".
    CompressRequested,
    /// A background compression finished. `generation` is the request token
    /// captured when the task was spawned; stale tokens are discarded.
    CompressFinished {
        generation: u64,
        result: Result<CompressedImage, Error>,
    },
    /// User pressed "Save" on the result.
    SaveRequested,
}

/// Side effects the parent translates into tasks.
#[derive(Debug, Clone)]
pub enum Effect {
    None,
    /// Open the native file picker.
    OpenFileDialog,
    /// Run a compression in the background with the captured inputs.
    StartCompress {
        generation: u64,
        bytes: Arc<Vec<u8>>,
        format: OutputFormat,
        quality: Quality,
    },
    /// Open the save dialog for the given result.
    SaveResult(CompressedImage),
    /// Surface an error message as a toast.
    ShowError(String),
}

/// State for the compressor screen.
#[derive(Debug, Default)]
pub struct State {
    source: Option<SourceImage>,
    quality: Quality,
    format: OutputFormat,
    result: Option<CompressedImage>,
    /// Whether a compression task is in flight.
    is_compressing: bool,
    /// When the in-flight compression started, for timeout detection.
    compress_started_at: Option<Instant>,
    /// Request token; completions carrying an older value are ignored.
    generation: u64,
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the source image.
    ///
    /// The previous source's preview handle is dropped here, and any result
    /// computed against the previous original is cleared with it: its size
    /// ratio would be meaningless against the new file.
    pub fn set_source(&mut self, source: SourceImage) {
        self.source = Some(source);
        self.result = None;
    }

    #[must_use]
    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    #[must_use]
    pub fn result(&self) -> Option<&CompressedImage> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    #[must_use]
    pub fn quality(&self) -> Quality {
        self.quality
    }

    #[must_use]
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    #[must_use]
    pub fn is_compressing(&self) -> bool {
        self.is_compressing
    }

    /// Checks whether the in-flight compression has exceeded
    /// [`COMPRESS_TIMEOUT`]. If so, clears the pending state and bumps the
    /// generation so the late completion is discarded. Returns `true` when a
    /// timeout was detected, so the caller can notify the user.
    pub fn check_compress_timeout(&mut self) -> bool {
        let Some(started_at) = self.compress_started_at else {
            return false;
        };

        if started_at.elapsed() > COMPRESS_TIMEOUT {
            self.generation += 1;
            self.is_compressing = false;
            self.compress_started_at = None;
            return true;
        }

        false
    }

    /// Backdates the in-flight start timestamp so timeout paths can be
    /// exercised without waiting.
    #[cfg(test)]
    pub(crate) fn backdate_compress_start(&mut self) {
        self.compress_started_at = Some(Instant::now() - COMPRESS_TIMEOUT * 2);
    }

    /// Handles a message and returns the resulting effect.
    pub fn handle_message(&mut self, message: Message) -> Effect {
        match message {
            Message::OpenFileRequested => Effect::OpenFileDialog,
            Message::QualityChanged(fraction) => {
                self.quality = Quality::new(fraction);
                Effect::None
            }
            Message::FormatSelected(format) => {
                self.format = format;
                Effect::None
            }
            Message::CompressRequested => self.start_compress(),
            Message::CompressFinished { generation, result } => {
                self.finish_compress(generation, result)
            }
            Message::SaveRequested => match &self.result {
                Some(result) => Effect::SaveResult(result.clone()),
                None => Effect::None,
            },
        }
    }

    /// Renders the screen.
    pub fn view(&self) -> Element<'_, Message> {
        super::view::view(self)
    }

    fn start_compress(&mut self) -> Effect {
        // No source selected is a silent no-op, same as triggering the
        // action before picking a file.
        let Some(source) = &self.source else {
            return Effect::None;
        };

        self.generation += 1;
        self.is_compressing = true;
        self.compress_started_at = Some(Instant::now());

        Effect::StartCompress {
            generation: self.generation,
            bytes: source.bytes.clone(),
            format: self.format,
            quality: self.quality,
        }
    }

    fn finish_compress(
        &mut self,
        generation: u64,
        result: Result<CompressedImage, Error>,
    ) -> Effect {
        if generation != self.generation {
            // A newer request (or a timeout) superseded this completion.
            return Effect::None;
        }

        self.is_compressing = false;
        self.compress_started_at = None;

        match result {
            Ok(compressed) => {
                self.result = Some(compressed);
                Effect::None
            }
            Err(err) => Effect::ShowError(format!("Compression failed: {err}")),
        }
    }
}
