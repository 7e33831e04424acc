// SPDX-License-Identifier: MPL-2.0
//! Source image intake: reading a user-selected file and deriving its
//! preview handle.

use crate::error::{Error, Result};
use iced::widget::image;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The user-selected image as it was read from disk.
///
/// The raw encoded bytes are kept around for the compression step; the
/// preview `handle` lets Iced decode and render them directly. Replacing a
/// `SourceImage` drops the previous handle, which releases its backing
/// texture — there is no separate revocation step.
#[derive(Debug, Clone)]
pub struct SourceImage {
    /// Where the file came from (used for the window title).
    pub path: PathBuf,
    /// Raw encoded file content (shared reference to avoid expensive clones).
    pub bytes: Arc<Vec<u8>>,
    /// File size in bytes, as reported in the "Original Size" line.
    pub size_bytes: u64,
    /// Display handle for the preview image.
    pub handle: image::Handle,
}

impl SourceImage {
    /// Returns the file name component of the source path, if displayable.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }
}

/// Reads the selected file and builds a [`SourceImage`] from it.
///
/// No format validation happens here: the file dialog's filter is a hint,
/// and a non-image file is only rejected later when the compression step
/// tries to decode it.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read.
pub fn load_source<P: AsRef<Path>>(path: P) -> Result<SourceImage> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| Error::Io(e.to_string()))?;
    let size_bytes = bytes.len() as u64;
    let bytes = Arc::new(bytes);
    let handle = image::Handle::from_bytes((*bytes).clone());

    Ok(SourceImage {
        path: path.to_path_buf(),
        bytes,
        size_bytes,
        handle,
    })
}
