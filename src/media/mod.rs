// SPDX-License-Identifier: MPL-2.0
//! Media handling: source image intake, re-encoding, and size formatting.
//!
//! The compression pipeline is deliberately thin: the `image` crate does all
//! of the pixel work (decode, rasterize, encode), and this module only wires
//! those steps together and owns the data types the UI displays.

pub mod codec;
pub mod size_format;
pub mod source;

pub use codec::{compress, CompressedImage, OutputFormat, Quality};
pub use source::{load_source, SourceImage};
