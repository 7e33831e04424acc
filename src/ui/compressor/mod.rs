// SPDX-License-Identifier: MPL-2.0
//! The compressor screen: file intake, quality/format controls,
//! compression, and result presentation.

pub mod component;
mod view;

pub use component::{Effect, Message, State};
