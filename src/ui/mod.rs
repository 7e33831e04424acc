// SPDX-License-Identifier: MPL-2.0
//! User interface components and state management.
//!
//! This module follows a component-based architecture with the Elm-style
//! "state down, messages up" pattern:
//!
//! - [`compressor`] - The single screen: file intake, parameters,
//!   compression, and result presentation
//! - [`notifications`] - Toast notification system for user feedback
//! - [`styles`] - Centralized styling (buttons, containers)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)

pub mod compressor;
pub mod design_tokens;
pub mod notifications;
pub mod styles;
