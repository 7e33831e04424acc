// SPDX-License-Identifier: MPL-2.0
//! `iced_press` is a small image compressor built with the Iced GUI framework.
//!
//! It re-encodes a selected image to JPEG, PNG, or WebP at an adjustable
//! quality and reports the size saving, with a toast-based notification
//! overlay for errors and save confirmations.

#![doc(html_root_url = "https://docs.rs/iced_press/0.1.0")]

pub mod app;
pub mod error;
pub mod media;
pub mod ui;
