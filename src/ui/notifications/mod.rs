// SPDX-License-Identifier: MPL-2.0
//! Toast notification system for user feedback.
//!
//! Notifications carry a plain message and a severity; the [`Manager`]
//! handles queuing and auto-dismiss, and [`Toast`] renders the visible ones
//! as an overlay in the bottom-right corner.

mod manager;
mod notification;
mod toast;

pub use manager::{Manager, Message};
pub use notification::{Notification, NotificationId, Severity};
pub use toast::Toast;
