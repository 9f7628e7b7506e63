//! Data model and wire types for the notify-link client.

mod activity_event;
mod badge_update;
mod client_frame;
mod connection_options;
mod notification;
mod toast;

pub use activity_event::ActivityEvent;
pub use badge_update::BadgeUpdate;
pub use client_frame::ClientFrame;
pub use connection_options::ConnectionOptions;
pub use notification::Notification;
pub use toast::{Toast, ToastLevel};
