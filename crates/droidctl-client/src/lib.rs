//! droidctl-client library entry point.
//!
//! Owns the connection to a device's control socket and exposes one async
//! operation per control command.
//!
//! The client writes control messages (key presses, touches, text, clipboard
//! updates) and reads back the device's clipboard replies.  Every command
//! goes over the same connection, so the [`ControlChannel`] serializes them:
//! a request that expects a reply holds the channel from the moment it
//! drains stale bytes until it has read its answer.
//!
//! ```no_run
//! # async fn run() -> Result<(), droidctl_client::ControlError> {
//! use droidctl_client::{Controller, ControllerConfig};
//! use droidctl_core::protocol::messages::CopyKey;
//!
//! let config = ControllerConfig::default();
//! let controller = Controller::connect("127.0.0.1:27183".parse().unwrap(), &config).await?;
//! controller.inject_text("hello").await?;
//! let clipboard = controller.get_clipboard(CopyKey::Copy).await?;
//! # let _ = clipboard;
//! # Ok(())
//! # }
//! ```

/// Application layer: the controller and swipe execution.
pub mod application;

/// Infrastructure layer: the synchronized channel and configuration.
pub mod infrastructure;

pub use application::controller::{ControlError, Controller};
pub use infrastructure::channel::ControlChannel;
pub use infrastructure::config::{ConfigError, ControllerConfig};
