//! Infrastructure layer for the client.
//!
//! - **`channel`** – Exclusive owner of the device connection: locked and
//!   unlocked sends, the bounded stale-data drain, and locked
//!   request/response exchanges.
//!
//! - **`config`** – TOML configuration of drain, clipboard and swipe timing.

pub mod channel;
pub mod config;
