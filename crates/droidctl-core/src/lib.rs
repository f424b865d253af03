//! # droidctl-core
//!
//! Shared library for droidctl containing the control-message codec, the
//! Android input constant tables, and the swipe motion planner.
//!
//! This crate performs no I/O.  It has no dependency on an async runtime or
//! on sockets; the `droidctl-client` crate owns the connection and uses this
//! crate to turn intents into bytes and bytes back into replies.
//!
//! # Architecture overview
//!
//! droidctl drives an Android device over the control socket of a screen
//! mirroring server.  The client writes small binary *control messages*
//! (inject a key, inject a touch, set the clipboard, ...) and occasionally
//! reads a *device message* back (clipboard contents, clipboard ack).
//!
//! - **`protocol`** – Message types, opcodes, and the big-endian binary codec.
//!   Also provides the sequence counter used to tag clipboard writes.
//!
//! - **`input`** – Closed constant sets mirrored from the Android input
//!   framework: key actions, motion actions, button masks, meta state and
//!   key codes.
//!
//! - **`domain`** – Pure planning logic.  The [`MotionPlan`] turns a single
//!   "drag from A to B" into evenly timed waypoints.

pub mod domain;
pub mod input;
pub mod protocol;

pub use domain::geometry::{Point, Size};
pub use domain::motion::{MotionError, MotionPlan, DEFAULT_SWIPE_UNIT};
pub use input::{Keycode, KeyAction, MetaState, MotionAction, MotionButtons};
pub use protocol::codec::{
    decode_control_message, decode_device_message, encode_control_message, ProtocolError,
};
pub use protocol::messages::{ControlMessage, DeviceMessage};
