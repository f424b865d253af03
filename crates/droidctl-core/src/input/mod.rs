//! Android input constant tables.
//!
//! The values in this module are an external contract with the device-side
//! server, which forwards them untouched to Android's `KeyEvent` and
//! `MotionEvent` APIs.  They are modelled as closed enums or as newtypes with
//! named constants so a caller cannot accidentally pass a key code where a
//! meta state is expected.

pub mod event;
pub mod keycode;

pub use event::{KeyAction, MetaState, MotionAction, MotionButtons};
pub use keycode::Keycode;
