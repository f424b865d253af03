//! Android key codes (`AKEYCODE_*`).
//!
//! Android defines several hundred key codes and new ones appear with every
//! platform release, so [`Keycode`] is an open newtype rather than an enum:
//! any value the device understands can be sent, and the commonly used ones
//! are available as named constants.
//!
//! # Examples
//!
//! ```rust
//! use droidctl_core::input::Keycode;
//!
//! assert_eq!(Keycode::HOME.0, 3);
//! assert_eq!(Keycode::A.0, 29);
//! ```

use serde::{Deserialize, Serialize};

/// An Android key code, encoded on the wire as a signed 32-bit integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Keycode(pub i32);

impl Keycode {
    pub const UNKNOWN: Keycode = Keycode(0);
    pub const SOFT_LEFT: Keycode = Keycode(1);
    pub const SOFT_RIGHT: Keycode = Keycode(2);
    pub const HOME: Keycode = Keycode(3);
    pub const BACK: Keycode = Keycode(4);
    pub const CALL: Keycode = Keycode(5);
    pub const ENDCALL: Keycode = Keycode(6);

    // Digits 0–9 (7–16)
    pub const DIGIT_0: Keycode = Keycode(7);
    pub const DIGIT_1: Keycode = Keycode(8);
    pub const DIGIT_2: Keycode = Keycode(9);
    pub const DIGIT_3: Keycode = Keycode(10);
    pub const DIGIT_4: Keycode = Keycode(11);
    pub const DIGIT_5: Keycode = Keycode(12);
    pub const DIGIT_6: Keycode = Keycode(13);
    pub const DIGIT_7: Keycode = Keycode(14);
    pub const DIGIT_8: Keycode = Keycode(15);
    pub const DIGIT_9: Keycode = Keycode(16);

    pub const STAR: Keycode = Keycode(17);
    pub const POUND: Keycode = Keycode(18);
    pub const DPAD_UP: Keycode = Keycode(19);
    pub const DPAD_DOWN: Keycode = Keycode(20);
    pub const DPAD_LEFT: Keycode = Keycode(21);
    pub const DPAD_RIGHT: Keycode = Keycode(22);
    pub const DPAD_CENTER: Keycode = Keycode(23);
    pub const VOLUME_UP: Keycode = Keycode(24);
    pub const VOLUME_DOWN: Keycode = Keycode(25);
    pub const POWER: Keycode = Keycode(26);
    pub const CAMERA: Keycode = Keycode(27);
    pub const CLEAR: Keycode = Keycode(28);

    // Letters A–Z (29–54)
    pub const A: Keycode = Keycode(29);
    pub const Z: Keycode = Keycode(54);

    pub const COMMA: Keycode = Keycode(55);
    pub const PERIOD: Keycode = Keycode(56);
    pub const ALT_LEFT: Keycode = Keycode(57);
    pub const ALT_RIGHT: Keycode = Keycode(58);
    pub const SHIFT_LEFT: Keycode = Keycode(59);
    pub const SHIFT_RIGHT: Keycode = Keycode(60);
    pub const TAB: Keycode = Keycode(61);
    pub const SPACE: Keycode = Keycode(62);
    pub const ENVELOPE: Keycode = Keycode(65);
    pub const ENTER: Keycode = Keycode(66);
    pub const DEL: Keycode = Keycode(67);
    pub const MENU: Keycode = Keycode(82);
    pub const NOTIFICATION: Keycode = Keycode(83);
    pub const SEARCH: Keycode = Keycode(84);
    pub const MEDIA_PLAY_PAUSE: Keycode = Keycode(85);
    pub const MEDIA_STOP: Keycode = Keycode(86);
    pub const MEDIA_NEXT: Keycode = Keycode(87);
    pub const MEDIA_PREVIOUS: Keycode = Keycode(88);
    pub const MUTE: Keycode = Keycode(91);
    pub const PAGE_UP: Keycode = Keycode(92);
    pub const PAGE_DOWN: Keycode = Keycode(93);
    pub const ESCAPE: Keycode = Keycode(111);
    pub const FORWARD_DEL: Keycode = Keycode(112);
    pub const CTRL_LEFT: Keycode = Keycode(113);
    pub const CTRL_RIGHT: Keycode = Keycode(114);
    pub const MOVE_HOME: Keycode = Keycode(122);
    pub const MOVE_END: Keycode = Keycode(123);
    pub const VOLUME_MUTE: Keycode = Keycode(164);
    pub const APP_SWITCH: Keycode = Keycode(187);
    pub const BRIGHTNESS_DOWN: Keycode = Keycode(220);
    pub const BRIGHTNESS_UP: Keycode = Keycode(221);
    pub const SLEEP: Keycode = Keycode(223);
    pub const WAKEUP: Keycode = Keycode(224);
    pub const CUT: Keycode = Keycode(277);
    pub const COPY: Keycode = Keycode(278);
    pub const PASTE: Keycode = Keycode(279);
}

impl From<i32> for Keycode {
    fn from(value: i32) -> Self {
        Keycode(value)
    }
}
