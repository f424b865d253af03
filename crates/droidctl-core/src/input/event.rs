//! Key and motion event actions, button masks, and meta state flags.
//!
//! Values follow `android/input.h` (`AKEY_EVENT_ACTION_*`,
//! `AMOTION_EVENT_ACTION_*`, `AMOTION_EVENT_BUTTON_*`, `AMETA_*`).

use serde::{Deserialize, Serialize};

// ── Key actions ───────────────────────────────────────────────────────────────

/// Action byte of an inject-keycode message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum KeyAction {
    #[default]
    Down = 0,
    Up = 1,
    Multiple = 2,
}

impl TryFrom<u8> for KeyAction {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(KeyAction::Down),
            1 => Ok(KeyAction::Up),
            2 => Ok(KeyAction::Multiple),
            _ => Err(()),
        }
    }
}

// ── Motion actions ────────────────────────────────────────────────────────────

/// Action byte of an inject-touch message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum MotionAction {
    #[default]
    Down = 0,
    Up = 1,
    Move = 2,
    Cancel = 3,
    Outside = 4,
    PointerDown = 5,
    PointerUp = 6,
    HoverMove = 7,
    Scroll = 8,
    HoverEnter = 9,
    HoverExit = 10,
    ButtonPress = 11,
    ButtonRelease = 12,
}

impl TryFrom<u8> for MotionAction {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(MotionAction::Down),
            1 => Ok(MotionAction::Up),
            2 => Ok(MotionAction::Move),
            3 => Ok(MotionAction::Cancel),
            4 => Ok(MotionAction::Outside),
            5 => Ok(MotionAction::PointerDown),
            6 => Ok(MotionAction::PointerUp),
            7 => Ok(MotionAction::HoverMove),
            8 => Ok(MotionAction::Scroll),
            9 => Ok(MotionAction::HoverEnter),
            10 => Ok(MotionAction::HoverExit),
            11 => Ok(MotionAction::ButtonPress),
            12 => Ok(MotionAction::ButtonRelease),
            _ => Err(()),
        }
    }
}

// ── Button mask ───────────────────────────────────────────────────────────────

/// Bitmask of pressed pointer buttons, carried as a signed 32-bit field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MotionButtons(pub i32);

impl MotionButtons {
    pub const PRIMARY: i32 = 1 << 0;
    pub const SECONDARY: i32 = 1 << 1;
    pub const TERTIARY: i32 = 1 << 2;
    pub const BACK: i32 = 1 << 3;
    pub const FORWARD: i32 = 1 << 4;

    /// No button pressed.
    pub const fn none() -> Self {
        Self(0)
    }

    /// Only the primary button pressed; the default for touch injection.
    pub const fn primary() -> Self {
        Self(Self::PRIMARY)
    }
}

impl Default for MotionButtons {
    fn default() -> Self {
        Self::primary()
    }
}

// ── Meta state ────────────────────────────────────────────────────────────────

/// Modifier key state attached to an inject-keycode message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct MetaState(pub i32);

impl MetaState {
    pub const NONE: i32 = 0;
    pub const SHIFT_ON: i32 = 0x01;
    pub const ALT_ON: i32 = 0x02;
    pub const SYM_ON: i32 = 0x04;
    pub const FUNCTION_ON: i32 = 0x08;
    pub const ALT_LEFT_ON: i32 = 0x10;
    pub const ALT_RIGHT_ON: i32 = 0x20;
    pub const SHIFT_LEFT_ON: i32 = 0x40;
    pub const SHIFT_RIGHT_ON: i32 = 0x80;
    pub const CTRL_ON: i32 = 0x1000;
    pub const CTRL_LEFT_ON: i32 = 0x2000;
    pub const CTRL_RIGHT_ON: i32 = 0x4000;
    pub const META_ON: i32 = 0x10000;
    pub const META_LEFT_ON: i32 = 0x20000;
    pub const META_RIGHT_ON: i32 = 0x40000;
    pub const CAPS_LOCK_ON: i32 = 0x10_0000;
    pub const NUM_LOCK_ON: i32 = 0x20_0000;
    pub const SCROLL_LOCK_ON: i32 = 0x40_0000;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_action_try_from_round_trips_known_values() {
        for action in [KeyAction::Down, KeyAction::Up, KeyAction::Multiple] {
            assert_eq!(KeyAction::try_from(action as u8), Ok(action));
        }
    }

    #[test]
    fn test_key_action_try_from_rejects_unknown_value() {
        assert_eq!(KeyAction::try_from(3), Err(()));
    }

    #[test]
    fn test_motion_action_ordinals_match_android() {
        assert_eq!(MotionAction::Down as u8, 0);
        assert_eq!(MotionAction::Up as u8, 1);
        assert_eq!(MotionAction::Move as u8, 2);
        assert_eq!(MotionAction::ButtonRelease as u8, 12);
    }

    #[test]
    fn test_motion_action_try_from_rejects_unknown_value() {
        assert_eq!(MotionAction::try_from(13), Err(()));
    }

    #[test]
    fn test_motion_buttons_default_is_primary() {
        assert_eq!(MotionButtons::default(), MotionButtons(MotionButtons::PRIMARY));
        assert_eq!(MotionButtons::none().0, 0);
    }

    #[test]
    fn test_meta_state_default_is_none() {
        assert_eq!(MetaState::default().0, MetaState::NONE);
    }
}
