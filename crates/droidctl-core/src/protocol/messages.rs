//! All control-protocol message types.
//!
//! *Control messages* travel client → device and are never acknowledged,
//! except for the two clipboard commands.  *Device messages* travel
//! device → client and are only ever replies to those clipboard commands.

use serde::{Deserialize, Serialize};

use crate::domain::geometry::{Point, Size};
use crate::input::{KeyAction, Keycode, MetaState, MotionAction, MotionButtons};

// ── Protocol constants ────────────────────────────────────────────────────────

/// Encoded size of an inject-keycode message.
pub const INJECT_KEYCODE_LEN: usize = 14;

/// Fixed prefix of an inject-text message (opcode + u32 length).
pub const INJECT_TEXT_HEADER_LEN: usize = 5;

/// Encoded size of an inject-touch message.
pub const INJECT_TOUCH_LEN: usize = 32;

/// Encoded size of an inject-scroll message.
pub const INJECT_SCROLL_LEN: usize = 21;

/// Fixed prefix of a set-clipboard message (opcode + sequence + paste + u32 length).
pub const SET_CLIPBOARD_HEADER_LEN: usize = 14;

/// Fixed prefix of a device clipboard message (opcode + u32 length).
pub const DEVICE_CLIPBOARD_HEADER_LEN: usize = 5;

/// Encoded size of a device clipboard acknowledgement (opcode + u64 sequence).
pub const DEVICE_ACK_CLIPBOARD_LEN: usize = 9;

/// Multiplier applied to scroll deltas before narrowing them to `i16`.
pub const SCROLL_SCALE: i32 = 6000;

/// Pointer id reserved for the mouse.
pub const POINTER_ID_MOUSE: i64 = -1;

/// Pointer id for a single finger that is not tracked across gestures.
pub const POINTER_ID_GENERIC_FINGER: i64 = -2;

// ── Message type codes ────────────────────────────────────────────────────────

/// Opcodes of client → device control messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum MessageType {
    InjectKeycode = 0,
    InjectText = 1,
    InjectTouchEvent = 2,
    InjectScrollEvent = 3,
    BackOrScreenOn = 4,
    ExpandNotificationPanel = 5,
    ExpandSettingsPanel = 6,
    CollapsePanels = 7,
    GetClipboard = 8,
    SetClipboard = 9,
    SetScreenPowerMode = 10,
    RotateDevice = 11,
}

impl TryFrom<u8> for MessageType {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, ()> {
        match value {
            0 => Ok(MessageType::InjectKeycode),
            1 => Ok(MessageType::InjectText),
            2 => Ok(MessageType::InjectTouchEvent),
            3 => Ok(MessageType::InjectScrollEvent),
            4 => Ok(MessageType::BackOrScreenOn),
            5 => Ok(MessageType::ExpandNotificationPanel),
            6 => Ok(MessageType::ExpandSettingsPanel),
            7 => Ok(MessageType::CollapsePanels),
            8 => Ok(MessageType::GetClipboard),
            9 => Ok(MessageType::SetClipboard),
            10 => Ok(MessageType::SetScreenPowerMode),
            11 => Ok(MessageType::RotateDevice),
            _ => Err(()),
        }
    }
}

/// Opcodes of device → client messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum DeviceMessageType {
    Clipboard = 0,
    AckClipboard = 1,
}

impl TryFrom<u8> for DeviceMessageType {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, ()> {
        match value {
            0 => Ok(DeviceMessageType::Clipboard),
            1 => Ok(DeviceMessageType::AckClipboard),
            _ => Err(()),
        }
    }
}

// ── Small enumerations ────────────────────────────────────────────────────────

/// Which key the device presses before reading its clipboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum CopyKey {
    None = 0,
    #[default]
    Copy = 1,
    Cut = 2,
}

impl TryFrom<u8> for CopyKey {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(CopyKey::None),
            1 => Ok(CopyKey::Copy),
            2 => Ok(CopyKey::Cut),
            _ => Err(()),
        }
    }
}

/// Display power state requested by a set-screen-power-mode message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum ScreenPowerMode {
    Off = 0,
    #[default]
    Normal = 2,
}

impl TryFrom<u8> for ScreenPowerMode {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ScreenPowerMode::Off),
            2 => Ok(ScreenPowerMode::Normal),
            _ => Err(()),
        }
    }
}

// ── Per-message payload structs ───────────────────────────────────────────────

/// INJECT_KEYCODE (0): press, release or repeat an Android key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InjectKeycodeMessage {
    pub action: KeyAction,
    pub keycode: Keycode,
    /// Number of auto-repeats already delivered for this key.
    pub repeat: i32,
    pub meta_state: MetaState,
}

/// INJECT_TOUCH_EVENT (2): a single touch or mouse pointer event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TouchEvent {
    pub action: MotionAction,
    /// Identifies the contact across a gesture; see [`POINTER_ID_MOUSE`].
    pub pointer_id: i64,
    /// Negative coordinates are floored to 0 when encoding.
    pub position: Point,
    /// Size of the surface the position refers to.
    pub surface: Size,
    /// 0 (released) or 1 (pressed).  Always encoded as 0 for [`MotionAction::Up`].
    pub pressure: u16,
    pub buttons: MotionButtons,
}

impl TouchEvent {
    /// A pressed, primary-button mouse-pointer event at `position`.
    pub fn new(action: MotionAction, position: Point, surface: Size) -> Self {
        Self {
            action,
            pointer_id: POINTER_ID_MOUSE,
            position,
            surface,
            pressure: 1,
            buttons: MotionButtons::primary(),
        }
    }
}

/// INJECT_SCROLL_EVENT (3): wheel scroll at a position.
///
/// The deltas are in notches and are multiplied by [`SCROLL_SCALE`] on the
/// wire, so only values in `-5..=5` are representable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollEvent {
    pub position: Point,
    pub surface: Size,
    pub h_scroll: i32,
    pub v_scroll: i32,
    pub buttons: MotionButtons,
}

/// SET_CLIPBOARD (9): replace the device clipboard, optionally pasting it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetClipboardMessage {
    /// Echoed back by the device in its acknowledgement.
    pub sequence: u64,
    /// Paste into the focused widget after setting the clipboard.
    pub paste: bool,
    pub text: String,
}

// ── Top-level message enums ───────────────────────────────────────────────────

/// A client → device control message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlMessage {
    InjectKeycode(InjectKeycodeMessage),
    InjectText(String),
    InjectTouch(TouchEvent),
    InjectScroll(ScrollEvent),
    BackOrScreenOn { action: KeyAction },
    ExpandNotificationPanel,
    ExpandSettingsPanel,
    CollapsePanels,
    GetClipboard { copy_key: CopyKey },
    SetClipboard(SetClipboardMessage),
    SetScreenPowerMode { mode: ScreenPowerMode },
    RotateDevice,
}

impl ControlMessage {
    /// Returns the [`MessageType`] opcode for this message.
    pub fn message_type(&self) -> MessageType {
        match self {
            ControlMessage::InjectKeycode(_) => MessageType::InjectKeycode,
            ControlMessage::InjectText(_) => MessageType::InjectText,
            ControlMessage::InjectTouch(_) => MessageType::InjectTouchEvent,
            ControlMessage::InjectScroll(_) => MessageType::InjectScrollEvent,
            ControlMessage::BackOrScreenOn { .. } => MessageType::BackOrScreenOn,
            ControlMessage::ExpandNotificationPanel => MessageType::ExpandNotificationPanel,
            ControlMessage::ExpandSettingsPanel => MessageType::ExpandSettingsPanel,
            ControlMessage::CollapsePanels => MessageType::CollapsePanels,
            ControlMessage::GetClipboard { .. } => MessageType::GetClipboard,
            ControlMessage::SetClipboard(_) => MessageType::SetClipboard,
            ControlMessage::SetScreenPowerMode { .. } => MessageType::SetScreenPowerMode,
            ControlMessage::RotateDevice => MessageType::RotateDevice,
        }
    }
}

/// A device → client message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceMessage {
    /// Reply to GET_CLIPBOARD.
    Clipboard { text: String },
    /// Reply to SET_CLIPBOARD carrying the request's sequence.
    AckClipboard { sequence: u64 },
}

impl DeviceMessage {
    pub fn message_type(&self) -> DeviceMessageType {
        match self {
            DeviceMessage::Clipboard { .. } => DeviceMessageType::Clipboard,
            DeviceMessage::AckClipboard { .. } => DeviceMessageType::AckClipboard,
        }
    }
}
