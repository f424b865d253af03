//! Binary codec for droidctl control and device messages.
//!
//! Wire format: there is no common header.  Every message starts with its
//! one-byte opcode followed by a kind-specific payload; variable-length
//! payloads carry an explicit `u32` length prefix.  All multi-byte integers
//! are big-endian.
//!
//! ```text
//! inject keycode  [0][action:1][keycode:4][repeat:4][meta:4]                        14
//! inject text     [1][len:4][utf8:len]                                              5+N
//! inject touch    [2][action:1][pointer:8][x:4][y:4][w:2][h:2][pressure:2]
//!                    [buttons:4][pressure:4]                                        32
//! inject scroll   [3][x:4][y:4][w:2][h:2][hscroll:2][vscroll:2][buttons:4]          21
//! back/screen on  [4][action:1]                                                     2
//! panels          [5] / [6] / [7]                                                   1
//! get clipboard   [8][copy_key:1]                                                   2
//! set clipboard   [9][sequence:8][paste:1][len:4][utf8:len]                         14+N
//! power mode      [10][mode:1]                                                      2
//! rotate          [11]                                                              1
//! ```
//!
//! Device messages use their own opcode space:
//!
//! ```text
//! clipboard       [0][len:4][utf8:len]                                              5+N
//! ack clipboard   [1][sequence:8]                                                   9
//! ```

use thiserror::Error;

use crate::domain::geometry::{Point, Size};
use crate::input::{KeyAction, Keycode, MetaState, MotionAction, MotionButtons};
use crate::protocol::messages::{
    ControlMessage, CopyKey, DeviceMessage, DeviceMessageType, InjectKeycodeMessage,
    MessageType, ScreenPowerMode, ScrollEvent, SetClipboardMessage, TouchEvent,
    DEVICE_ACK_CLIPBOARD_LEN, DEVICE_CLIPBOARD_HEADER_LEN, INJECT_KEYCODE_LEN,
    INJECT_SCROLL_LEN, INJECT_TEXT_HEADER_LEN, INJECT_TOUCH_LEN, SCROLL_SCALE,
    SET_CLIPBOARD_HEADER_LEN,
};

/// Errors that can occur during message encoding or decoding.
#[derive(Debug, Error, PartialEq)]
pub enum ProtocolError {
    /// The byte slice is shorter than the message it starts.
    #[error("insufficient data: need at least {needed} bytes, got {available}")]
    InsufficientData { needed: usize, available: usize },

    /// The opcode byte is not a recognized value.
    #[error("unknown message type: 0x{0:02X}")]
    UnknownMessageType(u8),

    /// The payload could not be parsed (field value out of range, UTF-8 error, etc.).
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// A scroll delta multiplied by the scroll scale does not fit in an `i16`.
    #[error("scroll delta {delta} overflows the 16-bit wire field")]
    ScrollOverflow { delta: i32 },

    /// A text payload is longer than its `u32` length prefix can express.
    #[error("payload of {len} bytes exceeds the u32 length prefix")]
    PayloadTooLarge { len: usize },
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Encodes a [`ControlMessage`] into its exact wire bytes.
///
/// Touch events are normalised on the way out: negative coordinates become 0
/// and an [`MotionAction::Up`] event always carries pressure 0.
///
/// # Errors
///
/// Returns [`ProtocolError::ScrollOverflow`] when a scaled scroll delta does
/// not fit in 16 bits, and [`ProtocolError::PayloadTooLarge`] for text that
/// cannot be length-prefixed.
///
/// # Examples
///
/// ```rust
/// use droidctl_core::protocol::{encode_control_message, ControlMessage, ScreenPowerMode};
///
/// let msg = ControlMessage::SetScreenPowerMode { mode: ScreenPowerMode::Off };
/// assert_eq!(encode_control_message(&msg).unwrap(), vec![10, 0]);
/// ```
pub fn encode_control_message(msg: &ControlMessage) -> Result<Vec<u8>, ProtocolError> {
    let mut buf = Vec::with_capacity(encoded_len_hint(msg));
    buf.push(msg.message_type() as u8);
    match msg {
        ControlMessage::InjectKeycode(m) => encode_keycode(&mut buf, m),
        ControlMessage::InjectText(text) => write_length_prefixed_text(&mut buf, text)?,
        ControlMessage::InjectTouch(m) => encode_touch(&mut buf, m),
        ControlMessage::InjectScroll(m) => encode_scroll(&mut buf, m)?,
        ControlMessage::BackOrScreenOn { action } => buf.push(*action as u8),
        ControlMessage::ExpandNotificationPanel
        | ControlMessage::ExpandSettingsPanel
        | ControlMessage::CollapsePanels
        | ControlMessage::RotateDevice => {} // opcode only
        ControlMessage::GetClipboard { copy_key } => buf.push(*copy_key as u8),
        ControlMessage::SetClipboard(m) => encode_set_clipboard(&mut buf, m)?,
        ControlMessage::SetScreenPowerMode { mode } => buf.push(*mode as u8),
    }
    Ok(buf)
}

/// Decodes one [`ControlMessage`] from the beginning of `bytes`.
///
/// Production code only ever encodes control messages; this is the other
/// half used by simulated device peers and diagnostics.  Returns the message
/// and the number of bytes consumed.
///
/// # Errors
///
/// Returns [`ProtocolError`] if the bytes are truncated or malformed.
pub fn decode_control_message(bytes: &[u8]) -> Result<(ControlMessage, usize), ProtocolError> {
    let opcode = *bytes.first().ok_or(ProtocolError::InsufficientData {
        needed: 1,
        available: 0,
    })?;
    let msg_type =
        MessageType::try_from(opcode).map_err(|_| ProtocolError::UnknownMessageType(opcode))?;

    let p = &bytes[1..];
    let (msg, payload_len) = match msg_type {
        MessageType::InjectKeycode => (
            ControlMessage::InjectKeycode(decode_keycode(p)?),
            INJECT_KEYCODE_LEN - 1,
        ),
        MessageType::InjectText => {
            let (text, end) = read_length_prefixed_text(p, 0)?;
            (ControlMessage::InjectText(text), end)
        }
        MessageType::InjectTouchEvent => (
            ControlMessage::InjectTouch(decode_touch(p)?),
            INJECT_TOUCH_LEN - 1,
        ),
        MessageType::InjectScrollEvent => (
            ControlMessage::InjectScroll(decode_scroll(p)?),
            INJECT_SCROLL_LEN - 1,
        ),
        MessageType::BackOrScreenOn => {
            let raw = read_u8(p, 0)?;
            let action = KeyAction::try_from(raw)
                .map_err(|_| ProtocolError::MalformedPayload(format!("unknown key action: {raw}")))?;
            (ControlMessage::BackOrScreenOn { action }, 1)
        }
        MessageType::ExpandNotificationPanel => (ControlMessage::ExpandNotificationPanel, 0),
        MessageType::ExpandSettingsPanel => (ControlMessage::ExpandSettingsPanel, 0),
        MessageType::CollapsePanels => (ControlMessage::CollapsePanels, 0),
        MessageType::GetClipboard => {
            let raw = read_u8(p, 0)?;
            let copy_key = CopyKey::try_from(raw)
                .map_err(|_| ProtocolError::MalformedPayload(format!("unknown copy key: {raw}")))?;
            (ControlMessage::GetClipboard { copy_key }, 1)
        }
        MessageType::SetClipboard => {
            let (m, end) = decode_set_clipboard(p)?;
            (ControlMessage::SetClipboard(m), end)
        }
        MessageType::SetScreenPowerMode => {
            let raw = read_u8(p, 0)?;
            let mode = ScreenPowerMode::try_from(raw)
                .map_err(|_| ProtocolError::MalformedPayload(format!("unknown power mode: {raw}")))?;
            (ControlMessage::SetScreenPowerMode { mode }, 1)
        }
        MessageType::RotateDevice => (ControlMessage::RotateDevice, 0),
    };
    Ok((msg, 1 + payload_len))
}

/// Encodes a [`DeviceMessage`] the way the device-side server sends it.
///
/// # Errors
///
/// Returns [`ProtocolError::PayloadTooLarge`] for clipboard text that cannot
/// be length-prefixed.
pub fn encode_device_message(msg: &DeviceMessage) -> Result<Vec<u8>, ProtocolError> {
    let mut buf = Vec::new();
    buf.push(msg.message_type() as u8);
    match msg {
        DeviceMessage::Clipboard { text } => write_length_prefixed_text(&mut buf, text)?,
        DeviceMessage::AckClipboard { sequence } => buf.extend_from_slice(&sequence.to_be_bytes()),
    }
    Ok(buf)
}

/// Decodes one [`DeviceMessage`] from the beginning of `bytes`.
///
/// Returns the message and the number of bytes consumed.
///
/// # Errors
///
/// Returns [`ProtocolError`] if the bytes are truncated or malformed.
///
/// # Examples
///
/// ```rust
/// use droidctl_core::protocol::{decode_device_message, DeviceMessage};
///
/// let bytes = [1, 0, 0, 0, 0, 0, 0, 0, 7];
/// let (msg, n) = decode_device_message(&bytes).unwrap();
/// assert_eq!(msg, DeviceMessage::AckClipboard { sequence: 7 });
/// assert_eq!(n, 9);
/// ```
pub fn decode_device_message(bytes: &[u8]) -> Result<(DeviceMessage, usize), ProtocolError> {
    let opcode = *bytes.first().ok_or(ProtocolError::InsufficientData {
        needed: 1,
        available: 0,
    })?;
    let msg_type = DeviceMessageType::try_from(opcode)
        .map_err(|_| ProtocolError::UnknownMessageType(opcode))?;
    let p = &bytes[1..];
    match msg_type {
        DeviceMessageType::Clipboard => {
            let (text, end) = read_length_prefixed_text(p, 0)?;
            Ok((DeviceMessage::Clipboard { text }, 1 + end))
        }
        DeviceMessageType::AckClipboard => {
            let sequence = read_u64(p, 0)?;
            Ok((DeviceMessage::AckClipboard { sequence }, DEVICE_ACK_CLIPBOARD_LEN))
        }
    }
}

/// Parses the 5-byte header of a device clipboard message and returns the
/// length of the text that follows it.
///
/// # Errors
///
/// Returns [`ProtocolError::UnknownMessageType`] if the opcode is not the
/// clipboard opcode, or [`ProtocolError::InsufficientData`] for a short header.
pub fn decode_clipboard_header(header: &[u8]) -> Result<usize, ProtocolError> {
    if header.len() < DEVICE_CLIPBOARD_HEADER_LEN {
        return Err(ProtocolError::InsufficientData {
            needed: DEVICE_CLIPBOARD_HEADER_LEN,
            available: header.len(),
        });
    }
    if header[0] != DeviceMessageType::Clipboard as u8 {
        return Err(ProtocolError::UnknownMessageType(header[0]));
    }
    Ok(read_u32(header, 1)? as usize)
}

// ── Per-message encode helpers ────────────────────────────────────────────────

fn encoded_len_hint(msg: &ControlMessage) -> usize {
    match msg {
        ControlMessage::InjectKeycode(_) => INJECT_KEYCODE_LEN,
        ControlMessage::InjectText(text) => INJECT_TEXT_HEADER_LEN + text.len(),
        ControlMessage::InjectTouch(_) => INJECT_TOUCH_LEN,
        ControlMessage::InjectScroll(_) => INJECT_SCROLL_LEN,
        ControlMessage::SetClipboard(m) => SET_CLIPBOARD_HEADER_LEN + m.text.len(),
        _ => 2,
    }
}

fn encode_keycode(buf: &mut Vec<u8>, m: &InjectKeycodeMessage) {
    buf.push(m.action as u8);
    buf.extend_from_slice(&m.keycode.0.to_be_bytes());
    buf.extend_from_slice(&m.repeat.to_be_bytes());
    buf.extend_from_slice(&m.meta_state.0.to_be_bytes());
}

fn encode_touch(buf: &mut Vec<u8>, m: &TouchEvent) {
    let pressure = if m.action == MotionAction::Up { 0 } else { m.pressure };
    let position = m.position.floored();
    buf.push(m.action as u8);
    buf.extend_from_slice(&m.pointer_id.to_be_bytes());
    buf.extend_from_slice(&position.x.to_be_bytes());
    buf.extend_from_slice(&position.y.to_be_bytes());
    buf.extend_from_slice(&m.surface.width.to_be_bytes());
    buf.extend_from_slice(&m.surface.height.to_be_bytes());
    buf.extend_from_slice(&pressure.to_be_bytes());
    buf.extend_from_slice(&m.buttons.0.to_be_bytes());
    // The device reads this slot as the action button; it has always carried
    // the pressure value and peers depend on that shape.
    buf.extend_from_slice(&i32::from(pressure).to_be_bytes());
}

fn encode_scroll(buf: &mut Vec<u8>, m: &ScrollEvent) -> Result<(), ProtocolError> {
    let position = m.position.floored();
    let h_scroll = scale_scroll(m.h_scroll)?;
    let v_scroll = scale_scroll(m.v_scroll)?;
    buf.extend_from_slice(&position.x.to_be_bytes());
    buf.extend_from_slice(&position.y.to_be_bytes());
    buf.extend_from_slice(&m.surface.width.to_be_bytes());
    buf.extend_from_slice(&m.surface.height.to_be_bytes());
    buf.extend_from_slice(&h_scroll.to_be_bytes());
    buf.extend_from_slice(&v_scroll.to_be_bytes());
    buf.extend_from_slice(&m.buttons.0.to_be_bytes());
    Ok(())
}

fn scale_scroll(delta: i32) -> Result<i16, ProtocolError> {
    delta
        .checked_mul(SCROLL_SCALE)
        .and_then(|scaled| i16::try_from(scaled).ok())
        .ok_or(ProtocolError::ScrollOverflow { delta })
}

fn encode_set_clipboard(buf: &mut Vec<u8>, m: &SetClipboardMessage) -> Result<(), ProtocolError> {
    buf.extend_from_slice(&m.sequence.to_be_bytes());
    buf.push(u8::from(m.paste));
    write_length_prefixed_text(buf, &m.text)
}

// ── Per-message decode helpers ────────────────────────────────────────────────

fn decode_keycode(p: &[u8]) -> Result<InjectKeycodeMessage, ProtocolError> {
    let raw = read_u8(p, 0)?;
    let action = KeyAction::try_from(raw)
        .map_err(|_| ProtocolError::MalformedPayload(format!("unknown key action: {raw}")))?;
    Ok(InjectKeycodeMessage {
        action,
        keycode: Keycode(read_i32(p, 1)?),
        repeat: read_i32(p, 5)?,
        meta_state: MetaState(read_i32(p, 9)?),
    })
}

fn decode_touch(p: &[u8]) -> Result<TouchEvent, ProtocolError> {
    // 1 + 8 + 4 + 4 + 2 + 2 + 2 + 4 + 4 = 31
    let raw = read_u8(p, 0)?;
    let action = MotionAction::try_from(raw)
        .map_err(|_| ProtocolError::MalformedPayload(format!("unknown motion action: {raw}")))?;
    let pointer_id = i64::from_be_bytes(read_array(p, 1)?);
    let position = Point::new(read_i32(p, 9)?, read_i32(p, 13)?);
    let surface = Size::new(read_u16(p, 17)?, read_u16(p, 19)?);
    let pressure = read_u16(p, 21)?;
    let buttons = MotionButtons(read_i32(p, 23)?);
    read_i32(p, 27)?; // trailing pressure copy
    Ok(TouchEvent {
        action,
        pointer_id,
        position,
        surface,
        pressure,
        buttons,
    })
}

fn decode_scroll(p: &[u8]) -> Result<ScrollEvent, ProtocolError> {
    // 4 + 4 + 2 + 2 + 2 + 2 + 4 = 20
    let position = Point::new(read_i32(p, 0)?, read_i32(p, 4)?);
    let surface = Size::new(read_u16(p, 8)?, read_u16(p, 10)?);
    let h_scroll = unscale_scroll(i16::from_be_bytes(read_array(p, 12)?))?;
    let v_scroll = unscale_scroll(i16::from_be_bytes(read_array(p, 14)?))?;
    let buttons = MotionButtons(read_i32(p, 16)?);
    Ok(ScrollEvent {
        position,
        surface,
        h_scroll,
        v_scroll,
        buttons,
    })
}

fn unscale_scroll(raw: i16) -> Result<i32, ProtocolError> {
    let raw = i32::from(raw);
    if raw % SCROLL_SCALE != 0 {
        return Err(ProtocolError::MalformedPayload(format!(
            "scroll value {raw} is not a multiple of {SCROLL_SCALE}"
        )));
    }
    Ok(raw / SCROLL_SCALE)
}

fn decode_set_clipboard(p: &[u8]) -> Result<(SetClipboardMessage, usize), ProtocolError> {
    let sequence = read_u64(p, 0)?;
    let paste = read_u8(p, 8)? != 0;
    let (text, end) = read_length_prefixed_text(p, 9)?;
    Ok((
        SetClipboardMessage {
            sequence,
            paste,
            text,
        },
        end,
    ))
}

// ── Utility helpers ───────────────────────────────────────────────────────────

fn read_array<const N: usize>(buf: &[u8], offset: usize) -> Result<[u8; N], ProtocolError> {
    buf.get(offset..offset + N)
        .and_then(|slice| slice.try_into().ok())
        .ok_or(ProtocolError::InsufficientData {
            needed: offset + N,
            available: buf.len(),
        })
}

fn read_u8(buf: &[u8], offset: usize) -> Result<u8, ProtocolError> {
    read_array::<1>(buf, offset).map(|b| b[0])
}

fn read_u16(buf: &[u8], offset: usize) -> Result<u16, ProtocolError> {
    read_array(buf, offset).map(u16::from_be_bytes)
}

fn read_i32(buf: &[u8], offset: usize) -> Result<i32, ProtocolError> {
    read_array(buf, offset).map(i32::from_be_bytes)
}

fn read_u32(buf: &[u8], offset: usize) -> Result<u32, ProtocolError> {
    read_array(buf, offset).map(u32::from_be_bytes)
}

fn read_u64(buf: &[u8], offset: usize) -> Result<u64, ProtocolError> {
    read_array(buf, offset).map(u64::from_be_bytes)
}

/// Writes a 4-byte length prefix followed by the UTF-8 string bytes.
fn write_length_prefixed_text(buf: &mut Vec<u8>, s: &str) -> Result<(), ProtocolError> {
    let bytes = s.as_bytes();
    let len = u32::try_from(bytes.len())
        .map_err(|_| ProtocolError::PayloadTooLarge { len: bytes.len() })?;
    buf.extend_from_slice(&len.to_be_bytes());
    buf.extend_from_slice(bytes);
    Ok(())
}

/// Reads a 4-byte length prefix and then that many UTF-8 bytes.
/// Returns the string and the offset of the byte after the string.
fn read_length_prefixed_text(buf: &[u8], offset: usize) -> Result<(String, usize), ProtocolError> {
    let len = read_u32(buf, offset)? as usize;
    let start = offset + 4;
    let bytes = buf.get(start..start + len).ok_or(ProtocolError::InsufficientData {
        needed: start + len,
        available: buf.len(),
    })?;
    let s = std::str::from_utf8(bytes)
        .map_err(|e| ProtocolError::MalformedPayload(format!("invalid UTF-8: {e}")))?
        .to_string();
    Ok((s, start + len))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
