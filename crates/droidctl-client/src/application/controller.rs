//! Controller: one operation per control command.
//!
//! Each operation builds a [`ControlMessage`], encodes it with the core codec
//! and hands the bytes to the [`ControlChannel`].  Fire-and-forget operations
//! return the exact bytes they wrote.  The two clipboard operations are
//! request/response exchanges: they run under the channel lock and turn a
//! missing or unreadable reply into `None` instead of an error.

use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use droidctl_core::{
    domain::motion::MotionError,
    input::{KeyAction, Keycode, MetaState},
    protocol::{
        decode_clipboard_header, encode_control_message,
        messages::{
            ControlMessage, CopyKey, DeviceMessageType, InjectKeycodeMessage, ScreenPowerMode,
            ScrollEvent, SetClipboardMessage, TouchEvent, DEVICE_ACK_CLIPBOARD_LEN,
            DEVICE_CLIPBOARD_HEADER_LEN,
        },
        ProtocolError, SequenceCounter,
    },
};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::infrastructure::{
    channel::ControlChannel,
    config::{ClipboardConfig, ControllerConfig, SwipeConfig},
};

/// Errors returned by [`Controller`] operations.
#[derive(Debug, Error)]
pub enum ControlError {
    /// Writing to the connection failed.
    #[error("connection I/O error: {0}")]
    Io(#[from] io::Error),
    /// The message could not be encoded; nothing was written.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),
    /// The swipe parameters are invalid; nothing was written.
    #[error("invalid swipe: {0}")]
    Motion(#[from] MotionError),
}

/// Sends control commands to one device over one connection.
pub struct Controller<R, W> {
    channel: ControlChannel<R, W>,
    clipboard: ClipboardConfig,
    pub(crate) swipe: SwipeConfig,
    sequence: SequenceCounter,
}

impl Controller<OwnedReadHalf, OwnedWriteHalf> {
    /// Opens a TCP connection to the device's control socket.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::Io`] if the connection cannot be established.
    pub async fn connect(addr: SocketAddr, config: &ControllerConfig) -> Result<Self, ControlError> {
        let stream = tokio::net::TcpStream::connect(addr).await?;
        stream.set_nodelay(true)?;
        info!("connected to control socket at {addr}");
        let (reader, writer) = stream.into_split();
        Ok(Self::new(
            ControlChannel::new(reader, writer, &config.channel),
            config,
        ))
    }
}

impl<R, W> Controller<R, W>
where
    R: AsyncRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    /// Wraps an existing channel.
    pub fn new(channel: ControlChannel<R, W>, config: &ControllerConfig) -> Self {
        Self {
            channel,
            clipboard: config.clipboard.clone(),
            swipe: config.swipe.clone(),
            sequence: SequenceCounter::new(),
        }
    }

    /// Presses, releases or repeats a key.
    pub async fn inject_keycode(
        &self,
        keycode: Keycode,
        action: KeyAction,
        repeat: i32,
        meta_state: MetaState,
    ) -> Result<Vec<u8>, ControlError> {
        self.send(ControlMessage::InjectKeycode(InjectKeycodeMessage {
            action,
            keycode,
            repeat,
            meta_state,
        }))
        .await
    }

    /// Types `text` into the focused widget.
    pub async fn inject_text(&self, text: &str) -> Result<Vec<u8>, ControlError> {
        self.send(ControlMessage::InjectText(text.to_owned())).await
    }

    /// Sends a single touch or mouse-pointer event.
    pub async fn inject_touch_event(&self, event: TouchEvent) -> Result<Vec<u8>, ControlError> {
        self.send(ControlMessage::InjectTouch(event)).await
    }

    /// Sends a wheel scroll.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::ScrollOverflow`] (wrapped) for deltas outside
    /// the representable range; nothing is written in that case.
    pub async fn inject_scroll_event(&self, event: ScrollEvent) -> Result<Vec<u8>, ControlError> {
        self.send(ControlMessage::InjectScroll(event)).await
    }

    /// Goes back, or turns the screen on if it is off.
    pub async fn back_or_screen_on(&self, action: KeyAction) -> Result<Vec<u8>, ControlError> {
        self.send(ControlMessage::BackOrScreenOn { action }).await
    }

    pub async fn expand_notification_panel(&self) -> Result<Vec<u8>, ControlError> {
        self.send(ControlMessage::ExpandNotificationPanel).await
    }

    pub async fn expand_settings_panel(&self) -> Result<Vec<u8>, ControlError> {
        self.send(ControlMessage::ExpandSettingsPanel).await
    }

    pub async fn collapse_panels(&self) -> Result<Vec<u8>, ControlError> {
        self.send(ControlMessage::CollapsePanels).await
    }

    pub async fn rotate_device(&self) -> Result<Vec<u8>, ControlError> {
        self.send(ControlMessage::RotateDevice).await
    }

    /// Turns the display off or back on.
    ///
    /// Written without the channel lock: it may be reordered relative to
    /// locked commands that are still waiting.
    pub async fn set_screen_power_mode(
        &self,
        mode: ScreenPowerMode,
    ) -> Result<Vec<u8>, ControlError> {
        let bytes = encode_control_message(&ControlMessage::SetScreenPowerMode { mode })?;
        debug!("sending SetScreenPowerMode {mode:?} unlocked");
        self.channel.send_unlocked(&bytes).await?;
        Ok(bytes)
    }

    /// Reads the device clipboard.
    ///
    /// Returns `Ok(None)` if the device does not answer within the configured
    /// timeout (it stays silent when its clipboard is empty) or if the reply
    /// cannot be parsed.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::Io`] only if the request cannot be written.
    pub async fn get_clipboard(&self, copy_key: CopyKey) -> Result<Option<String>, ControlError> {
        let bytes = encode_control_message(&ControlMessage::GetClipboard { copy_key })?;
        let limit = self.clipboard.response_timeout();
        debug!("requesting clipboard ({copy_key:?})");
        let text = self
            .channel
            .request_locked(&bytes, move |reader| {
                Box::pin(read_clipboard_reply(reader, limit))
            })
            .await?;
        Ok(text)
    }

    /// Replaces the device clipboard and returns the sequence the device
    /// acknowledged.
    ///
    /// The caller compares the returned sequence with `sequence`: a different
    /// value means another set was acknowledged instead.  Returns `Ok(None)`
    /// if no acknowledgement arrives within the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::Protocol`] if the text cannot be encoded and
    /// [`ControlError::Io`] if the request cannot be written.
    pub async fn set_clipboard(
        &self,
        text: &str,
        sequence: u64,
        paste: bool,
    ) -> Result<Option<u64>, ControlError> {
        let bytes = encode_control_message(&ControlMessage::SetClipboard(SetClipboardMessage {
            sequence,
            paste,
            text: text.to_owned(),
        }))?;
        let limit = self.clipboard.ack_timeout();
        debug!("setting clipboard with sequence {sequence} (paste: {paste})");
        let acked = self
            .channel
            .request_locked(&bytes, move |reader| Box::pin(read_clipboard_ack(reader, limit)))
            .await?;
        Ok(acked)
    }

    /// Replaces the device clipboard under a fresh sequence number and reports
    /// whether the device acknowledged exactly that request.
    pub async fn set_clipboard_confirmed(
        &self,
        text: &str,
        paste: bool,
    ) -> Result<bool, ControlError> {
        let sequence = self.sequence.next();
        let acked = self.set_clipboard(text, sequence, paste).await?;
        if let Some(other) = acked.filter(|s| *s != sequence) {
            warn!("clipboard ack mismatch: sent {sequence}, device acknowledged {other}");
        }
        Ok(acked == Some(sequence))
    }

    async fn send(&self, msg: ControlMessage) -> Result<Vec<u8>, ControlError> {
        let bytes = encode_control_message(&msg)?;
        debug!("sending {:?} ({} bytes)", msg.message_type(), bytes.len());
        self.channel.send_locked(&bytes).await?;
        Ok(bytes)
    }
}

/// Reads a clipboard reply: a 5-byte header then `length` bytes of UTF-8.
///
/// Header and body share one deadline.
async fn read_clipboard_reply<R>(reader: &mut R, limit: Duration) -> Option<String>
where
    R: AsyncRead + Unpin,
{
    let read = async {
        let mut header = [0u8; DEVICE_CLIPBOARD_HEADER_LEN];
        reader.read_exact(&mut header).await?;
        let len = decode_clipboard_header(&header)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let mut body = Vec::new();
        (&mut *reader).take(len as u64).read_to_end(&mut body).await?;
        if body.len() != len {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("clipboard body truncated at {} of {len} bytes", body.len()),
            ));
        }
        Ok::<_, io::Error>(body)
    };

    match timeout(limit, read).await {
        Err(_) => {
            debug!("no clipboard reply within {limit:?}");
            None
        }
        Ok(Err(e)) => {
            warn!("discarding clipboard reply: {e}");
            None
        }
        Ok(Ok(body)) => match String::from_utf8(body) {
            Ok(text) => Some(text),
            Err(e) => {
                warn!("clipboard reply is not valid UTF-8: {e}");
                None
            }
        },
    }
}

/// Reads a 9-byte clipboard acknowledgement and returns its sequence.
async fn read_clipboard_ack<R>(reader: &mut R, limit: Duration) -> Option<u64>
where
    R: AsyncRead + Unpin,
{
    let mut ack = [0u8; DEVICE_ACK_CLIPBOARD_LEN];
    match timeout(limit, reader.read_exact(&mut ack)).await {
        Err(_) => {
            warn!("no clipboard acknowledgement within {limit:?}");
            return None;
        }
        Ok(Err(e)) => {
            warn!("failed to read clipboard acknowledgement: {e}");
            return None;
        }
        Ok(Ok(_)) => {}
    }
    if ack[0] != DeviceMessageType::AckClipboard as u8 {
        warn!("expected clipboard ack opcode, got 0x{:02X}", ack[0]);
    }
    let mut sequence = [0u8; 8];
    sequence.copy_from_slice(&ack[1..]);
    Some(u64::from_be_bytes(sequence))
}
