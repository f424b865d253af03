//! Protocol module containing message types and the binary codec.

pub mod codec;
pub mod messages;
pub mod sequence;

pub use codec::{
    decode_clipboard_header, decode_control_message, decode_device_message,
    encode_control_message, encode_device_message, ProtocolError,
};
pub use messages::*;
pub use sequence::SequenceCounter;
