//! # Error Types
//!
//! Error handling for packet framing and payload materialization.
//!
//! ## Error Categories
//! - **Framing Errors**: Unknown tag byte, truncated prefix, out-of-range context length
//! - **State Errors**: Materializing the payload of a packet that was never loaded
//! - **Limit Errors**: Oversized contexts or packets
//! - **Payload Codec Errors**: Passed through unchanged from MessagePack, JSON or bincode
//!
//! Every malformed buffer surfaces as one of these values. Decoding never indexes
//! past the end of the input.
//!
//! ## Example Usage
//! ```rust
//! use teapack::error::PacketError;
//! use tracing::{info, warn};
//!
//! match teapack::load(&[9, 0, 0]) {
//!     Ok(packet) => info!(?packet, "Loaded packet"),
//!     Err(PacketError::UnknownType) => warn!("Dropping buffer with unknown tag"),
//!     Err(e) => warn!(error = %e, "Malformed packet"),
//! }
//! ```

use crate::core::packet_type::PacketType;
use thiserror::Error;

// PacketError is the primary error type for all packet operations
#[derive(Error, Debug)]
pub enum PacketError {
    #[error("Unknown packet type")]
    UnknownType,

    #[error("Payload can only be unmarshalled from a loaded packet")]
    NotLoaded,

    #[error("{packet_type} packet too short: need at least {expected} bytes, got {actual}")]
    TooShort {
        packet_type: PacketType,
        expected: usize,
        actual: usize,
    },

    #[error("Context length {context_len} exceeds the {available} bytes remaining in the packet")]
    IncorrectRange { context_len: usize, available: usize },

    #[error("Expected a {expected} packet, found tag byte {found}")]
    TypeMismatch { expected: PacketType, found: u8 },

    #[error("Context too large: {0} bytes (maximum 65535)")]
    ContextTooLarge(usize),

    #[error("Packet too large: {size} bytes (maximum {max})")]
    OversizedPacket { size: usize, max: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("MessagePack encode error: {0}")]
    MsgpackEncode(#[from] rmp_serde::encode::Error),

    #[error("MessagePack decode error: {0}")]
    MsgpackDecode(#[from] rmp_serde::decode::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Bincode error: {0}")]
    Bincode(#[from] bincode::Error),
}

impl PacketError {
    /// Whether the error describes a malformed frame rather than a payload or usage problem
    pub fn is_framing(&self) -> bool {
        matches!(
            self,
            PacketError::UnknownType
                | PacketError::TooShort { .. }
                | PacketError::IncorrectRange { .. }
                | PacketError::TypeMismatch { .. }
        )
    }
}

/// Type alias for Results using PacketError
pub type Result<T> = std::result::Result<T, PacketError>;
