//! # Payload Slots
//!
//! Every packet carries a context block and a data block. A slot is either still holding
//! the typed values it was built with (`Unloaded`, ready to encode) or the raw blocks sliced
//! out of a received buffer (`Loaded`, ready to be decoded on demand).
//!
//! Loaded blocks are `Bytes` views into one shared copy of the received buffer. They stay
//! valid after the caller's buffer goes away and are cheap to clone.

use crate::config::MAX_CONTEXT_LEN;
use crate::core::packet_type::PacketType;
use crate::core::serialization::{self, PayloadFormat};
use crate::error::{PacketError, Result};
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::borrow::Cow;

/// Context and data blocks of a packet
#[derive(Debug, Clone, PartialEq)]
pub enum Payload<C, D> {
    /// Typed values of a packet built in code
    Unloaded { context: C, data: D },
    /// Raw blocks of a packet loaded from bytes, not yet deserialized
    Loaded { context: Bytes, data: Bytes },
}

impl<C, D> Payload<C, D> {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Payload::Loaded { .. })
    }

    /// Raw context block, if loaded
    pub fn raw_context(&self) -> Option<&Bytes> {
        match self {
            Payload::Loaded { context, .. } => Some(context),
            Payload::Unloaded { .. } => None,
        }
    }

    /// Raw data block, if loaded
    pub fn raw_data(&self) -> Option<&Bytes> {
        match self {
            Payload::Loaded { data, .. } => Some(data),
            Payload::Unloaded { .. } => None,
        }
    }

    /// Deserialize the data block. Can be called any number of times.
    pub fn unmarshal<T>(&self, format: PayloadFormat) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let raw = self.raw_data().ok_or(PacketError::NotLoaded)?;
        serialization::decode(raw, format)
    }

    /// Deserialize the context block. Can be called any number of times.
    pub fn unmarshal_context<T>(&self, format: PayloadFormat) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let raw = self.raw_context().ok_or(PacketError::NotLoaded)?;
        serialization::decode(raw, format)
    }
}

impl<C, D> Payload<C, D>
where
    C: Serialize,
    D: Serialize,
{
    /// Encoded context and data blocks.
    ///
    /// Loaded blocks are borrowed as they are, so re-marshalling a loaded packet
    /// reproduces its original bytes.
    pub(crate) fn encode_blocks(
        &self,
        format: PayloadFormat,
    ) -> Result<(Cow<'_, [u8]>, Cow<'_, [u8]>)> {
        match self {
            Payload::Unloaded { context, data } => {
                let context = serialization::encode(context, format)?;
                let data = serialization::encode(data, format)?;
                Ok((Cow::Owned(context), Cow::Owned(data)))
            }
            Payload::Loaded { context, data } => {
                Ok((Cow::Borrowed(&context[..]), Cow::Borrowed(&data[..])))
            }
        }
    }
}

/// Little-endian length prefix for a context block
pub(crate) fn context_len_prefix(context: &[u8]) -> Result<[u8; 2]> {
    if context.len() > MAX_CONTEXT_LEN {
        return Err(PacketError::ContextTooLarge(context.len()));
    }
    Ok((context.len() as u16).to_le_bytes())
}

/// Check that `buf` holds at least the fixed prefix of `expected` and carries its tag.
pub(crate) fn check_header(buf: &[u8], expected: PacketType, header_len: usize) -> Result<()> {
    if buf.len() < header_len {
        return Err(PacketError::TooShort {
            packet_type: expected,
            expected: header_len,
            actual: buf.len(),
        });
    }
    if buf[0] != expected.as_byte() {
        return Err(PacketError::TypeMismatch {
            expected,
            found: buf[0],
        });
    }
    Ok(())
}

/// Read a little-endian u16. The caller has already checked the bounds.
#[inline]
pub(crate) fn read_u16_le(buf: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([buf[at], buf[at + 1]])
}

/// Slice the context and data blocks that follow a fixed prefix of `header_len` bytes.
pub(crate) fn split_blocks<C, D>(
    buf: &Bytes,
    header_len: usize,
    context_len: usize,
) -> Result<Payload<C, D>> {
    let available = buf.len().saturating_sub(header_len);
    if context_len > available {
        return Err(PacketError::IncorrectRange {
            context_len,
            available,
        });
    }
    let context_end = header_len + context_len;
    Ok(Payload::Loaded {
        context: buf.slice(header_len..context_end),
        data: buf.slice(context_end..),
    })
}
