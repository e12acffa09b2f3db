use crate::config::{EVENT_HEADER_LEN, REQUEST_HEADER_LEN, RESPONSE_HEADER_LEN};
use std::fmt;

/// Packet kind, stored as the first byte of every encoded packet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PacketType {
    /// Empty buffer or unrecognized tag byte. Never produced by encoding.
    Unknown = 0,
    Request = 1,
    Response = 2,
    Event = 3,
}

impl PacketType {
    /// Map a tag byte to its packet type
    #[inline]
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            1 => PacketType::Request,
            2 => PacketType::Response,
            3 => PacketType::Event,
            _ => PacketType::Unknown,
        }
    }

    /// Tag byte written on the wire
    #[inline]
    pub fn as_byte(self) -> u8 {
        self as u8
    }

    /// Length of the fixed fields (tag included) that precede the context block
    pub fn header_len(self) -> Option<usize> {
        match self {
            PacketType::Request => Some(REQUEST_HEADER_LEN),
            PacketType::Response => Some(RESPONSE_HEADER_LEN),
            PacketType::Event => Some(EVENT_HEADER_LEN),
            PacketType::Unknown => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PacketType::Unknown => "Unknown",
            PacketType::Request => "Request",
            PacketType::Response => "Response",
            PacketType::Event => "Event",
        }
    }
}

impl fmt::Display for PacketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Peek at the packet type of an encoded buffer without parsing it.
///
/// Only byte 0 is inspected. An empty buffer reports `PacketType::Unknown`.
#[inline]
pub fn packet_type(data: &[u8]) -> PacketType {
    match data.first() {
        Some(&tag) => PacketType::from_byte(tag),
        None => PacketType::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_buffer_is_unknown() {
        assert_eq!(packet_type(&[]), PacketType::Unknown);
    }

    #[test]
    fn test_only_first_byte_matters() {
        assert_eq!(packet_type(&[1]), PacketType::Request);
        assert_eq!(packet_type(&[2, 0xFF, 0xFF]), PacketType::Response);
        assert_eq!(packet_type(&[3, 9, 9, 9, 9]), PacketType::Event);
    }

    #[test]
    fn test_reserved_tags_are_unknown() {
        assert_eq!(packet_type(&[0]), PacketType::Unknown);
        for tag in 4..=u8::MAX {
            assert_eq!(packet_type(&[tag]), PacketType::Unknown);
        }
    }

    #[test]
    fn test_tag_bytes_are_stable() {
        assert_eq!(PacketType::Request.as_byte(), 1);
        assert_eq!(PacketType::Response.as_byte(), 2);
        assert_eq!(PacketType::Event.as_byte(), 3);
        assert_eq!(PacketType::Unknown.header_len(), None);
        assert_eq!(PacketType::Event.header_len(), Some(4));
    }
}
