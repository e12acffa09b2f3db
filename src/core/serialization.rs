//! # Payload Formats
//!
//! Abstraction over the serialization schemes used for the context and data blocks of a
//! packet. The frame layout is the same for every format; peers agree on the format out of
//! band since no format byte is written to the wire.
//!
//! ## Formats
//! - **MessagePack** (default): compact, self-describing. Structs are written as maps keyed by
//!   field name so that peers decoding into loosely typed maps see the same shape.
//! - **JSON**: human-readable, useful when debugging captured packets
//! - **Bincode**: fastest, but not self-describing. Both sides must share the Rust types.
//!
//! ## Usage
//! ```rust
//! use teapack::core::serialization::{decode, encode, PayloadFormat};
//! use std::collections::HashMap;
//!
//! let mut ctx = HashMap::new();
//! ctx.insert("foo".to_string(), "bar".to_string());
//!
//! let bytes = encode(&ctx, PayloadFormat::MessagePack)?;
//! let back: HashMap<String, String> = decode(&bytes, PayloadFormat::MessagePack)?;
//! assert_eq!(back["foo"], "bar");
//! # Ok::<(), teapack::PacketError>(())
//! ```

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Supported payload serialization formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadFormat {
    /// Compact binary format (default)
    #[default]
    #[serde(alias = "msgpack")]
    MessagePack,
    /// Human-readable JSON
    Json,
    /// Binary format tied to the Rust type layout
    Bincode,
}

impl PayloadFormat {
    /// Get human-readable name
    pub fn name(self) -> &'static str {
        match self {
            PayloadFormat::MessagePack => "MessagePack",
            PayloadFormat::Json => "JSON",
            PayloadFormat::Bincode => "Bincode",
        }
    }

    /// Parse a format name as accepted in configuration (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "messagepack" | "msgpack" => Some(PayloadFormat::MessagePack),
            "json" => Some(PayloadFormat::Json),
            "bincode" => Some(PayloadFormat::Bincode),
            _ => None,
        }
    }
}

/// Serialize a value into an opaque payload block
pub fn encode<T>(value: &T, format: PayloadFormat) -> Result<Vec<u8>>
where
    T: Serialize + ?Sized,
{
    let bytes = match format {
        PayloadFormat::MessagePack => rmp_serde::to_vec_named(value)?,
        PayloadFormat::Json => serde_json::to_vec(value)?,
        PayloadFormat::Bincode => bincode::serialize(value)?,
    };
    Ok(bytes)
}

/// Deserialize an opaque payload block into `T`
pub fn decode<T>(bytes: &[u8], format: PayloadFormat) -> Result<T>
where
    T: DeserializeOwned,
{
    let value = match format {
        PayloadFormat::MessagePack => rmp_serde::from_slice(bytes)?,
        PayloadFormat::Json => serde_json::from_slice(bytes)?,
        PayloadFormat::Bincode => bincode::deserialize(bytes)?,
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PacketError;
    use std::collections::HashMap;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Login {
        user: String,
        attempts: u8,
    }

    #[test]
    fn test_format_names() {
        assert_eq!(PayloadFormat::MessagePack.name(), "MessagePack");
        assert_eq!(PayloadFormat::Json.name(), "JSON");
        assert_eq!(PayloadFormat::Bincode.name(), "Bincode");
        assert_eq!(
            PayloadFormat::from_name("MsgPack"),
            Some(PayloadFormat::MessagePack)
        );
        assert_eq!(PayloadFormat::from_name("yaml"), None);
    }

    #[test]
    fn test_default_format() {
        assert_eq!(PayloadFormat::default(), PayloadFormat::MessagePack);
    }

    #[test]
    #[allow(clippy::expect_used)]
    fn test_messagepack_map_bytes() {
        let mut map = HashMap::new();
        map.insert("foo", "bar");
        let bytes = encode(&map, PayloadFormat::MessagePack).expect("encode");
        // fixmap(1), fixstr "foo", fixstr "bar"
        assert_eq!(
            bytes,
            vec![0x81, 0xA3, b'f', b'o', b'o', 0xA3, b'b', b'a', b'r']
        );
    }

    #[test]
    #[allow(clippy::expect_used)]
    fn test_messagepack_writes_structs_as_maps() {
        let login = Login {
            user: "ada".into(),
            attempts: 2,
        };
        let bytes = encode(&login, PayloadFormat::MessagePack).expect("encode");
        let as_map: HashMap<String, serde_json::Value> =
            decode(&bytes, PayloadFormat::MessagePack).expect("decode as map");
        assert!(as_map.contains_key("user"));
        assert!(as_map.contains_key("attempts"));

        let back: Login = decode(&bytes, PayloadFormat::MessagePack).expect("decode");
        assert_eq!(back, login);
    }

    #[test]
    #[allow(clippy::expect_used)]
    fn test_every_format_roundtrips() {
        let login = Login {
            user: "grace".into(),
            attempts: 0,
        };
        for format in [
            PayloadFormat::MessagePack,
            PayloadFormat::Json,
            PayloadFormat::Bincode,
        ] {
            let bytes = encode(&login, format).expect("encode");
            let back: Login = decode(&bytes, format).expect("decode");
            assert_eq!(back, login, "{} roundtrip", format.name());
        }
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_decode_errors_pass_through() {
        let garbage = [0xC1u8]; // never used in MessagePack
        let err = decode::<Login>(&garbage, PayloadFormat::MessagePack).unwrap_err();
        assert!(matches!(err, PacketError::MsgpackDecode(_)));

        let err = decode::<Login>(b"{not json", PayloadFormat::Json).unwrap_err();
        assert!(matches!(err, PacketError::Json(_)));

        let err = decode::<Login>(&[], PayloadFormat::Bincode).unwrap_err();
        assert!(matches!(err, PacketError::Bincode(_)));
    }
}
