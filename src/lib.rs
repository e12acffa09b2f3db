//! # teapack
//!
//! Compact binary framing for three packet shapes exchanged between peers:
//!
//! - **Request**: method code and job id, answered by a response with the same id
//! - **Response**: job id and a status code
//! - **Event**: method code only, fire-and-forget
//!
//! Every packet carries a small *context* block (metadata) and a *data* block (main body),
//! each serialized on its own (MessagePack by default). Loading a packet parses only the
//! fixed fields; the blocks stay raw until the caller asks for them, so routing on
//! id/method/status costs nothing beyond a few byte reads.
//!
//! ## Example
//! ```rust
//! use std::collections::HashMap;
//! use teapack::{id_of, load, marshal, method_of, Packet};
//!
//! let mut ctx = HashMap::new();
//! ctx.insert("foo", "bar");
//! let mut data = HashMap::new();
//! data.insert("hello", "world");
//!
//! let bytes = marshal(&Packet::request(12, 12345, ctx, data))?;
//! let packet = load(&bytes)?;
//! assert_eq!(id_of(&packet), 12345);
//! assert_eq!(method_of(&packet), 12);
//!
//! let data: HashMap<String, String> = packet.unmarshal()?;
//! assert_eq!(data["hello"], "world");
//! # Ok::<(), teapack::PacketError>(())
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod config;
pub mod core;
pub mod error;
pub mod protocol;
pub mod utils;

pub use crate::config::CodecConfig;
pub use crate::core::packet::{Event, Packet, Request, Response};
pub use crate::core::packet_type::{packet_type, PacketType};
pub use crate::core::payload::Payload;
pub use crate::core::serialization::PayloadFormat;
pub use crate::core::status::StatusCode;
pub use crate::error::{PacketError, Result};
pub use crate::protocol::accessors::{
    id_of, method_of, status_of, unmarshal, unmarshal_context,
};
pub use crate::protocol::dispatcher::{load, load_bytes, marshal, marshal_with, Dispatcher};
