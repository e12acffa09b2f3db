//! # Core Packet Components
//!
//! Byte-level framing for request, response and event packets.
//!
//! ## Components
//! - **PacketType**: tag byte discrimination and sniffing
//! - **Packet**: the three shapes, their fixed-field layouts and encode/decode
//! - **Payload**: typed (unloaded) or raw (loaded) context and data blocks
//! - **StatusCode**: outcome byte carried by responses
//! - **Serialization**: payload formats for the context and data blocks
//!
//! ## Wire Format
//! ```text
//! [Tag(1)] [fixed fields] [ContextLen(2, LE)] ... [Context(ContextLen)] [Data(rest)]
//! ```
//!
//! ## Safety
//! - Fixed prefix length is checked before any field is read
//! - Declared context length is checked against the remaining bytes before slicing

pub mod packet;
pub mod packet_type;
pub mod payload;
pub mod serialization;
pub mod status;
