//! Field access that works the same for every packet shape.
//!
//! Fields a shape does not carry read as a neutral default instead of failing:
//! id `0`, method `0`, status [`StatusCode::Ok`]. Use [`Packet::id`], [`Packet::method`]
//! and [`Packet::status`] to tell absence apart from a real zero.

use crate::core::packet::Packet;
use crate::core::status::StatusCode;
use crate::error::Result;
use serde::de::DeserializeOwned;

/// Job number of a request or response, `0` for events
#[inline]
pub fn id_of<C, D>(packet: &Packet<C, D>) -> u16 {
    packet.id().unwrap_or(0)
}

/// Method code of a request or event, `0` for responses
#[inline]
pub fn method_of<C, D>(packet: &Packet<C, D>) -> u8 {
    packet.method().unwrap_or(0)
}

/// Status of a response, `StatusCode::Ok` for requests and events
#[inline]
pub fn status_of<C, D>(packet: &Packet<C, D>) -> StatusCode {
    packet.status().unwrap_or(StatusCode::Ok)
}

/// Deserialize the data block of a loaded packet from MessagePack
pub fn unmarshal<T, C, D>(packet: &Packet<C, D>) -> Result<T>
where
    T: DeserializeOwned,
{
    packet.unmarshal()
}

/// Deserialize the context block of a loaded packet from MessagePack
pub fn unmarshal_context<T, C, D>(packet: &Packet<C, D>) -> Result<T>
where
    T: DeserializeOwned,
{
    packet.unmarshal_context()
}
