//! # Packets
//!
//! The three packet shapes and their wire layouts. All integers are little-endian.
//!
//! ```text
//! Request:  [1] [id(2)] [ctx_len(2)] [method(1)] [context(ctx_len)] [data(rest)]
//! Response: [2] [id(2)] [ctx_len(2)] [status(1)] [context(ctx_len)] [data(rest)]
//! Event:    [3] [method(1)] [ctx_len(2)]         [context(ctx_len)] [data(rest)]
//! ```
//!
//! The data block has no length prefix and always runs to the end of the buffer.
//!
//! Packets are immutable. A packet built in code holds typed context and data values
//! (`C`, `D`) until it is marshalled; a packet loaded from bytes holds the raw blocks and
//! uses `()` for both type parameters.

use crate::config::{EVENT_HEADER_LEN, REQUEST_HEADER_LEN, RESPONSE_HEADER_LEN};
use crate::core::packet_type::PacketType;
use crate::core::payload::{
    check_header, context_len_prefix, read_u16_le, split_blocks, Payload,
};
use crate::core::serialization::PayloadFormat;
use crate::core::status::StatusCode;
use crate::error::Result;
use crate::utils::concat::concat_pre_allocated;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::trace;

/// A request awaiting a response with the same `id`
#[derive(Debug, Clone, PartialEq)]
pub struct Request<C = (), D = ()> {
    method: u8,
    id: u16,
    payload: Payload<C, D>,
}

impl<C, D> Request<C, D> {
    pub fn new(method: u8, id: u16, context: C, data: D) -> Self {
        Self {
            method,
            id,
            payload: Payload::Unloaded { context, data },
        }
    }

    /// Code of the operation the request targets
    pub fn method(&self) -> u8 {
        self.method
    }

    /// Job number, echoed back by the response
    pub fn id(&self) -> u16 {
        self.id
    }

    pub fn payload(&self) -> &Payload<C, D> {
        &self.payload
    }
}

impl<C: Serialize, D: Serialize> Request<C, D> {
    pub fn encode(&self, format: PayloadFormat) -> Result<Vec<u8>> {
        let (context, data) = self.payload.encode_blocks(format)?;
        let context_len = context_len_prefix(&context)?;
        Ok(concat_pre_allocated(&[
            &[PacketType::Request.as_byte()],
            &self.id.to_le_bytes(),
            &context_len,
            &[self.method],
            &*context,
            &*data,
        ]))
    }
}

impl Request {
    /// Parse the fixed fields and slice out the raw payload blocks
    pub fn decode(buf: Bytes) -> Result<Self> {
        check_header(&buf, PacketType::Request, REQUEST_HEADER_LEN)?;
        let id = read_u16_le(&buf, 1);
        let context_len = read_u16_le(&buf, 3) as usize;
        let method = buf[5];
        let payload = split_blocks(&buf, REQUEST_HEADER_LEN, context_len)?;
        trace!(id, method, context_len, total_len = buf.len(), "Decoded request");
        Ok(Self {
            method,
            id,
            payload,
        })
    }
}

/// Answer to the request with the same `id`
#[derive(Debug, Clone, PartialEq)]
pub struct Response<C = (), D = ()> {
    id: u16,
    status: StatusCode,
    payload: Payload<C, D>,
}

impl<C, D> Response<C, D> {
    pub fn new(id: u16, status: StatusCode, context: C, data: D) -> Self {
        Self {
            id,
            status,
            payload: Payload::Unloaded { context, data },
        }
    }

    pub fn id(&self) -> u16 {
        self.id
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn payload(&self) -> &Payload<C, D> {
        &self.payload
    }
}

impl<C: Serialize, D: Serialize> Response<C, D> {
    pub fn encode(&self, format: PayloadFormat) -> Result<Vec<u8>> {
        let (context, data) = self.payload.encode_blocks(format)?;
        let context_len = context_len_prefix(&context)?;
        Ok(concat_pre_allocated(&[
            &[PacketType::Response.as_byte()],
            &self.id.to_le_bytes(),
            &context_len,
            &[self.status.as_u8()],
            &*context,
            &*data,
        ]))
    }
}

impl Response {
    pub fn decode(buf: Bytes) -> Result<Self> {
        check_header(&buf, PacketType::Response, RESPONSE_HEADER_LEN)?;
        let id = read_u16_le(&buf, 1);
        let context_len = read_u16_le(&buf, 3) as usize;
        let status = StatusCode::from(buf[5]);
        let payload = split_blocks(&buf, RESPONSE_HEADER_LEN, context_len)?;
        trace!(id, %status, context_len, total_len = buf.len(), "Decoded response");
        Ok(Self {
            id,
            status,
            payload,
        })
    }
}

/// Fire-and-forget notification, no reply expected
#[derive(Debug, Clone, PartialEq)]
pub struct Event<C = (), D = ()> {
    method: u8,
    payload: Payload<C, D>,
}

impl<C, D> Event<C, D> {
    pub fn new(method: u8, context: C, data: D) -> Self {
        Self {
            method,
            payload: Payload::Unloaded { context, data },
        }
    }

    pub fn method(&self) -> u8 {
        self.method
    }

    pub fn payload(&self) -> &Payload<C, D> {
        &self.payload
    }
}

impl<C: Serialize, D: Serialize> Event<C, D> {
    pub fn encode(&self, format: PayloadFormat) -> Result<Vec<u8>> {
        let (context, data) = self.payload.encode_blocks(format)?;
        let context_len = context_len_prefix(&context)?;
        Ok(concat_pre_allocated(&[
            &[PacketType::Event.as_byte()],
            &[self.method],
            &context_len,
            &*context,
            &*data,
        ]))
    }
}

impl Event {
    pub fn decode(buf: Bytes) -> Result<Self> {
        check_header(&buf, PacketType::Event, EVENT_HEADER_LEN)?;
        let method = buf[1];
        let context_len = read_u16_le(&buf, 2) as usize;
        let payload = split_blocks(&buf, EVENT_HEADER_LEN, context_len)?;
        trace!(method, context_len, total_len = buf.len(), "Decoded event");
        Ok(Self { method, payload })
    }
}

/// Any of the three packet shapes
#[derive(Debug, Clone, PartialEq)]
pub enum Packet<C = (), D = ()> {
    Request(Request<C, D>),
    Response(Response<C, D>),
    Event(Event<C, D>),
}

impl<C, D> Packet<C, D> {
    pub fn request(method: u8, id: u16, context: C, data: D) -> Self {
        Packet::Request(Request::new(method, id, context, data))
    }

    pub fn response(id: u16, status: StatusCode, context: C, data: D) -> Self {
        Packet::Response(Response::new(id, status, context, data))
    }

    pub fn event(method: u8, context: C, data: D) -> Self {
        Packet::Event(Event::new(method, context, data))
    }

    pub fn packet_type(&self) -> PacketType {
        match self {
            Packet::Request(_) => PacketType::Request,
            Packet::Response(_) => PacketType::Response,
            Packet::Event(_) => PacketType::Event,
        }
    }

    /// Job number of requests and responses
    pub fn id(&self) -> Option<u16> {
        match self {
            Packet::Request(p) => Some(p.id()),
            Packet::Response(p) => Some(p.id()),
            Packet::Event(_) => None,
        }
    }

    /// Method code of requests and events
    pub fn method(&self) -> Option<u8> {
        match self {
            Packet::Request(p) => Some(p.method()),
            Packet::Event(p) => Some(p.method()),
            Packet::Response(_) => None,
        }
    }

    /// Status of responses
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Packet::Response(p) => Some(p.status()),
            Packet::Request(_) | Packet::Event(_) => None,
        }
    }

    pub fn payload(&self) -> &Payload<C, D> {
        match self {
            Packet::Request(p) => p.payload(),
            Packet::Response(p) => p.payload(),
            Packet::Event(p) => p.payload(),
        }
    }

    /// Whether this packet came from `load` and still holds raw payload blocks
    pub fn is_loaded(&self) -> bool {
        self.payload().is_loaded()
    }

    /// Deserialize the data block from MessagePack.
    ///
    /// # Errors
    /// `PacketError::NotLoaded` if the packet was built in code rather than loaded,
    /// otherwise whatever the payload codec reports.
    pub fn unmarshal<T: DeserializeOwned>(&self) -> Result<T> {
        self.payload().unmarshal(PayloadFormat::MessagePack)
    }

    pub fn unmarshal_with<T: DeserializeOwned>(&self, format: PayloadFormat) -> Result<T> {
        self.payload().unmarshal(format)
    }

    /// Deserialize the context block from MessagePack.
    pub fn unmarshal_context<T: DeserializeOwned>(&self) -> Result<T> {
        self.payload().unmarshal_context(PayloadFormat::MessagePack)
    }

    pub fn unmarshal_context_with<T: DeserializeOwned>(&self, format: PayloadFormat) -> Result<T> {
        self.payload().unmarshal_context(format)
    }
}

impl<C: Serialize, D: Serialize> Packet<C, D> {
    /// Encode with MessagePack payloads
    pub fn marshal(&self) -> Result<Vec<u8>> {
        self.marshal_with(PayloadFormat::MessagePack)
    }

    pub fn marshal_with(&self, format: PayloadFormat) -> Result<Vec<u8>> {
        match self {
            Packet::Request(p) => p.encode(format),
            Packet::Response(p) => p.encode(format),
            Packet::Event(p) => p.encode(format),
        }
    }
}

impl<C, D> From<Request<C, D>> for Packet<C, D> {
    fn from(p: Request<C, D>) -> Self {
        Packet::Request(p)
    }
}

impl<C, D> From<Response<C, D>> for Packet<C, D> {
    fn from(p: Response<C, D>) -> Self {
        Packet::Response(p)
    }
}

impl<C, D> From<Event<C, D>> for Packet<C, D> {
    fn from(p: Event<C, D>) -> Self {
        Packet::Event(p)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::error::PacketError;

    #[test]
    fn test_request_layout() {
        let req = Request::new(12, 0x3039, (), vec![1u8]);
        let bytes = req.encode(PayloadFormat::MessagePack).unwrap();
        // nil context (0xC0), data = fixarray(1) [1]
        assert_eq!(bytes, vec![1, 0x39, 0x30, 1, 0, 12, 0xC0, 0x91, 0x01]);
    }

    #[test]
    fn test_response_layout() {
        let resp = Response::new(7, StatusCode::NotFound, (), ());
        let bytes = resp.encode(PayloadFormat::MessagePack).unwrap();
        assert_eq!(bytes, vec![2, 7, 0, 1, 0, 54, 0xC0, 0xC0]);
    }

    #[test]
    fn test_event_layout() {
        let event = Event::new(7, (), true);
        let bytes = event.encode(PayloadFormat::MessagePack).unwrap();
        assert_eq!(bytes, vec![3, 7, 1, 0, 0xC0, 0xC3]);
    }

    #[test]
    fn test_decode_request_fields() {
        let buf = Bytes::from_static(&[1, 0x39, 0x30, 2, 0, 12, 0xA1, b'x', 0x05]);
        let req = Request::decode(buf).unwrap();
        assert_eq!(req.id(), 12345);
        assert_eq!(req.method(), 12);
        let ctx: String = req.payload().unmarshal_context(PayloadFormat::MessagePack).unwrap();
        let data: u8 = req.payload().unmarshal(PayloadFormat::MessagePack).unwrap();
        assert_eq!(ctx, "x");
        assert_eq!(data, 5);
    }

    #[test]
    fn test_decode_response_keeps_unknown_status() {
        let buf = Bytes::from_static(&[2, 1, 0, 0, 0, 99]);
        let resp = Response::decode(buf).unwrap();
        assert_eq!(resp.status(), StatusCode::Other(99));
        assert!(resp.payload().raw_context().unwrap().is_empty());
        assert!(resp.payload().raw_data().unwrap().is_empty());
    }

    #[test]
    fn test_decode_event_minimum_prefix() {
        let event = Event::decode(Bytes::from_static(&[3, 4, 0, 0])).unwrap();
        assert_eq!(event.method(), 4);
        assert!(event.payload().raw_data().unwrap().is_empty());
    }

    #[test]
    fn test_decode_rejects_wrong_tag() {
        let err = Event::decode(Bytes::from_static(&[1, 0, 0, 0, 0, 0])).unwrap_err();
        assert!(matches!(
            err,
            PacketError::TypeMismatch {
                expected: PacketType::Event,
                found: 1
            }
        ));
    }

    #[test]
    fn test_remarshal_loaded_packet_is_identity() {
        let original = Packet::request(3, 9, "ctx", [1, 2, 3]).marshal().unwrap();
        let loaded = Packet::Request(Request::decode(Bytes::from(original.clone())).unwrap());
        assert_eq!(loaded.marshal().unwrap(), original);
    }

    #[test]
    fn test_oversized_context_is_rejected() {
        let context = "a".repeat(70_000);
        let err = Packet::event(1, context, ()).marshal().unwrap_err();
        assert!(matches!(err, PacketError::ContextTooLarge(70_005)));
    }

    #[test]
    fn test_accessors_on_packet() {
        let req: Packet<(), ()> = Packet::request(1, 2, (), ());
        assert_eq!(req.id(), Some(2));
        assert_eq!(req.method(), Some(1));
        assert_eq!(req.status(), None);

        let resp: Packet<(), ()> = Packet::response(2, StatusCode::Busy, (), ());
        assert_eq!(resp.method(), None);
        assert_eq!(resp.status(), Some(StatusCode::Busy));

        let event: Packet<(), ()> = Packet::event(5, (), ());
        assert_eq!(event.id(), None);
        assert_eq!(event.packet_type(), PacketType::Event);
        assert!(!event.is_loaded());
    }
}
