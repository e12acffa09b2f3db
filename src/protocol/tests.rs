// test-only module included via protocol/mod.rs
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use crate::core::packet::Packet;
use crate::core::packet_type::{packet_type, PacketType};
use crate::core::status::StatusCode;
use crate::error::PacketError;
use crate::protocol::accessors::*;
use crate::protocol::dispatcher::{load, marshal};
use std::collections::HashMap;

fn map(key: &str, value: &str) -> HashMap<String, String> {
    let mut m = HashMap::new();
    m.insert(key.to_string(), value.to_string());
    m
}

#[test]
fn test_request_scenario() {
    let req = Packet::request(12, 12345, map("foo", "bar"), map("hello", "world"));
    let bytes = marshal(&req).expect("Marshal should succeed");
    assert_eq!(packet_type(&bytes), PacketType::Request);

    let packet = load(&bytes).expect("Load should succeed");
    assert_eq!(id_of(&packet), 12345);
    assert_eq!(method_of(&packet), 12);
    assert_eq!(status_of(&packet), StatusCode::Ok);

    let ctx: HashMap<String, String> = unmarshal_context(&packet).unwrap();
    let data: HashMap<String, String> = unmarshal(&packet).unwrap();
    assert_eq!(ctx, map("foo", "bar"));
    assert_eq!(data, map("hello", "world"));
}

#[test]
fn test_event_scenario() {
    let event = Packet::event(7, HashMap::<String, String>::new(), vec![1, 2, 3]);
    let bytes = marshal(&event).unwrap();
    assert_eq!(packet_type(&bytes), PacketType::Event);

    let packet = load(&bytes).unwrap();
    assert_eq!(id_of(&packet), 0);
    assert_eq!(method_of(&packet), 7);
    let ctx: HashMap<String, String> = unmarshal_context(&packet).unwrap();
    let data: Vec<i32> = unmarshal(&packet).unwrap();
    assert!(ctx.is_empty());
    assert_eq!(data, vec![1, 2, 3]);
}

#[test]
fn test_response_roundtrip() {
    let resp = Packet::response(12345, StatusCode::TooManyRequests, "retry-after", 30u32);
    let bytes = marshal(&resp).unwrap();
    assert_eq!(packet_type(&bytes), PacketType::Response);

    let packet = load(&bytes).unwrap();
    assert_eq!(id_of(&packet), 12345);
    assert_eq!(method_of(&packet), 0);
    assert_eq!(status_of(&packet), StatusCode::TooManyRequests);
    assert_eq!(unmarshal_context::<String, _, _>(&packet).unwrap(), "retry-after");
    assert_eq!(unmarshal::<u32, _, _>(&packet).unwrap(), 30);
}

#[test]
fn test_materialization_is_repeatable() {
    let bytes = marshal(&Packet::request(1, 2, "ctx", "data")).unwrap();
    let packet = load(&bytes).unwrap();
    for _ in 0..3 {
        assert_eq!(unmarshal::<String, _, _>(&packet).unwrap(), "data");
        assert_eq!(unmarshal_context::<String, _, _>(&packet).unwrap(), "ctx");
    }
}

#[test]
fn test_fresh_packets_are_not_loaded() {
    let fresh = [
        Packet::request(1, 1, "c", "d"),
        Packet::response(1, StatusCode::Ok, "c", "d"),
        Packet::event(1, "c", "d"),
    ];
    for packet in &fresh {
        assert!(matches!(
            unmarshal::<String, _, _>(packet),
            Err(PacketError::NotLoaded)
        ));
        assert!(matches!(
            unmarshal_context::<String, _, _>(packet),
            Err(PacketError::NotLoaded)
        ));
    }
}

#[test]
fn test_payload_shape_mismatch_reports_codec_error() {
    let bytes = marshal(&Packet::event(1, (), "not a number")).unwrap();
    let packet = load(&bytes).unwrap();
    let err = unmarshal::<u64, _, _>(&packet).unwrap_err();
    assert!(matches!(err, PacketError::MsgpackDecode(_)));
}

#[test]
fn test_request_response_correlation() {
    let req_bytes = marshal(&Packet::request(3, 777, (), "ping")).unwrap();
    let req = load(&req_bytes).unwrap();

    let resp_bytes = marshal(&Packet::response(
        id_of(&req),
        StatusCode::Processing,
        (),
        "pong",
    ))
    .unwrap();
    let resp = load(&resp_bytes).unwrap();
    assert_eq!(id_of(&resp), 777);
    assert!(status_of(&resp).is_success());
}
