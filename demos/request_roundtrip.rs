//! Example: Request/response round trip
//!
//! Builds a request, loads it on the "server" side, routes on the method code
//! without touching the payload, then answers with a response carrying the same id.
//!
//! Run with: `cargo run --example request_roundtrip`

use std::collections::HashMap;
use teapack::config::LoggingConfig;
use teapack::utils::logging::init_logging;
use teapack::{id_of, method_of, status_of, CodecConfig, Dispatcher, Packet, StatusCode};

const METHOD_GREET: u8 = 12;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(&LoggingConfig::default());
    let dispatcher = Dispatcher::new(CodecConfig::default());

    println!("=== Request/Response Round Trip ===\n");

    // Client side
    let mut ctx = HashMap::new();
    ctx.insert("foo", "bar");
    let mut data = HashMap::new();
    data.insert("hello", "world");

    let request = dispatcher.marshal(&Packet::request(METHOD_GREET, 12345, ctx, data))?;
    println!("Request: {} bytes", request.len());
    println!("   - Hex: {:02X?}", &request[..request.len().min(24)]);

    // Server side: header fields are available straight after load
    let incoming = dispatcher.load(&request)?;
    println!(
        "Loaded {} (id={}, method={})",
        incoming.packet_type(),
        id_of(&incoming),
        method_of(&incoming)
    );

    let reply = match method_of(&incoming) {
        METHOD_GREET => {
            let body: HashMap<String, String> = dispatcher.unmarshal(&incoming)?;
            let greeting = format!("hello, {}", body.get("hello").map_or("nobody", String::as_str));
            Packet::response(id_of(&incoming), StatusCode::Ok, (), greeting)
        }
        _ => Packet::response(id_of(&incoming), StatusCode::Unimplemented, (), String::new()),
    };
    let response = dispatcher.marshal(&reply)?;

    // Client side again: correlate by id
    let answer = dispatcher.load(&response)?;
    assert_eq!(id_of(&answer), 12345);
    let text: String = dispatcher.unmarshal(&answer)?;
    println!("Response status {}: {text}", status_of(&answer));

    dispatcher.metrics().log_metrics();
    Ok(())
}
