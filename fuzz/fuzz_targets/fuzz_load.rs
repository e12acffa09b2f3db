#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Loading must never panic; accepted buffers must re-marshal byte for byte
    if let Ok(packet) = teapack::load(data) {
        let _ = packet.unmarshal::<serde_json::Value>();
        let _ = packet.unmarshal_context::<serde_json::Value>();
        if let Ok(bytes) = teapack::marshal(&packet) {
            assert_eq!(bytes, data);
        }
    }
});
