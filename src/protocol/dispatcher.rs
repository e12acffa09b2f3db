use crate::config::CodecConfig;
use crate::core::packet::{Event, Packet, Request, Response};
use crate::core::packet_type::{packet_type, PacketType};
use crate::core::serialization::PayloadFormat;
use crate::error::{PacketError, Result};
use crate::utils::metrics::Metrics;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument, warn};

/// Parse a packet from a buffer.
///
/// The buffer is copied once into a shared `Bytes`; the returned packet's raw payload
/// blocks are views into that copy. Unknown or empty buffers are rejected before
/// anything is copied.
pub fn load(data: &[u8]) -> Result<Packet> {
    if packet_type(data) == PacketType::Unknown {
        debug!(len = data.len(), "Rejecting buffer with unknown packet type");
        return Err(PacketError::UnknownType);
    }
    load_bytes(Bytes::copy_from_slice(data))
}

/// Parse a packet from an already shared buffer without copying it.
pub fn load_bytes(data: Bytes) -> Result<Packet> {
    match packet_type(&data) {
        PacketType::Request => Request::decode(data).map(Packet::Request),
        PacketType::Response => Response::decode(data).map(Packet::Response),
        PacketType::Event => Event::decode(data).map(Packet::Event),
        PacketType::Unknown => Err(PacketError::UnknownType),
    }
}

/// Encode a packet with MessagePack payloads.
pub fn marshal<C, D>(packet: &Packet<C, D>) -> Result<Vec<u8>>
where
    C: Serialize,
    D: Serialize,
{
    packet.marshal()
}

/// Encode a packet with payloads in the given format.
pub fn marshal_with<C, D>(packet: &Packet<C, D>, format: PayloadFormat) -> Result<Vec<u8>>
where
    C: Serialize,
    D: Serialize,
{
    packet.marshal_with(format)
}

/// Configured packet codec.
///
/// Applies the configured payload format and packet size cap, and counts what passes
/// through it. Stateless apart from its counters, so one dispatcher can be shared
/// across threads.
#[derive(Debug, Default)]
pub struct Dispatcher {
    config: CodecConfig,
    metrics: Metrics,
}

impl Dispatcher {
    pub fn new(config: CodecConfig) -> Self {
        Self {
            config,
            metrics: Metrics::new(),
        }
    }

    /// Build a dispatcher from environment variables, rejecting invalid settings
    pub fn from_env() -> Result<Self> {
        let config = CodecConfig::from_env()?;
        config.validate_strict()?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    #[instrument(skip_all, fields(len = data.len()), level = "debug")]
    pub fn load(&self, data: &[u8]) -> Result<Packet> {
        self.check_size(data.len())
            .and_then(|_| load(data))
            .map(|packet| self.record_decoded(packet, data.len()))
            .map_err(|e| self.record_decode_error(e))
    }

    #[instrument(skip_all, fields(len = data.len()), level = "debug")]
    pub fn load_bytes(&self, data: Bytes) -> Result<Packet> {
        let len = data.len();
        self.check_size(len)
            .and_then(|_| load_bytes(data))
            .map(|packet| self.record_decoded(packet, len))
            .map_err(|e| self.record_decode_error(e))
    }

    #[instrument(skip_all, fields(packet_type = %packet.packet_type()), level = "debug")]
    pub fn marshal<C, D>(&self, packet: &Packet<C, D>) -> Result<Vec<u8>>
    where
        C: Serialize,
        D: Serialize,
    {
        let result = packet
            .marshal_with(self.config.payload_format)
            .and_then(|bytes| {
                self.check_size(bytes.len())?;
                Ok(bytes)
            });
        match result {
            Ok(bytes) => {
                self.metrics.packet_encoded(bytes.len() as u64);
                Ok(bytes)
            }
            Err(e) => {
                self.metrics.encode_error();
                warn!(error = %e, "Failed to marshal packet");
                Err(e)
            }
        }
    }

    /// Deserialize the data block with the configured format
    pub fn unmarshal<T, C, D>(&self, packet: &Packet<C, D>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let result = packet.unmarshal_with(self.config.payload_format);
        self.metrics.materialized(result.is_ok());
        result
    }

    /// Deserialize the context block with the configured format
    pub fn unmarshal_context<T, C, D>(&self, packet: &Packet<C, D>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let result = packet.unmarshal_context_with(self.config.payload_format);
        self.metrics.materialized(result.is_ok());
        result
    }

    fn check_size(&self, size: usize) -> Result<()> {
        if size > self.config.max_packet_size {
            return Err(PacketError::OversizedPacket {
                size,
                max: self.config.max_packet_size,
            });
        }
        Ok(())
    }

    fn record_decoded(&self, packet: Packet, len: usize) -> Packet {
        self.metrics.packet_decoded(len as u64);
        debug!(packet_type = %packet.packet_type(), "Loaded packet");
        packet
    }

    fn record_decode_error(&self, e: PacketError) -> PacketError {
        self.metrics.decode_error();
        warn!(error = %e, "Failed to load packet");
        e
    }
}
