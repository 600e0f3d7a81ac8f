//! Conversion to the host's generic map representation.
//!
//! The host's save call only accepts a string-keyed tree of plain values, so
//! the configuration is encoded to JSON bytes and decoded back as an untyped
//! map. The serde field contract is therefore the transport contract.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::schema::Configuration;

/// Untyped key/value tree accepted by the host.
pub type TransportMap = Map<String, Value>;

/// Failure to encode a configuration for transport.
#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to decode configuration into a map: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Encode `config` as a transport map.
pub fn to_transport_map(config: &Configuration) -> Result<TransportMap, EncodingError> {
    let data = serde_json::to_vec(config).map_err(EncodingError::Serialize)?;
    serde_json::from_slice(&data).map_err(EncodingError::Decode)
}
