//! Wire helpers: JSON rendering and base64 document payloads.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Serialize;

use crate::error::Result;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a model, audit or any other artifact to JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value)?,
        JsonFormat::Compact => serde_json::to_string(value)?,
    };
    Ok(json)
}

/// Encode document bytes for a JSON or text transport.
pub fn encode_document(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Decode a base64 document payload; surrounding whitespace is ignored.
pub fn decode_document(encoded: &str) -> Result<Vec<u8>> {
    Ok(STANDARD.decode(encoded.trim())?)
}
