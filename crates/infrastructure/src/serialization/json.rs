//! JSON serialization helpers for on-disk documents.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Error type for serialization operations.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// JSON deserialization failed.
    #[error("JSON deserialization failed: {0}")]
    Deserialize(serde_json::Error),

    /// The document was empty.
    #[error("document is empty")]
    Empty,
}

/// Serializes a value as an indented JSON document ending in a newline.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, SerializationError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    buffer.push(b'\n');
    Ok(buffer)
}

/// Deserializes a JSON document, pretty-printed or not.
///
/// # Errors
///
/// Returns `Empty` for a blank document, otherwise `Deserialize` if the JSON
/// is invalid or does not match the expected type.
pub fn from_json_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SerializationError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(SerializationError::Empty);
    }
    serde_json::from_slice(bytes).map_err(SerializationError::Deserialize)
}
