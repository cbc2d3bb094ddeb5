//! The `{ success, message, data }` wrapper every API response uses.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message used when the server reports failure without saying why.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Request failed";

/// Response envelope returned by every clinic API endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Whether the server considers the call successful.
    #[serde(default)]
    pub success: bool,
    /// Human-readable message, usually present on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Payload, present on success for endpoints that return one.
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Why an envelope could not be unwrapped.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EnvelopeError {
    /// The server answered `success: false`.
    #[error("{0}")]
    Failure(String),

    /// The server answered `success: true` without the expected payload.
    #[error("response did not include data")]
    MissingData,
}

impl<T> ApiEnvelope<T> {
    /// Returns the server message, or a generic one if the server sent none.
    #[must_use]
    pub fn message_or_default(&self) -> String {
        self.message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(DEFAULT_FAILURE_MESSAGE)
            .to_string()
    }

    /// Unwraps the payload of a successful envelope.
    ///
    /// # Errors
    ///
    /// `Failure` carrying the server message when `success` is false,
    /// `MissingData` when a successful envelope has no payload.
    pub fn into_data(self) -> Result<T, EnvelopeError> {
        if !self.success {
            return Err(EnvelopeError::Failure(self.message_or_default()));
        }
        self.data.ok_or(EnvelopeError::MissingData)
    }

    /// Checks success for endpoints whose payload the caller ignores.
    ///
    /// # Errors
    ///
    /// `Failure` carrying the server message when `success` is false.
    pub fn into_outcome(self) -> Result<Option<T>, EnvelopeError> {
        if self.success {
            Ok(self.data)
        } else {
            Err(EnvelopeError::Failure(self.message_or_default()))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_success_envelope_yields_data() {
        let envelope: ApiEnvelope<Vec<u32>> =
            serde_json::from_str(r#"{"success": true, "data": [1, 2]}"#).unwrap();
        assert_eq!(envelope.into_data().unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_failure_envelope_carries_message() {
        let envelope: ApiEnvelope<Vec<u32>> =
            serde_json::from_str(r#"{"success": false, "message": "Slot already taken"}"#)
                .unwrap();
        assert_eq!(
            envelope.into_data(),
            Err(EnvelopeError::Failure("Slot already taken".to_string()))
        );
    }

    #[test]
    fn test_failure_without_message_uses_default() {
        let envelope: ApiEnvelope<()> = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert_eq!(
            envelope.into_outcome(),
            Err(EnvelopeError::Failure(DEFAULT_FAILURE_MESSAGE.to_string()))
        );
    }

    #[test]
    fn test_missing_data() {
        let envelope: ApiEnvelope<String> = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert_eq!(envelope.clone().into_outcome(), Ok(None));
        assert_eq!(envelope.into_data(), Err(EnvelopeError::MissingData));
    }
}
