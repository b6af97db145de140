//! Inbound events delivered by the capture hook

use super::{ContextId, ObservedCertificate};
use crate::utils::EventError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A completed HTTPS response and the certificate chain it was served with
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseObservation {
    pub url: String,
    pub context_id: ContextId,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    /// Responses served from cache carry no fresh handshake
    #[serde(default)]
    pub from_cache: bool,
    #[serde(default)]
    pub certificate_chain: Vec<ObservedCertificate>,
}

/// Events consumed by the watcher
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ObservationEvent {
    Response(ResponseObservation),
    /// The context navigated away or closed
    Reset { context_id: ContextId },
}

impl ObservationEvent {
    /// Decode one NDJSON line
    pub fn from_json_line(line: &str) -> Result<Self, EventError> {
        serde_json::from_str(line).map_err(|e| EventError::Decode {
            message: e.to_string(),
        })
    }

    pub fn context_id(&self) -> ContextId {
        match self {
            ObservationEvent::Response(response) => response.context_id,
            ObservationEvent::Reset { context_id } => *context_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_response() {
        let line = r#"{"event":"response","url":"https://example.com/a","context_id":3,"timestamp":1700000000000,"certificate_chain":[{"fingerprint":"ff","issuer":"CN=CA","subject":"CN=example.com","validity_start":1690000000000,"validity_end":1710000000000}]}"#;
        let event = ObservationEvent::from_json_line(line).unwrap();
        assert_eq!(event.context_id(), ContextId(3));
        match event {
            ObservationEvent::Response(response) => {
                assert!(!response.from_cache);
                assert_eq!(response.certificate_chain.len(), 1);
                assert_eq!(response.timestamp.timestamp_millis(), 1_700_000_000_000);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_decode_reset() {
        let event = ObservationEvent::from_json_line(r#"{"event":"reset","context_id":-1}"#).unwrap();
        assert!(matches!(
            event,
            ObservationEvent::Reset {
                context_id: ContextId(-1)
            }
        ));
    }

    #[test]
    fn test_decode_garbage() {
        assert!(ObservationEvent::from_json_line("not json").is_err());
        assert!(ObservationEvent::from_json_line(r#"{"event":"unknown"}"#).is_err());
    }
}
