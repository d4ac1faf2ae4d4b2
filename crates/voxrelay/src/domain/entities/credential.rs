//! Credential - Ephemeral realtime session token
//!
//! The vendor's payload is kept verbatim so it can be handed back to the
//! caller unmodified; construction only checks that the secret is present.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::errors::DomainError;

/// Short-lived token object returned by the realtime gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct Credential {
    payload: Value,
}

impl Credential {
    /// Wrap a vendor payload, rejecting it when `client_secret.value` is missing
    pub fn from_payload(payload: Value) -> Result<Self, DomainError> {
        match payload.pointer("/client_secret/value").and_then(Value::as_str) {
            Some(secret) if !secret.is_empty() => Ok(Self { payload }),
            _ => Err(DomainError::upstream(
                "credential payload is missing client_secret.value",
            )),
        }
    }

    /// The ephemeral secret used to authenticate vendor-direct operations
    pub fn secret(&self) -> &str {
        self.payload
            .pointer("/client_secret/value")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.payload
            .pointer("/client_secret/expires_at")
            .and_then(Value::as_i64)
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
    }

    /// Realtime model named by the vendor, if any
    pub fn model(&self) -> Option<&str> {
        self.payload.get("model").and_then(Value::as_str)
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    pub fn into_payload(self) -> Value {
        self.payload
    }
}

impl TryFrom<Value> for Credential {
    type Error = DomainError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_payload(value)
    }
}

impl From<Credential> for Value {
    fn from(credential: Credential) -> Self {
        credential.payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accepts_vendor_shape() {
        let credential = Credential::from_payload(json!({
            "id": "sess_001",
            "model": "gpt-4o-realtime-preview-2024-12-17",
            "client_secret": { "value": "ek_abc", "expires_at": 1_700_000_000 }
        }))
        .unwrap();

        assert_eq!(credential.secret(), "ek_abc");
        assert_eq!(credential.model(), Some("gpt-4o-realtime-preview-2024-12-17"));
        assert_eq!(credential.expires_at().unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_rejects_missing_secret() {
        let err = Credential::from_payload(json!({ "client_secret": {} })).unwrap_err();
        assert!(matches!(err, DomainError::Upstream(_)));

        assert!(Credential::from_payload(json!({ "client_secret": { "value": "" } })).is_err());
        assert!(Credential::from_payload(json!("nope")).is_err());
    }

    #[test]
    fn test_serializes_verbatim() {
        let payload = json!({ "client_secret": { "value": "ek_abc" }, "extra": [1, 2] });
        let credential = Credential::from_payload(payload.clone()).unwrap();
        assert_eq!(serde_json::to_value(&credential).unwrap(), payload);

        let parsed: Result<Credential, _> = serde_json::from_value(json!({ "nothing": true }));
        assert!(parsed.is_err());
    }
}
