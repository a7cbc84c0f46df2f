//! # Decoded stream records.
//!
//! [`Record`] is one decoded unit of the sampled feed. The wire shape is
//! `{"data": {"id": ..., "text": ...}}`; records are immutable once decoded
//! and owned by the [`RecordStore`](crate::store::RecordStore) for the rest
//! of the process lifetime.

use serde::Deserialize;

/// One decoded unit of the sampled stream.
#[derive(Debug, Clone, Deserialize)]
pub struct Record {
    /// Nested payload block, delivered under the `data` key.
    #[serde(rename = "data")]
    pub payload: Payload,
}

/// Payload block of a sampled post.
#[derive(Debug, Clone, Deserialize)]
pub struct Payload {
    /// Stable identifier of the post.
    pub id: String,
    /// Text body of the post.
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_wire_shape() {
        let rec: Record =
            serde_json::from_str(r#"{"data":{"id":"42","text":"hello"}}"#).expect("well-formed");
        assert_eq!(rec.payload.id, "42");
        assert_eq!(rec.payload.text, "hello");
    }

    #[test]
    fn test_missing_payload_is_rejected() {
        assert!(serde_json::from_str::<Record>(r#"{"meta":{}}"#).is_err());
    }
}
