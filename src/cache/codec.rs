//! Durable-Tier Codec
//!
//! Reversible encoding of cache entries for the durable tier: JSON for
//! structure, base64 on top so the persisted text is opaque and survives
//! substrates that mangle raw JSON. Decoding failures surface as
//! `StoreError::Malformed` and the caller treats the entry as absent.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cache::CacheEntry;
use crate::error::StoreError;

// == Encode ==
/// Serializes an entry to the durable tier's text representation.
pub fn encode<T: Serialize>(entry: &CacheEntry<T>) -> Result<String, StoreError> {
    let json = serde_json::to_string(entry)
        .map_err(|e| StoreError::Malformed(format!("serialize: {e}")))?;
    Ok(STANDARD.encode(json))
}

// == Decode ==
/// Parses a durable-tier value back into an entry.
pub fn decode<T: DeserializeOwned>(text: &str) -> Result<CacheEntry<T>, StoreError> {
    let bytes = STANDARD
        .decode(text.trim())
        .map_err(|e| StoreError::Malformed(format!("base64: {e}")))?;
    let json = String::from_utf8(bytes)
        .map_err(|e| StoreError::Malformed(format!("utf-8: {e}")))?;
    serde_json::from_str(&json).map_err(|e| StoreError::Malformed(format!("deserialize: {e}")))
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    #[test]
    fn test_encode_decode_roundtrip() {
        let entry = CacheEntry::new(json!({"a": 1, "b": ["x", "y"]}), Duration::from_secs(60));

        let text = encode(&entry).unwrap();
        let back: CacheEntry<serde_json::Value> = decode(&text).unwrap();

        assert_eq!(back.data, entry.data);
        assert_eq!(back.expiration, entry.expiration);
    }

    #[test]
    fn test_encoded_text_is_opaque() {
        let entry = CacheEntry::new("secret payload".to_string(), Duration::from_secs(60));
        let text = encode(&entry).unwrap();

        assert!(!text.contains("secret payload"));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let result: Result<CacheEntry<String>, _> = decode("!!! not base64 !!!");
        assert!(matches!(result, Err(StoreError::Malformed(_))));
    }

    #[test]
    fn test_decode_rejects_wrong_structure() {
        // Valid base64, valid JSON, wrong shape
        let text = STANDARD.encode(r#"{"unexpected": true}"#);
        let result: Result<CacheEntry<String>, _> = decode(&text);
        assert!(matches!(result, Err(StoreError::Malformed(_))));
    }

    #[test]
    fn test_decode_tolerates_surrounding_whitespace() {
        let entry = CacheEntry::new(7u32, Duration::from_secs(60));
        let text = format!("  {}\n", encode(&entry).unwrap());
        let back: CacheEntry<u32> = decode(&text).unwrap();
        assert_eq!(back.data, 7);
    }
}
