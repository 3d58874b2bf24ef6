//! Snapshot document format
//!
//! ```json
//! {
//!   "progress": {"module1": true},
//!   "theme": "dark",
//!   "_meta": { "exportDate": "2026-10-16T09:30:00.000Z", "version": 1, "keys": 2 }
//! }
//! ```
//!
//! Tracked entries come first in tracked-key order, `_meta` last.

use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use super::keys::TRACKED_KEYS;
use crate::error::{VaultError, VaultResult};
use crate::storage::KeyValueStore;

/// Current snapshot format version
pub const SNAPSHOT_VERSION: u32 = 1;

/// Name of the metadata entry in a snapshot document
pub const META_KEY: &str = "_meta";

/// Metadata record written alongside the entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotMeta {
    /// When the snapshot was taken
    #[serde(rename = "exportDate", with = "iso_millis")]
    pub export_date: DateTime<Utc>,
    /// Format identifier
    pub version: u32,
    /// Number of entries in the snapshot
    pub keys: usize,
}

/// Every present tracked key, captured from a store
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    entries: Map<String, Value>,
    meta: SnapshotMeta,
}

impl Snapshot {
    /// Read each tracked key from `store` and embed the present ones
    pub fn capture<S: KeyValueStore + ?Sized>(
        store: &S,
        taken_at: DateTime<Utc>,
    ) -> VaultResult<Self> {
        let mut entries = Map::new();

        for key in TRACKED_KEYS {
            if let Some(raw) = store.get(key)? {
                entries.insert(key.to_string(), encode_value(&raw));
            }
        }

        let meta = SnapshotMeta {
            export_date: taken_at,
            version: SNAPSHOT_VERSION,
            keys: entries.len(),
        };

        Ok(Self { entries, meta })
    }

    pub fn meta(&self) -> &SnapshotMeta {
        &self.meta
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys present in the snapshot, in tracked order
    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Two-space indented JSON
    pub fn to_json_pretty(&self) -> VaultResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| VaultError::Json(format!("Failed to serialize snapshot: {}", e)))
    }
}

impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len() + 1))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.serialize_entry(META_KEY, &self.meta)?;
        map.end()
    }
}

/// A parsed snapshot document that carries a metadata entry
#[derive(Debug, Clone)]
pub struct SnapshotDocument {
    entries: Map<String, Value>,
    meta: Value,
}

impl SnapshotDocument {
    /// Parse UTF-8 JSON bytes into a document
    ///
    /// Text that is not JSON is a [`VaultError::Parse`]; JSON without a
    /// `_meta` object is a [`VaultError::InvalidFormat`].
    pub fn parse(bytes: &[u8]) -> VaultResult<Self> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| VaultError::Parse(format!("not UTF-8 text: {}", e)))?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        let value: Value =
            serde_json::from_str(text).map_err(|e| VaultError::Parse(e.to_string()))?;

        let Value::Object(mut entries) = value else {
            return Err(VaultError::InvalidFormat);
        };

        match entries.remove(META_KEY) {
            Some(meta @ Value::Object(_)) => Ok(Self { entries, meta }),
            _ => Err(VaultError::InvalidFormat),
        }
    }

    /// Value stored under `key`, if the document has one
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// All entry keys except the metadata, in document order
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    /// The raw metadata value
    pub fn raw_meta(&self) -> &Value {
        &self.meta
    }

    /// The metadata record, if it has the expected shape
    pub fn meta(&self) -> Option<SnapshotMeta> {
        serde_json::from_value(self.meta.clone()).ok()
    }
}

/// Convert a stored raw value into its snapshot form
///
/// Text that parses as structured JSON (object, array, number, boolean or
/// null) is embedded as that structure. Anything else, including text that
/// is itself a JSON string literal, is embedded verbatim as a string so
/// that restoring it writes back the exact same text.
pub fn encode_value(raw: &str) -> Value {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::String(_)) | Err(_) => Value::String(raw.to_string()),
        Ok(parsed) => parsed,
    }
}

/// Convert a snapshot value back into the text to store
///
/// Strings are stored verbatim, everything else as compact JSON.
pub fn decode_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// `exportDate` is written with millisecond precision and a `Z` suffix.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let text = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&text)
            .map(|date| date.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use chrono::TimeZone;
    use serde_json::json;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_encode_structured_values() {
        assert_eq!(encode_value(r#"{"module1":true}"#), json!({"module1": true}));
        assert_eq!(encode_value("[1,2,3]"), json!([1, 2, 3]));
        assert_eq!(encode_value("42"), json!(42));
        assert_eq!(encode_value("false"), json!(false));
        assert_eq!(encode_value("null"), Value::Null);
    }

    #[test]
    fn test_encode_opaque_values() {
        assert_eq!(encode_value("dark"), json!("dark"));
        assert_eq!(encode_value(""), json!(""));
        assert_eq!(encode_value("{broken"), json!("{broken"));
        // A JSON string literal stays as the literal text
        assert_eq!(encode_value(r#""quoted""#), json!(r#""quoted""#));
    }

    #[test]
    fn test_decode_values() {
        assert_eq!(decode_value(&json!("dark")), "dark");
        assert_eq!(decode_value(&json!({"a": [1, 2]})), r#"{"a":[1,2]}"#);
        assert_eq!(decode_value(&json!(7)), "7");
        assert_eq!(decode_value(&Value::Null), "null");
    }

    #[test]
    fn test_object_key_order_survives() {
        let raw = r#"{"zeta":1,"alpha":2}"#;
        assert_eq!(decode_value(&encode_value(raw)), raw);
    }

    #[test]
    fn test_capture_in_tracked_order() {
        let store = MemoryStore::with_entries([
            ("theme", "dark"),
            ("progress", r#"{"module1":true}"#),
            ("unrelated", "x"),
        ]);

        let snapshot = Snapshot::capture(&store, fixed_time()).unwrap();
        assert_eq!(snapshot.keys(), vec!["progress", "theme"]);
        assert_eq!(snapshot.meta().keys, 2);
        assert_eq!(snapshot.meta().version, SNAPSHOT_VERSION);
    }

    #[test]
    fn test_serialized_layout() {
        let store = MemoryStore::with_entries([("theme", "dark"), ("progress", r#"{"module1":true}"#)]);
        let snapshot = Snapshot::capture(&store, fixed_time()).unwrap();

        let text = snapshot.to_json_pretty().unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            value,
            json!({
                "progress": {"module1": true},
                "theme": "dark",
                "_meta": {"exportDate": "2026-10-16T09:30:00.000Z", "version": 1, "keys": 2}
            })
        );

        let order: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(order, ["progress", "theme", "_meta"]);
        assert!(text.contains("\n  \"progress\": {"));
    }

    #[test]
    fn test_parse_rejects_non_json() {
        let err = SnapshotDocument::parse(b"this is not json").unwrap_err();
        assert!(err.is_parse());

        let err = SnapshotDocument::parse(&[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_parse_requires_meta() {
        assert!(SnapshotDocument::parse(br#"{"theme": "dark"}"#)
            .unwrap_err()
            .is_invalid_format());
        assert!(SnapshotDocument::parse(br#"{"theme": "dark", "_meta": null}"#)
            .unwrap_err()
            .is_invalid_format());
        assert!(SnapshotDocument::parse(b"[1, 2]")
            .unwrap_err()
            .is_invalid_format());
    }

    #[test]
    fn test_parse_rejects_scalar_meta() {
        for meta in ["false", "0", "\"\"", "[]", "\"2026-10-16\""] {
            let doc = format!(r#"{{"theme": "dark", "_meta": {}}}"#, meta);
            assert!(
                SnapshotDocument::parse(doc.as_bytes())
                    .unwrap_err()
                    .is_invalid_format(),
                "accepted _meta {}",
                meta
            );
        }
    }

    #[test]
    fn test_parse_strips_byte_order_mark() {
        let doc = SnapshotDocument::parse("\u{feff}{\"_meta\": {}}".as_bytes()).unwrap();
        assert_eq!(doc.keys().count(), 0);
        assert!(doc.meta().is_none());
    }

    #[test]
    fn test_parse_reads_meta() {
        let doc = SnapshotDocument::parse(
            br#"{"theme": "dark", "_meta": {"exportDate": "2026-10-16T09:30:00.000Z", "version": 1, "keys": 1}}"#,
        )
        .unwrap();

        let meta = doc.meta().unwrap();
        assert_eq!(meta.export_date, fixed_time());
        assert_eq!(meta.version, 1);
        assert_eq!(doc.get("theme"), Some(&json!("dark")));
        assert!(doc.get(META_KEY).is_none());
    }
}
