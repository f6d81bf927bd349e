//! Key case conversion for upload payloads
//!
//! Domain types serialize with snake_case field names. The upload API expects
//! lowerCamelCase keys, so the serialized JSON tree is rewritten key by key.

use serde_json::{Map, Value};

/// Convert one snake_case key to lowerCamelCase
///
/// The first `_`-separated segment is kept as is; each following segment gets
/// its first character upper-cased and the rest lower-cased.
pub fn to_camel_case(key: &str) -> String {
    let mut parts = key.split('_');
    let mut converted = parts.next().unwrap_or_default().to_string();

    for part in parts {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            converted.extend(first.to_uppercase());
            converted.push_str(&chars.as_str().to_lowercase());
        }
    }

    converted
}

/// Recursively rewrite every object key in a JSON tree
///
/// Arrays are walked element by element; scalars are returned unchanged.
pub fn convert_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (to_camel_case(&key), convert_keys(value)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(convert_keys).collect()),
        scalar => scalar,
    }
}
