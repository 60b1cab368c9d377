//! Decoding of API response bodies into typed records.
//!
//! Responsibilities:
//! - Deserialize a `serde_json::Value` into a typed record while accepting
//!   both snake_case and camelCase keys for every struct field. Different
//!   endpoints historically return different casing conventions, so the
//!   decoder normalizes keys (strip underscores, lowercase) and matches them
//!   against the field names a struct declares.
//!
//! Explicitly does NOT handle:
//! - Maps declared as plain maps (event `data`, group keys): their keys are
//!   user data and pass through untouched.
//! - Scalar coercion beyond what serde provides; duration and timestamp
//!   forms live in [`crate::serde_helpers`].
//!
//! Invariants / assumptions:
//! - Normalization only widens matching; a key that already equals the
//!   declared field name always wins, and the first match for a field is
//!   kept when a body redundantly carries both casings.

use serde::de::value::StrDeserializer;
use serde::de::{self, DeserializeSeed, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{Error, Result};

/// Decode a raw response body into a typed record, accepting snake_case and
/// camelCase spellings of every field name.
pub fn decode<T>(value: &Value) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    T::deserialize(NormalizingDeserializer { value })
        .map_err(|e| Error::Decode(e.to_string()))
}

/// Normalize a key for comparison: strip underscores and lowercase.
///
/// `processedBytes`, `processed_bytes` and `_sysTime`/`sys_time` all collapse
/// to the same form.
fn normalize(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '_')
        .flat_map(|c| c.to_lowercase())
        .collect()
}

struct NormalizingDeserializer<'de> {
    value: &'de Value,
}

macro_rules! forward_to_value {
    ($($method:ident)*) => {
        $(
            fn $method<V>(self, visitor: V) -> std::result::Result<V::Value, Self::Error>
            where
                V: Visitor<'de>,
            {
                self.value.$method(visitor)
            }
        )*
    };
}

impl<'de> Deserializer<'de> for NormalizingDeserializer<'de> {
    type Error = serde_json::Error;

    forward_to_value! {
        deserialize_any deserialize_bool
        deserialize_i8 deserialize_i16 deserialize_i32 deserialize_i64
        deserialize_u8 deserialize_u16 deserialize_u32 deserialize_u64
        deserialize_f32 deserialize_f64
        deserialize_char deserialize_str deserialize_string
        deserialize_bytes deserialize_byte_buf
        deserialize_unit deserialize_identifier deserialize_ignored_any
    }

    fn deserialize_option<V>(self, visitor: V) -> std::result::Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        if self.value.is_null() {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_unit_struct<V>(
        self,
        name: &'static str,
        visitor: V,
    ) -> std::result::Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        self.value.deserialize_unit_struct(name, visitor)
    }

    fn deserialize_newtype_struct<V>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> std::result::Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> std::result::Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::Array(elements) => visitor.visit_seq(SeqElements {
                iter: elements.iter(),
            }),
            _ => self.value.deserialize_any(visitor),
        }
    }

    fn deserialize_tuple<V>(
        self,
        _len: usize,
        visitor: V,
    ) -> std::result::Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> std::result::Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> std::result::Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        match self.value {
            // Plain maps keep user keys as-is; only the values recurse so
            // struct-shaped map values still normalize.
            Value::Object(map) => visitor.visit_map(MapEntries {
                iter: map.iter(),
                value: None,
            }),
            _ => self.value.deserialize_any(visitor),
        }
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> std::result::Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        let Value::Object(map) = self.value else {
            return self.value.deserialize_any(visitor);
        };

        let normalized_fields: Vec<String> = fields.iter().map(|f| normalize(f)).collect();
        let mut matched: Vec<(&'static str, &'de Value)> = Vec::with_capacity(map.len());
        let mut seen = vec![false; fields.len()];

        // Exact spellings bind first so a body carrying both casings resolves
        // to the declared one; the normalized pass mops up the rest.
        for (key, value) in map {
            if let Some(idx) = fields.iter().position(|f| *f == key)
                && !seen[idx]
            {
                seen[idx] = true;
                matched.push((fields[idx], value));
            }
        }
        for (key, value) in map {
            let normalized_key = normalize(key);
            if let Some(idx) = normalized_fields.iter().position(|f| *f == normalized_key)
                && !seen[idx]
            {
                seen[idx] = true;
                matched.push((fields[idx], value));
            }
        }

        visitor.visit_map(StructFields {
            iter: matched.into_iter(),
            value: None,
        })
    }

    fn deserialize_enum<V>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> std::result::Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        self.value.deserialize_enum(name, variants, visitor)
    }
}

struct StructFields<'de> {
    iter: std::vec::IntoIter<(&'static str, &'de Value)>,
    value: Option<&'de Value>,
}

impl<'de> MapAccess<'de> for StructFields<'de> {
    type Error = serde_json::Error;

    fn next_key_seed<K>(&mut self, seed: K) -> std::result::Result<Option<K::Value>, Self::Error>
    where
        K: DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((field, value)) => {
                self.value = Some(value);
                seed.deserialize(StrDeserializer::new(field)).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<S>(&mut self, seed: S) -> std::result::Result<S::Value, Self::Error>
    where
        S: DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(NormalizingDeserializer { value }),
            None => Err(de::Error::custom("value requested before key")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct MapEntries<'de> {
    iter: serde_json::map::Iter<'de>,
    value: Option<&'de Value>,
}

impl<'de> MapAccess<'de> for MapEntries<'de> {
    type Error = serde_json::Error;

    fn next_key_seed<K>(&mut self, seed: K) -> std::result::Result<Option<K::Value>, Self::Error>
    where
        K: DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(StrDeserializer::new(key)).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<S>(&mut self, seed: S) -> std::result::Result<S::Value, Self::Error>
    where
        S: DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(NormalizingDeserializer { value }),
            None => Err(de::Error::custom("value requested before key")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct SeqElements<'de> {
    iter: std::slice::Iter<'de, Value>,
}

impl<'de> SeqAccess<'de> for SeqElements<'de> {
    type Error = serde_json::Error;

    fn next_element_seed<S>(
        &mut self,
        seed: S,
    ) -> std::result::Result<Option<S::Value>, Self::Error>
    where
        S: DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(NormalizingDeserializer { value }).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;
    use std::collections::HashMap;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Inner {
        row_count: u64,
    }

    #[derive(Debug, PartialEq, Deserialize)]
    struct Outer {
        processed_bytes: u64,
        #[serde(default)]
        label: Option<String>,
        inner: Vec<Inner>,
        #[serde(default)]
        data: HashMap<String, Value>,
    }

    #[test]
    fn test_decode_accepts_camel_case_keys() {
        let value = json!({
            "processedBytes": 100,
            "inner": [{"rowCount": 3}]
        });
        let decoded: Outer = decode(&value).unwrap();
        assert_eq!(decoded.processed_bytes, 100);
        assert_eq!(decoded.inner, vec![Inner { row_count: 3 }]);
    }

    #[test]
    fn test_decode_accepts_snake_case_keys() {
        let value = json!({
            "processed_bytes": 100,
            "inner": [{"row_count": 3}]
        });
        let decoded: Outer = decode(&value).unwrap();
        assert_eq!(decoded.processed_bytes, 100);
        assert_eq!(decoded.inner, vec![Inner { row_count: 3 }]);
    }

    #[test]
    fn test_decode_camel_and_snake_yield_identical_records() {
        let camel = json!({"processedBytes": 7, "label": "x", "inner": [{"rowCount": 1}]});
        let snake = json!({"processed_bytes": 7, "label": "x", "inner": [{"row_count": 1}]});
        let a: Outer = decode(&camel).unwrap();
        let b: Outer = decode(&snake).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_decode_leaves_plain_map_keys_untouched() {
        let value = json!({
            "processed_bytes": 1,
            "inner": [],
            "data": {"userField": 1, "another_key": "v"}
        });
        let decoded: Outer = decode(&value).unwrap();
        assert!(decoded.data.contains_key("userField"));
        assert!(decoded.data.contains_key("another_key"));
    }

    #[test]
    fn test_decode_ignores_unknown_keys() {
        let value = json!({"processed_bytes": 1, "inner": [], "somethingElse": true});
        let decoded: Outer = decode(&value).unwrap();
        assert_eq!(decoded.processed_bytes, 1);
    }

    #[test]
    fn test_decode_missing_required_field_errors() {
        let value = json!({"inner": []});
        let result: Result<Outer> = decode(&value);
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[test]
    fn test_decode_type_mismatch_errors() {
        let value = json!({"processed_bytes": "not a number", "inner": []});
        let result: Result<Outer> = decode(&value);
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[test]
    fn test_decode_declared_spelling_wins_on_duplicates() {
        let value = json!({"processed_bytes": 1, "processedBytes": 2, "inner": []});
        let decoded: Outer = decode(&value).unwrap();
        assert_eq!(decoded.processed_bytes, 1);
    }

    #[test]
    fn test_decode_leading_underscore_keys_match() {
        #[derive(Debug, Deserialize)]
        struct Row {
            sys_time: String,
        }
        let value = json!({"_sysTime": "2024-02-06T11:39:28Z"});
        let decoded: Row = decode(&value).unwrap();
        assert_eq!(decoded.sys_time, "2024-02-06T11:39:28Z");
    }

    #[test]
    fn test_decode_exact_match_beats_normalized_match() {
        // A struct can declare a camelCase name via serde rename; the raw
        // spelling must still bind to it directly.
        #[derive(Debug, Deserialize)]
        struct Renamed {
            #[serde(rename = "type")]
            kind: String,
        }
        let value = json!({"type": "dashboard"});
        let decoded: Renamed = decode(&value).unwrap();
        assert_eq!(decoded.kind, "dashboard");
    }

    #[test]
    fn test_decode_enum_strings() {
        #[derive(Debug, PartialEq, Deserialize)]
        #[serde(rename_all = "lowercase")]
        enum Kind {
            Analytics,
            Stream,
        }
        #[derive(Debug, Deserialize)]
        struct Wrapper {
            kind: Kind,
        }
        let decoded: Wrapper = decode(&json!({"kind": "stream"})).unwrap();
        assert_eq!(decoded.kind, Kind::Stream);

        let result: Result<Wrapper> = decode(&json!({"kind": "bogus"}));
        assert!(matches!(result, Err(Error::Decode(_))));
    }
}
