//! Per-field extraction outcomes over untyped JSON
//!
//! Upstream payloads are loosely shaped: a field may be absent, null, or of an
//! unexpected type. Every field is extracted on its own through [`Field`] so
//! that one mismatch only costs that field.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// JSON object as returned by serde_json
pub type Object = Map<String, Value>;

/// Outcome of extracting one attribute from an upstream payload
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    /// Value found with the expected shape
    Present(T),
    /// Key absent, null, or empty
    Missing,
    /// Key present but not of the expected shape
    Malformed(&'static str),
}

impl<T> Field<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Field<U> {
        match self {
            Field::Present(v) => Field::Present(f(v)),
            Field::Missing => Field::Missing,
            Field::Malformed(expected) => Field::Malformed(expected),
        }
    }

    pub fn and_then<U>(self, f: impl FnOnce(T) -> Field<U>) -> Field<U> {
        match self {
            Field::Present(v) => f(v),
            Field::Missing => Field::Missing,
            Field::Malformed(expected) => Field::Malformed(expected),
        }
    }

    /// Collapse into an `Option`, logging shape mismatches
    pub fn ok(self, source: &str, name: &str) -> Option<T> {
        match self {
            Field::Present(v) => Some(v),
            Field::Missing => None,
            Field::Malformed(expected) => {
                tracing::debug!(
                    source,
                    field = name,
                    "Skipping field, expected {}",
                    expected
                );
                None
            }
        }
    }
}

fn get<'a>(obj: &'a Object, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| !v.is_null())
}

pub fn string(obj: &Object, key: &str) -> Field<String> {
    match get(obj, key) {
        None => Field::Missing,
        Some(Value::String(s)) => Field::Present(s.clone()),
        Some(_) => Field::Malformed("string"),
    }
}

pub fn uint(obj: &Object, key: &str) -> Field<u32> {
    match get(obj, key) {
        None => Field::Missing,
        Some(v) => v
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .map_or(Field::Malformed("unsigned integer"), Field::Present),
    }
}

pub fn float(obj: &Object, key: &str) -> Field<f64> {
    match get(obj, key) {
        None => Field::Missing,
        Some(v) => v.as_f64().map_or(Field::Malformed("number"), Field::Present),
    }
}

pub fn array<'a>(obj: &'a Object, key: &str) -> Field<&'a Vec<Value>> {
    match get(obj, key) {
        None => Field::Missing,
        Some(Value::Array(items)) => Field::Present(items),
        Some(_) => Field::Malformed("array"),
    }
}

pub fn object<'a>(obj: &'a Object, key: &str) -> Field<&'a Object> {
    match get(obj, key) {
        None => Field::Missing,
        Some(Value::Object(inner)) => Field::Present(inner),
        Some(_) => Field::Malformed("object"),
    }
}

/// `["a", "b"]`
pub fn string_list(obj: &Object, key: &str) -> Field<Vec<String>> {
    array(obj, key).and_then(|items| {
        items
            .iter()
            .map(|v| v.as_str().map(str::to_string))
            .collect::<Option<Vec<_>>>()
            .map_or(Field::Malformed("array of strings"), non_empty)
    })
}

/// `[{"name": "a"}, {"name": "b"}]`; entries without a string name are skipped
pub fn name_list(obj: &Object, key: &str) -> Field<Vec<String>> {
    array(obj, key).and_then(|items| {
        let mut names = Vec::with_capacity(items.len());
        for item in items {
            let Value::Object(entry) = item else {
                return Field::Malformed("array of objects");
            };
            if let Some(name) = entry.get("name").and_then(Value::as_str) {
                names.push(name.to_string());
            }
        }
        non_empty(names)
    })
}

/// `{"k": ["a", "b"]}`
pub fn string_list_map(obj: &Object, key: &str) -> Field<BTreeMap<String, Vec<String>>> {
    object(obj, key).and_then(|inner| {
        let mut out = BTreeMap::new();
        for (k, v) in inner {
            let Some(list) = v.as_array().and_then(|items| {
                items
                    .iter()
                    .map(|i| i.as_str().map(str::to_string))
                    .collect::<Option<Vec<String>>>()
            }) else {
                return Field::Malformed("object of string arrays");
            };
            out.insert(k.clone(), list);
        }
        non_empty_map(out)
    })
}

/// `{"k": "v"}`
pub fn string_map(obj: &Object, key: &str) -> Field<BTreeMap<String, String>> {
    object(obj, key).and_then(|inner| {
        let mut out = BTreeMap::new();
        for (k, v) in inner {
            let Some(s) = v.as_str() else {
                return Field::Malformed("object of strings");
            };
            out.insert(k.clone(), s.to_string());
        }
        non_empty_map(out)
    })
}

/// Join display names with ", "
pub fn joined(items: Vec<String>) -> String {
    items.join(", ")
}

fn non_empty<T>(items: Vec<T>) -> Field<Vec<T>> {
    if items.is_empty() {
        Field::Missing
    } else {
        Field::Present(items)
    }
}

fn non_empty_map<K, V>(map: BTreeMap<K, V>) -> Field<BTreeMap<K, V>> {
    if map.is_empty() {
        Field::Missing
    } else {
        Field::Present(map)
    }
}
