//! Flattening of arbitrary JSON payloads into `key -> number` maps.

use serde_json::Value;

/// Separator placed between path segments (`record` + `wins` -> `record_wins`).
pub const PATH_SEPARATOR: char = '_';

/// Insertion-ordered map of lowercase key paths to finite numbers.
///
/// Lookups are linear; payloads carry a few dozen numeric leaves at most and the
/// fallback resolution depends on enumeration order, so a `Vec` is the natural fit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatMap {
    entries: Vec<(String, f64)>,
}

impl FlatMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value. Non-finite values are ignored; an existing key keeps its
    /// position and takes the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: f64) {
        if !value.is_finite() {
            return;
        }
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| *v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Flatten a payload into a [`FlatMap`].
///
/// Objects and arrays are descended (array positions become path segments). Numbers
/// and numeric strings are kept; everything else is dropped silently.
pub fn flatten(value: &Value) -> FlatMap {
    let mut out = FlatMap::new();
    flatten_into(value, "", &mut out);
    out
}

fn flatten_into(value: &Value, prefix: &str, out: &mut FlatMap) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                descend(child, &join(prefix, key), out);
            }
        }
        Value::Array(items) => {
            for (idx, child) in items.iter().enumerate() {
                descend(child, &join(prefix, &idx.to_string()), out);
            }
        }
        // A bare scalar has no key to live under.
        _ => {}
    }
}

fn descend(value: &Value, path: &str, out: &mut FlatMap) {
    match value {
        Value::Number(n) => {
            if let Some(v) = n.as_f64() {
                out.insert(path, v);
            }
        }
        Value::String(s) => {
            if let Some(v) = parse_finite(s) {
                out.insert(path, v);
            }
        }
        Value::Object(_) | Value::Array(_) => flatten_into(value, path, out),
        Value::Null | Value::Bool(_) => {}
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_lowercase()
    } else {
        format!("{}{}{}", prefix, PATH_SEPARATOR, key.to_lowercase())
    }
}

/// Parse a string as a finite number, ignoring surrounding whitespace.
pub fn parse_finite(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}
