//! Candidate-key and pattern-based field resolution over a [`FlatMap`].

use regex::Regex;

use super::flatten::FlatMap;

/// Resolve one numeric value.
///
/// Exact candidates are tried first, in order. When none is present each fallback
/// pattern is tried in order against every key in map order; the first key that
/// matches ends the search.
pub fn resolve(flat: &FlatMap, exact: &[&str], fallback: &[Regex]) -> Option<f64> {
    for candidate in exact {
        if let Some(v) = flat.get(&candidate.to_lowercase()) {
            return Some(v);
        }
    }

    fallback.iter().find_map(|pattern| {
        flat.iter()
            .find(|(key, _)| pattern.is_match(key))
            .map(|(_, v)| v)
    })
}
