//! Header multi-map.
//!
//! # Responsibilities
//! - Hold request and response headers as ordered value lists
//! - Apply canonical key capitalization on `set`/`add`
//! - Case-insensitive lookup
//!
//! # Design Decisions
//! - Keys are plain strings: the load balancer may hand over names a strict
//!   header parser would reject, and multi value responses echo keys verbatim
//! - Sorted storage keeps outbound payloads deterministic

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const CONTENT_TYPE: &str = "Content-Type";

/// Header multi-map exposed to handlers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Headers(BTreeMap<String, Vec<String>>);

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// First value for `name`, looked up case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.get_all(name).first().map(String::as_str)
    }

    /// All values for `name`, looked up case-insensitively.
    pub fn get_all(&self, name: &str) -> &[String] {
        self.find_key(name)
            .and_then(|k| self.0.get(k))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.find_key(name).is_some()
    }

    /// Replace all values of `name` (stored under its canonical key).
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.0.insert(canonical_header_key(name), vec![value.into()]);
    }

    /// Append a value to `name` (stored under its canonical key).
    pub fn add(&mut self, name: &str, value: impl Into<String>) {
        self.0
            .entry(canonical_header_key(name))
            .or_default()
            .push(value.into());
    }

    /// Store `values` under `name` exactly as given, no canonicalization.
    pub fn insert_values(&mut self, name: impl Into<String>, values: Vec<String>) {
        self.0.insert(name.into(), values);
    }

    /// Remove every key matching `name` case-insensitively.
    pub fn remove(&mut self, name: &str) -> Vec<String> {
        let keys: Vec<String> = self
            .0
            .keys()
            .filter(|k| k.eq_ignore_ascii_case(name))
            .cloned()
            .collect();
        keys.into_iter()
            .filter_map(|k| self.0.remove(&k))
            .flatten()
            .collect()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }

    /// Collapse to one value per canonical key.
    ///
    /// Keys are visited in sorted order; when two raw keys share a canonical
    /// form, the first one visited wins. Keys without values are dropped.
    pub fn to_single_values(&self) -> BTreeMap<String, String> {
        let mut out = BTreeMap::new();
        for (k, values) in &self.0 {
            if let Some(first) = values.first() {
                out.entry(canonical_header_key(k))
                    .or_insert_with(|| first.clone());
            }
        }
        out
    }

    // canonical form first, then any case-insensitive match
    fn find_key(&self, name: &str) -> Option<&str> {
        let canonical = canonical_header_key(name);
        if let Some((k, _)) = self.0.get_key_value(&canonical) {
            return Some(k.as_str());
        }
        self.0
            .keys()
            .find(|k| k.eq_ignore_ascii_case(name))
            .map(String::as_str)
    }
}

impl From<BTreeMap<String, Vec<String>>> for Headers {
    fn from(map: BTreeMap<String, Vec<String>>) -> Self {
        Self(map)
    }
}

/// Standard HTTP header capitalization: the first letter and any letter
/// following a hyphen are upper-cased, the rest lower-cased.
///
/// Names containing bytes that are not valid token characters are returned
/// unchanged.
pub fn canonical_header_key(name: &str) -> String {
    if !name.bytes().all(is_token_byte) {
        return name.to_string();
    }
    let mut upper = true;
    name.chars()
        .map(|c| {
            let out = if upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            };
            upper = c == '-';
            out
        })
        .collect()
}

fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
}
