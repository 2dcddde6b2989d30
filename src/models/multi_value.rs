//! Ordered multi-value map used for `multiValueHeaders` and
//! `multiValueQueryStringParameters`.
//!
//! The gateway sends these as JSON objects whose key order carries meaning
//! for the rebuilt request, so the map keeps document order instead of
//! hashing its keys.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Wire shape before cleanup: sequences and their entries may be `null`.
type RawMultiValueMap = IndexMap<String, Option<Vec<Option<String>>>>;

/// A mapping from key to an ordered sequence of values, iterated in
/// insertion order.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(from = "RawMultiValueMap")]
pub struct MultiValueMap(IndexMap<String, Vec<String>>);

impl MultiValueMap {
    #[must_use]
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Sets the values for `key`. An existing key keeps its position and has
    /// its values replaced, matching how a repeated JSON key behaves.
    pub fn insert(&mut self, key: impl Into<String>, values: Vec<String>) {
        self.0.insert(key.into(), values);
    }

    /// Appends a single value under `key`, creating the key if needed.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.entry(key.into()).or_default().push(value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.0.get(key).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<RawMultiValueMap> for MultiValueMap {
    fn from(raw: RawMultiValueMap) -> Self {
        // null sequences and null entries carry no values
        Self(
            raw.into_iter()
                .map(|(key, values)| (key, values.unwrap_or_default().into_iter().flatten().collect()))
                .collect(),
        )
    }
}

impl<K, V, I> FromIterator<(K, I)> for MultiValueMap
where
    K: Into<String>,
    I: IntoIterator<Item = V>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, I)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (key, values) in iter {
            map.insert(key, values.into_iter().map(Into::into).collect());
        }
        map
    }
}

impl<'a> IntoIterator for &'a MultiValueMap {
    type Item = (&'a String, &'a Vec<String>);
    type IntoIter = indexmap::map::Iter<'a, String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
