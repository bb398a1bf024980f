//! Query parameter sets

use std::collections::BTreeMap;

/// Ordered mapping from parameter name to one or more values
///
/// Keys iterate in sorted order so encoded query strings are deterministic.
/// Merging always produces a new set; callers never share a mutable map
/// across requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: BTreeMap<String, Vec<String>>,
}

impl QueryParams {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a single-valued parameter, replacing any previous values
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Set a single-valued parameter in place
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), vec![value.into()]);
    }

    /// Append a value to a parameter
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.entry(key.into()).or_default().push(value.into());
    }

    /// Return a new set with every entry of `other` layered over `self`
    #[must_use]
    pub fn merged(&self, other: &QueryParams) -> QueryParams {
        let mut merged = self.clone();
        for (key, values) in &other.params {
            merged.params.insert(key.clone(), values.clone());
        }
        merged
    }

    /// Get the first value of a parameter
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Get all values of a parameter
    pub fn get_all(&self, key: &str) -> &[String] {
        self.params.get(key).map_or(&[], Vec::as_slice)
    }

    /// Check whether a parameter is present
    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Number of distinct parameter names
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Flatten into `(name, value)` pairs, repeating names with several values
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().flat_map(|(key, values)| {
            values
                .iter()
                .map(move |value| (key.as_str(), value.as_str()))
        })
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        for (key, value) in iter {
            params.set(key, value);
        }
        params
    }
}
