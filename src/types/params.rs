//! Ordered request parameters for private calls.

use crate::error::IndodaxError;

/// Request parameters in insertion order.
///
/// The exchange recomputes the signature over the received form body, so the
/// order in which parameters are pushed is the order they are signed and
/// sent. Values are kept as opaque strings; prices and amounts are never
/// converted through floating point.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
    entries: Vec<(String, String)>,
}

impl RequestParams {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter (builder style).
    pub fn with(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.push(name, value);
        self
    }

    /// Append a parameter.
    pub fn push(&mut self, name: impl Into<String>, value: impl ToString) {
        self.entries.push((name.into(), value.to_string()));
    }

    /// Look up the first value for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Parameter names in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no parameters have been added.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// URL-encoded form of the parameters (`a=1&b=2`).
    pub fn to_form(&self) -> Result<String, IndodaxError> {
        serde_urlencoded::to_string(&self.entries)
            .map_err(|e| IndodaxError::Config(format!("cannot encode request parameters: {e}")))
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for RequestParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = RequestParams::new();
        for (key, value) in iter {
            params.push(key, value);
        }
        params
    }
}
