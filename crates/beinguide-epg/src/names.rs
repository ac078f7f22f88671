//! Display-name overrides keyed by scraped channel identity.

use std::collections::HashMap;

/// Identity to display-name table used when exporting channels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelNameMapping {
    names: HashMap<String, String>,
}

impl ChannelNameMapping {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the display name for `identity`.
    #[must_use]
    pub fn with(mut self, identity: impl Into<String>, display_name: impl Into<String>) -> Self {
        self.names.insert(identity.into(), display_name.into());
        self
    }

    /// Looks up the override for `identity`.
    #[must_use]
    pub fn get(&self, identity: &str) -> Option<&str> {
        self.names.get(identity).map(String::as_str)
    }

    /// Number of overrides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no override is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for ChannelNameMapping
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            names: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
