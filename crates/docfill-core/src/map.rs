//! Ordered placeholder-to-value mapping
//!
//! Placeholder tokens are matched against paragraph text by exact
//! substring containment, in insertion order. Order only matters as
//! the tie-breaker for first-match-wins, but it is preserved so runs
//! are reproducible.

/// An ordered map from placeholder token (e.g. `{company_name}`) to
/// its replacement value.
///
/// Backed by a `Vec` so iteration follows insertion order. Inserting
/// an existing token overwrites its value without moving it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderMap {
    entries: Vec<(String, String)>,
}

impl PlaceholderMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or update a token's replacement value.
    ///
    /// An existing token keeps its position in the iteration order.
    pub fn insert(&mut self, token: impl Into<String>, value: impl Into<String>) {
        let token = token.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(t, _)| *t == token) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((token, value)),
        }
    }

    /// Look up the replacement value for a token
    pub fn get(&self, token: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(t, _)| t == token)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the map contains a token
    pub fn contains(&self, token: &str) -> bool {
        self.entries.iter().any(|(t, _)| t == token)
    }

    /// Number of tokens in the map
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no tokens
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(token, value)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(t, v)| (t.as_str(), v.as_str()))
    }

    /// Iterate tokens in insertion order
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(t, _)| t.as_str())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PlaceholderMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (token, value) in iter {
            map.insert(token, value);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_preserved() {
        let mut map = PlaceholderMap::new();
        map.insert("{b}", "2");
        map.insert("{a}", "1");
        map.insert("{c}", "3");

        let tokens: Vec<_> = map.tokens().collect();
        assert_eq!(tokens, vec!["{b}", "{a}", "{c}"]);
    }

    #[test]
    fn test_insert_overwrites_in_place() {
        let mut map = PlaceholderMap::new();
        map.insert("{a}", "old");
        map.insert("{b}", "2");
        map.insert("{a}", "new");

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("{a}"), Some("new"));
        let tokens: Vec<_> = map.tokens().collect();
        assert_eq!(tokens, vec!["{a}", "{b}"]);
    }

    #[test]
    fn test_from_iterator() {
        let map: PlaceholderMap = [("{x}", "1"), ("{y}", "2")].into_iter().collect();
        assert_eq!(map.len(), 2);
        assert!(map.contains("{y}"));
        assert!(!map.contains("{z}"));
    }
}
