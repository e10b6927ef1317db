use std::collections::HashMap;

/// Case-insensitive name-to-value map.
///
/// Keys are folded to ASCII uppercase; callers choose whether a duplicate
/// case-variant name keeps the existing entry or replaces it.
#[derive(Debug, Clone)]
pub struct CaseInsensitiveMap<V> {
    map: HashMap<String, V>,
}

impl<V> CaseInsensitiveMap<V> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Insert keeping an existing entry for the same folded key.
    ///
    /// Returns `false` when an entry was already present.
    pub fn insert_first_wins(&mut self, name: &str, value: V) -> bool {
        let key = name.to_ascii_uppercase();
        if self.map.contains_key(&key) {
            return false;
        }
        self.map.insert(key, value);
        true
    }

    /// Insert replacing any existing entry for the same folded key.
    pub fn insert_last_wins(&mut self, name: &str, value: V) -> Option<V> {
        self.map.insert(name.to_ascii_uppercase(), value)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&V> {
        self.map.get(&name.to_ascii_uppercase())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(&name.to_ascii_uppercase())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<V> Default for CaseInsensitiveMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case() {
        let mut map = CaseInsensitiveMap::new();
        map.insert_first_wins("UserName", 1);
        assert_eq!(map.get("username"), Some(&1));
        assert_eq!(map.get("USERNAME"), Some(&1));
        assert!(map.contains("userName"));
        assert!(!map.contains("other"));
    }

    #[test]
    fn first_wins_keeps_original() {
        let mut map = CaseInsensitiveMap::new();
        assert!(map.insert_first_wins("Name", 1));
        assert!(!map.insert_first_wins("NAME", 2));
        assert_eq!(map.get("name"), Some(&1));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn last_wins_replaces() {
        let mut map = CaseInsensitiveMap::new();
        map.insert_last_wins("Name", 1);
        assert_eq!(map.insert_last_wins("NAME", 2), Some(1));
        assert_eq!(map.get("name"), Some(&2));
    }
}
