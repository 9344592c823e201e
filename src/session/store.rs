use std::collections::HashMap;

/// Key-value state that survives across renders of one interactive session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStore {
    values: HashMap<String, String>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let mut store = SessionStore::new();
        assert_eq!(store.get("selected_province"), None);

        store.set("selected_province", "서울특별시");
        assert_eq!(store.get("selected_province"), Some("서울특별시"));
        assert!(store.contains("selected_province"));

        assert_eq!(store.remove("selected_province").as_deref(), Some("서울특별시"));
        assert!(!store.contains("selected_province"));
    }
}
