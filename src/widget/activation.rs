use std::collections::HashMap;

pub const ACTIVATION_KEY: &str = "aiFloatAutoLoad";

/// Persistent browser storage as the widget sees it: keyed strings only.
pub trait ActivationStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// A stored "false" blocks auto-initialization; any other value, or none at
/// all, initializes.
pub fn should_auto_init(store: &dyn ActivationStore) -> bool {
    store.get(ACTIVATION_KEY).as_deref() != Some("false")
}

/// In-memory store for hosts without browser storage, and for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }
}

impl ActivationStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}
