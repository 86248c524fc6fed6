use std::collections::BTreeMap;

/// Held-key flags keyed by host key identifier.
///
/// Keys stay in the map after release with their flag cleared. Any key
/// counts toward [`InputState::any_held`], bound or not.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    keys: BTreeMap<String, bool>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `key` as held.
    pub fn press(&mut self, key: &str) {
        match self.keys.get_mut(key) {
            Some(held) => *held = true,
            None => {
                self.keys.insert(key.to_owned(), true);
            }
        }
        tracing::trace!(key, "key held");
    }

    /// Mark `key` as released.
    pub fn release(&mut self, key: &str) {
        self.keys.insert(key.to_owned(), false);
        tracing::trace!(key, "key released");
    }

    pub fn is_held(&self, key: &str) -> bool {
        self.keys.get(key).copied().unwrap_or(false)
    }

    /// Whether at least one key is currently held.
    pub fn any_held(&self) -> bool {
        self.keys.values().any(|held| *held)
    }

    /// Iterate over the currently held keys.
    pub fn held(&self) -> impl Iterator<Item = &str> {
        self.keys
            .iter()
            .filter(|(_, held)| **held)
            .map(|(key, _)| key.as_str())
    }
}
