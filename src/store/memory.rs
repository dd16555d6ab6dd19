use std::collections::HashMap;

use super::{StoreError, ValidityStore};

/// In-process store, for tests and dry runs
#[derive(Debug, Default)]
pub struct MemoryStore {
    flags: HashMap<i64, bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

impl ValidityStore for MemoryStore {
    fn upsert(&mut self, polygon_id: i64, is_invalid: bool) -> Result<(), StoreError> {
        self.flags.insert(polygon_id, is_invalid);
        Ok(())
    }

    fn lookup(&self, polygon_id: i64) -> Result<Option<bool>, StoreError> {
        Ok(self.flags.get(&polygon_id).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_overwrites() {
        let mut store = MemoryStore::new();
        store.upsert(3, true).unwrap();
        store.upsert(3, true).unwrap();
        assert_eq!(store.len(), 1);
        store.upsert(3, false).unwrap();
        assert_eq!(store.lookup(3).unwrap(), Some(false));
    }

    #[test]
    fn test_missing_defaults_to_not_invalid() {
        let store = MemoryStore::new();
        assert_eq!(store.lookup(9).unwrap(), None);
        assert!(!store.is_invalid_or_default(9).unwrap());
    }
}
