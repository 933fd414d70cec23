use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use super::{StateStore, StoreError};

/// Committed key-value state, kept in key order.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: BTreeMap<String, Vec<u8>>,
}

impl InMemoryStore {
    /// Opens a transaction. Writes stay staged until [`StoreTransaction::commit`]; dropping the
    /// transaction discards them.
    pub fn begin(&mut self) -> StoreTransaction<'_> {
        StoreTransaction {
            store: self,
            writes: HashMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&[u8]> {
        self.state.get(key).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.state.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }
}

pub struct StoreTransaction<'s> {
    store: &'s mut InMemoryStore,
    writes: HashMap<String, Vec<u8>>,
}

impl StoreTransaction<'_> {
    pub fn commit(self) {
        debug!(writes = self.writes.len(), "committing store transaction");
        self.store.state.extend(self.writes);
    }

    pub fn staged_writes(&self) -> usize {
        self.writes.len()
    }
}

impl StateStore for StoreTransaction<'_> {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        // read your own writes
        Ok(self
            .writes
            .get(key)
            .or_else(|| self.store.state.get(key))
            .cloned())
    }

    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        self.writes.insert(key.to_owned(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn committed_writes_are_visible() {
        let mut store = InMemoryStore::default();
        let mut tx = store.begin();
        tx.put_state("alice", b"100".to_vec()).unwrap();
        assert_eq!(tx.get_state("alice").unwrap(), Some(b"100".to_vec()));
        assert_eq!(tx.staged_writes(), 1);
        tx.commit();

        assert_eq!(store.get("alice"), Some(&b"100"[..]));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn dropped_transaction_discards_writes() {
        let mut store = InMemoryStore::default();
        {
            let mut tx = store.begin();
            tx.put_state("alice", b"100".to_vec()).unwrap();
            tx.put_state("bob", b"0".to_vec()).unwrap();
        }
        assert!(store.is_empty());
        assert_eq!(store.get("alice"), None);
    }

    #[test]
    fn later_write_wins_inside_transaction() {
        let mut store = InMemoryStore::default();
        let mut tx = store.begin();
        tx.put_state("alice", b"1".to_vec()).unwrap();
        tx.put_state("alice", b"2".to_vec()).unwrap();
        tx.commit();

        let keys: Vec<_> = store.iter().map(|(k, _)| k.to_owned()).collect();
        assert_eq!(keys, vec!["alice".to_owned()]);
        assert_eq!(store.get("alice"), Some(&b"2"[..]));
    }
}
