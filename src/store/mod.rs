use thiserror::Error;

pub mod in_memory_store;

/// Failure reported by a state store. The message is surfaced to callers unchanged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct StoreError {
    pub message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Key-value contract the ledger runs against.
///
/// Both calls are scoped to a single transaction owned by the caller, which decides whether the
/// writes issued through it are committed.
pub trait StateStore {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;
}
