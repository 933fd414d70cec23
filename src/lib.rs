/// The wallet record and its persisted JSON form.
pub mod wallet;

/// Turns raw invocations into validated ledger commands. Nothing here touches the store.
pub mod command;

/// Key-value contract the ledger reads and writes through, plus an in-memory implementation
/// with an explicit transaction boundary.
pub mod store;

/// The ledger engine: create, read and transfer against a caller-supplied store.
pub mod processor;

/// Success/error envelope every invocation is answered with.
pub mod response;

/// Entry points for the host: `init` and named invocations.
pub mod dispatcher;

/// Batch driver used by the binary. Lives in the library so the integration tests can use it.
pub mod bin_utils;
