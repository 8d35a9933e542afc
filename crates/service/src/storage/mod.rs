//! Storage abstractions for service layer
//!
//! Contains the JSON snapshot persistence used by the todo store. The whole
//! state is rewritten on every mutation; there is no write-ahead log and no
//! atomic rename.

pub mod snapshot_store;
