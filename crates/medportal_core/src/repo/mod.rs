//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the key/value storage contract used in place of browser storage.
//! - Isolate SQLite query details from services.
//!
//! # Invariants
//! - Local and session scopes never share keys.
//! - Repository APIs surface storage failures as `StorageError`; degrading to
//!   memory is a service decision.

pub mod kv_store;
