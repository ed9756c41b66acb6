//! # Storage Layer
//!
//! This module defines the storage abstraction for cardz. Persistence is a
//! plain key-value contract: exactly two keys, one holding the serialized
//! card list and one the serialized settings record.
//!
//! ## Architecture
//!
//! - [`backend::StorageBackend`]: raw string I/O for the two keys.
//!   The trait handles the "how" of storage (filesystem vs memory), while
//!   [`CardStore`] handles the "what" (validation, merge, fallbacks).
//! - [`fs_backend::FsBackend`]: production implementation, one JSON file
//!   per key under the data directory, written atomically.
//! - [`mem_backend::MemBackend`]: for testing logic without filesystem I/O.
//!
//! ## Robustness
//!
//! An absent or unparsable payload is never fatal: [`CardStore::load`]
//! falls back to an empty list / default settings and reports what happened
//! in a [`LoadReport`]. Write failures are returned as errors, but the
//! in-memory state remains authoritative for the rest of the session.

pub mod backend;
pub mod card_store;
pub mod fs_backend;
pub mod mem_backend;

pub use backend::{StorageBackend, StoreKey};
pub use card_store::{CardStore, ImportReport, LoadReport};
pub use fs_backend::FsBackend;
pub use mem_backend::MemBackend;
