use super::backend::{StorageBackend, StoreKey};
use crate::error::{CardzError, Result};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since cardz is single-threaded.
/// This avoids the overhead of `RwLock` while still allowing the
/// `StorageBackend` trait to use `&self` for all methods.
#[derive(Default)]
pub struct MemBackend {
    slots: RefCell<HashMap<StoreKey, String>>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-seeded with a payload, for load-path tests.
    pub fn with_payload(key: StoreKey, payload: &str) -> Self {
        let backend = Self::new();
        backend
            .slots
            .borrow_mut()
            .insert(key, payload.to_string());
        backend
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Raw payload stored under a key, for assertions.
    pub fn payload(&self, key: StoreKey) -> Option<String> {
        self.slots.borrow().get(&key).cloned()
    }
}

impl StorageBackend for MemBackend {
    fn read(&self, key: StoreKey) -> Result<Option<String>> {
        Ok(self.slots.borrow().get(&key).cloned())
    }

    fn write(&self, key: StoreKey, payload: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(CardzError::Store("Simulated write error".to_string()));
        }
        self.slots.borrow_mut().insert(key, payload.to_string());
        Ok(())
    }
}
