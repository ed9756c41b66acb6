use crate::error::Result;

/// The two slots of the key-value persistence contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Cards,
    Settings,
}

impl StoreKey {
    /// File name used by file-based backends for this key.
    pub fn file_name(self) -> &'static str {
        match self {
            StoreKey::Cards => "cards.json",
            StoreKey::Settings => "settings.json",
        }
    }
}

/// Abstract interface for raw storage I/O.
///
/// Implementations move opaque string payloads in and out of the two store
/// keys; all interpretation of the payloads lives in
/// [`CardStore`](super::CardStore).
pub trait StorageBackend {
    /// Read the payload for a key.
    /// Returns `Ok(None)` if nothing has been stored under it yet.
    /// Returns `Err` only on actual I/O errors (permissions, disk failure).
    fn read(&self, key: StoreKey) -> Result<Option<String>>;

    /// Write the payload for a key.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn write(&self, key: StoreKey, payload: &str) -> Result<()>;
}
