pub mod json_backend;
pub mod memory;

use crate::errors::Result;

/// Abstraction over persistence backends as a flat key → bytes mapping.
///
/// Keys are validated jar names. Implementations must make `put` atomic per key:
/// a concurrent or subsequent `get` observes either the previous bytes or the new
/// bytes, never a partial write.
pub trait JarStorage: Send + Sync {
    /// Returns every stored key in ascending order.
    fn keys(&self) -> Result<Vec<String>>;
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn put(&self, key: &str, bytes: &[u8]) -> Result<()>;
    /// Removes `key`, reporting whether it existed.
    fn remove(&self, key: &str) -> Result<bool>;

    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }
}

pub use json_backend::JsonFileStorage;
pub use memory::MemoryStorage;
