//! Cart persistence
//!
//! The cart survives process restarts by writing its lines through a
//! [`CartStorage`] backend after every successful mutation. The contract is a
//! plain load/save pair over an ordered line list; any durable local key-value
//! mechanism can stand behind it.

use std::{
    cell::RefCell,
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::cart::CartLine;

/// Storage backend errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// IO error reading or writing the cart file.
    #[error("Failed to access cart storage: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted cart could not be decoded.
    #[error("Failed to decode persisted cart: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A durable, single-client store for cart lines.
///
/// Implementations must return lines from `load` in the exact order they were
/// passed to the last `save`.
pub trait CartStorage {
    /// Load the persisted cart lines, oldest first.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backing store cannot be read or
    /// decoded.
    fn load(&self) -> Result<Vec<CartLine>, StorageError>;

    /// Replace the persisted cart lines.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backing store cannot be written.
    fn save(&self, lines: &[CartLine]) -> Result<(), StorageError>;
}

/// File-backed storage holding the cart as a JSON document.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// File name used when storing the cart inside a directory.
    pub const FILE_NAME: &'static str = "cart-storage.json";

    /// Use the given file as the cart store.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store the cart under [`Self::FILE_NAME`] inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(Self::FILE_NAME))
    }

    /// The file this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CartStorage for JsonFileStorage {
    fn load(&self) -> Result<Vec<CartLine>, StorageError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            // A cart that was never saved is an empty cart.
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => return Err(error.into()),
        };

        Ok(serde_json::from_str(&json)?)
    }

    fn save(&self, lines: &[CartLine]) -> Result<(), StorageError> {
        let json = serde_json::to_string(lines)?;

        fs::write(&self.path, json)?;

        Ok(())
    }
}

/// In-memory storage for tests and demos; durable only for the lifetime of
/// the value.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    lines: RefCell<Vec<CartLine>>,
}

impl MemoryStorage {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lines currently persisted.
    pub fn saved_line_count(&self) -> usize {
        self.lines.borrow().len()
    }
}

impl CartStorage for MemoryStorage {
    fn load(&self) -> Result<Vec<CartLine>, StorageError> {
        Ok(self.lines.borrow().clone())
    }

    fn save(&self, lines: &[CartLine]) -> Result<(), StorageError> {
        *self.lines.borrow_mut() = lines.to_vec();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::products::Product;

    use super::*;

    fn lines() -> Vec<CartLine> {
        vec![
            CartLine::new(Product::new("p-1", "Desk Lamp", Decimal::from(120))),
            CartLine::new(Product::new("p-2", "Rug", Decimal::from(80)).with_quantity(4)),
        ]
    }

    #[test]
    fn json_file_round_trips_lines_in_order() -> TestResult {
        let dir = tempfile::tempdir()?;
        let storage = JsonFileStorage::in_dir(dir.path());

        storage.save(&lines())?;
        let loaded = storage.load()?;

        assert_eq!(loaded, lines());

        Ok(())
    }

    #[test]
    fn json_file_missing_file_loads_empty() -> TestResult {
        let dir = tempfile::tempdir()?;
        let storage = JsonFileStorage::in_dir(dir.path());

        assert!(storage.load()?.is_empty());

        Ok(())
    }

    #[test]
    fn json_file_corrupt_file_is_a_decode_error() -> TestResult {
        let dir = tempfile::tempdir()?;
        let storage = JsonFileStorage::in_dir(dir.path());

        fs::write(storage.path(), "not json")?;

        assert!(matches!(storage.load(), Err(StorageError::Decode(_))));

        Ok(())
    }

    #[test]
    fn memory_storage_round_trips() -> TestResult {
        let storage = MemoryStorage::new();

        storage.save(&lines())?;

        assert_eq!(storage.saved_line_count(), 2);
        assert_eq!(storage.load()?, lines());

        Ok(())
    }
}
