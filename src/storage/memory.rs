//! In-memory storage implementation (for testing)

use std::sync::Mutex;

use super::{Dataset, Storage};
use crate::{Error, Result};

/// Storage that keeps the document in memory
#[derive(Default)]
pub struct MemoryStore {
    dataset: Mutex<Dataset>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a prepared dataset
    pub fn with_dataset(dataset: Dataset) -> Self {
        Self {
            dataset: Mutex::new(dataset),
        }
    }

    /// Copy of the current document
    pub fn snapshot(&self) -> Result<Dataset> {
        self.load()
    }
}

impl Storage for MemoryStore {
    fn load(&self) -> Result<Dataset> {
        let guard = self
            .dataset
            .lock()
            .map_err(|e| Error::Storage(e.to_string()))?;
        Ok(guard.clone())
    }

    fn save(&self, dataset: &Dataset) -> Result<()> {
        let mut guard = self
            .dataset
            .lock()
            .map_err(|e| Error::Storage(e.to_string()))?;
        *guard = dataset.clone();
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
