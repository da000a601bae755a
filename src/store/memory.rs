use std::sync::{Arc, RwLock};

use super::{DocumentStore, Result};

/// Keeps the serialized document in memory. Clones share the same contents.
#[derive(Clone, Default)]
pub struct MemoryStore {
    contents: Arc<RwLock<Option<String>>>,
}

impl MemoryStore {
    /// Start with the given text already persisted.
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Arc::new(RwLock::new(Some(contents.into()))),
        }
    }
}

impl DocumentStore for MemoryStore {
    fn read(&self) -> Result<Option<String>> {
        let contents = self.contents.read().unwrap_or_else(|e| e.into_inner());
        Ok(contents.clone())
    }

    fn write(&self, contents: &str) -> Result<()> {
        let mut slot = self.contents.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(contents.to_string());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
