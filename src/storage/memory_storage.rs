use crate::{
    domain::ViewOptions,
    error::Result,
    storage::{PersistedState, Storage, DEFAULT_NAMESPACE},
};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-process storage keeping serialized entries per namespace
///
/// Entries go through the same JSON envelope that file storage writes.
#[derive(Debug)]
pub struct MemoryStorage {
    namespace: String,
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::with_namespace(DEFAULT_NAMESPACE)
    }

    pub fn with_namespace(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Raw persisted entry for this storage's namespace
    pub async fn raw_entry(&self) -> Option<String> {
        self.entries.read().await.get(&self.namespace).cloned()
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn initialize(&self) -> Result<()> {
        Ok(())
    }

    async fn save_view_options(&self, options: &ViewOptions) -> Result<()> {
        let json = PersistedState::new(options.clone()).to_json()?;
        self.entries
            .write()
            .await
            .insert(self.namespace.clone(), json);
        Ok(())
    }

    async fn load_view_options(&self) -> Result<Option<ViewOptions>> {
        match self.raw_entry().await {
            Some(json) => Ok(Some(PersistedState::from_json(&json)?.state.view_options)),
            None => Ok(None),
        }
    }

    async fn clear_view_options(&self) -> Result<()> {
        self.entries.write().await.remove(&self.namespace);
        Ok(())
    }

    async fn is_initialized(&self) -> bool {
        true
    }
}
