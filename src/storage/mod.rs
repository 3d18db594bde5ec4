use crate::{
    domain::ViewOptions,
    error::{Result, ViewError},
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[cfg(feature = "file-storage")]
pub mod file_storage;
pub mod memory_storage;

#[cfg(feature = "file-storage")]
pub use file_storage::FileStorage;
pub use memory_storage::MemoryStorage;

/// Namespace the view options are persisted under unless configured otherwise
pub const DEFAULT_NAMESPACE: &str = "view-options-storage";

/// Layout version written with every persisted entry
pub const PERSISTED_VERSION: u32 = 0;

/// Storage trait for persisting the view options partition
#[async_trait]
pub trait Storage: Send + Sync {
    /// Initializes the storage backend
    async fn initialize(&self) -> Result<()>;

    /// Saves the view options, replacing any previous entry
    async fn save_view_options(&self, options: &ViewOptions) -> Result<()>;

    /// Loads the view options, or `None` if nothing was saved yet
    async fn load_view_options(&self) -> Result<Option<ViewOptions>>;

    /// Removes the persisted entry
    async fn clear_view_options(&self) -> Result<()>;

    /// Checks if the backend is ready for use
    async fn is_initialized(&self) -> bool;
}

/// Envelope written to durable storage
///
/// Only the view options are persisted; panel state never leaves memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    pub state: PersistedPartition,
    #[serde(default)]
    pub version: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedPartition {
    #[serde(default)]
    pub view_options: ViewOptions,
}

impl PersistedState {
    pub fn new(view_options: ViewOptions) -> Self {
        Self {
            state: PersistedPartition { view_options },
            version: PERSISTED_VERSION,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Where and under which name the view options are stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub root: PathBuf,
    pub namespace: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

impl StorageConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Checks the namespace is usable as a single storage key
    pub fn validate(&self) -> Result<()> {
        if self.namespace.trim().is_empty() {
            return Err(ViewError::ConfigError(
                "storage namespace must not be empty".to_string(),
            ));
        }
        if self
            .namespace
            .chars()
            .any(|c| matches!(c, '/' | '\\') || c.is_control())
        {
            return Err(ViewError::ConfigError(format!(
                "storage namespace '{}' contains invalid characters",
                self.namespace
            )));
        }
        Ok(())
    }
}
