use crate::{
    domain::ViewOptions,
    error::Result,
    storage::{PersistedState, Storage, StorageConfig},
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// File-based storage, one JSON file per namespace
pub struct FileStorage {
    root_path: PathBuf,
    namespace: String,
}

impl FileStorage {
    const STORAGE_DIR: &'static str = ".boardview";

    /// Creates a FileStorage under `project_root` using the default namespace
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        let config = StorageConfig::new(project_root.as_ref());
        Self {
            root_path: config.root.join(Self::STORAGE_DIR),
            namespace: config.namespace,
        }
    }

    /// Creates a FileStorage from a validated configuration
    pub fn with_config(config: StorageConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            root_path: config.root.join(Self::STORAGE_DIR),
            namespace: config.namespace,
        })
    }

    fn entry_file(&self) -> PathBuf {
        self.root_path.join(format!("{}.json", self.namespace))
    }

    async fn ensure_directory_exists(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn initialize(&self) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await
    }

    async fn save_view_options(&self, options: &ViewOptions) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await?;

        let json = PersistedState::new(options.clone()).to_json()?;
        fs::write(self.entry_file(), json).await?;

        Ok(())
    }

    async fn load_view_options(&self) -> Result<Option<ViewOptions>> {
        let file_path = self.entry_file();

        if !file_path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&file_path).await?;
        let persisted = PersistedState::from_json(&contents)?;

        Ok(Some(persisted.state.view_options))
    }

    async fn clear_view_options(&self) -> Result<()> {
        let file_path = self.entry_file();

        if file_path.exists() {
            fs::remove_file(file_path).await?;
        }
        Ok(())
    }

    async fn is_initialized(&self) -> bool {
        self.root_path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{DueDateFilter, GroupBy, OrderDirection},
        error::ViewError,
    };
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_storage_initialization() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        assert!(!storage.is_initialized().await);

        storage.initialize().await.unwrap();

        assert!(storage.is_initialized().await);
        assert!(storage.load_view_options().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_view_options_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());
        storage.initialize().await.unwrap();

        let mut options = ViewOptions {
            group_by: GroupBy::DueDate,
            order_direction: OrderDirection::Desc,
            ..Default::default()
        };
        options.active_filters.due_date = DueDateFilter::ThisMonth;
        options.active_filters.assignee = vec!["u-7".to_string()];

        storage.save_view_options(&options).await.unwrap();

        let loaded = storage.load_view_options().await.unwrap();
        assert_eq!(loaded, Some(options));
    }

    #[tokio::test]
    async fn test_save_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        storage.save_view_options(&ViewOptions::default()).await.unwrap();

        assert!(storage.is_initialized().await);
        assert!(storage.entry_file().exists());
    }

    #[tokio::test]
    async fn test_entry_file_uses_namespace() {
        let temp_dir = TempDir::new().unwrap();
        let config = StorageConfig::new(temp_dir.path()).with_namespace("board-3");
        let storage = FileStorage::with_config(config).unwrap();

        storage.save_view_options(&ViewOptions::default()).await.unwrap();

        assert!(temp_dir.path().join(".boardview").join("board-3.json").exists());
    }

    #[tokio::test]
    async fn test_with_config_rejects_bad_namespace() {
        let temp_dir = TempDir::new().unwrap();
        let config = StorageConfig::new(temp_dir.path()).with_namespace("../escape");

        assert!(matches!(
            FileStorage::with_config(config),
            Err(ViewError::ConfigError(_))
        ));
    }

    #[tokio::test]
    async fn test_clear_view_options() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        storage.clear_view_options().await.unwrap();
        assert!(!storage.is_initialized().await);

        storage.save_view_options(&ViewOptions::default()).await.unwrap();
        storage.clear_view_options().await.unwrap();

        assert!(storage.load_view_options().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_entry_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());
        storage.initialize().await.unwrap();

        fs::write(storage.entry_file(), "not json").await.unwrap();

        assert!(matches!(
            storage.load_view_options().await,
            Err(ViewError::SerializationError(_))
        ));
    }
}
