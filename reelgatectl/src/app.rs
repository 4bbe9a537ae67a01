use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use reelgate_core::storage::{FileStore, KeyValueStore};
use reelgate_core::{AppConfig, ConfigLoader, MetadataProvider, ProviderStore, TmdbProvider};

/// Global options that shape how the app is opened.
#[derive(Debug, Clone, Default)]
pub struct AppOptions {
    pub config_path: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
}

/// Everything a command needs.
pub struct App {
    pub config: AppConfig,
    pub store: ProviderStore,
    pub metadata: Box<dyn MetadataProvider>,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("config", &self.config)
            .field("store", &self.store)
            .field("metadata", &self.metadata.name())
            .finish()
    }
}

impl App {
    /// Load configuration and the provider registry.
    pub async fn open(options: AppOptions) -> Result<Self> {
        let mut loader = ConfigLoader::new();
        if let Some(path) = options.config_path {
            loader = loader.with_config_path(path);
        }
        let mut config = loader.load().context("failed to load configuration")?;
        if let Some(dir) = options.data_dir {
            config.data_dir = dir;
        }
        tracing::debug!(data_dir = %config.data_dir.display(), "opening reelgate");

        let metadata = TmdbProvider::from_config(&config.metadata)
            .context("failed to build metadata client")?;
        let storage: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(&config.data_dir));

        Ok(Self::with_parts(
            config,
            ProviderStore::initialize(storage).await,
            Box::new(metadata),
        ))
    }

    pub fn with_parts(
        config: AppConfig,
        store: ProviderStore,
        metadata: Box<dyn MetadataProvider>,
    ) -> Self {
        Self {
            config,
            store,
            metadata,
        }
    }

    /// Wait for pending registry writes before the process exits.
    pub async fn finish(self) {
        self.store.close().await;
    }
}
