use crate::{
    app::{aggregator::ResultAggregator, backend::BrowserProvider, local::SnapshotProvider},
    config::Config,
};
use anyhow::{Context, Result};
use homedir::my_home;
use std::path::PathBuf;
use std::sync::Arc;

pub const BASE_PATH_ENV: &str = "TABFIND_BASE_PATH";

/// Application factory for creating and configuring application components
pub struct AppFactory;

impl AppFactory {
    /// Resolve the base directory and make sure it exists.
    pub fn get_paths() -> Result<AppPaths> {
        let base_path = Self::get_base_path()?;

        std::fs::create_dir_all(&base_path)
            .context("Failed to create application base directory")?;

        Ok(AppPaths { base_path })
    }

    pub fn create_config(paths: &AppPaths) -> Result<Config> {
        Config::load_with(&paths.base_path)
    }

    pub fn create_provider(config: &Config) -> Arc<dyn BrowserProvider> {
        let root = config.browser_data_dir();
        log::debug!("Using browser snapshot at {}", root.display());
        Arc::new(SnapshotProvider::new(root))
    }

    pub fn create_aggregator(config: &Config) -> ResultAggregator {
        ResultAggregator::new(Self::create_provider(config), config)
    }

    fn get_base_path() -> Result<PathBuf> {
        if let Ok(base_path) = std::env::var(BASE_PATH_ENV) {
            return Ok(PathBuf::from(base_path));
        }

        let home = my_home()
            .context("Could not determine home directory")?
            .context("Home directory path is empty")?;
        Ok(home.join(".local/share/tabfind"))
    }
}

/// Application paths structure
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub base_path: PathBuf,
}
