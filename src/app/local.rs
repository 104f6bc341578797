use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::items::{ProfileId, RawBookmark, RawHistoryEntry, RawTab};

use super::{backend::BrowserProvider, errors::ProviderError};

pub const TABS_FILE: &str = "tabs.json";
pub const HISTORY_FILE: &str = "history.json";
pub const BOOKMARKS_FILE: &str = "bookmarks.json";

/// Browser data exported as JSON files:
///
/// ```text
/// <root>/tabs.json
/// <root>/<profile>/history.json
/// <root>/<profile>/bookmarks.json
/// ```
///
/// A missing root or profile directory means the browser (or profile) is
/// not there. A missing file inside an existing directory is an empty list.
#[derive(Debug, Clone)]
pub struct SnapshotProvider {
    root: PathBuf,
}

impl SnapshotProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    async fn ensure_dir(path: &Path) -> Result<(), ProviderError> {
        match tokio::fs::metadata(path).await {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(ProviderError::NotInstalled),
            Err(err) if err.kind() == ErrorKind::NotFound => Err(ProviderError::NotInstalled),
            Err(err) => Err(err.into()),
        }
    }

    fn profile_dir(&self, profile: &str) -> Result<PathBuf, ProviderError> {
        if profile.is_empty() || profile.contains(&['/', '\\'][..]) || profile == ".." {
            return Err(anyhow::anyhow!("invalid profile id {profile:?}").into());
        }
        Ok(self.root.join(profile))
    }

    async fn read_list<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, ProviderError> {
        let data = match tokio::fs::read(path).await {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::debug!("snapshot missing path={} outcome=empty", path.display());
                return Ok(vec![]);
            }
            Err(err) => return Err(err.into()),
        };

        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(vec![]);
        }

        Ok(serde_json::from_slice(&data)?)
    }
}

#[async_trait]
impl BrowserProvider for SnapshotProvider {
    async fn list_open_tabs(
        &self,
        use_original_favicon: bool,
    ) -> Result<Vec<RawTab>, ProviderError> {
        Self::ensure_dir(&self.root).await?;
        let mut tabs: Vec<RawTab> = Self::read_list(&self.root.join(TABS_FILE)).await?;

        if !use_original_favicon {
            for tab in tabs.iter_mut() {
                tab.favicon = None;
            }
        }

        Ok(tabs)
    }

    async fn list_history(&self, profile: &str) -> Result<Vec<RawHistoryEntry>, ProviderError> {
        Self::ensure_dir(&self.root).await?;
        let dir = self.profile_dir(profile)?;
        Self::ensure_dir(&dir).await?;
        Self::read_list(&dir.join(HISTORY_FILE)).await
    }

    async fn list_bookmarks(&self, profile: &str) -> Result<Vec<RawBookmark>, ProviderError> {
        Self::ensure_dir(&self.root).await?;
        let dir = self.profile_dir(profile)?;
        Self::ensure_dir(&dir).await?;
        Self::read_list(&dir.join(BOOKMARKS_FILE)).await
    }

    async fn list_profiles(&self) -> Result<Vec<ProfileId>, ProviderError> {
        Self::ensure_dir(&self.root).await?;

        let mut profiles = vec![];
        let mut entries = tokio::fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_dir() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                profiles.push(name.to_string());
            }
        }
        profiles.sort();

        Ok(profiles)
    }
}
