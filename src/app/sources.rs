use std::sync::Arc;

use async_trait::async_trait;

use crate::items::{Item, SourceKind, DEFAULT_PROFILE_ID};

use super::{backend::BrowserProvider, errors::ProviderError};

/// One origin of items. A failed fetch is final; retrying is up to the caller.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    fn kind(&self) -> SourceKind;

    async fn fetch(&self, profile: Option<&str>) -> Result<Vec<Item>, ProviderError>;
}

pub struct TabSource {
    provider: Arc<dyn BrowserProvider>,
    use_original_favicon: bool,
}

impl TabSource {
    pub fn new(provider: Arc<dyn BrowserProvider>, use_original_favicon: bool) -> Self {
        Self {
            provider,
            use_original_favicon,
        }
    }
}

#[async_trait]
impl SourceAdapter for TabSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Tab
    }

    /// Tabs span every profile of the running browser, so `profile` is ignored.
    async fn fetch(&self, _profile: Option<&str>) -> Result<Vec<Item>, ProviderError> {
        let tabs = self
            .provider
            .list_open_tabs(self.use_original_favicon)
            .await?;

        Ok(tabs
            .into_iter()
            .map(|tab| Item::from_tab(tab, self.use_original_favicon))
            .collect())
    }
}

pub struct HistorySource {
    provider: Arc<dyn BrowserProvider>,
}

impl HistorySource {
    pub fn new(provider: Arc<dyn BrowserProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl SourceAdapter for HistorySource {
    fn kind(&self) -> SourceKind {
        SourceKind::History
    }

    async fn fetch(&self, profile: Option<&str>) -> Result<Vec<Item>, ProviderError> {
        let profile = profile.unwrap_or(DEFAULT_PROFILE_ID);
        let entries = self.provider.list_history(profile).await?;

        Ok(entries
            .into_iter()
            .map(|entry| Item::from_history(entry, profile))
            .collect())
    }
}

pub struct BookmarkSource {
    provider: Arc<dyn BrowserProvider>,
}

impl BookmarkSource {
    pub fn new(provider: Arc<dyn BrowserProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl SourceAdapter for BookmarkSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Bookmark
    }

    async fn fetch(&self, profile: Option<&str>) -> Result<Vec<Item>, ProviderError> {
        let profile = profile.unwrap_or(DEFAULT_PROFILE_ID);
        let entries = self.provider.list_bookmarks(profile).await?;

        Ok(entries
            .into_iter()
            .map(|entry| Item::from_bookmark(entry, profile))
            .collect())
    }
}
