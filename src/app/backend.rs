use async_trait::async_trait;

use crate::items::{ProfileId, RawBookmark, RawHistoryEntry, RawTab};

use super::errors::ProviderError;

/// Raw browser data. Tabs are not tied to a profile; history and bookmarks are.
#[async_trait]
pub trait BrowserProvider: Send + Sync {
    /// `use_original_favicon` tells the provider whether to resolve the
    /// browser's own favicons at all.
    async fn list_open_tabs(&self, use_original_favicon: bool)
        -> Result<Vec<RawTab>, ProviderError>;

    async fn list_history(&self, profile: &str) -> Result<Vec<RawHistoryEntry>, ProviderError>;

    async fn list_bookmarks(&self, profile: &str) -> Result<Vec<RawBookmark>, ProviderError>;

    async fn list_profiles(&self) -> Result<Vec<ProfileId>, ProviderError>;
}

/// Read-only view of user preferences.
pub trait PreferenceStore: Send + Sync {
    fn use_original_favicon(&self) -> bool;

    /// Falls back to [`crate::items::DEFAULT_PROFILE_ID`] when unset.
    fn selected_profile(&self) -> ProfileId;

    fn romanize_titles(&self) -> bool;
}
