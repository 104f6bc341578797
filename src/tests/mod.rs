
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use async_trait::async_trait;
use tokio::sync::Semaphore;

use crate::{
    app::{backend::BrowserProvider, errors::ProviderError},
    items::{ProfileId, RawBookmark, RawHistoryEntry, RawTab},
};

#[derive(Debug, Clone, Copy)]
pub enum Fail {
    NotInstalled,
    Unknown,
}

impl Fail {
    fn to_error(self) -> ProviderError {
        match self {
            Fail::NotInstalled => ProviderError::NotInstalled,
            Fail::Unknown => ProviderError::Other(anyhow::anyhow!("provider exploded")),
        }
    }
}

/// In-memory provider. Fetches for a gated profile wait until the gate
/// gets permits.
#[derive(Default)]
pub struct FakeProvider {
    tabs: Vec<RawTab>,
    history: HashMap<ProfileId, Vec<RawHistoryEntry>>,
    bookmarks: HashMap<ProfileId, Vec<RawBookmark>>,
    tabs_fail: Option<Fail>,
    history_fail: HashMap<ProfileId, Fail>,
    tab_gate: Option<Arc<Semaphore>>,
    gates: HashMap<ProfileId, Arc<Semaphore>>,
    pub tab_calls: AtomicUsize,
    pub history_calls: AtomicUsize,
    pub bookmark_calls: AtomicUsize,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tab(mut self, title: &str, url: &str) -> Self {
        let tab_index = self.tabs.len() as u64;
        self.tabs.push(RawTab {
            title: title.to_string(),
            url: url.to_string(),
            favicon: None,
            window_id: 1,
            tab_index,
        });
        self
    }

    pub fn with_history(mut self, profile: &str, title: &str, url: &str) -> Self {
        let entries = self.history.entry(profile.to_string()).or_default();
        let id = entries.len() as u64 + 1;
        entries.push(RawHistoryEntry {
            id,
            title: title.to_string(),
            url: url.to_string(),
            last_visited: None,
        });
        self
    }

    pub fn with_bookmark(mut self, profile: &str, title: &str, url: &str) -> Self {
        let entries = self.bookmarks.entry(profile.to_string()).or_default();
        let id = format!("bm-{}", entries.len() + 1);
        entries.push(RawBookmark {
            id,
            title: title.to_string(),
            url: url.to_string(),
        });
        self
    }

    pub fn failing_tabs(mut self, fail: Fail) -> Self {
        self.tabs_fail = Some(fail);
        self
    }

    pub fn failing_history(mut self, profile: &str, fail: Fail) -> Self {
        self.history_fail.insert(profile.to_string(), fail);
        self
    }

    pub fn gated_tabs(mut self, gate: Arc<Semaphore>) -> Self {
        self.tab_gate = Some(gate);
        self
    }

    pub fn gated(mut self, profile: &str, gate: Arc<Semaphore>) -> Self {
        self.gates.insert(profile.to_string(), gate);
        self
    }

    async fn wait(gate: Option<&Arc<Semaphore>>) {
        if let Some(gate) = gate {
            gate.acquire().await.expect("gate closed").forget();
        }
    }
}

#[async_trait]
impl BrowserProvider for FakeProvider {
    async fn list_open_tabs(
        &self,
        _use_original_favicon: bool,
    ) -> Result<Vec<RawTab>, ProviderError> {
        self.tab_calls.fetch_add(1, Ordering::SeqCst);
        Self::wait(self.tab_gate.as_ref()).await;
        match self.tabs_fail {
            Some(fail) => Err(fail.to_error()),
            None => Ok(self.tabs.clone()),
        }
    }

    async fn list_history(&self, profile: &str) -> Result<Vec<RawHistoryEntry>, ProviderError> {
        self.history_calls.fetch_add(1, Ordering::SeqCst);
        Self::wait(self.gates.get(profile)).await;
        if let Some(fail) = self.history_fail.get(profile) {
            return Err(fail.to_error());
        }
        Ok(self.history.get(profile).cloned().unwrap_or_default())
    }

    async fn list_bookmarks(&self, profile: &str) -> Result<Vec<RawBookmark>, ProviderError> {
        self.bookmark_calls.fetch_add(1, Ordering::SeqCst);
        Self::wait(self.gates.get(profile)).await;
        Ok(self.bookmarks.get(profile).cloned().unwrap_or_default())
    }

    async fn list_profiles(&self) -> Result<Vec<ProfileId>, ProviderError> {
        let mut profiles: Vec<_> = self
            .history
            .keys()
            .chain(self.bookmarks.keys())
            .cloned()
            .collect();
        profiles.sort();
        profiles.dedup();
        Ok(profiles)
    }
}
