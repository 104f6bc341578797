use std::sync::Arc;

use serde::Serialize;
use tokio::task::JoinHandle;

use crate::{
    items::{Item, SourceKind},
    search_query::{self, SearchOptions},
};

use super::{
    backend::{BrowserProvider, PreferenceStore},
    errors::ErrorKind,
    source_state::{SourceHandle, SourceStatus},
    sources::{BookmarkSource, HistorySource, SourceAdapter, TabSource},
};

/// Filtered items of one source plus its fetch status.
#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub kind: SourceKind,
    pub status: SourceStatus,
    pub items: Vec<Item>,
}

impl Section {
    pub fn is_loading(&self) -> bool {
        self.status == SourceStatus::Loading
    }

    pub fn error(&self) -> Option<ErrorKind> {
        match self.status {
            SourceStatus::Failed(kind) => Some(kind),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub query: String,
    pub is_loading: bool,
    pub tabs: Section,
    pub history: Section,
    pub bookmarks: Section,
}

impl SearchResults {
    /// Tabs, then history, then bookmarks.
    pub fn sections(&self) -> [&Section; 3] {
        [&self.tabs, &self.history, &self.bookmarks]
    }

    #[allow(dead_code)]
    pub fn ordered(&self) -> Vec<&Item> {
        self.sections()
            .into_iter()
            .flat_map(|section| section.items.iter())
            .collect()
    }
}

/// Holds one [`SourceHandle`] per source and filters them against the
/// current query.
pub struct ResultAggregator {
    tabs: SourceHandle,
    history: SourceHandle,
    bookmarks: SourceHandle,
    query: String,
    options: SearchOptions,
}

impl ResultAggregator {
    pub fn new(provider: Arc<dyn BrowserProvider>, prefs: &dyn PreferenceStore) -> Self {
        Self::with_sources(
            Arc::new(TabSource::new(provider.clone(), prefs.use_original_favicon())),
            Arc::new(HistorySource::new(provider.clone())),
            Arc::new(BookmarkSource::new(provider)),
            SearchOptions {
                romanize_titles: prefs.romanize_titles(),
            },
        )
    }

    pub fn with_sources(
        tabs: Arc<dyn SourceAdapter>,
        history: Arc<dyn SourceAdapter>,
        bookmarks: Arc<dyn SourceAdapter>,
        options: SearchOptions,
    ) -> Self {
        Self {
            tabs: SourceHandle::new(tabs),
            history: SourceHandle::new(history),
            bookmarks: SourceHandle::new(bookmarks),
            query: String::new(),
            options,
        }
    }

    #[allow(dead_code)]
    pub fn source(&self, kind: SourceKind) -> &SourceHandle {
        match kind {
            SourceKind::Tab => &self.tabs,
            SourceKind::History => &self.history,
            SourceKind::Bookmark => &self.bookmarks,
        }
    }

    /// First fetch of every source that is still idle.
    pub fn mount(&self, profile: &str) -> Vec<JoinHandle<()>> {
        let mut handles = vec![];
        if self.tabs.status() == SourceStatus::Idle {
            handles.push(self.tabs.revalidate(None));
        }
        for handle in [&self.history, &self.bookmarks] {
            if handle.status() == SourceStatus::Idle {
                handles.push(handle.revalidate(Some(profile.to_string())));
            }
        }
        handles
    }

    /// Re-fetch the profile-scoped sources, e.g. after a profile switch.
    #[allow(dead_code)]
    pub fn revalidate(&self, profile: &str) -> Vec<JoinHandle<()>> {
        vec![
            self.history.revalidate(Some(profile.to_string())),
            self.bookmarks.revalidate(Some(profile.to_string())),
        ]
    }

    #[allow(dead_code)]
    pub fn refresh_tabs(&self) -> JoinHandle<()> {
        self.tabs.revalidate(None)
    }

    pub async fn settled(&self) {
        self.tabs.settled().await;
        self.history.settled().await;
        self.bookmarks.settled().await;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    #[allow(dead_code)]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[allow(dead_code)]
    pub fn is_loading(&self) -> bool {
        [&self.tabs, &self.history, &self.bookmarks]
            .iter()
            .any(|handle| handle.status() == SourceStatus::Loading)
    }

    /// Filter the current data of every source. Cheap enough to call on
    /// every keystroke; nothing is cached between calls.
    pub fn results(&self) -> SearchResults {
        let tokens = search_query::tokenize(&self.query);
        let section = |handle: &SourceHandle| {
            let state = handle.snapshot();
            Section {
                kind: handle.kind(),
                status: state.status,
                items: search_query::filter_items(&tokens, &state.items, self.options),
            }
        };

        let tabs = section(&self.tabs);
        let history = section(&self.history);
        let bookmarks = section(&self.bookmarks);

        SearchResults {
            query: self.query.clone(),
            is_loading: tabs.is_loading() || history.is_loading() || bookmarks.is_loading(),
            tabs,
            history,
            bookmarks,
        }
    }
}
