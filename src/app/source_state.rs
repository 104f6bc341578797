//! Per-source fetch state.
//!
//! Each source moves `Idle → Loading → Ready | Failed(kind)`, and every
//! [`SourceHandle::revalidate`] sends it back to `Loading`. Revalidations are
//! numbered; a fetch only lands if its number is still the latest one issued,
//! so a slow superseded fetch resolves and is dropped instead of overwriting
//! newer data. Nothing is cancelled.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::{sync::watch, task::JoinHandle};

use crate::items::{Item, ProfileId, SourceKind};

use super::{errors::ErrorKind, sources::SourceAdapter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SourceStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(ErrorKind),
}

#[derive(Debug, Clone, Default)]
pub struct SourceState {
    pub status: SourceStatus,
    pub items: Vec<Item>,
    /// Profile requested by the latest revalidation.
    pub profile: Option<ProfileId>,
    pub generation: u64,
}

impl SourceState {
    pub fn is_loading(&self) -> bool {
        self.status == SourceStatus::Loading
    }

    #[allow(dead_code)]
    pub fn error(&self) -> Option<ErrorKind> {
        match self.status {
            SourceStatus::Failed(kind) => Some(kind),
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct SourceHandle {
    adapter: Arc<dyn SourceAdapter>,
    state: Arc<watch::Sender<SourceState>>,
}

impl SourceHandle {
    pub fn new(adapter: Arc<dyn SourceAdapter>) -> Self {
        let (state, _) = watch::channel(SourceState::default());
        Self {
            adapter,
            state: Arc::new(state),
        }
    }

    pub fn kind(&self) -> SourceKind {
        self.adapter.kind()
    }

    pub fn subscribe(&self) -> watch::Receiver<SourceState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> SourceState {
        self.state.borrow().clone()
    }

    pub fn status(&self) -> SourceStatus {
        self.state.borrow().status
    }

    /// Start a fresh fetch for `profile`, superseding any pending one.
    ///
    /// Must be called from within a tokio runtime.
    pub fn revalidate(&self, profile: Option<ProfileId>) -> JoinHandle<()> {
        let mut generation = 0;
        self.state.send_modify(|state| {
            state.generation += 1;
            state.status = SourceStatus::Loading;
            state.profile = profile.clone();
            generation = state.generation;
        });

        let kind = self.kind();
        log::debug!(
            "source={} event=revalidate generation={generation} profile={profile:?}",
            kind.label()
        );

        let adapter = self.adapter.clone();
        let state = self.state.clone();
        tokio::spawn(async move {
            let result = adapter.fetch(profile.as_deref()).await;

            state.send_if_modified(move |state| {
                if state.generation != generation {
                    log::debug!(
                        "source={} event=stale generation={generation} latest={}",
                        kind.label(),
                        state.generation
                    );
                    return false;
                }

                match result {
                    Ok(items) => {
                        log::debug!(
                            "source={} event=ready generation={generation} items={}",
                            kind.label(),
                            items.len()
                        );
                        state.items = items;
                        state.status = SourceStatus::Ready;
                    }
                    Err(err) => {
                        log::warn!("source={} event=failed err={err}", kind.label());
                        state.items.clear();
                        state.status = SourceStatus::Failed(ErrorKind::from(&err));
                    }
                }
                true
            });
        })
    }

    /// Resolves once the source is no longer loading.
    pub async fn settled(&self) {
        let mut rx = self.subscribe();
        loop {
            let loading = rx.borrow_and_update().is_loading();
            if !loading || rx.changed().await.is_err() {
                return;
            }
        }
    }
}
