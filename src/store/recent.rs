//! Unpaginated "most recent" list store

use super::fetcher::ResourceFetcher;
use super::paginated::StoreItem;
use super::types::{FetchOutcome, ListState, Operation, StoreError};
use crate::error::Result;
use crate::resource::ResourceDef;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Handle to a short list fetched with a single `limit`
pub struct RecentStore<T> {
    inner: Arc<Inner<T>>,
}

struct Inner<T> {
    fetcher: ResourceFetcher,
    state: watch::Sender<ListState<T>>,
}

impl<T> Clone for RecentStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: StoreItem> RecentStore<T> {
    /// Create an empty store
    pub fn new(fetcher: ResourceFetcher) -> Self {
        let (state, _) = watch::channel(ListState::default());
        Self {
            inner: Arc::new(Inner { fetcher, state }),
        }
    }

    /// Resource this store lists
    pub fn resource(&self) -> &ResourceDef {
        self.inner.fetcher.resource()
    }

    /// Snapshot of the current state
    pub fn state(&self) -> ListState<T> {
        self.inner.state.borrow().clone()
    }

    /// Watch the state for changes
    pub fn subscribe(&self) -> watch::Receiver<ListState<T>> {
        self.inner.state.subscribe()
    }

    /// Fetch up to `limit` items, replacing the held ones
    pub async fn fetch(&self, limit: u32) {
        let _ = self.try_fetch(limit).await;
    }

    /// Clear the error
    pub fn clear_error(&self) {
        self.inner.state.send_if_modified(|state| state.error.take().is_some());
    }

    /// Like [`fetch`](Self::fetch), but also returns the error
    pub async fn try_fetch(&self, limit: u32) -> Result<FetchOutcome> {
        let limit = limit.max(1);
        let mut generation = 0;
        self.inner.state.send_modify(|state| {
            state.generation += 1;
            generation = state.generation;
            state.is_loading = true;
            state.error = None;
        });
        debug!(resource = %self.resource().name, limit, "Fetching recent items");

        let mut changes = self.inner.state.subscribe();
        let result = tokio::select! {
            result = self.inner.fetcher.list::<T>(limit) => result,
            _ = changes.wait_for(|state| state.generation != generation) => {
                return Ok(FetchOutcome::Superseded);
            }
        };

        let applied;
        let outcome = match result {
            Ok(items) => {
                let count = items.len();
                applied = self.apply(generation, |state| {
                    state.items = items;
                    state.is_loading = false;
                });
                Ok(FetchOutcome::Loaded {
                    page: 1,
                    items: count,
                })
            }
            Err(e) => {
                let surfaced =
                    StoreError::from_error(&e, &self.resource().label, Operation::Recent);
                warn!(resource = %self.resource().name, error = %e, "Error fetching recent items");
                applied = self.apply(generation, |state| {
                    state.items.clear();
                    state.is_loading = false;
                    state.error = Some(surfaced);
                });
                Err(e)
            }
        };

        if applied {
            outcome
        } else {
            Ok(FetchOutcome::Superseded)
        }
    }

    fn apply(&self, generation: u64, update: impl FnOnce(&mut ListState<T>)) -> bool {
        self.inner.state.send_if_modified(|state| {
            if state.generation != generation {
                return false;
            }
            update(state);
            true
        })
    }
}

impl<T> std::fmt::Debug for RecentStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecentStore")
            .field("resource", &self.inner.fetcher.resource().name)
            .finish_non_exhaustive()
    }
}
