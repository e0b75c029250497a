//! Single-record store

use super::fetcher::ResourceFetcher;
use super::paginated::StoreItem;
use super::types::{DetailState, FetchOutcome, Operation, StoreError};
use crate::error::Result;
use crate::resource::ResourceDef;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Handle to one record loaded by id
pub struct DetailStore<T> {
    inner: Arc<Inner<T>>,
}

struct Inner<T> {
    fetcher: ResourceFetcher,
    state: watch::Sender<DetailState<T>>,
}

impl<T> Clone for DetailStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: StoreItem> DetailStore<T> {
    /// Create an empty store
    pub fn new(fetcher: ResourceFetcher) -> Self {
        let (state, _) = watch::channel(DetailState::default());
        Self {
            inner: Arc::new(Inner { fetcher, state }),
        }
    }

    /// Resource the records belong to
    pub fn resource(&self) -> &ResourceDef {
        self.inner.fetcher.resource()
    }

    /// Snapshot of the current state
    pub fn state(&self) -> DetailState<T> {
        self.inner.state.borrow().clone()
    }

    /// Watch the state for changes
    pub fn subscribe(&self) -> watch::Receiver<DetailState<T>> {
        self.inner.state.subscribe()
    }

    /// Load the record with `id`. Failures land in the state.
    pub async fn fetch(&self, id: &str) {
        let _ = self.try_fetch(id).await;
    }

    /// Clear the error
    pub fn clear_error(&self) {
        self.inner.state.send_if_modified(|state| state.error.take().is_some());
    }

    /// Like [`fetch`](Self::fetch), but also returns the error
    pub async fn try_fetch(&self, id: &str) -> Result<FetchOutcome> {
        let mut generation = 0;
        self.inner.state.send_modify(|state| {
            state.generation += 1;
            generation = state.generation;
            state.item = None;
            state.requested_id = Some(id.to_string());
            state.is_loading = true;
            state.error = None;
        });
        debug!(resource = %self.resource().name, id, "Fetching record");

        let mut changes = self.inner.state.subscribe();
        let result = tokio::select! {
            result = self.inner.fetcher.item::<T>(id) => result,
            _ = changes.wait_for(|state| state.generation != generation) => {
                return Ok(FetchOutcome::Superseded);
            }
        };

        let applied;
        let outcome = match result {
            Ok(item) => {
                applied = self.apply(generation, |state| {
                    state.item = Some(item);
                    state.is_loading = false;
                });
                Ok(FetchOutcome::Loaded { page: 1, items: 1 })
            }
            Err(e) => {
                let surfaced =
                    StoreError::from_error(&e, &self.resource().label, Operation::Detail);
                warn!(resource = %self.resource().name, id, error = %e, "Error fetching record");
                applied = self.apply(generation, |state| {
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

    fn apply(&self, generation: u64, update: impl FnOnce(&mut DetailState<T>)) -> bool {
        self.inner.state.send_if_modified(|state| {
            if state.generation != generation {
                return false;
            }
            update(state);
            true
        })
    }
}

impl<T> std::fmt::Debug for DetailStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetailStore")
            .field("resource", &self.inner.fetcher.resource().name)
            .finish_non_exhaustive()
    }
}
