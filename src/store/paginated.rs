//! Paginated resource store
//!
//! Owns the list state of one resource: fetch a page, load the next page
//! and append it, surface loading and error flags.
//!
//! Every request is tagged with a generation. Starting a new fetch bumps it,
//! which cancels whatever request is still in flight and guarantees that
//! only the newest response is ever applied.

use super::fetcher::ResourceFetcher;
use super::types::{FetchOutcome, Operation, StoreError, StoreState};
use crate::auth::CredentialProvider;
use crate::decode::Page;
use crate::error::Result;
use crate::http::HttpClient;
use crate::resource::ResourceDef;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Bounds for items held by a store
pub trait StoreItem: DeserializeOwned + Clone + Send + Sync + 'static {}

impl<T> StoreItem for T where T: DeserializeOwned + Clone + Send + Sync + 'static {}

/// Handle to the paginated state of one resource
///
/// Clones share the same state.
pub struct PaginatedStore<T> {
    inner: Arc<Inner<T>>,
}

struct Inner<T> {
    fetcher: ResourceFetcher,
    state: watch::Sender<StoreState<T>>,
}

impl<T> Clone for PaginatedStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: StoreItem> PaginatedStore<T> {
    /// Create an empty store for `resource`
    pub fn new(
        resource: ResourceDef,
        client: Arc<HttpClient>,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Self {
        Self::with_fetcher(ResourceFetcher::new(resource, client, credentials))
    }

    /// Create an empty store around an existing fetcher
    pub fn with_fetcher(fetcher: ResourceFetcher) -> Self {
        let (state, _) = watch::channel(StoreState::new(fetcher.resource().default_limit));
        Self {
            inner: Arc::new(Inner { fetcher, state }),
        }
    }

    /// Resource this store lists
    pub fn resource(&self) -> &ResourceDef {
        self.inner.fetcher.resource()
    }

    /// Snapshot of the current state
    pub fn state(&self) -> StoreState<T> {
        self.inner.state.borrow().clone()
    }

    /// Watch the state for changes
    pub fn subscribe(&self) -> watch::Receiver<StoreState<T>> {
        self.inner.state.subscribe()
    }

    /// Fetch `page`, replacing the held items. Failures land in the state.
    pub async fn fetch_page(&self, page: u32, limit: u32) {
        let _ = self.try_fetch_page(page, limit).await;
    }

    /// Fetch page 1 with the resource's default page size
    pub async fn fetch_first(&self) {
        let limit = self.resource().default_limit;
        self.fetch_page(1, limit).await;
    }

    /// Fetch page 1 again with the last page size
    pub async fn refresh(&self) {
        let limit = self.inner.state.borrow().page_limit;
        self.fetch_page(1, limit).await;
    }

    /// Fetch the next page and append it. Failures land in the state.
    pub async fn load_more(&self) {
        let _ = self.try_load_more().await;
    }

    /// Clear the error without touching anything else
    pub fn clear_error(&self) {
        self.inner.state.send_if_modified(|state| state.error.take().is_some());
    }

    /// Drop all items and cancel any request in flight
    pub fn reset(&self) {
        let limit = self.resource().default_limit;
        self.inner.state.send_modify(|state| {
            let generation = state.generation + 1;
            *state = StoreState::new(limit);
            state.generation = generation;
        });
    }

    /// Like [`fetch_page`](Self::fetch_page), but also returns the error
    pub async fn try_fetch_page(&self, page: u32, limit: u32) -> Result<FetchOutcome> {
        let page = page.max(1);
        let limit = limit.max(1);

        let mut generation = 0;
        self.inner.state.send_modify(|state| {
            state.generation += 1;
            generation = state.generation;
            state.is_loading = true;
            state.is_loading_more = false;
            state.error = None;
            state.page_limit = limit;
        });
        debug!(resource = %self.resource().name, page, limit, "Fetching page");

        let Some(result) = self.request(page, limit, generation).await else {
            return Ok(FetchOutcome::Superseded);
        };

        match result {
            Ok(fetched) => {
                let count = fetched.items.len();
                let applied = self.apply(generation, |state| {
                    state.items = fetched.items;
                    state.current_page = page;
                    state.total_pages = fetched.total_pages.max(page);
                    state.is_loading = false;
                });
                Ok(loaded_or_superseded(applied, page, count))
            }
            Err(e) => {
                let surfaced =
                    StoreError::from_error(&e, &self.resource().label, Operation::FetchPage);
                warn!(resource = %self.resource().name, error = %e, "Error fetching page");
                let applied = self.apply(generation, |state| {
                    state.items.clear();
                    state.current_page = 1;
                    state.total_pages = 1;
                    state.is_loading = false;
                    state.error = Some(surfaced);
                });
                if applied {
                    Err(e)
                } else {
                    Ok(FetchOutcome::Superseded)
                }
            }
        }
    }

    /// Like [`load_more`](Self::load_more), but also returns the error
    pub async fn try_load_more(&self) -> Result<FetchOutcome> {
        let mut started = None;
        self.inner.state.send_if_modified(|state| {
            if state.is_busy() || !state.has_more() {
                return false;
            }
            state.generation += 1;
            state.is_loading_more = true;
            state.error = None;
            started = Some((state.generation, state.current_page + 1, state.page_limit));
            true
        });

        let Some((generation, page, limit)) = started else {
            debug!(resource = %self.resource().name, "Nothing more to load");
            return Ok(FetchOutcome::Skipped);
        };
        debug!(resource = %self.resource().name, page, limit, "Loading more");

        let Some(result) = self.request(page, limit, generation).await else {
            return Ok(FetchOutcome::Superseded);
        };

        match result {
            Ok(fetched) => {
                let count = fetched.items.len();
                let applied = self.apply(generation, |state| {
                    state.items.extend(fetched.items);
                    state.current_page = page;
                    state.total_pages = fetched.total_pages.max(page);
                    state.is_loading_more = false;
                });
                Ok(loaded_or_superseded(applied, page, count))
            }
            Err(e) => {
                let surfaced =
                    StoreError::from_error(&e, &self.resource().label, Operation::LoadMore);
                warn!(resource = %self.resource().name, error = %e, "Error loading more");
                let applied = self.apply(generation, |state| {
                    state.is_loading_more = false;
                    state.error = Some(surfaced);
                });
                if applied {
                    Err(e)
                } else {
                    Ok(FetchOutcome::Superseded)
                }
            }
        }
    }

    /// Run the request unless a newer generation cancels it first
    async fn request(&self, page: u32, limit: u32, generation: u64) -> Option<Result<Page<T>>> {
        let mut changes = self.inner.state.subscribe();
        tokio::select! {
            result = self.inner.fetcher.page::<T>(page, limit) => Some(result),
            _ = changes.wait_for(|state| state.generation != generation) => {
                debug!(resource = %self.resource().name, page, "Request superseded");
                None
            }
        }
    }

    /// Apply `update` only if `generation` is still the latest
    fn apply(&self, generation: u64, update: impl FnOnce(&mut StoreState<T>)) -> bool {
        self.inner.state.send_if_modified(|state| {
            if state.generation != generation {
                return false;
            }
            update(state);
            true
        })
    }
}

impl<T> std::fmt::Debug for PaginatedStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginatedStore")
            .field("resource", &self.inner.fetcher.resource().name)
            .finish_non_exhaustive()
    }
}

fn loaded_or_superseded(applied: bool, page: u32, items: usize) -> FetchOutcome {
    if applied {
        FetchOutcome::Loaded { page, items }
    } else {
        FetchOutcome::Superseded
    }
}
