//! Resource stores
//!
//! Stores own the client-side state presentation code renders:
//!
//! - [`PaginatedStore`]: page fetch, load more, error recovery
//! - [`RecentStore`]: a short unpaginated list
//! - [`DetailStore`]: one record by id
//!
//! Each store is a clonable handle; state is read with `state()` or watched
//! through `subscribe()`, and only the store's own methods mutate it.

mod detail;
mod fetcher;
mod paginated;
mod recent;
mod types;

pub use detail::DetailStore;
pub use fetcher::ResourceFetcher;
pub use paginated::{PaginatedStore, StoreItem};
pub use recent::RecentStore;
pub use types::{DetailState, FetchOutcome, ListState, Operation, StoreError, StoreState};

#[cfg(test)]
mod tests;
