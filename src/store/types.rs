//! Store state types

use crate::error::{Error, ErrorKind};
use serde::Serialize;

/// Which store operation failed, for wording the message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Fresh page fetch
    FetchPage,
    /// Incremental fetch of the next page
    LoadMore,
    /// Recent-items list
    Recent,
    /// Single record
    Detail,
}

/// Failure surfaced to presentation code
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreError {
    /// Classification of the failure
    pub kind: ErrorKind,
    /// Message suitable for display
    pub message: String,
}

impl StoreError {
    /// Create a store error
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Word a crate error for the user
    ///
    /// Auth failures keep their own message; everything else names the
    /// resource and the operation.
    pub fn from_error(error: &Error, label: &str, operation: Operation) -> Self {
        let kind = error.kind();
        let message = match (kind, operation) {
            (ErrorKind::AuthRequired | ErrorKind::SessionExpired, _) => error.to_string(),
            (ErrorKind::Timeout, Operation::LoadMore) => {
                format!("Loading more {label} timed out. Please try again.")
            }
            (ErrorKind::Timeout, _) => {
                format!("Loading {label} timed out. Please try again later.")
            }
            (_, Operation::FetchPage) => {
                format!("Failed to load {label}. Please try again later.")
            }
            (_, Operation::LoadMore) => format!("Failed to load more {label}. Please try again."),
            (_, Operation::Recent) => format!("Failed to load recent {label}."),
            (_, Operation::Detail) => {
                format!("Failed to load {label} details. Please try again later.")
            }
        };
        Self { kind, message }
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Result of a store request that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response was applied to the state
    Loaded {
        /// Page that was loaded
        page: u32,
        /// Number of items the page carried
        items: usize,
    },
    /// Nothing to do; no request was sent
    Skipped,
    /// A newer request replaced this one; its response was discarded
    Superseded,
}

/// Pagination state of one resource
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreState<T> {
    /// Items in page order
    pub items: Vec<T>,
    /// Last successfully loaded page
    pub current_page: u32,
    /// Last known page count
    pub total_pages: u32,
    /// Page size of the last `fetch_page`, reused by `load_more`
    pub page_limit: u32,
    /// A fresh fetch is in flight
    pub is_loading: bool,
    /// A load-more fetch is in flight
    pub is_loading_more: bool,
    /// Failure of the most recent request
    pub error: Option<StoreError>,
    #[serde(skip)]
    pub(crate) generation: u64,
}

impl<T> StoreState<T> {
    /// Empty state for a resource with the given page size
    pub fn new(page_limit: u32) -> Self {
        Self {
            items: Vec::new(),
            current_page: 1,
            total_pages: 1,
            page_limit: page_limit.max(1),
            is_loading: false,
            is_loading_more: false,
            error: None,
            generation: 0,
        }
    }

    /// Whether `load_more` would fetch another page
    pub fn has_more(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Whether any request is in flight
    pub fn is_busy(&self) -> bool {
        self.is_loading || self.is_loading_more
    }

    /// Request generation the state was last started under
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// State of an unpaginated list (e.g. recent testimonials)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListState<T> {
    /// Items in server order
    pub items: Vec<T>,
    /// A fetch is in flight
    pub is_loading: bool,
    /// Failure of the most recent fetch
    pub error: Option<StoreError>,
    #[serde(skip)]
    pub(crate) generation: u64,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            is_loading: false,
            error: None,
            generation: 0,
        }
    }
}

/// State of a single-record view (e.g. project details)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailState<T> {
    /// The loaded record
    pub item: Option<T>,
    /// Id of the record last requested
    pub requested_id: Option<String>,
    /// A fetch is in flight
    pub is_loading: bool,
    /// Failure of the most recent fetch
    pub error: Option<StoreError>,
    #[serde(skip)]
    pub(crate) generation: u64,
}

impl<T> Default for DetailState<T> {
    fn default() -> Self {
        Self {
            item: None,
            requested_id: None,
            is_loading: false,
            error: None,
            generation: 0,
        }
    }
}
