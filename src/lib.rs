// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # folio-store
//!
//! Client-side stores for a portfolio content-management backend: projects,
//! featured projects, users, testimonials and blog posts served over REST.
//!
//! ## Features
//!
//! - **Paginated Stores**: Fetch a page, load more and append, recover from errors
//! - **Stale-Response Safety**: Newer requests cancel and outrank older ones
//! - **Deadlines**: Every request is bounded; timeouts are their own error kind
//! - **Shape Tolerance**: Envelope and bare-array responses decode the same way
//! - **Session Auth**: Bearer tokens from a token file or session, logout on 401
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use folio_store::{auth::NoCredentials, config::AppConfig, context::StoreContext};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> folio_store::Result<()> {
//!     let context = StoreContext::new(AppConfig::load(None)?, Arc::new(NoCredentials))?;
//!
//!     let projects = &context.active_projects;
//!     projects.fetch_page(1, 4).await;
//!     projects.load_more().await;
//!
//!     let state = projects.state();
//!     println!("{} of {} pages", state.current_page, state.total_pages);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                        StoreContext                           │
//! │  active_projects  featured_projects  users  testimonials ...  │
//! └───────────────────────────────┬───────────────────────────────┘
//!                                 │
//! ┌───────────────┬───────────────┴───────┬───────────────────────┐
//! │    Store      │       Fetcher         │        Decode         │
//! ├───────────────┼───────────────────────┼───────────────────────┤
//! │ fetch_page    │ Bearer token          │ {key: [...], total}   │
//! │ load_more     │ 401 -> logout         │ [...]                 │
//! │ generations   │ Deadline              │ single record         │
//! └───────────────┴───────────────────────┴───────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the crate
pub mod error;

/// Application configuration
pub mod config;

/// Credential providers
pub mod auth;

/// HTTP client with deadlines
pub mod http;

/// Response decoders
pub mod decode;

/// Resource definitions and models
pub mod resource;

/// Paginated, recent and detail stores
pub mod store;

/// Store context (owner of all stores)
pub mod context;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, ErrorKind, Result};

pub use context::StoreContext;
pub use store::{FetchOutcome, PaginatedStore, StoreError, StoreState};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
