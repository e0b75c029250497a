//! HTTP client module
//!
//! Provides the single-attempt HTTP client used by the stores.
//!
//! # Features
//!
//! - **Deadlines**: Every request is bounded and times out as its own error kind
//! - **Bearer Auth**: Per-request `Authorization: Bearer` tokens
//! - **Status Checks**: Non-2xx responses become [`crate::Error::HttpStatus`]

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
