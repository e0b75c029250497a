//! Response decoder module
//!
//! Normalises the page bodies the backend returns into one shape.
//!
//! # Overview
//!
//! List endpoints answer either with an envelope
//! (`{"projects": [...], "totalPages": 3}`) or with a bare array. Both are
//! decoded here into [`Page<T>`] so nothing past the network boundary ever
//! branches on response shape.

mod decoders;
mod types;

pub use decoders::PageDecoder;
pub use types::{Page, RawPage};
