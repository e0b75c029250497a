//! Decoded page types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One page of a resource collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items in server order
    pub items: Vec<T>,
    /// Total page count reported by the server, at least 1
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// A page that is the whole collection
    pub fn single(items: Vec<T>) -> Self {
        Self {
            items,
            total_pages: 1,
        }
    }
}

/// Response body shapes accepted from list endpoints
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawPage {
    /// `[item, item, ...]`
    Bare(Vec<Value>),
    /// `{"<key>": [item, ...], "totalPages": n}`
    Envelope(Map<String, Value>),
}
