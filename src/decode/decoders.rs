//! Page and item decoders

use super::types::{Page, RawPage};
use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Generic envelope key accepted when the resource key is absent
const FALLBACK_KEY: &str = "items";

/// Envelope field carrying the page count
const TOTAL_PAGES_KEY: &str = "totalPages";

/// Decoder for one resource's list and item bodies
#[derive(Debug, Clone)]
pub struct PageDecoder {
    /// Envelope key holding the items (e.g. "projects")
    record_key: String,
}

impl PageDecoder {
    /// Create a decoder for envelopes keyed by `record_key`
    pub fn new(record_key: impl Into<String>) -> Self {
        Self {
            record_key: record_key.into(),
        }
    }

    /// Decode a list body into a page
    pub fn decode<T: DeserializeOwned>(&self, body: Value) -> Result<Page<T>> {
        let raw: RawPage = serde_json::from_value(body).map_err(|_| {
            Error::decode("expected a JSON array or object with an items array")
        })?;

        match raw {
            RawPage::Bare(values) => Ok(Page::single(decode_items(values)?)),
            RawPage::Envelope(mut map) => {
                let values = self.take_items(&mut map)?;
                Ok(Page {
                    items: decode_items(values)?,
                    total_pages: total_pages(&map),
                })
            }
        }
    }

    /// Decode a single-record body, bare or wrapped in `{"<key>": {...}}`
    pub fn decode_item<T: DeserializeOwned>(&self, key: &str, body: Value) -> Result<T> {
        let value = match body {
            Value::Object(mut map) if map.get(key).is_some_and(Value::is_object) => {
                map.remove(key).unwrap_or_default()
            }
            Value::Object(map) => Value::Object(map),
            other => {
                return Err(Error::decode(format!(
                    "expected a JSON object, got {}",
                    type_name(&other)
                )))
            }
        };
        serde_json::from_value(value).map_err(|e| Error::decode(format!("invalid {key}: {e}")))
    }

    fn take_items(&self, map: &mut Map<String, Value>) -> Result<Vec<Value>> {
        for key in [self.record_key.as_str(), FALLBACK_KEY] {
            match map.remove(key) {
                Some(Value::Array(values)) => return Ok(values),
                Some(other) => {
                    return Err(Error::decode(format!(
                        "'{key}' is {}, expected an array",
                        type_name(&other)
                    )))
                }
                None => {}
            }
        }
        Err(Error::decode(format!(
            "response has no '{}' array",
            self.record_key
        )))
    }
}

fn decode_items<T: DeserializeOwned>(values: Vec<Value>) -> Result<Vec<T>> {
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value(value)
                .map_err(|e| Error::decode(format!("item {index} is invalid: {e}")))
        })
        .collect()
}

/// Missing, zero, negative or non-numeric counts read as one page
fn total_pages(map: &Map<String, Value>) -> u32 {
    map.get(TOTAL_PAGES_KEY)
        .and_then(Value::as_u64)
        .filter(|n| *n > 0)
        .map_or(1, |n| u32::try_from(n).unwrap_or(u32::MAX))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
