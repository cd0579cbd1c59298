use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DamError, Result};

/// Pagination metadata, either reported by the server or synthesized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultPage {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub current_page: u32,
    pub total_pages: u32,
}

impl ResultPage {
    /// Metadata for a complete, unpaged result.
    pub fn single(count: u64) -> Self {
        Self {
            count,
            next: None,
            previous: None,
            current_page: 1,
            total_pages: 1,
        }
    }
}

/// One list response: the items plus their pagination metadata.
#[derive(Debug, Clone)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub page: ResultPage,
}

impl<T> Listing<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Normalize any of the accepted list response shapes into a [`Listing`].
///
/// Accepted shapes:
/// - `{ "results": [...], "pagination": { ... } }`
/// - `{ "results": [...], "count": n, "next": .., "previous": .. }`
/// - a bare `[...]`
///
/// Anything else is a contract violation. `requested_page` and `page_size`
/// are only used to synthesize metadata for the `count` shape.
pub fn normalize<T: DeserializeOwned>(
    body: Value,
    requested_page: u32,
    page_size: u32,
) -> Result<Listing<T>> {
    match body {
        Value::Array(_) => {
            let items: Vec<T> = serde_json::from_value(body)?;
            let page = ResultPage::single(items.len() as u64);
            Ok(Listing { items, page })
        }
        Value::Object(mut map) => {
            let results = match map.remove("results") {
                Some(v @ Value::Array(_)) => v,
                Some(_) => {
                    return Err(DamError::Contract(
                        "`results` is not an array".to_string(),
                    ))
                }
                None => {
                    return Err(DamError::Contract(
                        "object response without `results`".to_string(),
                    ))
                }
            };
            let items: Vec<T> = serde_json::from_value(results)?;

            if let Some(pagination) = map.remove("pagination") {
                let page: ResultPage = serde_json::from_value(pagination)?;
                return Ok(Listing { items, page });
            }

            let count = map
                .get("count")
                .and_then(Value::as_u64)
                .ok_or_else(|| {
                    DamError::Contract("`results` without `pagination` or `count`".to_string())
                })?;
            let page = ResultPage {
                count,
                next: string_field(&map, "next"),
                previous: string_field(&map, "previous"),
                current_page: requested_page.max(1),
                total_pages: total_pages(count, page_size),
            };
            Ok(Listing { items, page })
        }
        other => Err(DamError::Contract(format!(
            "expected array or object, got {}",
            type_name(&other)
        ))),
    }
}

/// `max(1, ceil(count / page_size))`.
pub fn total_pages(count: u64, page_size: u32) -> u32 {
    let size = u64::from(page_size.max(1));
    u32::try_from(count.div_ceil(size).max(1)).unwrap_or(u32::MAX)
}

fn string_field(map: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_string)
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
