//! Filter sets and the query strings built from them.

use std::collections::BTreeMap;

pub const SEARCH: &str = "search";
pub const ACTION_TYPE: &str = "action_type";
pub const CATEGORY: &str = "category";
pub const START_DATE: &str = "start_date";
pub const END_DATE: &str = "end_date";
pub const PAGE: &str = "page";
pub const PAGE_SIZE: &str = "page_size";

/// Filter fields shown on the activity log view.
pub const LOG_FILTERS: &[&str] = &[SEARCH, ACTION_TYPE, START_DATE, END_DATE];
/// Filter fields shown on the asset list.
pub const ASSET_FILTERS: &[&str] = &[SEARCH, CATEGORY];
/// Filter fields shown on the user list.
pub const USER_FILTERS: &[&str] = &[SEARCH];

/// User-supplied constraints for a list query.
///
/// An empty value means "no constraint" and is left out of the query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    values: BTreeMap<String, String>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// A filter set with the given fields present and empty.
    pub fn with_fields(fields: &[&str]) -> Self {
        Self {
            values: fields
                .iter()
                .map(|f| (f.to_string(), String::new()))
                .collect(),
        }
    }

    /// Builder-style setter.
    pub fn with(mut self, field: &str, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: &str, value: impl Into<String>) {
        self.values.insert(field.to_string(), value.into());
    }

    pub fn get(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    /// Reset every field to empty, keeping the field names.
    pub fn clear(&mut self) {
        for v in self.values.values_mut() {
            v.clear();
        }
    }

    /// Fields with a non-empty value.
    pub fn active(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn has_active(&self) -> bool {
        self.active().next().is_some()
    }

    /// Query pairs for a list request.
    pub fn to_query(&self, page: Option<u32>, page_size: Option<u32>) -> Vec<(String, String)> {
        let mut query: Vec<(String, String)> = self
            .active()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        if let Some(p) = page {
            query.push((PAGE.to_string(), p.to_string()));
        }
        if let Some(ps) = page_size {
            query.push((PAGE_SIZE.to_string(), ps.to_string()));
        }
        query
    }

    /// Percent-encoded `a=b&c=d` form of [`FilterSet::to_query`].
    pub fn to_query_string(&self, page: Option<u32>, page_size: Option<u32>) -> String {
        encode(&self.to_query(page, page_size))
    }
}

/// Encode query pairs as `application/x-www-form-urlencoded`.
pub fn encode(pairs: &[(String, String)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_fields_are_omitted() {
        let filters = FilterSet::with_fields(LOG_FILTERS)
            .with(SEARCH, "logo")
            .with(ACTION_TYPE, "");
        let qs = filters.to_query_string(None, None);
        assert!(qs.contains("search=logo"));
        assert!(!qs.contains("action_type"));
    }

    #[test]
    fn test_page_fields_are_appended() {
        let filters = FilterSet::with_fields(LOG_FILTERS);
        let query = filters.to_query(Some(3), Some(20));
        assert_eq!(
            query,
            vec![
                ("page".to_string(), "3".to_string()),
                ("page_size".to_string(), "20".to_string())
            ]
        );
    }

    #[test]
    fn test_values_are_included_verbatim_and_encoded() {
        let filters = FilterSet::new()
            .with(SEARCH, "red & blue")
            .with(START_DATE, "2024-01-31");
        let query = filters.to_query(None, None);
        assert!(query.contains(&("search".to_string(), "red & blue".to_string())));
        let qs = filters.to_query_string(None, None);
        assert!(qs.contains("search=red+%26+blue"));
        assert!(qs.contains("start_date=2024-01-31"));
    }

    #[test]
    fn test_clear_keeps_fields_but_empties_values() {
        let mut filters = FilterSet::with_fields(ASSET_FILTERS).with(CATEGORY, "Images");
        assert!(filters.has_active());
        filters.clear();
        assert!(!filters.has_active());
        assert_eq!(filters, FilterSet::with_fields(ASSET_FILTERS));
        assert_eq!(filters.get(CATEGORY), "");
    }
}
