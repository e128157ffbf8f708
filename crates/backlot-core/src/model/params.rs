// ── List parameters and URL-state codec ──
//
// The query string is the single durable source of truth for list
// configuration. Parsing is total: malformed values fall back to
// defaults instead of erroring, so a hand-edited URL can never wedge a
// list view.

use std::collections::BTreeMap;

use url::form_urlencoded;

/// Sentinel filter value meaning "no filter" — never serialized.
pub const FILTER_ALL: &str = "all";

const DEFAULT_PAGE: u32 = 1;

/// Parsed list configuration: pagination, search, and named filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    /// 1-based page number.
    pub page: u32,
    pub limit: u32,
    pub search: String,
    /// Named filters, sorted by key so encodings are deterministic.
    pub filters: BTreeMap<String, String>,
}

impl ListParams {
    pub fn new(default_limit: u32) -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: default_limit.max(1),
            search: String::new(),
            filters: BTreeMap::new(),
        }
    }

    /// Parse a query string (without the leading `?`).
    ///
    /// Unknown keys become filters; `page`/`limit` values that fail to
    /// parse or are zero are ignored; a filter carrying the
    /// [`FILTER_ALL`] sentinel or an empty value is treated as absent.
    pub fn from_query(query: &str, default_limit: u32) -> Self {
        let mut params = Self::new(default_limit);

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if key == "page" {
                if let Ok(n) = value.parse::<u32>() {
                    if n >= 1 {
                        params.page = n;
                    }
                }
            } else if key == "limit" {
                if let Ok(n) = value.parse::<u32>() {
                    if n >= 1 {
                        params.limit = n;
                    }
                }
            } else if key == "search" {
                params.search = value.into_owned();
            } else if !value.is_empty() && value != FILTER_ALL {
                params.filters.insert(key.into_owned(), value.into_owned());
            }
        }

        params
    }

    /// Encode back to a query string.
    ///
    /// Parameters equal to their defaults are omitted entirely, so a
    /// freshly cleared list produces an empty query string.
    pub fn to_query(&self, default_limit: u32) -> String {
        let mut ser = form_urlencoded::Serializer::new(String::new());

        if self.page != DEFAULT_PAGE {
            ser.append_pair("page", &self.page.to_string());
        }
        if self.limit != default_limit.max(1) {
            ser.append_pair("limit", &self.limit.to_string());
        }
        if !self.search.is_empty() {
            ser.append_pair("search", &self.search);
        }
        for (key, value) in &self.filters {
            ser.append_pair(key, value);
        }

        ser.finish()
    }

    /// Full canonical rendering for cache keying.
    ///
    /// Unlike [`to_query`](Self::to_query), defaults are written out, so
    /// two parameter sets produce the same discriminator iff every value
    /// is equal.
    pub fn canonical(&self) -> String {
        let mut ser = form_urlencoded::Serializer::new(String::new());
        ser.append_pair("page", &self.page.to_string());
        ser.append_pair("limit", &self.limit.to_string());
        ser.append_pair("search", &self.search);
        for (key, value) in &self.filters {
            ser.append_pair(key, value);
        }
        ser.finish()
    }

    pub fn filter(&self, key: &str) -> Option<&str> {
        self.filters.get(key).map(String::as_str)
    }

    /// True iff any filter or the search term differs from its default.
    pub fn has_active_filters(&self) -> bool {
        !self.filters.is_empty() || !self.search.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn round_trips_through_query_string() {
        let mut params = ListParams::new(10);
        params.page = 3;
        params.limit = 24;
        params.search = "fx6".into();
        params.filters.insert("isActive".into(), "true".into());

        let reparsed = ListParams::from_query(&params.to_query(10), 10);
        assert_eq!(reparsed, params);
    }

    #[test]
    fn defaults_are_absent_from_query() {
        let params = ListParams::new(10);
        assert_eq!(params.to_query(10), "");
    }

    #[test]
    fn malformed_numbers_fall_back_to_defaults() {
        let params = ListParams::from_query("page=banana&limit=-3", 12);
        assert_eq!(params.page, 1);
        assert_eq!(params.limit, 12);
    }

    #[test]
    fn zero_page_is_rejected() {
        let params = ListParams::from_query("page=0", 10);
        assert_eq!(params.page, 1);
    }

    #[test]
    fn all_sentinel_is_not_a_filter() {
        let params = ListParams::from_query("status=all&locale=en", 10);
        assert_eq!(params.filter("status"), None);
        assert_eq!(params.filter("locale"), Some("en"));
    }

    #[test]
    fn unknown_keys_become_filters() {
        let params = ListParams::from_query("kind=EQUIPMENT&search=mic", 10);
        assert_eq!(params.filter("kind"), Some("EQUIPMENT"));
        assert_eq!(params.search, "mic");
        assert!(params.has_active_filters());
    }

    #[test]
    fn canonical_distinguishes_paging_values() {
        let a = ListParams::from_query("page=2", 10);
        let b = ListParams::from_query("page=3", 10);
        assert_ne!(a.canonical(), b.canonical());

        let c = ListParams::from_query("", 10);
        let d = ListParams::new(10);
        assert_eq!(c.canonical(), d.canonical());
    }

    #[test]
    fn search_values_are_percent_encoded() {
        let mut params = ListParams::new(10);
        params.search = "boom mic & stand".into();

        let query = params.to_query(10);
        let reparsed = ListParams::from_query(&query, 10);
        assert_eq!(reparsed.search, "boom mic & stand");
    }
}
