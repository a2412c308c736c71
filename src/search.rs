//! Query matching and response shaping.
//!
//! [`search`] is a pure function of the record slice and the raw query. It
//! lower-cases both the query and every candidate field before comparing, keeps
//! matches in collection order, and never copies a record: the response
//! borrows from the collection it was computed over.

use crate::record::Record;
use serde::Serialize;

/// Collections at or above this size are filtered in parallel when the
/// `parallel` feature is enabled.
#[cfg(feature = "parallel")]
pub const PARALLEL_THRESHOLD: usize = 4096;

/// Payload returned for a successful search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResponse<'a> {
    /// Matching records, in collection order.
    pub results: Vec<&'a Record>,
    /// Always `results.len()`.
    pub count: usize,
    /// The query exactly as received; omitted when no query was supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl<'a> SearchResponse<'a> {
    fn new(results: Vec<&'a Record>, query: Option<&str>) -> Self {
        Self {
            count: results.len(),
            results,
            query: query.map(str::to_owned),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Lower-case a raw query for comparison against lower-cased field text.
pub fn normalize_query(raw: &str) -> String {
    raw.to_lowercase()
}

/// Filter `records` down to those with at least one field containing `query`,
/// ignoring case.
///
/// An absent query behaves like the empty string and matches everything; the
/// difference only shows in whether `query` is echoed back.
pub fn search<'a>(records: &'a [Record], query: Option<&str>) -> SearchResponse<'a> {
    let needle = normalize_query(query.unwrap_or_default());
    SearchResponse::new(filter(records, &needle), query)
}

#[cfg(not(feature = "parallel"))]
fn filter<'a>(records: &'a [Record], needle: &str) -> Vec<&'a Record> {
    records.iter().filter(|r| r.matches(needle)).collect()
}

#[cfg(feature = "parallel")]
fn filter<'a>(records: &'a [Record], needle: &str) -> Vec<&'a Record> {
    use rayon::prelude::*;

    if records.len() < PARALLEL_THRESHOLD {
        return records.iter().filter(|r| r.matches(needle)).collect();
    }
    // rayon collects into a Vec in source order.
    records.par_iter().filter(|r| r.matches(needle)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Vec<Record> {
        serde_json::from_value(json!([
            {"name": "Alice", "city": "Reno"},
            {"name": "Bob", "city": "ALBANY"}
        ]))
        .unwrap()
    }

    #[test]
    fn partial_match_across_fields() {
        let records = sample();
        let resp = search(&records, Some("al"));
        assert_eq!(resp.count, 2);
        assert_eq!(resp.results.len(), 2);
    }

    #[test]
    fn empty_query_returns_everything() {
        let records = sample();
        let resp = search(&records, Some(""));
        assert_eq!(resp.count, 2);
        assert_eq!(resp.query.as_deref(), Some(""));
    }

    #[test]
    fn absent_query_returns_everything_without_echo() {
        let records = sample();
        let resp = search(&records, None);
        assert_eq!(resp.count, 2);
        assert!(resp.query.is_none());
    }

    #[test]
    fn no_match_is_empty() {
        let records = sample();
        let resp = search(&records, Some("zzz"));
        assert!(resp.is_empty());
        assert_eq!(resp.count, 0);
    }

    #[test]
    fn upper_case_query_matches_lower_case_field() {
        let records = sample();
        let resp = search(&records, Some("RENO"));
        assert_eq!(resp.count, 1);
        assert_eq!(resp.results[0], &records[0]);
        assert_eq!(resp.query.as_deref(), Some("RENO"));
    }

    #[test]
    fn empty_collection_yields_empty_results() {
        let resp = search(&[], Some("anything"));
        assert_eq!(resp.count, 0);
    }

    #[test]
    fn duplicates_are_kept() {
        let mut records = sample();
        records.push(records[0].clone());
        let resp = search(&records, Some("alice"));
        assert_eq!(resp.count, 2);
    }

    #[test]
    fn serializes_query_only_when_present() {
        let records = sample();
        let with = serde_json::to_value(search(&records, Some("bob"))).unwrap();
        assert_eq!(
            with,
            json!({"results": [{"name": "Bob", "city": "ALBANY"}], "count": 1, "query": "bob"})
        );

        let without = serde_json::to_value(search(&records, None)).unwrap();
        assert!(without.get("query").is_none());
        assert_eq!(without["count"], 2);
    }
}
