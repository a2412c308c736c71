//! Case-insensitive substring search over a static record collection.
//!
//! This crate is the transport-free core of the friends API:
//!
//! - [`Record`]: one flat JSON object, matched on every field it carries.
//! - [`RecordSet`]: the collection, loaded once and shared read-only.
//! - [`search`]: the pure filter that turns a query into a [`SearchResponse`].
//!
//! The HTTP layer, fault injection, and configuration live in the `server`
//! crate under `crates/server`.
//!
//! # Example
//!
//! ```
//! use friendfinder::{search, RecordSet};
//!
//! let set = RecordSet::from_json_str(
//!     r#"[{"name": "Alice", "city": "Reno"}, {"name": "Bob", "city": "ALBANY"}]"#,
//! )
//! .unwrap();
//!
//! let resp = search(set.records(), Some("al"));
//! assert_eq!(resp.count, 2);
//!
//! let resp = search(set.records(), Some("RENO"));
//! assert_eq!(resp.count, 1);
//! ```

pub mod dataset;
pub mod error;
pub mod record;
pub mod search;

pub use dataset::RecordSet;
pub use error::DataError;
pub use record::Record;
pub use search::{normalize_query, search, SearchResponse};

#[cfg(feature = "parallel")]
pub use search::PARALLEL_THRESHOLD;
