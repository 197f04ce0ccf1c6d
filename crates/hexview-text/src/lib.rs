#![forbid(unsafe_code)]

//! Search over the viewer's byte buffer.
//!
//! [`encoding`] turns a query into the byte sequences it may appear as;
//! [`search`] scans for them and tracks the selected result.

pub mod encoding;
pub mod search;

pub use encoding::{Encoding, SearchKind, SearchMode, TextSpan, candidates, parse_offset};
pub use search::{SearchResult, SearchState, scan};
