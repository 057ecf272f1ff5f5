//! Exact pattern search with the Knuth-Morris-Pratt algorithm.
//!
//! [`build_prefix_table`] preprocesses a pattern in O(M); [`search`] scans a
//! text in O(N) with that table and returns every match start (overlapping
//! ones included) along with a trace of the text and pattern pointers.
//!
//! ```
//! use kmp_trace::{build_prefix_table, search};
//!
//! let table = build_prefix_table(b"ABABCABAB");
//! let outcome = search(b"ABABDABACDABABCABAB", b"ABABCABAB", &table).unwrap();
//! assert_eq!(outcome.matches, vec![10]);
//! ```

pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod matcher;
pub mod prefix;
pub mod report;

pub use error::{ErrorKind, KmpError, Result};
pub use matcher::{
    find_all, search, search_with, EmptyPatternPolicy, KmpMatcher, SearchOptions, SearchOutcome,
    TraceMode, TraceStep,
};
pub use prefix::{build_prefix_table, PrefixTable};
