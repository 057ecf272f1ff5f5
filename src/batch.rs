//! Parallel search of many independent texts with one shared matcher.
//!
//! Each search only reads the matcher and its own text, so rayon can fan the
//! texts out across its pool with no coordination. Results keep input order.

use rayon::prelude::*;
use tracing::debug;

use crate::error::Result;
use crate::matcher::{KmpMatcher, SearchOptions, SearchOutcome};

pub fn search_many<T, S>(matcher: &KmpMatcher<T>, texts: &[S]) -> Vec<Vec<usize>>
where
    T: PartialEq + Sync,
    S: AsRef<[T]> + Sync,
{
    debug!(texts = texts.len(), "batch search");
    texts
        .par_iter()
        .map(|text| matcher.find_all(text.as_ref()))
        .collect()
}

/// Like [`search_many`] but keeps traces. The first error aborts the batch.
pub fn search_many_with<T, S>(
    matcher: &KmpMatcher<T>,
    texts: &[S],
    options: SearchOptions,
) -> Result<Vec<SearchOutcome>>
where
    T: PartialEq + Sync,
    S: AsRef<[T]> + Sync,
{
    debug!(texts = texts.len(), ?options, "batch search with trace");
    texts
        .par_iter()
        .map(|text| matcher.search(text.as_ref(), options))
        .collect()
}
