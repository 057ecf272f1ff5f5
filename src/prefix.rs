//! Prefix function (failure table) construction.
//!
//! `table[i]` is the length of the longest proper prefix of `pattern[..=i]`
//! that is also a suffix of it. Building it costs O(M): the candidate length
//! grows by at most one per advance of the cursor, and every fallback shrinks it.

use serde::Serialize;
use tracing::trace;

use crate::error::{KmpError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PrefixTable {
    entries: Vec<usize>,
}

/// Build the prefix table for `pattern`. An empty pattern yields an empty table.
pub fn build_prefix_table<T: PartialEq>(pattern: &[T]) -> PrefixTable {
    let m = pattern.len();
    let mut entries = vec![0; m];
    let mut len = 0;
    let mut i = 1;

    while i < m {
        if pattern[i] == pattern[len] {
            len += 1;
            entries[i] = len;
            i += 1;
        } else if len != 0 {
            // Reuse the border of the current candidate instead of rescanning.
            len = entries[len - 1];
        } else {
            entries[i] = 0;
            i += 1;
        }
    }

    trace!(pattern_len = m, border = entries.last().copied().unwrap_or(0), "built prefix table");
    PrefixTable { entries }
}

impl PrefixTable {
    pub fn build<T: PartialEq>(pattern: &[T]) -> Self {
        build_prefix_table(pattern)
    }

    /// Wrap externally computed entries, checking `entries[i] <= i` for every
    /// position (which also forces `entries[0] == 0`).
    pub fn from_entries(entries: Vec<usize>) -> Result<Self> {
        if let Some((index, &value)) = entries
            .iter()
            .enumerate()
            .find(|&(index, &value)| value > index)
        {
            return Err(KmpError::MalformedTable { index, value });
        }
        Ok(PrefixTable { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<usize> {
        self.entries.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().copied()
    }

    /// Length of the longest proper border of the whole pattern.
    pub fn border(&self) -> usize {
        self.entries.last().copied().unwrap_or(0)
    }

    /// Where the pattern cursor resumes after `matched` symbols agreed and the
    /// next comparison failed (or the whole pattern matched).
    pub(crate) fn fallback(&self, matched: usize) -> usize {
        self.entries[matched - 1]
    }
}
