//! Merge module
//!
//! The merge itself is plain concatenation. Ordering lives in [`SourcePair`]:
//! `first` always precedes `second`, both for the blob names that are
//! downloaded and for the texts that are joined.

use crate::constants::{FIRST_SOURCE_BLOB, MERGED_BLOB, SECOND_SOURCE_BLOB, SEPARATOR};

/// An ordered pair of merge inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePair<T> {
    pub first: T,
    pub second: T,
}

impl<T> SourcePair<T> {
    pub fn new(first: T, second: T) -> Self {
        SourcePair { first, second }
    }
}

impl<T: AsRef<str>> SourcePair<T> {
    /// Join `first` and `second` with a single newline.
    pub fn merge(&self) -> String {
        merge_texts(self.first.as_ref(), self.second.as_ref())
    }
}

/// Concatenate two texts separated by exactly one newline.
///
/// No trimming or line-ending normalization is applied, so a `first` that
/// already ends in `\n` yields a blank line in the output.
pub fn merge_texts(first: &str, second: &str) -> String {
    let mut merged = String::with_capacity(first.len() + SEPARATOR.len() + second.len());
    merged.push_str(first);
    merged.push_str(SEPARATOR);
    merged.push_str(second);
    merged
}

/// Which blobs to read and where to write the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePlan {
    pub sources: SourcePair<String>,
    pub destination: String,
}

impl MergePlan {
    pub fn new(
        first: impl Into<String>,
        second: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        MergePlan {
            sources: SourcePair::new(first.into(), second.into()),
            destination: destination.into(),
        }
    }
}

impl Default for MergePlan {
    fn default() -> Self {
        MergePlan::new(FIRST_SOURCE_BLOB, SECOND_SOURCE_BLOB, MERGED_BLOB)
    }
}
