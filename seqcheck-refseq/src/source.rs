use std::collections::HashMap;

use seqcheck_core::GenomicRange;

use crate::error::{ReferenceError, Result};

/// Trait for providing reference sequence data
///
/// Implementations:
/// - [`UcscDasClient`](crate::UcscDasClient) for the remote UCSC DAS server
/// - [`FastaReference`](crate::FastaReference) for an indexed local FASTA
/// - [`InMemoryReference`] for tests and pre-fetched sequences
pub trait ReferenceSource {
    /// Get the bases covered by `range`, both ends included.
    ///
    /// Fails with [`ReferenceError::NoSequenceFound`] when the source has
    /// nothing for the range.
    fn fetch(&self, range: &GenomicRange) -> Result<String>;

    /// Short human readable name of the source, for logs.
    fn describe(&self) -> String;
}

impl<T: ReferenceSource + ?Sized> ReferenceSource for Box<T> {
    fn fetch(&self, range: &GenomicRange) -> Result<String> {
        (**self).fetch(range)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

///
/// Reference source backed by a map from canonical range strings
/// (`chrom:start,end`) to sequences.
///
#[derive(Debug, Clone, Default)]
pub struct InMemoryReference {
    sequences: HashMap<String, String>,
}

impl InMemoryReference {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sequence(mut self, range: &GenomicRange, sequence: &str) -> Self {
        self.sequences.insert(range.as_string(), sequence.to_string());
        self
    }
}

impl ReferenceSource for InMemoryReference {
    fn fetch(&self, range: &GenomicRange) -> Result<String> {
        self.sequences
            .get(&range.as_string())
            .cloned()
            .ok_or_else(|| ReferenceError::NoSequenceFound(range.as_string()))
    }

    fn describe(&self) -> String {
        format!("in-memory reference ({} ranges)", self.sequences.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn test_in_memory_reference() {
        let range = GenomicRange::new("15", 100, 104).unwrap();
        let source = InMemoryReference::new().with_sequence(&range, "acgta");

        assert_eq!(source.fetch(&range).unwrap(), "acgta");

        let other = GenomicRange::new("15", 200, 204).unwrap();
        assert!(matches!(
            source.fetch(&other),
            Err(ReferenceError::NoSequenceFound(_))
        ));
    }

    #[rstest]
    fn test_boxed_source() {
        let range = GenomicRange::new("1", 1, 2).unwrap();
        let source: Box<dyn ReferenceSource> =
            Box::new(InMemoryReference::new().with_sequence(&range, "ac"));
        assert_eq!(source.fetch(&range).unwrap(), "ac");
    }
}
