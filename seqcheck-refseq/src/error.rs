use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error type for reference sequence retrieval.
#[derive(Error, Debug)]
pub enum ReferenceError {
    /// Genome assembly name is not one of the supported versions.
    #[error("Human genome version {0} not recognised")]
    UnsupportedGenomeVersion(String),

    /// The source answered but returned no bases for the range.
    #[error("No sequence was found to be associated with {0}")]
    NoSequenceFound(String),

    /// Transport failure or non-2xx response.
    #[error("Request to {url} failed: {reason}")]
    Http { url: String, reason: String },

    /// HTTP support was compiled out.
    #[error("HTTP feature not enabled, cannot fetch {0}")]
    HttpFeatureDisabled(String),

    /// Chromosome missing from the FASTA index.
    #[error("Chromosome {chrom} not found in {}", .path.display())]
    SequenceNotInFasta { chrom: String, path: PathBuf },

    /// Malformed `.fai` line.
    #[error("Invalid FASTA index {}: {reason}", .path.display())]
    InvalidIndex { path: PathBuf, reason: String },

    /// Sequence bytes outside ASCII.
    #[error("Non-ASCII byte in {chrom} of {}", .path.display())]
    NonAsciiSequence { chrom: String, path: PathBuf },

    /// Gzipped FASTA files have no usable byte offsets.
    #[error("Compressed FASTA cannot be randomly accessed: {}", .0.display())]
    CompressedFasta(PathBuf),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Result type alias for reference retrieval.
pub type Result<T> = std::result::Result<T, ReferenceError>;
