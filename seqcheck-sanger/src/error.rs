use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error type for seqcheck-sanger operations.
#[derive(Error, Debug)]
pub enum SangerError {
    /// Character is not one of the 15 IUPAC nucleotide codes.
    #[error("'{0}' is not an IUPAC nucleotide code")]
    UnknownAmbiguityCode(char),

    /// No directory entry contains the query.
    #[error("No file in {} matches '{query}'", .directory.display())]
    NoMatchFound { query: String, directory: PathBuf },

    /// Neither the upstream nor the downstream flank occurs in the read.
    #[error("Neither flank of the reference sequence was found in the observed sequence")]
    NoAnchorFound,

    /// The anchor leaves no base where the variant should be.
    #[error("Variant position {index} lies outside the observed sequence (length {length})")]
    VariantOutOfBounds { index: i64, length: usize },

    /// The variant offset does not fall inside the reference sequence.
    #[error("Variant offset {offset} lies outside the reference sequence (length {length})")]
    ReferenceTooShort { offset: usize, length: usize },

    /// Upstream context would start before the read and the policy rejects it.
    #[error("Upstream window starts {0} bases before the observed sequence")]
    WindowUnderflow(usize),

    /// Call table row that cannot be interpreted.
    #[error("Malformed call table line {line}: {reason}")]
    MalformedCallRecord { line: usize, reason: String },

    /// Trace decoder could not be run or exited unsuccessfully.
    #[error("Trace decoder failed on {}: {reason}", .trace.display())]
    TraceDecoder { trace: PathBuf, reason: String },

    /// Trace decoder finished but the expected file is not there.
    #[error("Expected decoder output {} is missing", .0.display())]
    MissingDecoderOutput(PathBuf),

    /// AB1 file without the expected structure.
    #[error("Invalid AB1 file {}: {reason}", .path.display())]
    InvalidTrace { path: PathBuf, reason: String },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for seqcheck-sanger operations.
pub type Result<T> = std::result::Result<T, SangerError>;
