//! # Reference sequence retrieval
//!
//! Fetches the reference DNA for a [`GenomicRange`](seqcheck_core::GenomicRange)
//! from one of two sources:
//!
//! - `ucsc` - the UCSC DAS server, over HTTP (requires the `http` feature)
//! - `fasta` - a local genome FASTA, randomly accessed through its `.fai` index
//!
//! Both implement [`ReferenceSource`]. The `sequence` module holds the small
//! string transforms applied to a fetched sequence before display.
//!
//! # Feature Flags
//!
//! - `http` (default): Enables the UCSC DAS client
pub mod error;
pub mod fasta;
pub mod genome;
pub mod sequence;
pub mod source;
pub mod ucsc;

pub use error::{ReferenceError, Result};
pub use fasta::FastaReference;
pub use genome::GenomeVersion;
pub use sequence::{dash_position, highlight_position, reverse_complement};
pub use source::{InMemoryReference, ReferenceSource};
pub use ucsc::UcscDasClient;
