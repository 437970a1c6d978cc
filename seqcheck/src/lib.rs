//! # seqcheck
//!
//! Fetch the reference sequence around a genomic position and check whether
//! a Sanger read carries a different base there.
//!
//! Each part lives in its own crate and is re-exported here behind a cargo
//! feature of the same name:
//!
//! - `core`: genomic ranges, the region resolver and configuration
//! - `refseq`: reference sources (UCSC DAS, local FASTA)
//! - `sanger`: anchoring, IUPAC decoding, comparison and heterozygous calls
//!
//! ```rust,ignore
//! use seqcheck::core::resolve;
//! use seqcheck::refseq::{ReferenceSource, UcscDasClient, GenomeVersion};
//! use seqcheck::sanger::{ObservedSequence, Reconciler};
//!
//! let range = resolve("15:48762884", 20, 20)?;
//! let reference = UcscDasClient::new(GenomeVersion::Hg19).fetch(&range)?;
//! let read = ObservedSequence::load("sample_01.ab1", None)?;
//! let result = Reconciler::new(20, 20).reconcile_observed(&reference, &read, None)?;
//! println!("{}", result.summary());
//! ```
#[cfg(feature = "core")]
#[doc(inline)]
pub use seqcheck_core as core;

#[cfg(feature = "refseq")]
#[doc(inline)]
pub use seqcheck_refseq as refseq;

#[cfg(feature = "sanger")]
#[doc(inline)]
pub use seqcheck_sanger as sanger;
