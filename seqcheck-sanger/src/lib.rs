//! # Sanger read reconciliation
//!
//! Decides whether the base at a variant position in a Sanger read differs
//! from the reference:
//!
//! 1. [`anchor`] finds the reference flank inside the observed read and
//!    pulls out the base at the variant position.
//! 2. [`iupac`] decodes that base, which may be an ambiguity code such as
//!    `R` (A or G).
//! 3. [`compare`] classifies it against the reference base.
//! 4. [`calls`] resolves a heterozygous call from the per-position table a
//!    trace decoder writes next to the `.ab1` file.
//!
//! [`reconcile::Reconciler`] strings these together; [`observed`],
//! [`matcher`] and [`trace`] locate and produce the inputs.
pub mod anchor;
pub mod calls;
pub mod compare;
pub mod consts;
pub mod error;
pub mod iupac;
pub mod matcher;
pub mod observed;
pub mod reconcile;
pub mod trace;

// re-expose core functions
pub use anchor::{AnchorDirection, Anchorer, SequenceWindow, anchor};
pub use calls::{CallTable, PositionCallRecord, extract_het_call};
pub use compare::{Comparison, compare};
pub use error::{Result, SangerError};
pub use matcher::find_best_match;
pub use observed::ObservedSequence;
pub use reconcile::{Reconciler, Reconciliation};
pub use trace::{Ab1BasecallDecoder, ExternalTraceDecoder, TraceDecoder, TraceFiles};
