//! # Core models for seqcheck
//!
//! Shared building blocks for the other seqcheck crates:
//!
//! - [`models::GenomicRange`] and the region resolver that turns a `chrom:pos`
//!   or `chrom:start-end` location into a canonical `chrom:start,end` range.
//! - [`models::BoundaryPolicy`], the switch that decides what happens when a
//!   computed coordinate or window runs below zero.
//! - [`config::SeqCheckConfig`], TOML-backed configuration.
//! - [`utils`], gzip-aware readers.
pub mod config;
pub mod consts;
pub mod errors;
pub mod models;
pub mod utils;

// re-export for cleaner imports
pub use config::SeqCheckConfig;
pub use errors::RegionError;
pub use models::{BoundaryPolicy, GenomicRange, RegionResolver, resolve};
