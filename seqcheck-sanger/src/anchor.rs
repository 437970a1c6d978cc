//! Locate a reference flank inside an observed read.
//!
//! The reference window is split around the variant into an upstream flank
//! (`preseq`) and a downstream flank (`postseq`). The upstream flank is
//! searched first; when it is absent (read errors, ambiguity codes) the
//! downstream flank is tried instead. Matching is exact and the first
//! occurrence wins.

use serde::Serialize;

use seqcheck_core::BoundaryPolicy;

use crate::error::{Result, SangerError};
use crate::iupac;

/// Which flank anchored the read.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AnchorDirection {
    /// Upstream flank found; the variant follows it.
    Forward,
    /// Downstream flank found; the variant precedes it.
    Reverse,
}

///
/// The stretch of the observed read around the variant position.
///
/// Context strings are lower-case and the variant bases upper-case, so the
/// variant stands out in [`SequenceWindow::composite`].
///
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SequenceWindow {
    pub upstream: String,
    pub downstream: String,
    pub reference_base: char,
    /// Raw code found in the read at the variant position.
    pub observed_code: char,
    /// `observed_code` decoded, e.g. `A/G` for `R`.
    pub variant_bases: String,
    /// Offset of the variant position in the observed read.
    pub index: usize,
    pub direction: AnchorDirection,
}

impl SequenceWindow {
    ///
    /// Upstream context, variant bases and downstream context joined,
    /// optionally with dashes around the variant.
    ///
    pub fn composite(&self, dash: bool) -> String {
        let sep = if dash { "-" } else { "" };
        format!(
            "{}{}{}{}{}",
            self.upstream, sep, self.variant_bases, sep, self.downstream
        )
    }
}

///
/// Anchors reference windows in observed reads.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchorer {
    pub upstream_window: usize,
    pub downstream_window: usize,
    /// Applied when a reverse anchor leaves fewer than `upstream_window`
    /// bases before the variant.
    pub policy: BoundaryPolicy,
}

impl Anchorer {
    pub fn new(upstream_window: usize, downstream_window: usize) -> Self {
        Anchorer {
            upstream_window,
            downstream_window,
            policy: BoundaryPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: BoundaryPolicy) -> Self {
        self.policy = policy;
        self
    }

    ///
    /// Find the variant position of `reference` inside `observed`.
    ///
    /// # Arguments
    /// - reference: reference window, any case
    /// - variant_offset: offset of the variant base in `reference`
    /// - observed: the observed read
    ///
    /// Fails with [`SangerError::NoAnchorFound`] when neither flank occurs.
    ///
    pub fn anchor(
        &self,
        reference: &str,
        variant_offset: usize,
        observed: &str,
    ) -> Result<SequenceWindow> {
        let reference = reference.to_ascii_uppercase();
        let reference_base = reference
            .as_bytes()
            .get(variant_offset)
            .map(|b| *b as char)
            .ok_or(SangerError::ReferenceTooShort {
                offset: variant_offset,
                length: reference.len(),
            })?;

        let preseq = &reference[..variant_offset];
        let postseq = &reference[variant_offset + 1..];

        if let Some(start) = observed.find(preseq) {
            log::debug!("Upstream flank anchored at {}", start);
            return self.forward(observed, start, preseq.len(), reference_base);
        }

        if let Some(start) = observed.find(postseq) {
            log::debug!("Downstream flank anchored at {}", start);
            return self.reverse(observed, start, postseq.len(), reference_base);
        }

        Err(SangerError::NoAnchorFound)
    }

    /// Variant sits right after the matched upstream flank.
    fn forward(
        &self,
        observed: &str,
        start: usize,
        flank_len: usize,
        reference_base: char,
    ) -> Result<SequenceWindow> {
        let bytes = observed.as_bytes();
        let index = start + flank_len;
        let code = variant_code(bytes, index as i64)?;

        let downstream_end = (index + 1 + self.downstream_window).min(bytes.len());

        Ok(SequenceWindow {
            upstream: slice_lower(bytes, start, index),
            downstream: slice_lower(bytes, index + 1, downstream_end),
            reference_base,
            observed_code: code.to_ascii_uppercase(),
            variant_bases: iupac::decode(code)?.to_string(),
            index,
            direction: AnchorDirection::Forward,
        })
    }

    /// Variant sits right before the matched downstream flank.
    fn reverse(
        &self,
        observed: &str,
        start: usize,
        flank_len: usize,
        reference_base: char,
    ) -> Result<SequenceWindow> {
        let bytes = observed.as_bytes();
        let code = variant_code(bytes, start as i64 - 1)?;
        let index = start - 1;

        let window_start = index as i64 - self.upstream_window as i64;
        let window_start = self
            .policy
            .bound(window_start, 0)
            .ok_or(SangerError::WindowUnderflow(window_start.unsigned_abs() as usize))?;

        Ok(SequenceWindow {
            upstream: slice_lower_signed(bytes, window_start, index),
            downstream: slice_lower(bytes, start, start + flank_len),
            reference_base,
            observed_code: code.to_ascii_uppercase(),
            variant_bases: iupac::decode(code)?.to_string(),
            index,
            direction: AnchorDirection::Reverse,
        })
    }
}

///
/// Anchor with the default boundary policy.
///
pub fn anchor(
    reference: &str,
    variant_offset: usize,
    observed: &str,
    upstream_window: usize,
    downstream_window: usize,
) -> Result<SequenceWindow> {
    Anchorer::new(upstream_window, downstream_window).anchor(reference, variant_offset, observed)
}

fn variant_code(bytes: &[u8], index: i64) -> Result<char> {
    usize::try_from(index)
        .ok()
        .and_then(|i| bytes.get(i))
        .map(|b| *b as char)
        .ok_or(SangerError::VariantOutOfBounds {
            index,
            length: bytes.len(),
        })
}

fn slice_lower(bytes: &[u8], start: usize, end: usize) -> String {
    String::from_utf8_lossy(&bytes[start..end]).to_ascii_lowercase()
}

///
/// Slice with a possibly negative start. A negative start counts back from
/// the end of the read; an empty string results when that lands at or past
/// `end`.
///
fn slice_lower_signed(bytes: &[u8], start: i64, end: usize) -> String {
    let start = if start < 0 {
        (bytes.len() as i64 + start).max(0) as usize
    } else {
        start as usize
    };

    if start >= end {
        return String::new();
    }
    slice_lower(bytes, start, end)
}
