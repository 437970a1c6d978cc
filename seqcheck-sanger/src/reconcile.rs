//! One reconciliation request: anchor, decode, compare and, for traces,
//! look up the heterozygous call.

use serde::Serialize;

use seqcheck_core::BoundaryPolicy;

use crate::anchor::{Anchorer, SequenceWindow};
use crate::calls::CallTable;
use crate::compare::{Comparison, compare};
use crate::error::Result;
use crate::observed::ObservedSequence;
use crate::trace::TraceDecoder;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub window: SequenceWindow,
    pub outcome: Comparison,
    /// `None` when no call table was consulted; empty when it holds nothing
    /// at the variant index.
    pub het_call: Option<String>,
}

impl Reconciliation {
    ///
    /// Attach the heterozygous call found at the window's index.
    ///
    pub fn with_het_call(mut self, call_table: &CallTable) -> Self {
        self.het_call = Some(call_table.het_call(self.window.index as i64));
        self
    }

    pub fn summary(&self) -> String {
        self.outcome.to_string()
    }
}

///
/// Reconciles reference windows fetched with `upstream` bases before the
/// variant against observed reads.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reconciler {
    anchorer: Anchorer,
    variant_offset: usize,
}

impl Reconciler {
    pub fn new(upstream: usize, downstream: usize) -> Self {
        Reconciler {
            anchorer: Anchorer::new(upstream, downstream),
            variant_offset: upstream,
        }
    }

    pub fn with_window_policy(mut self, policy: BoundaryPolicy) -> Self {
        self.anchorer = self.anchorer.with_policy(policy);
        self
    }

    ///
    /// Override where the variant sits in the reference window, for windows
    /// whose start was clamped.
    ///
    pub fn with_variant_offset(mut self, offset: usize) -> Self {
        self.variant_offset = offset;
        self
    }

    pub fn anchorer(&self) -> &Anchorer {
        &self.anchorer
    }

    ///
    /// Anchor `reference` in `observed` and compare the variant base.
    ///
    /// The raw observed code is compared, so an ambiguity code never equals
    /// the reference base.
    ///
    pub fn reconcile(&self, reference: &str, observed: &str) -> Result<Reconciliation> {
        let window = self
            .anchorer
            .anchor(reference, self.variant_offset, observed)?;
        let outcome = compare(window.reference_base, window.observed_code);
        log::debug!(
            "{} vs {} at {}: {:?}",
            window.reference_base,
            window.observed_code,
            window.index,
            outcome
        );

        Ok(Reconciliation {
            window,
            outcome,
            het_call: None,
        })
    }

    ///
    /// Reconcile a loaded read and, when it came from a trace, attach the
    /// heterozygous call.
    ///
    /// The call table is decoded on demand when a decoder is given. Without
    /// one an existing table is still used; otherwise the het call is left
    /// empty and a warning logged.
    ///
    pub fn reconcile_observed(
        &self,
        reference: &str,
        observed: &ObservedSequence,
        decoder: Option<&dyn TraceDecoder>,
    ) -> Result<Reconciliation> {
        let reconciliation = self.reconcile(reference, &observed.sequence)?;

        let Some(files) = &observed.trace else {
            return Ok(reconciliation);
        };

        let tab = match decoder {
            Some(decoder) => decoder.ensure_call_table(files)?.to_path_buf(),
            None if files.tab.is_file() => files.tab.clone(),
            None => {
                log::warn!(
                    "No call table for {} and no trace decoder configured",
                    files.trace.display()
                );
                return Ok(reconciliation);
            }
        };

        let table = CallTable::from_path(&tab)?;
        Ok(reconciliation.with_het_call(&table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    use crate::anchor::AnchorDirection;
    use crate::error::SangerError;

    const PRESEQ: &str = "AGCCTATCTCACACTCACAG";
    const POSTSEQ: &str = "GGAACAGGCCAGGGAGGTTG";

    #[fixture]
    fn reference() -> String {
        format!("{}c{}", PRESEQ.to_lowercase(), POSTSEQ.to_lowercase())
    }

    #[rstest]
    fn test_same(reference: String) {
        let observed = format!("{}C{}", PRESEQ, POSTSEQ);
        let result = Reconciler::new(20, 20).reconcile(&reference, &observed).unwrap();

        assert_eq!(result.outcome, Comparison::Same);
        assert_eq!(result.summary(), "the nucleotides given are the SAME");
        assert_eq!(result.het_call, None);
    }

    #[rstest]
    fn test_ambiguity_code_is_different(reference: String) {
        let observed = format!("{}Y{}", PRESEQ, POSTSEQ);
        let result = Reconciler::new(20, 20).reconcile(&reference, &observed).unwrap();

        assert_eq!(result.outcome, Comparison::Different);
        assert_eq!(result.window.variant_bases, "C/T");
        assert_eq!(
            result.window.composite(true),
            format!("{}-C/T-{}", PRESEQ.to_lowercase(), POSTSEQ.to_lowercase())
        );
    }

    #[rstest]
    fn test_reverse_anchor_window_policy(reference: String) {
        // upstream flank broken by a read error, variant at index 3
        let observed = format!("AGGT{}", POSTSEQ);

        let passthrough = Reconciler::new(20, 20).reconcile(&reference, &observed).unwrap();
        assert_eq!(passthrough.window.direction, AnchorDirection::Reverse);
        assert_eq!(passthrough.window.index, 3);
        assert_eq!(passthrough.window.observed_code, 'T');

        let clamped = Reconciler::new(20, 20)
            .with_window_policy(BoundaryPolicy::Clamp)
            .reconcile(&reference, &observed)
            .unwrap();
        assert_eq!(clamped.window.upstream, "agg");

        let rejected = Reconciler::new(20, 20)
            .with_window_policy(BoundaryPolicy::Reject)
            .reconcile(&reference, &observed);
        assert!(matches!(rejected, Err(SangerError::WindowUnderflow(17))));
    }

    #[rstest]
    fn test_clamped_window_offset() {
        // window clamped at the chromosome start: only 5 bases upstream
        let reference = format!("{}c{}", &PRESEQ[15..], POSTSEQ);
        let observed = format!("{}T{}", &PRESEQ[15..], POSTSEQ);
        let result = Reconciler::new(20, 20)
            .with_variant_offset(5)
            .reconcile(&reference, &observed)
            .unwrap();

        assert_eq!(result.window.index, 5);
        assert_eq!(result.outcome, Comparison::Different);
    }

    #[rstest]
    fn test_no_anchor(reference: String) {
        let result = Reconciler::new(20, 20).reconcile(&reference, "ACGTACGTACGT");
        assert!(matches!(result, Err(SangerError::NoAnchorFound)));
    }

    #[rstest]
    fn test_trace_het_call(reference: String) {
        let observed = ObservedSequence::load("../tests/data/sanger/sample_01.ab1", None).unwrap();
        let result = Reconciler::new(20, 20)
            .reconcile_observed(&reference, &observed, None)
            .unwrap();

        assert_eq!(result.window.index, 20);
        assert_eq!(result.outcome, Comparison::Different);
        assert_eq!(result.het_call.as_deref(), Some("C/T"));
    }

    #[rstest]
    fn test_plain_file_has_no_het_call(reference: String) {
        let observed = ObservedSequence::load("../tests/data/sanger/sample_02.seq", None).unwrap();
        let result = Reconciler::new(20, 20)
            .reconcile_observed(&reference, &observed, None)
            .unwrap();

        assert_eq!(result.window.index, 24);
        assert_eq!(result.outcome, Comparison::Same);
        assert_eq!(result.het_call, None);
    }
}
