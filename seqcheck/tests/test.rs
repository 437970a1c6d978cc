use std::path::Path;

use pretty_assertions::assert_eq;
use rstest::*;

use seqcheck::core::{BoundaryPolicy, RegionResolver, SeqCheckConfig};
use seqcheck::refseq::{FastaReference, ReferenceError, ReferenceSource, highlight_position};
use seqcheck::sanger::{Comparison, ObservedSequence, Reconciler};

#[fixture]
fn path_to_fasta() -> &'static str {
    "../tests/data/fasta/mini.fa"
}

#[fixture]
fn path_to_trace() -> &'static str {
    "../tests/data/sanger/sample_01.ab1"
}

mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[rstest]
    fn test_fasta_to_trace(path_to_fasta: &str, path_to_trace: &str) {
        let range = RegionResolver::new(20, 20).resolve("chr15:51").unwrap();
        assert_eq!(range.as_string(), "15:31,71");

        let reference = FastaReference::open(path_to_fasta).unwrap();
        let sequence = reference.fetch(&range).unwrap();
        assert_eq!(
            highlight_position(&sequence, 20),
            "agcctatctcacactcacagCggaacaggccagggaggttg"
        );

        let read = ObservedSequence::load(path_to_trace, None).unwrap();
        let result = Reconciler::new(20, 20)
            .reconcile_observed(&sequence, &read, None)
            .unwrap();

        assert_eq!(result.outcome, Comparison::Different);
        assert_eq!(result.window.variant_bases, "C/T");
        assert_eq!(result.het_call.as_deref(), Some("C/T"));
    }

    #[rstest]
    fn test_config_drives_pipeline(path_to_fasta: &str) {
        let config = SeqCheckConfig::try_from(Path::new("../tests/data/config/seqcheck.toml")).unwrap();
        assert_eq!(config.window_policy, BoundaryPolicy::Clamp);

        // 50 upstream of position 10 clamps to the first base
        let resolver = config.resolver().with_policy(BoundaryPolicy::Clamp);
        let range = resolver.resolve("1:10").unwrap();
        assert_eq!(range.as_string(), "1:1,40");

        let reference = FastaReference::open(path_to_fasta).unwrap();
        assert_eq!(reference.fetch(&range).unwrap().len(), 40);
    }

    #[rstest]
    fn test_unknown_chromosome(path_to_fasta: &str) {
        let range = RegionResolver::default().resolve("7:100").unwrap();
        let reference = FastaReference::open(path_to_fasta).unwrap();
        assert!(matches!(
            reference.fetch(&range),
            Err(ReferenceError::SequenceNotInFasta { .. })
        ));
    }
}
