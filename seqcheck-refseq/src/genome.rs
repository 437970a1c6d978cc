use std::fmt::{self, Display};
use std::str::FromStr;

use crate::error::ReferenceError;

///
/// Human genome assemblies served by the UCSC DAS server.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenomeVersion {
    Hg16,
    Hg17,
    Hg18,
    Hg19,
    Hg38,
}

impl GenomeVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenomeVersion::Hg16 => "hg16",
            GenomeVersion::Hg17 => "hg17",
            GenomeVersion::Hg18 => "hg18",
            GenomeVersion::Hg19 => "hg19",
            GenomeVersion::Hg38 => "hg38",
        }
    }
}

impl Display for GenomeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GenomeVersion {
    type Err = ReferenceError;

    /// Accepts UCSC names and the GRCh37/GRCh38 aliases, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hg16" => Ok(GenomeVersion::Hg16),
            "hg17" => Ok(GenomeVersion::Hg17),
            "hg18" => Ok(GenomeVersion::Hg18),
            "hg19" | "grch37" => Ok(GenomeVersion::Hg19),
            "hg38" | "grch38" => Ok(GenomeVersion::Hg38),
            _ => Err(ReferenceError::UnsupportedGenomeVersion(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("hg19", GenomeVersion::Hg19)]
    #[case("HG38", GenomeVersion::Hg38)]
    #[case("GRCh37", GenomeVersion::Hg19)]
    #[case("grch38", GenomeVersion::Hg38)]
    #[case("hg16", GenomeVersion::Hg16)]
    fn test_parse_genome_version(#[case] name: &str, #[case] expected: GenomeVersion) {
        assert_eq!(name.parse::<GenomeVersion>().unwrap(), expected);
    }

    #[rstest]
    #[case("hg1")]
    #[case("mm10")]
    #[case("")]
    fn test_unsupported_genome_version(#[case] name: &str) {
        let result = name.parse::<GenomeVersion>();
        assert!(matches!(result, Err(ReferenceError::UnsupportedGenomeVersion(_))));
    }

    #[rstest]
    fn test_display_round_trips_to_ucsc_name() {
        assert_eq!(GenomeVersion::Hg38.to_string(), "hg38");
    }
}
